use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlElement, MouseEvent};

use omc_friends_shared::{FriendSet, StarToggle, StoreError, toggle_friend};

use crate::app::{self, ContentApp};
use crate::chrome;
use crate::config::{STANDINGS_LINK_SELECTOR, STAR_CLASS, STAR_NAME_ATTR};
use crate::dom;
use crate::fetcher;

const STAR_STYLE: &str = "cursor:pointer;margin-left:8px;font-weight:bold;";

fn star_glyph(is_friend: bool) -> (&'static str, &'static str) {
    if is_friend {
        (" ⭐", "#f1c40f")
    } else {
        (" ☆", "#ccc")
    }
}

fn update_star(star: &HtmlElement, name: &str, is_friend: bool) {
    let (glyph, color) = star_glyph(is_friend);
    // Rewriting identical text would queue a childList mutation and wake the
    // observer for nothing.
    if star.text_content().as_deref() != Some(glyph) {
        star.set_text_content(Some(glyph));
    }
    if star.get_attribute(STAR_NAME_ATTR).as_deref() != Some(name) {
        let _ = star.set_attribute(STAR_NAME_ATTR, name);
    }
    let _ = star.style().set_property("color", color);
}

fn create_star(document: &Document, link: &Element, name: &str, is_friend: bool) {
    let Some(star) = document
        .create_element("span")
        .ok()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };
    star.set_class_name(STAR_CLASS);
    let _ = star.set_attribute("style", STAR_STYLE);
    update_star(&star, name, is_friend);
    let _ = link.append_child(&star);
}

/// Give every user link in the standings exactly one star reflecting `friends`.
pub fn annotate(friends: &FriendSet) {
    let Some(document) = dom::document() else {
        return;
    };
    for link in dom::query_all::<Element>(&document, STANDINGS_LINK_SELECTOR) {
        let name = dom::link_key(&link);
        if name.is_empty() {
            continue;
        }
        let is_friend = friends.contains(&name);
        let existing = link
            .query_selector(&format!(".{STAR_CLASS}"))
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        match existing {
            Some(star) => update_star(&star, &name, is_friend),
            None => create_star(&document, &link, &name, is_friend),
        }
    }
}

async fn toggle_star(app: Rc<ContentApp>, name: String) -> Result<(), StoreError> {
    if !chrome::context_valid() {
        return Ok(());
    }
    let list = chrome::load_raw_friends().await?;
    let toggled = toggle_friend(&list, &name);
    if let StarToggle::Removed(_) = &toggled {
        app.session.borrow_mut().forget_friend(&name);
    }
    chrome::save_friends(&toggled.into_list()).await?;

    app::refresh(Rc::clone(&app)).await;
    if app.is_friends_only() {
        fetcher::start(&app);
    }
    Ok(())
}

/// Document-level capture listener serving every star, injected rows included.
pub struct StarClickBinding {
    document: Document,
    handler: Closure<dyn Fn(MouseEvent)>,
}

impl StarClickBinding {
    pub fn install(app: &Rc<ContentApp>) -> Option<Self> {
        let document = dom::document()?;
        let app = Rc::clone(app);
        let handler = Closure::<dyn Fn(MouseEvent)>::new(move |event: MouseEvent| {
            let Some(star) = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&format!(".{STAR_CLASS}")).ok().flatten())
            else {
                return;
            };
            event.prevent_default();
            event.stop_propagation();
            let Some(name) = star.get_attribute(STAR_NAME_ATTR) else {
                return;
            };
            let app = Rc::clone(&app);
            spawn_local(async move {
                match toggle_star(app, name).await {
                    Ok(()) | Err(StoreError::ContextInvalidated) => {}
                    Err(e) => {
                        web_sys::console::warn_1(&format!("star_toggle_failed: {e}").into());
                    }
                }
            });
        });
        document
            .add_event_listener_with_callback_and_bool(
                "click",
                handler.as_ref().unchecked_ref(),
                true,
            )
            .ok()?;
        Some(Self { document, handler })
    }
}

impl Drop for StarClickBinding {
    fn drop(&mut self) {
        let _ = self.document.remove_event_listener_with_callback_and_bool(
            "click",
            self.handler.as_ref().unchecked_ref(),
            true,
        );
    }
}
