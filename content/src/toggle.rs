use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlElement;

use crate::app::{self, ContentApp};
use crate::config::TOGGLE_ID;
use crate::dom;
use crate::fetcher;

const TOGGLE_STYLE: &str = "position:fixed;top:15px;left:50%;transform:translateX(-50%);z-index:10001;padding:10px 20px;color:#fff;border-radius:30px;border:none;font-weight:bold;cursor:pointer;box-shadow:0 4px 15px rgba(0,0,0,.3);";

fn paint(button: &HtmlElement, friends_only: bool) {
    let (label, background) = if friends_only {
        ("Show all users", "#007bff")
    } else {
        ("Show friends only", "#6c757d")
    };
    button.set_inner_text(label);
    let _ = button.style().set_property("background", background);
}

async fn on_toggle(app: Rc<ContentApp>, button: HtmlElement) {
    if app.is_friends_only() {
        app.session.borrow_mut().deactivate();
        paint(&button, false);
        // Native rows carry our inline styles; a reload is the clean way back.
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
        return;
    }

    let epoch = app.session.borrow_mut().activate_friends_only();
    paint(&button, true);
    web_sys::console::info_1(&format!("friends_only_activated epoch={epoch}").into());
    app::refresh(Rc::clone(&app)).await;
    fetcher::start(&app);
}

/// The floating mode switch. Owns its click handler.
pub struct ToggleBinding {
    button: HtmlElement,
    _on_click: Closure<dyn Fn()>,
}

impl ToggleBinding {
    pub fn install(app: &Rc<ContentApp>) -> Option<Self> {
        let document = dom::document()?;
        if let Some(stale) = document.get_element_by_id(TOGGLE_ID) {
            stale.remove();
        }
        let button = document
            .create_element("button")
            .ok()?
            .dyn_into::<HtmlElement>()
            .ok()?;
        button.set_id(TOGGLE_ID);
        let _ = button.set_attribute("style", TOGGLE_STYLE);
        paint(&button, app.is_friends_only());

        let on_click = {
            let app = Rc::clone(app);
            let button = button.clone();
            Closure::<dyn Fn()>::new(move || {
                spawn_local(on_toggle(Rc::clone(&app), button.clone()));
            })
        };
        button.set_onclick(Some(on_click.as_ref().unchecked_ref()));
        document.body()?.append_child(&button).ok()?;

        Some(Self {
            button,
            _on_click: on_click,
        })
    }
}

impl Drop for ToggleBinding {
    fn drop(&mut self) {
        self.button.set_onclick(None);
    }
}
