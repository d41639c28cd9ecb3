//! Friends filter for contest standings pages, compiled to wasm and loaded
//! by the extension as a content script and as the popup.

mod app;
mod chrome;
mod config;
mod dom;
mod fetcher;
mod indicator;
mod observer;
mod popup;
mod stars;
mod toggle;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::app::ContentApp;
use crate::config::ContentConfig;
use crate::observer::ContentScript;

thread_local! {
    static CONTENT_SCRIPT: RefCell<Option<Rc<ContentScript>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
}

fn boot(config: ContentConfig) {
    let script = ContentScript::new(ContentApp::new(config));
    script.start();
    CONTENT_SCRIPT.with(move |slot| {
        // A second injection into the same page replaces the first session.
        let _old = slot.borrow_mut().replace(script);
    });
}

/// Entry point for the content script loader.
#[wasm_bindgen]
pub fn start_content_script() {
    spawn_local(async {
        let config = chrome::load_config().await;
        let Some(document) = dom::document() else {
            return;
        };
        if document.body().is_some() {
            boot(config);
            return;
        }
        let on_ready = Closure::once_into_js(move || boot(config));
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref());
    });
}

/// Entry point for the popup page.
#[wasm_bindgen]
pub fn start_popup() {
    leptos::mount::mount_to_body(popup::Popup);
}
