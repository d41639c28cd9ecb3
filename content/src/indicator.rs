use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use omc_friends_shared::FetchStatus;

use crate::config::INDICATOR_ID;
use crate::dom;

const INDICATOR_STYLE: &str = "position:fixed;bottom:20px;right:20px;color:#fff;padding:10px 15px;border-radius:5px;z-index:10000;font-family:sans-serif;box-shadow:0 2px 10px rgba(0,0,0,.2);";

fn find_or_create() -> Option<HtmlElement> {
    let document = dom::document()?;
    if let Some(existing) = document.get_element_by_id(INDICATOR_ID) {
        return existing.dyn_into::<HtmlElement>().ok();
    }
    let element = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    element.set_id(INDICATOR_ID);
    let _ = element.set_attribute("style", INDICATOR_STYLE);
    document.body()?.append_child(&element).ok()?;
    Some(element)
}

pub fn show(status: FetchStatus) {
    let Some(element) = find_or_create() else {
        return;
    };
    element.set_text_content(Some(&status.label()));
    let _ = element.style().set_property("background", status.background());
}

pub fn remove() {
    if let Some(element) = dom::document().and_then(|d| d.get_element_by_id(INDICATOR_ID)) {
        element.remove();
    }
}

/// Show the settled state and remove it after `dismiss_ms`, or remove at once.
pub fn settle(status: Option<FetchStatus>, dismiss_ms: u32) {
    let Some(status) = status else {
        remove();
        return;
    };
    show(status);
    if !status.auto_dismiss() {
        return;
    }
    let label = status.label();
    Timeout::new(dismiss_ms, move || {
        // A newer fetch may have taken over the indicator in the meantime.
        let Some(element) = dom::document().and_then(|d| d.get_element_by_id(INDICATOR_ID)) else {
            return;
        };
        if element.text_content().as_deref() == Some(label.as_str()) {
            element.remove();
        }
    })
    .forget();
}
