use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use omc_friends_shared::parse_friend_list;

use crate::chrome;

/// Extension popup: edit the friend list, one username per line.
#[component]
pub fn Popup() -> impl IntoView {
    let text: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let saving: RwSignal<bool> = RwSignal::new(false);

    spawn_local(async move {
        match chrome::load_raw_friends().await {
            Ok(list) => text.set(list.join("\n")),
            Err(e) => error.set(Some(e.to_string())),
        }
    });

    let on_save = move |_: web_sys::MouseEvent| {
        if saving.get_untracked() {
            return;
        }
        saving.set(true);
        let list = parse_friend_list(&text.get_untracked());
        spawn_local(async move {
            if let Err(e) = chrome::save_friends(&list).await {
                error.set(Some(e.to_string()));
                saving.set(false);
                return;
            }
            if let Err(e) = chrome::reload_active_tab().await {
                web_sys::console::warn_1(&format!("active_tab_reload_failed: {e}").into());
            }
            if let Some(window) = web_sys::window() {
                let _ = window.close();
            }
        });
    };

    view! {
        <div class="omc-popup" style="width:240px;font-family:sans-serif;padding:8px;">
            <h3 style="margin:0 0 6px;">"OMC Friends"</h3>
            <p style="margin:0 0 6px;font-size:0.8rem;color:#666;">"One username per line"</p>
            <textarea
                id="list"
                rows="12"
                style="width:100%;box-sizing:border-box;"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            ></textarea>
            <button id="saveBtn" style="margin-top:6px;width:100%;" disabled=move || saving.get() on:click=on_save>
                "Save"
            </button>
            {move || {
                error
                    .get()
                    .map(|message| {
                        view! { <p style="color:#dc3545;font-size:0.8rem;">{message}</p> }
                    })
            }}
        </div>
    }
}
