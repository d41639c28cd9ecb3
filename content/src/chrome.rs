//! Bridge to the `chrome.*` extension APIs through `js_sys::Reflect`.
//!
//! Every entry point first checks that the extension runtime is still
//! reachable; a page can outlive the extension that injected this script.

use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use omc_friends_shared::{FriendSet, StoreError};

use crate::config::{ContentConfig, FRIENDS_KEY, SETTINGS_KEY};

fn chrome_root() -> Option<JsValue> {
    Reflect::get(&js_sys::global(), &JsValue::from_str("chrome"))
        .ok()
        .filter(JsValue::is_object)
}

/// `chrome.runtime.id` is only defined while the extension context is alive.
pub fn context_valid() -> bool {
    let Some(chrome) = chrome_root() else {
        return false;
    };
    let Ok(runtime) = Reflect::get(&chrome, &JsValue::from_str("runtime")) else {
        return false;
    };
    if !runtime.is_object() {
        return false;
    }
    Reflect::get(&runtime, &JsValue::from_str("id"))
        .map(|id| !id.is_undefined() && !id.is_null())
        .unwrap_or(false)
}

fn js_error(value: JsValue) -> StoreError {
    let message = value
        .as_string()
        .or_else(|| {
            Reflect::get(&value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"));
    if message.contains("context invalidated") {
        StoreError::ContextInvalidated
    } else {
        StoreError::Js(message)
    }
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, StoreError> {
    Reflect::get(target, &JsValue::from_str(key)).map_err(js_error)
}

fn namespace(path: &[&str]) -> Result<JsValue, StoreError> {
    if !context_valid() {
        return Err(StoreError::ContextInvalidated);
    }
    let mut current = chrome_root().ok_or(StoreError::ContextInvalidated)?;
    for key in path {
        current = get(&current, key)?;
        if !current.is_object() {
            return Err(StoreError::Js(format!("chrome.{} is unavailable", path.join("."))));
        }
    }
    Ok(current)
}

/// Call a promise-returning extension API method and await it.
async fn call(target: &JsValue, method: &str, arg: &JsValue) -> Result<JsValue, StoreError> {
    let function: Function = get(target, method)?
        .dyn_into()
        .map_err(|_| StoreError::Js(format!("{method} is not a function")))?;
    let promise: Promise = function
        .call1(target, arg)
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| StoreError::Js(format!("{method} did not return a promise")))?;
    JsFuture::from(promise).await.map_err(js_error)
}

async fn read_key<T: DeserializeOwned>(key: &str) -> Result<Option<T>, StoreError> {
    let local = namespace(&["storage", "local"])?;
    let keys = Array::of1(&JsValue::from_str(key));
    let result = call(&local, "get", &keys).await?;
    let value = get(&result, key)?;
    if value.is_undefined() || value.is_null() {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

async fn write_key<T: Serialize>(key: &str, value: &T) -> Result<(), StoreError> {
    let local = namespace(&["storage", "local"])?;
    let value = serde_wasm_bindgen::to_value(value).map_err(|e| StoreError::Decode(e.to_string()))?;
    let items = Object::new();
    Reflect::set(&items, &JsValue::from_str(key), &value).map_err(js_error)?;
    call(&local, "set", &items).await?;
    Ok(())
}

/// Raw persisted friend names, as typed by the user.
pub async fn load_raw_friends() -> Result<Vec<String>, StoreError> {
    Ok(read_key::<Vec<String>>(FRIENDS_KEY).await?.unwrap_or_default())
}

/// Normalized friend set; empty when storage is unreachable.
pub async fn load_friends() -> FriendSet {
    match load_raw_friends().await {
        Ok(list) => FriendSet::from_raw(list.as_slice()),
        Err(StoreError::ContextInvalidated) => FriendSet::default(),
        Err(e) => {
            web_sys::console::warn_1(&format!("friend_list_read_failed: {e}").into());
            FriendSet::default()
        }
    }
}

pub async fn save_friends(list: &[String]) -> Result<(), StoreError> {
    write_key(FRIENDS_KEY, &list).await
}

pub async fn load_config() -> ContentConfig {
    match read_key::<ContentConfig>(SETTINGS_KEY).await {
        Ok(Some(config)) => config.sanitized(),
        Ok(None) | Err(StoreError::ContextInvalidated) => ContentConfig::default(),
        Err(e) => {
            web_sys::console::warn_1(&format!("settings_read_failed: {e}; using defaults").into());
            ContentConfig::default()
        }
    }
}

/// Reload the focused tab so its content script picks up an edited list.
pub async fn reload_active_tab() -> Result<(), StoreError> {
    let tabs = namespace(&["tabs"])?;
    let query = Object::new();
    Reflect::set(&query, &JsValue::from_str("active"), &JsValue::TRUE).map_err(js_error)?;
    Reflect::set(&query, &JsValue::from_str("currentWindow"), &JsValue::TRUE).map_err(js_error)?;

    let found = call(&tabs, "query", &query).await?;
    let first = Array::from(&found).get(0);
    if first.is_undefined() {
        return Ok(());
    }
    let id = get(&first, "id")?;
    call(&tabs, "reload", &id).await?;
    Ok(())
}
