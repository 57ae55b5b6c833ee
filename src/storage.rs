//! Browser LocalStorage access
//!
//! Every persisted blob is JSON under its own key. Native builds have no
//! storage: reads find nothing and writes are dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(target_arch = "wasm32")]
pub fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

/// Returns false when storage is unavailable or full
#[cfg(target_arch = "wasm32")]
pub fn write(key: &str, value: &str) -> bool {
    local_storage().is_some_and(|s| s.set_item(key, value).is_ok())
}

#[cfg(target_arch = "wasm32")]
pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read(_key: &str) -> Option<String> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub fn write(key: &str, _value: &str) -> bool {
    log::debug!("No storage on native, dropping '{}'", key);
    false
}

#[cfg(not(target_arch = "wasm32"))]
pub fn remove(_key: &str) {}

/// Read and parse a stored value; entries that fail to parse are ignored
pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = read(key)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring stored '{}': {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) -> bool {
    match serde_json::to_string(value) {
        Ok(json) => write(key, &json),
        Err(e) => {
            log::warn!("Could not serialize '{}': {}", key, e);
            false
        }
    }
}
