//! `localStorage` backed store.

use shopfront_cart::{KeyValueStore, StorageError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

use crate::dom::js_error_message;

/// `window.localStorage`, or nothing when the browser denies access.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage, StorageError> {
        self.storage
            .as_ref()
            .ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".to_string()))
    }
}

fn unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(js_error_message(&err))
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(unavailable)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(|err| {
            let quota = err
                .dyn_ref::<DomException>()
                .is_some_and(|e| e.name() == "QuotaExceededError");
            if quota {
                StorageError::QuotaExceeded {
                    key: key.to_string(),
                }
            } else {
                unavailable(err)
            }
        })
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(unavailable)
    }
}
