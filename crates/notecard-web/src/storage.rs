use notecard_core::{Error, KeyValueStore};
use wasm_bindgen::JsValue;
use web_sys::{Storage, Window};

/// [`KeyValueStore`] over the window's `localStorage`.
#[derive(Clone)]
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }

    pub fn from_window(window: &Window) -> Result<Self, JsValue> {
        let storage = window
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage is unavailable"))?;
        Ok(Self::new(storage))
    }
}

fn storage_error(action: &str, key: &str, e: JsValue) -> Error {
    Error::Storage(format!("Failed to {} {}: {:?}", action, key, e))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.storage
            .get_item(key)
            .map_err(|e| storage_error("read", key, e))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.storage
            .set_item(key, value)
            .map_err(|e| storage_error("write", key, e))
    }
}
