//! `localStorage`-backed draft storage.
use crate::dom;
use padel_core::{DraftStorage, StorageError};
use wasm_bindgen::JsValue;

/// Browser `localStorage`. Scoped to the device; drafts are not synced and
/// two tabs editing the same draft overwrite each other, last write wins.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

fn handle() -> Result<web_sys::Storage, StorageError> {
    dom::local_storage().map_err(|e| StorageError::Unavailable(dom::js_error_message(&e)))
}

#[allow(clippy::needless_pass_by_value)]
fn backend(err: JsValue) -> StorageError {
    StorageError::Backend(dom::js_error_message(&err))
}

impl DraftStorage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        handle()?.get_item(key).map_err(backend)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        handle()?.set_item(key, value).map_err(backend)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        handle()?.remove_item(key).map_err(backend)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let storage = handle()?;
        let len = storage.length().map_err(backend)?;
        Ok((0..len)
            .filter_map(|idx| storage.key(idx).ok().flatten())
            .collect())
    }
}
