//! Browser-backed storage and object URLs

use folio_editor::{FileUpload, ObjectUrlFactory, Storage, StorageError};
use folio_parser::LINK_PLACEHOLDER;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = getItem)]
    fn local_get_item(key: &str) -> Result<Option<String>, JsValue>;

    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = setItem)]
    fn local_set_item(key: &str, value: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = localStorage, js_name = removeItem)]
    fn local_remove_item(key: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(js_namespace = URL, js_name = createObjectURL)]
    fn create_object_url(file: &JsValue) -> String;
}

fn unavailable(key: &str, error: JsValue) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: error
            .as_string()
            .unwrap_or_else(|| "localStorage unavailable".to_string()),
    }
}

/// `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

impl Storage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        local_get_item(key).map_err(|e| unavailable(key, e))
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        local_set_item(key, value).map_err(|e| unavailable(key, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        local_remove_item(key).map_err(|e| unavailable(key, e))
    }
}

/// `File` objects picked in the page, keyed by upload handle
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: HashMap<String, JsValue>,
    next: u64,
}

impl FileRegistry {
    /// Hold on to `file` until it is released
    pub fn register(&mut self, file: JsValue) -> String {
        self.next += 1;
        let handle = format!("file-{}", self.next);
        self.files.insert(handle.clone(), file);
        handle
    }

    pub fn release(&mut self, handle: &str) -> bool {
        self.files.remove(handle).is_some()
    }

    /// Drop every file except `keep`; returns how many were dropped
    pub fn release_all_except(&mut self, keep: Option<&str>) -> usize {
        let before = self.files.len();
        self.files.retain(|handle, _| Some(handle.as_str()) == keep);
        let released = before - self.files.len();
        if released > 0 {
            debug!(released, "released picked files");
        }
        released
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Mints `blob:` URLs through `URL.createObjectURL`
#[derive(Debug, Clone, Default)]
pub struct BrowserUrls {
    registry: Rc<RefCell<FileRegistry>>,
}

impl BrowserUrls {
    pub fn new(registry: Rc<RefCell<FileRegistry>>) -> Self {
        Self { registry }
    }
}

impl ObjectUrlFactory for BrowserUrls {
    fn create(&mut self, upload: &FileUpload) -> String {
        match self.registry.borrow().files.get(&upload.handle) {
            Some(file) => create_object_url(file),
            None => {
                warn!(handle = %upload.handle, "no file registered for upload");
                LINK_PLACEHOLDER.to_string()
            }
        }
    }
}
