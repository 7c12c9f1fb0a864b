//! # Storage boundary
//!
//! The document and the admin secret live in a flat string key-value store
//! shaped like the browser's `localStorage`. Hosts provide the backing:
//!
//! - [`MemoryStorage`]: in-process map, shared between clones
//! - [`FileStorage`]: one file per key under a directory (CLI)
//! - `BrowserStorage` in the wasm host
//!
//! The fallback document is fetched by the host before loading; a
//! [`FallbackSource`] only hands over what was fetched.

use crate::errors::StorageError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;

/// Key holding the serialized document
pub const DOCUMENT_KEY: &str = "portfolioConfig";

/// Key holding the plaintext admin secret
pub const PASSWORD_KEY: &str = "adminPassword";

/// String key-value storage
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory storage; clones share the same entries
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Directory-backed storage, one file per key
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) the storage directory
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::Io {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Err(StorageError::Io {
                key: key.to_string(),
                message: "invalid storage key".to_string(),
            });
        }
        Ok(self.dir.join(key))
    }
}

fn io_error(key: &str, e: std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: e.to_string(),
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::write(&path, value).map_err(|e| io_error(key, e))
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

/// Failure to obtain the fallback document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Fallback document unavailable: {0}")]
    Unavailable(String),

    #[error("Could not read fallback document {path}: {message}")]
    Io { path: String, message: String },
}

/// Source of the static fallback document used on first load
pub trait FallbackSource {
    fn fetch(&mut self) -> Result<String, FetchError>;
}

/// Fallback already fetched by the host
#[derive(Debug, Clone)]
pub struct StaticFallback {
    result: Result<String, FetchError>,
}

impl StaticFallback {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            result: Ok(text.into()),
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            result: Err(FetchError::Unavailable(reason.into())),
        }
    }
}

impl FallbackSource for StaticFallback {
    fn fetch(&mut self) -> Result<String, FetchError> {
        self.result.clone()
    }
}

/// Fallback read from a file on disk
#[derive(Debug, Clone)]
pub struct FileFallback {
    path: PathBuf,
}

impl FileFallback {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FallbackSource for FileFallback {
    fn fetch(&mut self) -> Result<String, FetchError> {
        std::fs::read_to_string(&self.path).map_err(|e| FetchError::Io {
            path: self.path.display().to_string(),
            message: e.to_string(),
        })
    }
}

/// Memory storage that refuses writes while `full` is set
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub(crate) struct QuotaStorage {
    pub inner: MemoryStorage,
    pub full: Rc<std::cell::Cell<bool>>,
}

#[cfg(test)]
impl Storage for QuotaStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.full.get() {
            return Err(StorageError::Io {
                key: key.to_string(),
                message: "QuotaExceededError".to_string(),
            });
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.remove_item(key)
    }
}
