//! # Document Store
//!
//! Owns the in-memory [`Document`] and the storage it is persisted to.
//!
//! ## Lifecycle
//!
//! ```text
//! persisted entry ──parse──┐
//!                          ├──→ Document ──mutate──→ persist (whole document)
//! fallback fetch ──parse───┘
//!        └── failure ──→ empty default + user-facing warning
//! ```

use crate::errors::EditorError;
use crate::mutations::{Mutation, MutationResult};
use crate::storage::{FallbackSource, Storage, DOCUMENT_KEY};
use folio_parser::{parse_document, serialize, Document};
use tracing::{debug, info, warn};

/// Shown when neither storage nor the fallback yields a document
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load configuration. Using default settings.";

/// Where the loaded document came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Persisted,
    Fallback,
    Default,
}

/// Outcome of [`DocumentStore::load`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub source: LoadSource,
    /// Message to surface to the user, if any
    pub warning: Option<String>,
}

/// Persisted, versioned document
pub struct DocumentStore {
    document: Document,
    storage: Box<dyn Storage>,

    /// Incremented on each committed mutation
    version: u64,
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("document", &self.document)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl DocumentStore {
    /// Wrap an already-loaded document
    pub fn new(storage: Box<dyn Storage>, document: Document) -> Self {
        Self {
            document,
            storage,
            version: 0,
        }
    }

    /// Whether a persisted document exists (hosts skip the fallback fetch)
    pub fn has_persisted(storage: &dyn Storage) -> bool {
        matches!(storage.get_item(DOCUMENT_KEY), Ok(Some(_)))
    }

    /// Load from storage, or from the fallback on first run
    ///
    /// Never fails: the worst case is an empty document plus a warning.
    pub fn load(storage: Box<dyn Storage>, fallback: &mut dyn FallbackSource) -> (Self, LoadReport) {
        let persisted = match storage.get_item(DOCUMENT_KEY) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "could not read persisted document");
                None
            }
        };

        if let Some(text) = persisted {
            match parse_document(&text) {
                Ok(document) => {
                    debug!("loaded persisted document");
                    return (
                        Self::new(storage, document),
                        LoadReport {
                            source: LoadSource::Persisted,
                            warning: None,
                        },
                    );
                }
                Err(e) => warn!(error = %e, "persisted document is corrupt, using fallback"),
            }
        }

        let fetched = fallback
            .fetch()
            .map_err(|e| e.to_string())
            .and_then(|text| parse_document(&text).map_err(|e| e.to_string()));

        match fetched {
            Ok(document) => {
                let mut store = Self::new(storage, document);
                if let Err(e) = store.persist() {
                    warn!(error = %e, "could not persist fallback document");
                }
                info!("loaded fallback document");
                (
                    store,
                    LoadReport {
                        source: LoadSource::Fallback,
                        warning: None,
                    },
                )
            }
            Err(e) => {
                warn!(error = %e, "fallback document unavailable");
                (
                    Self::new(storage, Document::default()),
                    LoadReport {
                        source: LoadSource::Default,
                        warning: Some(LOAD_FAILURE_MESSAGE.to_string()),
                    },
                )
            }
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn storage(&self) -> &dyn Storage {
        self.storage.as_ref()
    }

    pub fn storage_mut(&mut self) -> &mut dyn Storage {
        self.storage.as_mut()
    }

    /// Write the whole document under `portfolioConfig`
    pub fn persist(&mut self) -> Result<(), EditorError> {
        write_document(self.storage.as_mut(), &self.document)
    }

    /// Apply a mutation, then persist
    ///
    /// The mutation runs against a copy that replaces the document only once
    /// it is stored. A rejected mutation or a failed write changes nothing.
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let mut next = self.document.clone();
        mutation.apply(&mut next)?;
        write_document(self.storage.as_mut(), &next)?;

        self.document = next;
        self.version += 1;
        info!(version = self.version, "committed mutation");

        Ok(MutationResult {
            version: self.version,
        })
    }
}

fn write_document(storage: &mut dyn Storage, document: &Document) -> Result<(), EditorError> {
    let text = serialize(document)?;
    storage.set_item(DOCUMENT_KEY, &text)?;
    debug!(bytes = text.len(), "persisted document");
    Ok(())
}
