//! # Folio Editor
//!
//! Editing engine for the portfolio page.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: Document model + typed key-paths    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: session, store, auth, mutations     │
//! │  - Load from storage or fallback            │
//! │  - Validate, then apply mutations           │
//! │  - Persist the whole document every time    │
//! │  - Coordinate mutate → render               │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ evaluator: Document → fragments             │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{EditSession, EphemeralUrls, MemoryStorage, StaticFallback};
//!
//! let mut fallback = StaticFallback::text(fetched_json);
//! let (mut session, report) = EditSession::open(
//!     Box::new(MemoryStorage::new()),
//!     &mut fallback,
//!     Box::new(EphemeralUrls::new()),
//!     RenderOptions::default(),
//! )?;
//!
//! session.unlock("secret")?;
//! session.begin_add(Section::Skills);
//! session.set_value("Go")?;
//! let view = session.save_edit()?;
//! ```

mod auth;
mod config_form;
mod contact;
mod document;
mod errors;
mod mutations;
mod pipeline;
mod session;
mod storage;
mod uploads;
mod validation;

pub use auth::{AuthGate, MIN_PASSWORD_LEN};
pub use config_form::{ConfigForm, ProjectRow};
pub use contact::ContactMessage;
pub use document::{DocumentStore, LoadReport, LoadSource, LOAD_FAILURE_MESSAGE};
pub use errors::{AuthError, EditorError, MutationError, StorageError, UploadError, ValidationError};
pub use mutations::{Mutation, MutationResult};
pub use pipeline::Pipeline;
pub use session::{
    EditForm, EditSession, EditTarget, OpenEdit, PendingEdit, ProjectForm, SessionState, ViewUpdate,
};
pub use storage::{
    FallbackSource, FetchError, FileFallback, FileStorage, MemoryStorage, StaticFallback, Storage,
    DOCUMENT_KEY, PASSWORD_KEY,
};
pub use uploads::{EphemeralUrls, FileUpload, ObjectUrlFactory, UploadPurpose, UploadTarget};
pub use validation::{is_url_exempt, validate_url};

// Re-export common types for convenience
pub use folio_evaluator::{RenderOptions, VirtualDomDocument};
pub use folio_parser::{Document, KeyPath, Section};
