//! Error types for the editor
//!
//! Display strings double as the messages shown to the user.

use folio_parser::{KeyPathError, ParseError, PathError, ResolveError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    KeyPath(#[from] KeyPathError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("No edit in progress")]
    NoPendingEdit,

    #[error("The open edit does not take {0}")]
    WrongEditKind(&'static str),
}

impl From<PathError> for EditorError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::KeyPath(e) => e.into(),
            PathError::Resolve(e) => e.into(),
        }
    }
}

/// Key-value storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage I/O error for '{key}': {message}")]
    Io { key: String, message: String },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Admin secret failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("Password must be at least 6 characters.")]
    TooShort,

    #[error("Passwords do not match.")]
    Mismatch,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Input rejected before it reaches the document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a value.")]
    EmptyValue,

    #[error("Please fill in title and description.")]
    MissingProjectFields,

    #[error("Invalid URL format for project link.")]
    InvalidProjectLink,

    #[error("Invalid URL format. Please use a valid URL.")]
    InvalidUrl,

    #[error("Error: Missing required fields.")]
    MissingRequiredFields,

    #[error("Please fill in all text fields.")]
    IncompleteMessage,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("Index {index} is out of range for {section} (length {len})")]
    IndexOutOfRange {
        section: String,
        index: usize,
        len: usize,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// File replacement failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a PDF file for resume.")]
    NotPdf,

    #[error("Please upload an image file.")]
    NotImage,

    #[error("'{0}' is not a file-backed field")]
    NotFileBacked(String),
}
