//! File uploads and the object references they turn into
//!
//! The core never sees file bytes. A host hands over a [`FileUpload`]
//! describing the picked file plus an opaque handle, and an
//! [`ObjectUrlFactory`] turns it into a URL string stored in the document.

use folio_parser::{KeyPath, ProjectField, ScalarField, Section};
use serde::{Deserialize, Serialize};

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    /// File name as reported by the picker
    pub name: String,
    /// Declared MIME type
    pub mime_type: String,
    /// Host-side handle (file id, path, ...)
    pub handle: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            handle: handle.into(),
        }
    }
}

/// What kind of file a field accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UploadPurpose {
    Resume,
    Image,
}

/// File-backed document fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", content = "index", rename_all = "camelCase")]
pub enum UploadTarget {
    Resume,
    ProfileImage,
    ProjectImage(usize),
}

impl UploadTarget {
    pub fn key_path(self) -> KeyPath {
        match self {
            UploadTarget::Resume => KeyPath::field(ScalarField::ResumeLink),
            UploadTarget::ProfileImage => KeyPath::field(ScalarField::ProfileImage),
            UploadTarget::ProjectImage(index) => KeyPath::project_field(index, ProjectField::Image),
        }
    }

    pub fn purpose(self) -> UploadPurpose {
        match self {
            UploadTarget::Resume => UploadPurpose::Resume,
            UploadTarget::ProfileImage | UploadTarget::ProjectImage(_) => UploadPurpose::Image,
        }
    }

    /// Rendered attribute that shows the field's value
    pub fn attribute(self) -> &'static str {
        match self {
            UploadTarget::Resume => "href",
            UploadTarget::ProfileImage | UploadTarget::ProjectImage(_) => "src",
        }
    }

    pub fn from_key_path(key: &KeyPath) -> Option<Self> {
        match *key {
            KeyPath::Field(ScalarField::ResumeLink) => Some(UploadTarget::Resume),
            KeyPath::Field(ScalarField::ProfileImage) => Some(UploadTarget::ProfileImage),
            KeyPath::ItemField {
                section: Section::Projects,
                index,
                field: ProjectField::Image,
            } => Some(UploadTarget::ProjectImage(index)),
            _ => None,
        }
    }
}

/// Mints URL references for uploaded files
pub trait ObjectUrlFactory {
    fn create(&mut self, upload: &FileUpload) -> String;
}

/// Session-local `blob:folio/{n}` references
#[derive(Debug, Default)]
pub struct EphemeralUrls {
    next: u64,
}

impl EphemeralUrls {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ObjectUrlFactory for EphemeralUrls {
    fn create(&mut self, _upload: &FileUpload) -> String {
        self.next += 1;
        format!("blob:folio/{}", self.next)
    }
}
