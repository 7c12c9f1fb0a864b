//! # Edit Session
//!
//! The single controller behind the page. It owns the document store, the
//! auth gate, the render pipeline and the at-most-one [`PendingEdit`], and
//! turns user interactions into mutations followed by a re-render.
//!
//! ```text
//!            unlock(password) ✓
//!   Locked ─────────────────────→ Unlocked
//!     ↑                              │
//!     └──────────── lock() ──────────┘   (discards the pending edit)
//! ```
//!
//! While locked every entry point that could change the document is a
//! no-op returning `None`.
//!
//! An edit is a small transaction: open (`open_edit` / `begin_add`), fill in
//! the form (`set_value`, `set_project_form`, `stage_file`), then
//! `save_edit` or `cancel_edit`. A failed save keeps the edit open with its
//! error message; nothing is committed until validation passes.

use crate::auth::AuthGate;
use crate::config_form::ConfigForm;
use crate::document::{DocumentStore, LoadReport};
use crate::errors::{AuthError, EditorError};
use crate::mutations::Mutation;
use crate::storage::{FallbackSource, Storage};
use crate::uploads::{FileUpload, ObjectUrlFactory, UploadPurpose, UploadTarget};
use crate::validation::{validate_field, validate_item, validate_mime, validate_project};
use folio_evaluator::{FragmentKind, RenderOptions, VirtualDomDocument};
use folio_parser::{
    Document, KeyPath, Project, ProjectField, ScalarField, Section, Value, LINK_PLACEHOLDER,
    PROJECT_PLACEHOLDER_IMAGE,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::pipeline::Pipeline;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionState {
    Locked,
    Unlocked,
}

/// What the open edit will change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum EditTarget {
    /// Single scalar or list item
    Value { key: KeyPath },
    /// Existing project, edited as a whole; `focus` is the clicked field
    Project { index: usize, focus: ProjectField },
    /// New skill or interest
    AddItem { section: Section },
    /// New project
    AddProject,
}

/// Composite form for project edits
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectForm {
    pub title: String,
    pub description: String,
    pub link: String,
    /// Image the project has now, empty for new projects
    pub current_image: String,
    /// Image picked in the form, committed on save
    pub staged_image: Option<FileUpload>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "form", rename_all = "camelCase")]
pub enum EditForm {
    Value { value: String },
    Project(ProjectForm),
}

/// The in-flight edit transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingEdit {
    pub target: EditTarget,
    pub form: EditForm,
    /// Inline error from the last failed save
    pub error: Option<String>,
}

/// Response to opening an editable element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OpenEdit {
    /// File-backed field: the host shows its file picker
    FilePicker { target: UploadTarget },
    /// An edit form was opened
    Form { edit: PendingEdit },
}

/// How the host should refresh after a file replace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ViewUpdate {
    /// Set attributes on the element bound to `key` and swap in the
    /// listed fragments
    Patch {
        key: KeyPath,
        attributes: Vec<(String, String)>,
        refreshed: Vec<FragmentKind>,
    },
    /// Everything was re-rendered
    Full,
}

pub struct EditSession {
    store: DocumentStore,
    auth: AuthGate,
    pipeline: Pipeline,
    urls: Box<dyn ObjectUrlFactory>,
    state: SessionState,
    pending: Option<PendingEdit>,
}

impl EditSession {
    /// Create a locked session and render the initial view
    pub fn new(
        store: DocumentStore,
        auth: AuthGate,
        urls: Box<dyn ObjectUrlFactory>,
        options: RenderOptions,
    ) -> Self {
        let mut pipeline = Pipeline::new(options.with_edit_mode(false));
        pipeline.full_render(store.document());

        Self {
            store,
            auth,
            pipeline,
            urls,
            state: SessionState::Locked,
            pending: None,
        }
    }

    /// Load the document and the admin secret from `storage`
    pub fn open(
        storage: Box<dyn Storage>,
        fallback: &mut dyn FallbackSource,
        urls: Box<dyn ObjectUrlFactory>,
        options: RenderOptions,
    ) -> Result<(Self, LoadReport), EditorError> {
        let auth = AuthGate::load(storage.as_ref())?;
        let (store, report) = DocumentStore::load(storage, fallback);
        Ok((Self::new(store, auth, urls, options), report))
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_unlocked(&self) -> bool {
        self.state == SessionState::Unlocked
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn version(&self) -> u64 {
        self.store.version()
    }

    pub fn pending_edit(&self) -> Option<&PendingEdit> {
        self.pending.as_ref()
    }

    /// No admin password has been created yet
    pub fn needs_setup(&self) -> bool {
        self.auth.needs_setup()
    }

    /// Create the admin password, or change it while unlocked
    pub fn set_password(&mut self, password: &str, confirm: &str) -> Result<(), EditorError> {
        if !self.auth.needs_setup() && !self.is_unlocked() {
            return Err(AuthError::IncorrectPassword.into());
        }
        self.auth
            .set_password(self.store.storage_mut(), password, confirm)?;
        Ok(())
    }

    pub fn unlock(&mut self, password: &str) -> Result<&VirtualDomDocument, EditorError> {
        self.auth.verify(password)?;
        self.state = SessionState::Unlocked;
        self.pipeline.set_edit_mode(true);
        info!("edit mode unlocked");
        Ok(self.pipeline.full_render(self.store.document()))
    }

    pub fn lock(&mut self) -> &VirtualDomDocument {
        self.state = SessionState::Locked;
        self.pending = None;
        self.pipeline.set_edit_mode(false);
        info!("edit mode locked");
        self.pipeline.full_render(self.store.document())
    }

    /// Last rendered view
    pub fn view(&mut self) -> &VirtualDomDocument {
        self.pipeline.view(self.store.document())
    }

    /// Force a full re-render
    pub fn render(&mut self) -> &VirtualDomDocument {
        self.pipeline.full_render(self.store.document())
    }

    /// Open the editable element bound to `key`
    pub fn open_edit(&mut self, key: &KeyPath) -> Option<OpenEdit> {
        if !self.is_unlocked() {
            return None;
        }

        if let Some(target) = UploadTarget::from_key_path(key) {
            debug!(key = %key, "open file picker");
            return Some(OpenEdit::FilePicker { target });
        }

        let doc = self.store.document();
        let edit = match *key {
            KeyPath::Item {
                section: Section::Projects,
                index,
            } => project_edit(doc, index, ProjectField::Title),
            KeyPath::ItemField {
                section: Section::Projects,
                index,
                field,
            } => project_edit(doc, index, field),
            _ => PendingEdit {
                target: EditTarget::Value { key: *key },
                form: EditForm::Value {
                    value: doc
                        .get(key)
                        .and_then(|value| value.as_text().map(str::to_string))
                        .unwrap_or_default(),
                },
                error: None,
            },
        };

        debug!(key = %key, "open edit");
        Some(self.stage(edit))
    }

    /// Open an empty form for a new item
    pub fn begin_add(&mut self, section: Section) -> Option<OpenEdit> {
        if !self.is_unlocked() {
            return None;
        }

        let edit = if section.has_records() {
            PendingEdit {
                target: EditTarget::AddProject,
                form: EditForm::Project(ProjectForm {
                    link: LINK_PLACEHOLDER.to_string(),
                    ..ProjectForm::default()
                }),
                error: None,
            }
        } else {
            PendingEdit {
                target: EditTarget::AddItem { section },
                form: EditForm::Value {
                    value: String::new(),
                },
                error: None,
            }
        };

        debug!(section = section.as_str(), "begin add");
        Some(self.stage(edit))
    }

    fn stage(&mut self, edit: PendingEdit) -> OpenEdit {
        self.pending = Some(edit.clone());
        OpenEdit::Form { edit }
    }

    /// Update the value of an open single-value form
    pub fn set_value(&mut self, value: impl Into<String>) -> Result<(), EditorError> {
        match self.pending.as_mut().map(|edit| &mut edit.form) {
            Some(EditForm::Value { value: current }) => {
                *current = value.into();
                Ok(())
            }
            Some(EditForm::Project(_)) => Err(EditorError::WrongEditKind("a single value")),
            None => Err(EditorError::NoPendingEdit),
        }
    }

    /// Update the text fields of an open project form
    pub fn set_project_form(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        link: impl Into<String>,
    ) -> Result<(), EditorError> {
        let form = self.project_form_mut()?;
        form.title = title.into();
        form.description = description.into();
        form.link = link.into();
        Ok(())
    }

    /// Pick an image in an open project form
    pub fn stage_file(&mut self, upload: FileUpload) -> Result<(), EditorError> {
        validate_mime(UploadPurpose::Image, &upload.mime_type)?;
        self.project_form_mut()?.staged_image = Some(upload);
        Ok(())
    }

    fn project_form_mut(&mut self) -> Result<&mut ProjectForm, EditorError> {
        match self.pending.as_mut().map(|edit| &mut edit.form) {
            Some(EditForm::Project(form)) => Ok(form),
            Some(EditForm::Value { .. }) => Err(EditorError::WrongEditKind("project fields")),
            None => Err(EditorError::NoPendingEdit),
        }
    }

    pub fn cancel_edit(&mut self) {
        self.pending = None;
    }

    /// Validate and commit the open edit
    ///
    /// On failure the edit stays open with `error` set.
    pub fn save_edit(&mut self) -> Result<Option<&VirtualDomDocument>, EditorError> {
        if !self.is_unlocked() {
            return Ok(None);
        }
        let Some(edit) = self.pending.as_mut() else {
            return Err(EditorError::NoPendingEdit);
        };

        let mutation = match build_mutation(edit, self.store.document(), self.urls.as_mut()) {
            Ok(mutation) => mutation,
            Err(e) => {
                edit.error = Some(e.to_string());
                return Err(e);
            }
        };

        if let Err(e) = self.store.apply(mutation) {
            if let Some(edit) = self.pending.as_mut() {
                edit.error = Some(e.to_string());
            }
            return Err(e);
        }

        self.pending = None;
        Ok(Some(self.pipeline.full_render(self.store.document())))
    }

    /// Remove one item; no confirmation, no undo
    pub fn remove_item(
        &mut self,
        section: Section,
        index: usize,
    ) -> Result<Option<&VirtualDomDocument>, EditorError> {
        if !self.is_unlocked() {
            return Ok(None);
        }
        self.store.apply(Mutation::Remove { section, index })?;
        Ok(Some(self.pipeline.full_render(self.store.document())))
    }

    /// Replace a file-backed field with an uploaded file
    pub fn replace_file(
        &mut self,
        target: UploadTarget,
        upload: &FileUpload,
    ) -> Result<Option<ViewUpdate>, EditorError> {
        if !self.is_unlocked() {
            return Ok(None);
        }
        validate_mime(target.purpose(), &upload.mime_type)?;

        let url = self.urls.create(upload);
        let key = target.key_path();
        let mut attributes = vec![(target.attribute().to_string(), url.clone())];

        let set_url = Mutation::Set {
            path: key,
            value: Value::Text(url),
        };
        let mutation = if target == UploadTarget::Resume {
            attributes.push(("download".to_string(), upload.name.clone()));
            Mutation::Batch {
                mutations: vec![
                    Mutation::Set {
                        path: KeyPath::field(ScalarField::ResumeFileName),
                        value: Value::text(upload.name.as_str()),
                    },
                    set_url,
                ],
            }
        } else {
            set_url
        };
        self.store.apply(mutation)?;

        let patched = attributes
            .iter()
            .all(|(name, value)| self.pipeline.patch(&key, name, value));
        if patched {
            self.pipeline
                .refresh_fragment(self.store.document(), FragmentKind::ConfigForm);
            return Ok(Some(ViewUpdate::Patch {
                key,
                attributes,
                refreshed: vec![FragmentKind::ConfigForm],
            }));
        }

        self.pipeline.full_render(self.store.document());
        Ok(Some(ViewUpdate::Full))
    }

    /// Save the whole admin form
    pub fn submit_config_form(
        &mut self,
        form: &ConfigForm,
    ) -> Result<Option<&VirtualDomDocument>, EditorError> {
        if !self.is_unlocked() {
            return Ok(None);
        }
        let document = form.to_document(self.store.document())?;
        self.store.apply(Mutation::ReplaceDocument {
            document: Box::new(document),
        })?;
        info!("configuration saved");
        Ok(Some(self.pipeline.full_render(self.store.document())))
    }
}

fn project_edit(doc: &Document, index: usize, focus: ProjectField) -> PendingEdit {
    let project = doc.projects.get(index).cloned().unwrap_or_default();
    PendingEdit {
        target: EditTarget::Project { index, focus },
        form: EditForm::Project(ProjectForm {
            title: project.title,
            description: project.description,
            link: project.link,
            current_image: project.image,
            staged_image: None,
        }),
        error: None,
    }
}

/// Validate the open edit and turn it into a mutation
///
/// Object references for staged files are only minted once validation
/// has passed.
fn build_mutation(
    edit: &PendingEdit,
    doc: &Document,
    urls: &mut dyn ObjectUrlFactory,
) -> Result<Mutation, EditorError> {
    match (&edit.target, &edit.form) {
        (EditTarget::Value { key }, EditForm::Value { value }) => {
            validate_field(key, value)?;
            Ok(Mutation::Set {
                path: *key,
                value: Value::text(value.as_str()),
            })
        }

        (EditTarget::AddItem { section }, EditForm::Value { value }) => {
            validate_item(value)?;
            Ok(Mutation::Append {
                section: *section,
                value: Value::text(value.as_str()),
            })
        }

        (EditTarget::Project { index, .. }, EditForm::Project(form)) => {
            let existing = doc
                .projects
                .get(*index)
                .map(|p| p.image.as_str())
                .filter(|image| !image.is_empty())
                .unwrap_or(PROJECT_PLACEHOLDER_IMAGE);
            let project = project_from_form(form, existing, urls)?;

            if *index < doc.projects.len() {
                Ok(Mutation::ReplaceProject {
                    index: *index,
                    project,
                })
            } else {
                Ok(Mutation::Set {
                    path: KeyPath::item(Section::Projects, *index),
                    value: Value::Record(project),
                })
            }
        }

        (EditTarget::AddProject, EditForm::Project(form)) => {
            let project = project_from_form(form, PROJECT_PLACEHOLDER_IMAGE, urls)?;
            Ok(Mutation::Append {
                section: Section::Projects,
                value: Value::Record(project),
            })
        }

        (_, EditForm::Value { .. }) => Err(EditorError::WrongEditKind("a single value")),
        (_, EditForm::Project(_)) => Err(EditorError::WrongEditKind("project fields")),
    }
}

fn project_from_form(
    form: &ProjectForm,
    fallback_image: &str,
    urls: &mut dyn ObjectUrlFactory,
) -> Result<Project, EditorError> {
    let mut project = Project::new(&form.title, &form.description, fallback_image, &form.link);
    validate_project(&project)?;

    if let Some(upload) = &form.staged_image {
        project.image = urls.create(upload);
    }
    Ok(project)
}
