//! Browser host for the portfolio editor
//!
//! `PortfolioApp` wraps an [`EditSession`] persisted to `localStorage`.
//! Views, open edits and view updates cross the boundary as JSON strings;
//! user-facing failures are thrown as their message text.

mod browser;

pub use browser::{BrowserStorage, BrowserUrls, FileRegistry};

use folio_compiler_html::{compile_fragment, CompileOptions};
use folio_editor::{
    ConfigForm, ContactMessage, DocumentStore, EditForm, EditSession, FileUpload, RenderOptions,
    StaticFallback, UploadTarget,
};
use folio_evaluator::FragmentKind;
use folio_parser::{KeyPath, Section};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(e: impl Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json(value: &impl Serialize) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn parse_section(name: &str) -> Result<Section, String> {
    Section::from_name(name).ok_or_else(|| format!("Unknown section: {}", name))
}

fn parse_upload_target(key: &str) -> Result<UploadTarget, String> {
    let path = KeyPath::parse(key).map_err(|e| e.to_string())?;
    UploadTarget::from_key_path(&path).ok_or_else(|| format!("Not a file-backed field: {}", key))
}

/// Whether a document was saved by an earlier visit
///
/// When `false`, the page fetches its bundled configuration before
/// constructing [`PortfolioApp`].
#[wasm_bindgen(js_name = hasPersistedDocument)]
pub fn has_persisted_document() -> bool {
    DocumentStore::has_persisted(&BrowserStorage)
}

/// Check the contact form; returns the confirmation text
#[wasm_bindgen(js_name = validateContact)]
pub fn validate_contact(name: &str, email: &str, message: &str) -> Result<String, JsValue> {
    ContactMessage::new(name, email, message)
        .validate()
        .map_err(js_error)
}

#[wasm_bindgen]
pub struct PortfolioApp {
    session: EditSession,
    files: Rc<RefCell<FileRegistry>>,
    load_warning: Option<String>,
}

#[wasm_bindgen]
impl PortfolioApp {
    /// Load the document from `localStorage`, or from `fallback` (the
    /// fetched configuration text) on first visit
    ///
    /// Pass `undefined` as `fallback` when the fetch failed.
    #[wasm_bindgen(constructor)]
    pub fn new(fallback: Option<String>, copyright_year: Option<i32>) -> Result<PortfolioApp, JsValue> {
        let mut fallback = match fallback {
            Some(text) => StaticFallback::text(text),
            None => StaticFallback::failed("configuration fetch failed"),
        };
        let mut options = RenderOptions::default();
        if let Some(year) = copyright_year {
            options.copyright_year = year;
        }

        let files = Rc::new(RefCell::new(FileRegistry::default()));
        let (session, report) = EditSession::open(
            Box::new(BrowserStorage),
            &mut fallback,
            Box::new(BrowserUrls::new(files.clone())),
            options,
        )
        .map_err(js_error)?;

        Ok(PortfolioApp {
            session,
            files,
            load_warning: report.warning,
        })
    }

    /// Message to alert after a failed load
    #[wasm_bindgen(getter, js_name = loadWarning)]
    pub fn load_warning(&self) -> Option<String> {
        self.load_warning.clone()
    }

    #[wasm_bindgen(js_name = needsSetup)]
    pub fn needs_setup(&self) -> bool {
        self.session.needs_setup()
    }

    #[wasm_bindgen(js_name = setPassword)]
    pub fn set_password(&mut self, password: &str, confirm: &str) -> Result<(), JsValue> {
        self.session.set_password(password, confirm).map_err(js_error)
    }

    pub fn unlock(&mut self, password: &str) -> Result<String, JsValue> {
        let view = self.session.unlock(password).map_err(js_error)?;
        to_json(view)
    }

    pub fn lock(&mut self) -> Result<String, JsValue> {
        let view = to_json(self.session.lock());
        self.release_unused_files();
        view
    }

    #[wasm_bindgen(js_name = isUnlocked)]
    pub fn is_unlocked(&self) -> bool {
        self.session.is_unlocked()
    }

    /// Current view as JSON
    pub fn view(&mut self) -> Result<String, JsValue> {
        to_json(self.session.view())
    }

    /// Inner HTML for one container (`profile`, `skills`, ...)
    #[wasm_bindgen(js_name = renderFragmentHtml)]
    pub fn render_fragment_html(&mut self, kind: &str) -> Result<String, JsValue> {
        let kind = FragmentKind::from_name(kind)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown fragment: {}", kind)))?;
        let options = CompileOptions {
            pretty: false,
            ..CompileOptions::default()
        };
        match self.session.view().fragment(kind) {
            Some(fragment) => compile_fragment(fragment, &options).map_err(js_error),
            None => Ok(String::new()),
        }
    }

    /// Key-paths of every editable element, as a JSON array
    #[wasm_bindgen(js_name = editableKeys)]
    pub fn editable_keys(&mut self) -> Result<String, JsValue> {
        to_json(&self.session.view().editables())
    }

    /// Open the element bound to `key`; `undefined` while locked
    #[wasm_bindgen(js_name = openEdit)]
    pub fn open_edit(&mut self, key: &str) -> Result<Option<String>, JsValue> {
        let key = KeyPath::parse(key).map_err(js_error)?;
        let opened = self.session.open_edit(&key);
        self.release_unused_files();
        opened.as_ref().map(to_json).transpose()
    }

    #[wasm_bindgen(js_name = beginAdd)]
    pub fn begin_add(&mut self, section: &str) -> Result<Option<String>, JsValue> {
        let section = parse_section(section).map_err(js_error)?;
        let opened = self.session.begin_add(section);
        self.release_unused_files();
        opened.as_ref().map(to_json).transpose()
    }

    #[wasm_bindgen(js_name = pendingEdit)]
    pub fn pending_edit(&self) -> Result<Option<String>, JsValue> {
        self.session.pending_edit().map(to_json).transpose()
    }

    #[wasm_bindgen(js_name = setValue)]
    pub fn set_value(&mut self, value: &str) -> Result<(), JsValue> {
        self.session.set_value(value).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setProjectForm)]
    pub fn set_project_form(
        &mut self,
        title: &str,
        description: &str,
        link: &str,
    ) -> Result<(), JsValue> {
        self.session
            .set_project_form(title, description, link)
            .map_err(js_error)
    }

    /// Pick an image for the open project form
    #[wasm_bindgen(js_name = stageFile)]
    pub fn stage_file(&mut self, name: &str, mime_type: &str, file: JsValue) -> Result<(), JsValue> {
        let handle = self.files.borrow_mut().register(file);
        let staged = self
            .session
            .stage_file(FileUpload::new(name, mime_type, handle));
        self.release_unused_files();
        staged.map_err(js_error)
    }

    /// Commit the open edit; returns the new view
    #[wasm_bindgen(js_name = saveEdit)]
    pub fn save_edit(&mut self) -> Result<Option<String>, JsValue> {
        let view = match self.session.save_edit() {
            Ok(view) => view.map(to_json).transpose(),
            Err(e) => Err(js_error(e)),
        };
        self.release_unused_files();
        view
    }

    #[wasm_bindgen(js_name = cancelEdit)]
    pub fn cancel_edit(&mut self) {
        self.session.cancel_edit();
        self.release_unused_files();
    }

    #[wasm_bindgen(js_name = removeItem)]
    pub fn remove_item(&mut self, section: &str, index: usize) -> Result<Option<String>, JsValue> {
        let section = parse_section(section).map_err(js_error)?;
        let view = self.session.remove_item(section, index).map_err(js_error)?;
        view.map(to_json).transpose()
    }

    /// Replace the file-backed field at `key` with `file`
    ///
    /// Returns the view update as JSON.
    #[wasm_bindgen(js_name = replaceFile)]
    pub fn replace_file(
        &mut self,
        key: &str,
        name: &str,
        mime_type: &str,
        file: JsValue,
    ) -> Result<Option<String>, JsValue> {
        let target = parse_upload_target(key).map_err(js_error)?;
        let handle = self.files.borrow_mut().register(file);
        let upload = FileUpload::new(name, mime_type, handle);
        let update = self.session.replace_file(target, &upload);
        self.release_unused_files();
        update.map_err(js_error)?.as_ref().map(to_json).transpose()
    }

    /// Number of picked files still held for the open edit
    #[wasm_bindgen(getter, js_name = pendingFiles)]
    pub fn pending_files(&self) -> usize {
        self.files.borrow().len()
    }

    /// Save the admin form, given as JSON
    #[wasm_bindgen(js_name = submitConfigForm)]
    pub fn submit_config_form(&mut self, form: &str) -> Result<Option<String>, JsValue> {
        let form: ConfigForm = serde_json::from_str(form)
            .map_err(|e| JsValue::from_str(&format!("Invalid form data: {}", e)))?;
        let view = self.session.submit_config_form(&form).map_err(js_error)?;
        view.map(to_json).transpose()
    }

    /// Admin form prefilled from the document, as JSON
    #[wasm_bindgen(js_name = configForm)]
    pub fn config_form(&self) -> Result<String, JsValue> {
        to_json(&ConfigForm::from_document(self.session.document()))
    }
}

impl PortfolioApp {
    /// Drop picked files the open edit no longer refers to
    fn release_unused_files(&self) {
        let staged = match self.session.pending_edit().map(|edit| &edit.form) {
            Some(EditForm::Project(form)) => form.staged_image.as_ref(),
            _ => None,
        };
        self.files
            .borrow_mut()
            .release_all_except(staged.map(|upload| upload.handle.as_str()));
    }
}
