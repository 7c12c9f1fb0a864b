//! Browser tests, run with `wasm-pack test --headless --chrome`

#![cfg(target_arch = "wasm32")]

use folio_editor::{Storage, DOCUMENT_KEY, PASSWORD_KEY};
use folio_wasm::{validate_contact, BrowserStorage, PortfolioApp};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clear_storage() {
    let mut storage = BrowserStorage;
    storage.remove_item(DOCUMENT_KEY).unwrap();
    storage.remove_item(PASSWORD_KEY).unwrap();
}

#[wasm_bindgen_test]
fn test_first_visit_persists_fallback() {
    clear_storage();
    let app = PortfolioApp::new(Some(r#"{"name": "Ada"}"#.to_string()), Some(2024)).unwrap();

    assert!(app.load_warning().is_none());
    assert!(app.needs_setup());
    assert!(folio_wasm::has_persisted_document());
}

#[wasm_bindgen_test]
fn test_failed_fetch_warns() {
    clear_storage();
    let app = PortfolioApp::new(None, None).unwrap();
    assert_eq!(
        app.load_warning().as_deref(),
        Some("Failed to load configuration. Using default settings.")
    );
}

#[wasm_bindgen_test]
fn test_add_skill_and_render_html() {
    clear_storage();
    let mut app = PortfolioApp::new(Some(r#"{"skills": []}"#.to_string()), Some(2024)).unwrap();
    app.set_password("secret1", "secret1").unwrap();
    assert!(app.begin_add("skills").unwrap().is_none());

    app.unlock("secret1").unwrap();
    app.begin_add("skills").unwrap().unwrap();
    app.set_value("Go").unwrap();
    assert!(app.save_edit().unwrap().is_some());

    let html = app.render_fragment_html("skills").unwrap();
    assert!(html.contains(r#"data-key="skills[0]""#));
    assert!(html.contains("Go"));
}

#[wasm_bindgen_test]
fn test_wrong_password_message() {
    clear_storage();
    let mut app = PortfolioApp::new(Some("{}".to_string()), None).unwrap();
    app.set_password("secret1", "secret1").unwrap();

    let err = app.unlock("nope").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Incorrect password."));
    assert!(!app.is_unlocked());
}

#[wasm_bindgen_test]
fn test_contact_validation() {
    assert!(validate_contact("Ada", "ada@example.com", "Hello").is_ok());
    let err = validate_contact("", "ada@example.com", "Hello").unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Please fill in all text fields."));
}

#[wasm_bindgen_test]
fn test_rejected_and_cancelled_files_are_released() {
    clear_storage();
    let mut app = PortfolioApp::new(Some("{}".to_string()), None).unwrap();
    app.set_password("secret1", "secret1").unwrap();
    app.unlock("secret1").unwrap();

    let err = app
        .replace_file("resumeLink", "a.png", "image/png", JsValue::NULL)
        .unwrap_err();
    assert_eq!(err.as_string().as_deref(), Some("Please upload a PDF file for resume."));
    assert_eq!(app.pending_files(), 0);

    app.begin_add("projects").unwrap().unwrap();
    app.stage_file("a.png", "image/png", JsValue::NULL).unwrap();
    app.stage_file("b.png", "image/png", JsValue::NULL).unwrap();
    assert!(app.stage_file("notes.txt", "text/plain", JsValue::NULL).is_err());
    assert_eq!(app.pending_files(), 1);

    app.cancel_edit();
    assert_eq!(app.pending_files(), 0);

    app.begin_add("projects").unwrap().unwrap();
    app.stage_file("a.png", "image/png", JsValue::NULL).unwrap();
    app.lock().unwrap();
    assert_eq!(app.pending_files(), 0);
}
