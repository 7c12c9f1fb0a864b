/// Edit-mode gating of controls and highlight classes
use crate::*;
use folio_parser::{parse_document, KeyPath, ScalarField, Section};

fn doc() -> folio_parser::Document {
    parse_document(r#"{"skills":["Rust"],"interests":["Chess","Go"],"projects":[{"title":"A"}]}"#)
        .unwrap()
}

fn render_with(edit_mode: bool) -> VirtualDomDocument {
    Evaluator::with_options(RenderOptions {
        edit_mode,
        copyright_year: 2024,
    })
    .render(&doc())
}

#[test]
fn test_locked_hides_remove_controls() {
    let vdoc = render_with(false);
    let controls = vdoc.remove_controls();

    assert!(!controls.is_empty());
    assert!(controls.iter().all(|(_, _, visible)| !visible));
    assert!(!vdoc.edit_mode);
}

#[test]
fn test_unlocked_shows_remove_controls() {
    let vdoc = render_with(true);
    let controls = vdoc.remove_controls();

    assert!(controls.iter().all(|(_, _, visible)| *visible));
    assert!(controls.contains(&(Section::Interests, 1, true)));
    assert!(controls.contains(&(Section::Projects, 0, true)));
}

#[test]
fn test_highlight_class_follows_edit_mode() {
    let key = KeyPath::field(ScalarField::About);

    let locked = render_with(false);
    let node = locked.find_by_key_path(&key).unwrap();
    assert!(node.has_class("editable"));
    assert!(!node.has_class("editable-highlight"));

    let unlocked = render_with(true);
    let node = unlocked.find_by_key_path(&key).unwrap();
    assert!(node.has_class("editable-highlight"));
}

#[test]
fn test_file_inputs_hidden_when_locked() {
    let mut hidden = Vec::new();
    render_with(false).walk(&mut |node| {
        if let Some(Binding::FileInput { key }) = node.binding() {
            hidden.push((*key, node.style("display") == Some("none")));
        }
    });

    assert!(hidden.contains(&(KeyPath::field(ScalarField::ResumeLink), true)));
    assert!(hidden.contains(&(KeyPath::parse("projects[0].image").unwrap(), true)));
}

#[test]
fn test_add_button_labels() {
    let vdoc = render_with(true);
    let mut labels = Vec::new();
    vdoc.walk(&mut |node| {
        if let Some(Binding::Add { section }) = node.binding() {
            let text: String = node
                .children()
                .iter()
                .map(|c| match c {
                    VNode::Text { content } => content.clone(),
                    _ => String::new(),
                })
                .collect();
            labels.push((*section, text, node.style("display").map(str::to_string)));
        }
    });

    assert_eq!(labels.len(), 3);
    assert!(labels.contains(&(Section::Skills, "Add Skill".to_string(), Some("block".to_string()))));
    assert!(labels.contains(&(Section::Projects, "Add Project".to_string(), Some("block".to_string()))));
}
