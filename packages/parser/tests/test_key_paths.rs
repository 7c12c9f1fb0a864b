use folio_parser::{parse_document, serialize, Document, KeyPath, Project, Value};

fn sample_document() -> Document {
    parse_document(
        r##"{
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "skills": ["Rust", "Go"],
            "interests": ["Chess"],
            "projects": [
                { "title": "Engine", "description": "Analytical", "image": "https://a.dev/e.png", "link": "https://a.dev" },
                { "title": "Notes", "description": "Translations", "link": "#" }
            ]
        }"##,
    )
    .expect("Failed to parse sample")
}

#[test]
fn test_set_then_get_every_project_field() {
    for index in 0..4 {
        for field in ["title", "description", "image", "link"] {
            let mut doc = sample_document();
            let path = KeyPath::parse(&format!("projects[{}].{}", index, field)).unwrap();
            let value = format!("value-{}-{}", index, field);

            doc.set(&path, Value::text(value.clone())).unwrap();

            assert_eq!(doc.get(&path), Some(Value::Text(value)), "path {}", path);
        }
    }
}

#[test]
fn test_set_then_get_scalars_and_items() {
    for path in ["name", "about", "welcome", "resumeLink", "skills[0]", "skills[5]", "interests[1]"] {
        let mut doc = sample_document();
        let key_path = KeyPath::parse(path).unwrap();
        doc.set(&key_path, Value::text("set")).unwrap();
        assert_eq!(doc.get(&key_path), Some(Value::text("set")), "path {}", path);
    }
}

#[test]
fn test_malformed_paths_leave_document_unchanged() {
    for path in [
        "projects[0",
        "projects[0].",
        "projects.0.title",
        "projects[0][1]",
        "skills[0].title",
        "unknown[0]",
        "project[0].title",
        " name",
    ] {
        let mut doc = sample_document();
        let before = doc.clone();
        assert!(doc.set_path(path, Value::text("x")).is_err(), "path {:?}", path);
        assert_eq!(doc, before);
    }
}

#[test]
fn test_whole_record_replacement_keeps_order() {
    let mut doc = sample_document();
    let replacement = Project::new("New", "Desc", "https://img.dev/n.png", "https://n.dev");
    doc.set(&KeyPath::parse("projects[0]").unwrap(), Value::Record(replacement.clone()))
        .unwrap();

    assert_eq!(doc.projects[0], replacement);
    assert_eq!(doc.projects[1].title, "Notes");
}

#[test]
fn test_round_trip_after_edits() {
    let mut doc = sample_document();
    doc.set_path("projects[1].image", Value::text("blob:folio/7")).unwrap();
    doc.set_path("resumeFileName", Value::text("cv.pdf")).unwrap();

    let restored = parse_document(&serialize(&doc).unwrap()).unwrap();
    assert_eq!(restored, doc);
}
