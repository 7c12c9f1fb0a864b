/// Render tests: document -> fragments -> verify content and bindings
use crate::*;
use folio_parser::{parse_document, Document, KeyPath, Project, ScalarField, Section};

fn options() -> RenderOptions {
    RenderOptions {
        edit_mode: false,
        copyright_year: 2024,
    }
}

fn sample() -> Document {
    parse_document(
        r#"{
            "name": "Ada",
            "location": "London",
            "email": "ada@example.com",
            "phone": "+44 1",
            "linkedin": "https://linkedin.com/in/ada",
            "github": "",
            "about": "Mathematician",
            "welcome": "Hello",
            "resumeLink": "https://cv.dev/ada.pdf",
            "skills": ["Rust", "Go"],
            "interests": ["Chess"],
            "projects": [
                { "title": "Engine", "description": "Analytical", "image": "", "link": "" }
            ]
        }"#,
    )
    .unwrap()
}

fn fragment_text(vdoc: &VirtualDomDocument, kind: FragmentKind) -> Vec<String> {
    vdoc.fragment(kind)
        .unwrap()
        .nodes
        .iter()
        .map(VNode::text_content)
        .collect()
}

#[test]
fn test_render_is_deterministic() {
    let evaluator = Evaluator::with_options(options());
    let doc = sample();
    assert_eq!(evaluator.render(&doc), evaluator.render(&doc));
}

#[test]
fn test_fragments_target_their_containers() {
    let vdoc = Evaluator::with_options(options()).render(&sample());

    let containers: Vec<&str> = vdoc.fragments.iter().map(|f| f.container.as_str()).collect();
    assert_eq!(
        containers,
        vec![
            "profile",
            "skills-grid",
            "project-grid",
            "social-links",
            "interests-grid",
            "config-form"
        ]
    );
}

#[test]
fn test_profile_uses_defaults() {
    let vdoc = Evaluator::with_options(options()).render(&Document::new());
    let texts = fragment_text(&vdoc, FragmentKind::Profile);

    assert!(texts.contains(&"I'm Your Name, a Creative Web Developer".to_string()));
    assert!(texts.contains(&"\u{a9} 2024 Your Name. All rights reserved.".to_string()));

    let img = vdoc
        .find_by_key_path(&KeyPath::field(ScalarField::ProfileImage))
        .unwrap();
    assert_eq!(img.attr("src"), Some("https://via.placeholder.com/200"));

    let resume = vdoc
        .find_by_key_path(&KeyPath::field(ScalarField::ResumeLink))
        .unwrap();
    assert_eq!(resume.attr("href"), Some("#"));
    assert_eq!(resume.attr("download"), Some("resume.pdf"));
}

#[test]
fn test_profile_shows_name() {
    let vdoc = Evaluator::with_options(options()).render(&sample());
    let texts = fragment_text(&vdoc, FragmentKind::Profile);
    assert_eq!(texts[0], "Hello");
    assert_eq!(texts[1], "I'm Ada, a Creative Web Developer");
    assert!(texts.contains(&"\u{a9} 2024 Ada. All rights reserved.".to_string()));
}

#[test]
fn test_skills_render_items_and_add_button() {
    let vdoc = Evaluator::with_options(options()).render(&sample());
    let skills = vdoc.fragment(FragmentKind::Skills).unwrap();

    assert_eq!(skills.nodes.len(), 3);
    assert_eq!(skills.nodes[0].text_content(), "Rust");
    assert_eq!(
        skills.nodes[1].binding(),
        Some(&Binding::Edit {
            key: KeyPath::item(Section::Skills, 1)
        })
    );
    assert_eq!(
        skills.nodes[2].binding(),
        Some(&Binding::Add {
            section: Section::Skills
        })
    );
    assert_eq!(skills.nodes[2].text_content(), "");
}

#[test]
fn test_project_card_placeholders() {
    let vdoc = Evaluator::with_options(options()).render(&sample());

    let image = vdoc
        .find_by_key_path(&KeyPath::parse("projects[0].image").unwrap())
        .unwrap();
    assert_eq!(image.attr("src"), Some("https://via.placeholder.com/400x250"));
    assert_eq!(image.attr("alt"), Some("Engine"));

    let link = vdoc
        .find_by_key_path(&KeyPath::parse("projects[0].link").unwrap())
        .unwrap();
    assert_eq!(link.attr("href"), Some("#"));
    assert_eq!(link.text_content(), "View Project");
}

#[test]
fn test_project_text_is_sanitized() {
    let mut doc = Document::new();
    doc.projects.push(Project::new(
        "Say \"hi\"",
        "line1\nline2",
        "https://img.dev/a.png",
        "https://a.dev",
    ));

    let vdoc = Evaluator::with_options(options()).render(&doc);
    let title = vdoc
        .find_by_key_path(&KeyPath::parse("projects[0].title").unwrap())
        .unwrap();
    assert_eq!(title.text_content(), "Say \\\"hi\\\"");

    let description = vdoc
        .find_by_key_path(&KeyPath::parse("projects[0].description").unwrap())
        .unwrap();
    assert_eq!(description.text_content(), "line1\\nline2");
}

#[test]
fn test_socials_bind_scalar_fields() {
    let vdoc = Evaluator::with_options(options()).render(&sample());
    let socials = vdoc.fragment(FragmentKind::Socials).unwrap();

    let hrefs: Vec<Option<&str>> = socials.nodes.iter().map(|n| n.attr("href")).collect();
    assert_eq!(
        hrefs,
        vec![
            Some("https://linkedin.com/in/ada"),
            Some("mailto:ada@example.com"),
            Some("#"),
            Some("tel:+44 1"),
        ]
    );

    let keys: Vec<Option<&Binding>> = socials.nodes.iter().map(VNode::binding).collect();
    assert_eq!(
        keys[3],
        Some(&Binding::Edit {
            key: KeyPath::field(ScalarField::Phone)
        })
    );
}

#[test]
fn test_every_editable_resolves() {
    let doc = sample();
    let vdoc = Evaluator::with_options(options()).render(&doc);

    let editables = vdoc.editables();
    assert!(!editables.is_empty());
    for key in editables {
        assert!(doc.get(&key).is_some(), "unresolvable key {}", key);
    }
}

#[test]
fn test_config_form_mirrors_document() {
    let doc = sample();
    let vdoc = Evaluator::with_options(options()).render(&doc);
    let controls = vdoc.form_controls();

    for key in [
        "name",
        "about",
        "welcome",
        "profileImage",
        "skills[0]",
        "skills[1]",
        "interests[0]",
        "projects[0].title",
        "projects[0].description",
        "projects[0].link",
    ] {
        assert!(
            controls.contains(&KeyPath::parse(key).unwrap()),
            "missing control {}",
            key
        );
    }

    let form = vdoc.fragment(FragmentKind::ConfigForm).unwrap();
    let texts: String = form.nodes.iter().map(VNode::text_content).collect();
    assert!(texts.contains("No file selected"));
    assert!(texts.contains("Current Image: No image selected (using placeholder)"));
    assert!(texts.contains("Project 1 Title:"));
}

#[test]
fn test_config_form_resume_file_name() {
    let mut doc = sample();
    doc.resume_file_name = Some("cv.pdf".to_string());
    let vdoc = Evaluator::with_options(options()).render(&doc);

    let form = vdoc.fragment(FragmentKind::ConfigForm).unwrap();
    let current = form
        .nodes
        .iter()
        .find(|n| n.attr("id") == Some("config-resume-current"))
        .unwrap();
    assert_eq!(current.text_content(), "cv.pdf");
}

#[test]
fn test_vdom_serializes_to_json() {
    let vdoc = Evaluator::with_options(options()).render(&sample());
    let json = vdoc.to_json().unwrap();
    assert!(json.contains(r#""container":"skills-grid""#));
    assert!(json.contains(r#""key":"projects[0].title""#));
}
