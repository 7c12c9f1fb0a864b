//! # Render pipeline
//!
//! Turns a [`Document`] into a [`VirtualDomDocument`]: one [`Fragment`] per
//! display container, each a complete replacement for that container's
//! children. Rendering is a pure function of the document and the
//! [`RenderOptions`]; rendering twice yields identical trees.
//!
//! Fragments, in order:
//!
//! ```text
//! Profile     hero, name line, photo, about, resume link, footer
//! Skills      one item per skill + add button
//! Projects    one card per project + add button
//! Socials     LinkedIn / Email / GitHub / Phone
//! Interests   one item per interest + add button
//! ConfigForm  admin form mirroring every document field
//! ```

use crate::utils::{or_default, sanitize};
use crate::vdom::{Binding, Fragment, FragmentKind, VNode, VirtualDomDocument};
use chrono::Datelike;
use folio_parser::{
    Document, KeyPath, ProjectField, ScalarField, Section, LINK_PLACEHOLDER,
    PROFILE_PLACEHOLDER_IMAGE, PROJECT_PLACEHOLDER_IMAGE,
};
use tracing::{debug, instrument};

/// Shown wherever the owner's name is not configured
pub const DEFAULT_NAME: &str = "Your Name";

/// Download name offered for the resume when none was recorded
pub const DEFAULT_RESUME_FILE_NAME: &str = "resume.pdf";

/// Options for a render pass
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Whether edit affordances are shown
    pub edit_mode: bool,
    /// Year printed in the footer
    pub copyright_year: i32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            edit_mode: false,
            copyright_year: chrono::Local::now().year(),
        }
    }
}

impl RenderOptions {
    pub fn with_edit_mode(mut self, edit_mode: bool) -> Self {
        self.edit_mode = edit_mode;
        self
    }
}

/// Scalars mirrored as plain form controls, in form order
const FORM_FIELDS: [(ScalarField, &str); 9] = [
    (ScalarField::Name, "Name"),
    (ScalarField::Location, "Location"),
    (ScalarField::Email, "Email"),
    (ScalarField::Phone, "Phone"),
    (ScalarField::Linkedin, "LinkedIn"),
    (ScalarField::Github, "GitHub"),
    (ScalarField::ProfileImage, "Profile Image URL"),
    (ScalarField::About, "About"),
    (ScalarField::Welcome, "Welcome Message"),
];

/// Builds view-model trees from documents
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    options: RenderOptions,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.options.edit_mode = edit_mode;
    }

    /// Render every fragment
    #[instrument(skip_all, fields(edit_mode = self.options.edit_mode))]
    pub fn render(&self, document: &Document) -> VirtualDomDocument {
        let mut vdoc = VirtualDomDocument {
            fragments: Vec::with_capacity(FragmentKind::ALL.len()),
            edit_mode: self.options.edit_mode,
        };
        for kind in FragmentKind::ALL {
            vdoc.add_fragment(self.render_fragment(document, kind));
        }
        debug!(
            skills = document.skills.len(),
            projects = document.projects.len(),
            interests = document.interests.len(),
            "rendered document"
        );
        vdoc
    }

    /// Render a single fragment
    pub fn render_fragment(&self, document: &Document, kind: FragmentKind) -> Fragment {
        let nodes = match kind {
            FragmentKind::Profile => self.profile(document),
            FragmentKind::Skills => self.string_items(document, Section::Skills),
            FragmentKind::Projects => self.projects(document),
            FragmentKind::Socials => self.socials(document),
            FragmentKind::Interests => self.string_items(document, Section::Interests),
            FragmentKind::ConfigForm => self.config_form(document),
        };
        Fragment::new(kind, nodes)
    }

    fn profile(&self, doc: &Document) -> Vec<VNode> {
        let name = or_default(&doc.name, DEFAULT_NAME);

        vec![
            self.editable(VNode::element("h1"), "slide-text", ScalarField::Welcome)
                .with_text(doc.welcome.as_str()),
            self.editable(VNode::element("p"), "slide-subtext", ScalarField::Name)
                .with_text(format!("I'm {}, a Creative Web Developer", name)),
            self.editable(VNode::element("p"), "location", ScalarField::Location)
                .with_text(doc.location.as_str()),
            self.editable(VNode::element("img"), "profile-img", ScalarField::ProfileImage)
                .with_attr("id", "profile-img")
                .with_attr("src", or_default(&doc.profile_image, PROFILE_PLACEHOLDER_IMAGE))
                .with_attr("alt", name),
            self.editable(VNode::element("p"), "slide-info", ScalarField::About)
                .with_text(doc.about.as_str()),
            self.editable(VNode::element("a"), "resume-button", ScalarField::ResumeLink)
                .with_attr("id", "resume-link")
                .with_attr("href", doc.resume_link.as_deref().unwrap_or(LINK_PLACEHOLDER))
                .with_attr(
                    "download",
                    doc.resume_file_name
                        .as_deref()
                        .unwrap_or(DEFAULT_RESUME_FILE_NAME),
                )
                .with_text("Download Resume"),
            VNode::element("footer").with_child(VNode::element("p").with_text(format!(
                "\u{a9} {} {}. All rights reserved.",
                self.options.copyright_year, name
            ))),
        ]
    }

    fn string_items(&self, doc: &Document, section: Section) -> Vec<VNode> {
        let class = match section {
            Section::Interests => "interest-item",
            _ => "skill-item",
        };
        let items = doc.strings(section).map(Vec::as_slice).unwrap_or_default();

        let mut nodes: Vec<VNode> = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                self.editable_item(VNode::element("div"), class, KeyPath::item(section, index))
                    .with_text(item.as_str())
                    .with_child(self.remove_button(section, index))
            })
            .collect();
        nodes.push(self.add_button(section));
        nodes
    }

    fn projects(&self, doc: &Document) -> Vec<VNode> {
        let mut nodes: Vec<VNode> = doc
            .projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let field = |f| KeyPath::project_field(index, f);
                let image = sanitize(&project.image);
                let title = sanitize(&project.title);
                let link = sanitize(&project.link);

                self.editable_item(
                    VNode::element("div"),
                    "project-card",
                    KeyPath::item(Section::Projects, index),
                )
                .with_child(
                    self.editable_item(VNode::element("img"), "project-image", field(ProjectField::Image))
                        .with_attr("src", or_default(&image, PROJECT_PLACEHOLDER_IMAGE))
                        .with_attr("alt", title.as_str()),
                )
                .with_child(
                    self.editable_item(VNode::element("h3"), "project-title", field(ProjectField::Title))
                        .with_text(title.as_str()),
                )
                .with_child(
                    self.editable_item(
                        VNode::element("p"),
                        "project-description",
                        field(ProjectField::Description),
                    )
                    .with_text(sanitize(&project.description)),
                )
                .with_child(
                    self.editable_item(VNode::element("a"), "project-link", field(ProjectField::Link))
                        .with_attr("href", or_default(&link, LINK_PLACEHOLDER))
                        .with_text("View Project"),
                )
                .with_child(self.remove_button(Section::Projects, index))
            })
            .collect();
        nodes.push(self.add_button(Section::Projects));
        nodes
    }

    fn socials(&self, doc: &Document) -> Vec<VNode> {
        let links = [
            ("LinkedIn", ScalarField::Linkedin, or_default(&doc.linkedin, LINK_PLACEHOLDER).to_string()),
            ("Email", ScalarField::Email, format!("mailto:{}", doc.email)),
            ("GitHub", ScalarField::Github, or_default(&doc.github, LINK_PLACEHOLDER).to_string()),
            ("Phone", ScalarField::Phone, format!("tel:{}", doc.phone)),
        ];

        links
            .into_iter()
            .map(|(label, field, href)| {
                self.editable(VNode::element("a"), "social-link", field)
                    .with_attr("href", href)
                    .with_text(label)
            })
            .collect()
    }

    fn config_form(&self, doc: &Document) -> Vec<VNode> {
        let mut nodes = Vec::new();

        for (field, label) in FORM_FIELDS {
            let id = format!("config-{}", field.as_str());
            let value = sanitize(doc.scalar(field).unwrap_or_default());
            nodes.push(VNode::element("label").with_attr("for", id.as_str()).with_text(label));

            let control = if matches!(field, ScalarField::About | ScalarField::Welcome) {
                VNode::element("textarea").with_text(value)
            } else {
                let input_type = match field {
                    ScalarField::Email => "email",
                    ScalarField::Linkedin | ScalarField::Github | ScalarField::ProfileImage => "url",
                    _ => "text",
                };
                VNode::element("input")
                    .with_attr("type", input_type)
                    .with_attr("value", value)
            };
            nodes.push(
                control
                    .with_attr("id", id)
                    .with_binding(Binding::FormControl {
                        key: KeyPath::field(field),
                    }),
            );
        }

        nodes.push(self.file_input(
            "config-profileImage-upload",
            "image/*",
            KeyPath::field(ScalarField::ProfileImage),
        ));

        nodes.push(VNode::element("label").with_text("Resume"));
        nodes.push(
            VNode::element("p")
                .with_attr("id", "config-resume-current")
                .with_text(doc.resume_file_name.as_deref().unwrap_or("No file selected")),
        );
        nodes.push(self.file_input(
            "config-resume-upload",
            "application/pdf",
            KeyPath::field(ScalarField::ResumeLink),
        ));

        nodes.push(self.config_strings(doc, Section::Skills));
        nodes.push(self.config_projects(doc));
        nodes.push(self.config_strings(doc, Section::Interests));
        nodes
    }

    fn config_strings(&self, doc: &Document, section: Section) -> VNode {
        let items = doc.strings(section).map(Vec::as_slice).unwrap_or_default();
        let rows = items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                VNode::element("div")
                    .with_class("config-item")
                    .with_child(
                        VNode::element("input")
                            .with_attr("type", "text")
                            .with_attr("value", sanitize(item))
                            .with_binding(Binding::FormControl {
                                key: KeyPath::item(section, index),
                            }),
                    )
                    .with_child(self.remove_button(section, index))
            })
            .collect();

        VNode::element("div")
            .with_attr("id", format!("config-{}", section.as_str()))
            .with_children(rows)
    }

    fn config_projects(&self, doc: &Document) -> VNode {
        let rows = doc
            .projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let number = index + 1;
                let key = |f| KeyPath::project_field(index, f);
                let image = sanitize(&project.image);
                let current_image = if image.is_empty() {
                    "No image selected (using placeholder)".to_string()
                } else {
                    image
                };

                VNode::element("div")
                    .with_class("config-item")
                    .with_child(VNode::element("label").with_text(format!("Project {} Title:", number)))
                    .with_child(
                        VNode::element("input")
                            .with_attr("type", "text")
                            .with_attr("value", sanitize(&project.title))
                            .with_binding(Binding::FormControl { key: key(ProjectField::Title) }),
                    )
                    .with_child(
                        VNode::element("label").with_text(format!("Project {} Description:", number)),
                    )
                    .with_child(
                        VNode::element("textarea")
                            .with_text(sanitize(&project.description))
                            .with_binding(Binding::FormControl {
                                key: key(ProjectField::Description),
                            }),
                    )
                    .with_child(VNode::element("label").with_text(format!("Project {} Image:", number)))
                    .with_child(self.file_input(
                        &format!("config-projects-{}-image", index),
                        "image/*",
                        key(ProjectField::Image),
                    ))
                    .with_child(
                        VNode::element("p").with_text(format!("Current Image: {}", current_image)),
                    )
                    .with_child(VNode::element("label").with_text(format!("Project {} Link:", number)))
                    .with_child(
                        VNode::element("input")
                            .with_attr("type", "url")
                            .with_attr("value", sanitize(&project.link))
                            .with_binding(Binding::FormControl { key: key(ProjectField::Link) }),
                    )
                    .with_child(self.remove_button(Section::Projects, index))
            })
            .collect();

        VNode::element("div")
            .with_attr("id", "config-projects")
            .with_children(rows)
    }

    fn editable(&self, node: VNode, class: &str, field: ScalarField) -> VNode {
        self.editable_item(node, class, KeyPath::field(field))
    }

    fn editable_item(&self, node: VNode, class: &str, key: KeyPath) -> VNode {
        let classes = if self.options.edit_mode {
            format!("{} editable editable-highlight", class)
        } else {
            format!("{} editable", class)
        };
        node.with_class(classes).with_binding(Binding::Edit { key })
    }

    fn display(&self) -> &'static str {
        if self.options.edit_mode {
            "block"
        } else {
            "none"
        }
    }

    fn remove_button(&self, section: Section, index: usize) -> VNode {
        VNode::element("button")
            .with_class("remove-item")
            .with_style("display", self.display())
            .with_binding(Binding::Remove { section, index })
            .with_text("X")
    }

    fn add_button(&self, section: Section) -> VNode {
        let label = section.item_label();
        let mut chars = label.chars();
        let capitalized = match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
            None => String::new(),
        };

        VNode::element("button")
            .with_class("add-item")
            .with_style("display", self.display())
            .with_binding(Binding::Add { section })
            .with_text(format!("Add {}", capitalized))
    }

    fn file_input(&self, id: &str, accept: &str, key: KeyPath) -> VNode {
        VNode::element("input")
            .with_attr("type", "file")
            .with_attr("id", id)
            .with_attr("accept", accept)
            .with_style("display", self.display())
            .with_binding(Binding::FileInput { key })
    }
}

/// Render with default options for the given edit mode
pub fn render(document: &Document, edit_mode: bool) -> VirtualDomDocument {
    Evaluator::with_options(RenderOptions::default().with_edit_mode(edit_mode)).render(document)
}
