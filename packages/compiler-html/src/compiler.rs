use folio_evaluator::{Binding, Fragment, FragmentKind, VNode, VirtualDomDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors that can occur during HTML compilation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Invalid tag name: {0:?}")]
    InvalidTagName(String),

    #[error("Invalid attribute name {name:?} on <{tag}>")]
    InvalidAttributeName { tag: String, name: String },
}

/// Options for HTML compilation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
    /// Page `<title>`
    pub site_title: String,
    /// Stylesheet linked from `<head>`
    pub stylesheet: Option<String>,
    /// Script loaded at the end of `<body>`
    pub script: Option<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
            site_title: "Portfolio".to_string(),
            stylesheet: None,
            script: None,
        }
    }
}

struct Context<'a> {
    options: &'a CompileOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a CompileOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        self.add_indent();
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        let options = self.options;
        if options.pretty {
            for _ in 0..self.depth {
                self.buffer.push_str(&options.indent);
            }
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Compile a rendered document to a full HTML page
pub fn compile_to_html(
    vdoc: &VirtualDomDocument,
    options: &CompileOptions,
) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    compile_head(&mut ctx);

    if vdoc.edit_mode {
        ctx.add_line("<body class=\"edit-mode\">");
    } else {
        ctx.add_line("<body>");
    }
    ctx.indent();

    for fragment in &vdoc.fragments {
        compile_container(fragment, &mut ctx)?;
    }

    if let Some(script) = &options.script {
        ctx.add_line(&format!("<script src=\"{}\"></script>", escape_html(script)));
    }

    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    Ok(ctx.get_output())
}

/// Compile the children of one fragment, without its container
///
/// This is what a host assigns as the container's inner HTML.
pub fn compile_fragment(fragment: &Fragment, options: &CompileOptions) -> Result<String, CompileError> {
    let mut ctx = Context::new(options);
    for node in &fragment.nodes {
        compile_node(node, &mut ctx)?;
    }
    Ok(ctx.get_output())
}

fn compile_head(ctx: &mut Context) {
    let options = ctx.options;
    ctx.add_line("<head>");
    ctx.indent();

    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&options.site_title)));

    if let Some(stylesheet) = &options.stylesheet {
        let href = escape_html(stylesheet);
        ctx.add_line(&format!("<link rel=\"stylesheet\" href=\"{}\">", href));
    }

    ctx.dedent();
    ctx.add_line("</head>");
}

fn compile_container(fragment: &Fragment, ctx: &mut Context) -> Result<(), CompileError> {
    let tag = match fragment.kind {
        FragmentKind::Profile => "section",
        FragmentKind::ConfigForm => "form",
        _ => "div",
    };

    ctx.add_line(&format!(
        "<{} id=\"{}\">",
        tag,
        escape_html(&fragment.container)
    ));
    ctx.indent();

    for node in &fragment.nodes {
        compile_node(node, ctx)?;
    }

    ctx.dedent();
    ctx.add_line(&format!("</{}>", tag));

    Ok(())
}

fn compile_node(node: &VNode, ctx: &mut Context) -> Result<(), CompileError> {
    match node {
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            binding,
        } => compile_tag(tag, attributes, styles, children, binding.as_ref(), ctx),

        VNode::Text { content } => {
            ctx.add_line(&escape_html(content));
            Ok(())
        }
    }
}

fn compile_tag(
    name: &str,
    attributes: &BTreeMap<String, String>,
    styles: &BTreeMap<String, String>,
    children: &[VNode],
    binding: Option<&Binding>,
    ctx: &mut Context,
) -> Result<(), CompileError> {
    if !is_valid_name(name) {
        return Err(CompileError::InvalidTagName(name.to_string()));
    }

    ctx.add_indent();
    ctx.add(&format!("<{}", name));

    for (attr_name, value) in attributes {
        if !is_valid_name(attr_name) {
            return Err(CompileError::InvalidAttributeName {
                tag: name.to_string(),
                name: attr_name.clone(),
            });
        }
        compile_attribute(attr_name, value, ctx);
    }

    if let Some(binding) = binding {
        compile_binding(binding, ctx);
    }

    if !styles.is_empty() {
        let style: Vec<String> = styles
            .iter()
            .map(|(key, value)| format!("{}: {};", key, value))
            .collect();
        compile_attribute("style", &style.join(" "), ctx);
    }

    if children.is_empty() && is_self_closing(name) {
        ctx.add(" />");
        ctx.newline();
        return Ok(());
    }

    ctx.add(">");

    // Text-only children stay on the tag's line
    if children.iter().all(|child| matches!(child, VNode::Text { .. })) {
        for child in children {
            if let VNode::Text { content } = child {
                ctx.add(&escape_html(content));
            }
        }
    } else {
        ctx.newline();
        ctx.indent();
        for child in children {
            compile_node(child, ctx)?;
        }
        ctx.dedent();
        ctx.add_indent();
    }

    ctx.add(&format!("</{}>", name));
    ctx.newline();

    Ok(())
}

fn compile_attribute(name: &str, value: &str, ctx: &mut Context) {
    ctx.add(" ");
    ctx.add(name);
    ctx.add("=\"");
    ctx.add(&escape_html(value));
    ctx.add("\"");
}

fn compile_binding(binding: &Binding, ctx: &mut Context) {
    match binding {
        Binding::Edit { key } => compile_attribute("data-key", &key.to_string(), ctx),
        Binding::Remove { section, index } => {
            compile_attribute("data-action", "remove", ctx);
            compile_attribute("data-section", section.as_str(), ctx);
            compile_attribute("data-index", &index.to_string(), ctx);
        }
        Binding::Add { section } => {
            compile_attribute("data-action", "add", ctx);
            compile_attribute("data-section", section.as_str(), ctx);
        }
        Binding::FormControl { key } => compile_attribute("data-field", &key.to_string(), ctx),
        Binding::FileInput { key } => compile_attribute("data-upload", &key.to_string(), ctx),
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "area" | "base" | "col" | "embed"
            | "source" | "track" | "wbr"
    )
}
