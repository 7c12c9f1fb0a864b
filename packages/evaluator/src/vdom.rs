use folio_parser::{KeyPath, Section};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What an element is wired to in the editing layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Binding {
    /// Click-to-edit target
    Edit { key: KeyPath },
    /// Remove-item button
    Remove { section: Section, index: usize },
    /// Add-item button
    Add { section: Section },
    /// Admin form control mirroring a document field
    FormControl { key: KeyPath },
    /// File picker replacing a file-backed field
    FileInput { key: KeyPath },
}

/// Virtual DOM node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        styles: BTreeMap<String, String>,
        children: Vec<VNode>,
        #[serde(skip_serializing_if = "Option::is_none")]
        binding: Option<Binding>,
    },

    /// Text node
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            children: Vec::new(),
            binding: None,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_class(self, class: impl Into<String>) -> Self {
        self.with_attr("class", class)
    }

    pub fn with_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element { ref mut styles, .. } = self {
            styles.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: Vec<VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn with_text(self, content: impl Into<String>) -> Self {
        self.with_child(VNode::text(content))
    }

    pub fn with_binding(mut self, new_binding: Binding) -> Self {
        if let VNode::Element {
            ref mut binding, ..
        } = self
        {
            *binding = Some(new_binding);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn style(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { styles, .. } => styles.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn binding(&self) -> Option<&Binding> {
        match self {
            VNode::Element { binding, .. } => binding.as_ref(),
            VNode::Text { .. } => None,
        }
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of this node and its descendants, skipping buttons
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { tag, children, .. } if tag != "button" => {
                children.iter().map(VNode::text_content).collect()
            }
            VNode::Element { .. } => String::new(),
        }
    }

    /// Depth-first pre-order walk
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a VNode)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    fn walk_mut(&mut self, visit: &mut impl FnMut(&mut VNode) -> bool) -> bool {
        if visit(self) {
            return true;
        }
        if let VNode::Element { children, .. } = self {
            for child in children {
                if child.walk_mut(visit) {
                    return true;
                }
            }
        }
        false
    }
}

/// Display regions rebuilt by the render pipeline, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FragmentKind {
    Profile,
    Skills,
    Projects,
    Socials,
    Interests,
    ConfigForm,
}

impl FragmentKind {
    pub const ALL: [FragmentKind; 6] = [
        FragmentKind::Profile,
        FragmentKind::Skills,
        FragmentKind::Projects,
        FragmentKind::Socials,
        FragmentKind::Interests,
        FragmentKind::ConfigForm,
    ];

    /// Id of the container whose children the fragment replaces
    pub fn container_id(self) -> &'static str {
        match self {
            FragmentKind::Profile => "profile",
            FragmentKind::Skills => "skills-grid",
            FragmentKind::Projects => "project-grid",
            FragmentKind::Socials => "social-links",
            FragmentKind::Interests => "interests-grid",
            FragmentKind::ConfigForm => "config-form",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.container_id() == name || kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            FragmentKind::Profile => "profile",
            FragmentKind::Skills => "skills",
            FragmentKind::Projects => "projects",
            FragmentKind::Socials => "socials",
            FragmentKind::Interests => "interests",
            FragmentKind::ConfigForm => "configForm",
        }
    }
}

/// Full replacement content for one container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub container: String,
    pub nodes: Vec<VNode>,
}

impl Fragment {
    pub fn new(kind: FragmentKind, nodes: Vec<VNode>) -> Self {
        Self {
            kind,
            container: kind.container_id().to_string(),
            nodes,
        }
    }
}

/// Virtual document: every fragment of one render pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VirtualDomDocument {
    pub fragments: Vec<Fragment>,
    /// Edit mode the view was rendered for
    pub edit_mode: bool,
}

impl VirtualDomDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// JSON form handed to hosts
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn add_fragment(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Swap in a re-rendered fragment, or append it when missing
    pub fn replace_fragment(&mut self, fragment: Fragment) {
        match self.fragments.iter_mut().find(|f| f.kind == fragment.kind) {
            Some(existing) => *existing = fragment,
            None => self.fragments.push(fragment),
        }
    }

    pub fn fragment(&self, kind: FragmentKind) -> Option<&Fragment> {
        self.fragments.iter().find(|fragment| fragment.kind == kind)
    }

    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a VNode)) {
        for fragment in &self.fragments {
            for node in &fragment.nodes {
                node.walk(visit);
            }
        }
    }

    /// Key-paths of every click-to-edit element, in render order
    pub fn editables(&self) -> Vec<KeyPath> {
        let mut keys = Vec::new();
        self.walk(&mut |node| {
            if let Some(Binding::Edit { key }) = node.binding() {
                keys.push(*key);
            }
        });
        keys
    }

    /// Live-view element annotated with `key`
    pub fn find_by_key_path(&self, key: &KeyPath) -> Option<&VNode> {
        let mut found = None;
        self.walk(&mut |node| {
            if found.is_none() {
                if let Some(Binding::Edit { key: bound }) = node.binding() {
                    if bound == key {
                        found = Some(node);
                    }
                }
            }
        });
        found
    }

    /// Set one attribute on the live-view element annotated with `key`
    ///
    /// Returns `false` when no such element exists.
    pub fn patch_attribute(&mut self, key: &KeyPath, name: &str, value: &str) -> bool {
        self.fragments.iter_mut().any(|fragment| {
            fragment.nodes.iter_mut().any(|node| {
                node.walk_mut(&mut |candidate| match candidate {
                    VNode::Element {
                        attributes,
                        binding: Some(Binding::Edit { key: bound }),
                        ..
                    } if *bound == *key => {
                        attributes.insert(name.to_string(), value.to_string());
                        true
                    }
                    _ => false,
                })
            })
        })
    }

    /// Remove buttons as `(section, index, visible)`
    pub fn remove_controls(&self) -> Vec<(Section, usize, bool)> {
        let mut controls = Vec::new();
        self.walk(&mut |node| {
            if let Some(Binding::Remove { section, index }) = node.binding() {
                controls.push((*section, *index, node.style("display") != Some("none")));
            }
        });
        controls
    }

    /// Form controls mirroring document fields
    pub fn form_controls(&self) -> Vec<KeyPath> {
        let mut keys = Vec::new();
        self.walk(&mut |node| {
            if let Some(Binding::FormControl { key }) = node.binding() {
                keys.push(*key);
            }
        });
        keys
    }
}
