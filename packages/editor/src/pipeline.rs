//! # Render Pipeline
//!
//! Keeps the last rendered view so single-element updates (file replace)
//! can patch it in place instead of rebuilding every fragment.

use folio_evaluator::{Evaluator, FragmentKind, RenderOptions, VirtualDomDocument};
use folio_parser::{Document, KeyPath};
use tracing::{debug, warn};

/// Manages document → view rendering
#[derive(Debug, Clone)]
pub struct Pipeline {
    evaluator: Evaluator,
    last_vdom: Option<VirtualDomDocument>,
}

impl Pipeline {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            evaluator: Evaluator::with_options(options),
            last_vdom: None,
        }
    }

    pub fn set_edit_mode(&mut self, edit_mode: bool) {
        self.evaluator.set_edit_mode(edit_mode);
    }

    pub fn edit_mode(&self) -> bool {
        self.evaluator.options().edit_mode
    }

    /// Re-render every fragment and cache the result
    pub fn full_render(&mut self, document: &Document) -> &VirtualDomDocument {
        debug!("full render");
        self.last_vdom.insert(self.evaluator.render(document))
    }

    /// Cached view, rendering first when there is none
    pub fn view(&mut self, document: &Document) -> &VirtualDomDocument {
        self.last_vdom
            .get_or_insert_with(|| self.evaluator.render(document))
    }

    /// Re-render a single fragment of the cached view
    ///
    /// Returns `false` when there is no cached view.
    pub fn refresh_fragment(&mut self, document: &Document, kind: FragmentKind) -> bool {
        match self.last_vdom.as_mut() {
            Some(vdom) => {
                vdom.replace_fragment(self.evaluator.render_fragment(document, kind));
                true
            }
            None => false,
        }
    }

    /// Set one attribute on the cached element bound to `key`
    ///
    /// Returns `false` when there is no cached view or no such element.
    pub fn patch(&mut self, key: &KeyPath, attribute: &str, value: &str) -> bool {
        let patched = self
            .last_vdom
            .as_mut()
            .map(|vdom| vdom.patch_attribute(key, attribute, value))
            .unwrap_or(false);
        if !patched {
            warn!(key = %key, "patch target not found, full render needed");
        }
        patched
    }

    pub fn last_vdom(&self) -> Option<&VirtualDomDocument> {
        self.last_vdom.as_ref()
    }

    /// Drop the cached view
    pub fn clear_cache(&mut self) {
        self.last_vdom = None;
    }
}
