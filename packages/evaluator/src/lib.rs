//! # Folio Evaluator
//!
//! Render pipeline: [`Document`](folio_parser::Document) in, fragment trees
//! out. Elements carry [`Binding`]s so hosts can wire editing without
//! parsing markup.

pub mod evaluator;
pub mod utils;
pub mod vdom;

#[cfg(test)]
mod tests_render;

#[cfg(test)]
mod tests_edit_mode;

pub use evaluator::{render, Evaluator, RenderOptions, DEFAULT_NAME, DEFAULT_RESUME_FILE_NAME};
pub use utils::{or_default, sanitize};
pub use vdom::{Binding, Fragment, FragmentKind, VNode, VirtualDomDocument};
