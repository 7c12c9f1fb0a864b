//! # Folio Parser
//!
//! Portfolio document model and the key-path addressing scheme used to
//! target its fields.
//!
//! - [`ast`]: the [`Document`] and its [`Project`] records
//! - [`key_path`]: typed [`KeyPath`] addresses, parsed from `projects[2].title`
//! - [`resolver`]: `Document::get` / `Document::set` through a key path
//! - [`serializer`]: JSON load/save with model defaults

pub mod ast;
pub mod error;
pub mod key_path;
pub mod resolver;
pub mod serializer;
pub mod tokenizer;

pub use ast::{
    Document, Project, ProjectField, ScalarField, Section, Value, LINK_PLACEHOLDER,
    PROFILE_PLACEHOLDER_IMAGE, PROJECT_PLACEHOLDER_IMAGE,
};
pub use error::{KeyPathError, ParseError, ParseResult, PathError, ResolveError};
pub use key_path::KeyPath;
pub use serializer::{parse_document, serialize, serialize_pretty};
pub use tokenizer::{tokenize, Token};
