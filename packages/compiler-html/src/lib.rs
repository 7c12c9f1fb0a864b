//! # Folio HTML compiler
//!
//! Serializes rendered fragments to static HTML. Bindings are written as
//! `data-*` attributes so a script layer can find editable elements.

mod compiler;


pub use compiler::{compile_fragment, compile_to_html, CompileError, CompileOptions};
