//! Get/set values at a [`KeyPath`]
//!
//! Writing past the end of a collection pads it with default items up to the
//! addressed index, so `projects[3].title` on a two-project document yields
//! four projects. At most [`MAX_PADDING`] items are created this way; an index
//! further out is rejected. Nothing is ever removed through a key path.

use crate::ast::{Document, Project, Value};
use crate::error::ResolveError;
use crate::key_path::KeyPath;

/// Most default items one write may create ahead of the addressed index
pub const MAX_PADDING: usize = 64;

impl Document {
    /// Read the value addressed by `path`
    ///
    /// Returns `None` for unset resume fields and indices past the end.
    pub fn get(&self, path: &KeyPath) -> Option<Value> {
        match *path {
            KeyPath::Field(field) => self.scalar(field).map(Value::text),
            KeyPath::Item { section, index } => match self.strings(section) {
                Some(items) => items.get(index).cloned().map(Value::Text),
                None => self.projects.get(index).cloned().map(Value::Record),
            },
            KeyPath::ItemField { section, index, field } => self
                .projects
                .get(index)
                .filter(|_| section.has_records())
                .map(|project| Value::text(project.field(field))),
        }
    }

    /// Write `value` at `path`, creating missing items on the way
    ///
    /// On error the document is left untouched.
    pub fn set(&mut self, path: &KeyPath, value: Value) -> Result<(), ResolveError> {
        match (*path, value) {
            (KeyPath::Field(field), Value::Text(text)) => {
                self.set_scalar(field, text);
                Ok(())
            }
            (KeyPath::Item { section, index }, Value::Text(text)) => {
                let items = self
                    .strings_mut(section)
                    .ok_or_else(|| mismatch(path, "a project record", "text"))?;
                *slot(path, items, index, String::new)? = text;
                Ok(())
            }
            (KeyPath::Item { section, index }, Value::Record(project)) => {
                if !section.has_records() {
                    return Err(mismatch(path, "text", "a project record"));
                }
                *slot(path, &mut self.projects, index, Project::default)? = project;
                Ok(())
            }
            (KeyPath::ItemField { section, index, field }, Value::Text(text)) => {
                if !section.has_records() {
                    return Err(mismatch(path, "a record section", "a field path"));
                }
                *slot(path, &mut self.projects, index, Project::default)?.field_mut(field) = text;
                Ok(())
            }
            (KeyPath::Field(_), Value::Record(_)) | (KeyPath::ItemField { .. }, Value::Record(_)) => {
                Err(mismatch(path, "text", "a project record"))
            }
        }
    }

    /// Parse `path` and write `value` there
    pub fn set_path(&mut self, path: &str, value: Value) -> Result<KeyPath, crate::PathError> {
        let key_path = KeyPath::parse(path)?;
        self.set(&key_path, value)?;
        Ok(key_path)
    }
}

fn slot<'a, T>(
    path: &KeyPath,
    items: &'a mut Vec<T>,
    index: usize,
    fill: impl Fn() -> T,
) -> Result<&'a mut T, ResolveError> {
    let len = items.len();
    if index >= len {
        if index - len > MAX_PADDING {
            return Err(ResolveError::IndexOutOfRange {
                path: path.to_string(),
                index,
                len,
            });
        }
        items.resize_with(index + 1, fill);
    }
    Ok(&mut items[index])
}

fn mismatch(path: &KeyPath, expected: &'static str, found: &'static str) -> ResolveError {
    ResolveError::TypeMismatch {
        path: path.to_string(),
        expected,
        found,
    }
}
