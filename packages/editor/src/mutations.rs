//! # Document Mutations
//!
//! Every change to a [`Document`] goes through a [`Mutation`]. Mutations
//! validate against the current document before touching it, so a failed
//! mutation leaves the document exactly as it was.
//!
//! ## Semantics
//!
//! - `Set`: write through a key-path, padding the section when needed
//! - `Append`: push to the end of a collection
//! - `Remove`: splice one item out; later items shift down by one
//! - `ReplaceProject`: overwrite an existing project record
//! - `ReplaceDocument`: swap in a whole new document (bulk form save)
//! - `Batch`: several mutations that land together or not at all

use crate::errors::MutationError;
use folio_parser::{Document, KeyPath, Project, ResolveError, Section, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Mutation {
    /// Write a value at a key-path
    Set { path: KeyPath, value: Value },

    /// Append an item to a collection
    Append { section: Section, value: Value },

    /// Remove the item at `index`
    Remove { section: Section, index: usize },

    /// Replace an existing project record
    ReplaceProject { index: usize, project: Project },

    /// Replace the whole document
    ReplaceDocument { document: Box<Document> },

    /// Apply each mutation in order, all or nothing
    Batch { mutations: Vec<Mutation> },
}

/// Outcome of a committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationResult {
    /// Store version after the mutation
    pub version: u64,
}

impl Mutation {
    /// Apply mutation with validation
    pub fn apply(&self, doc: &mut Document) -> Result<(), MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::Set { path, value } => doc.set(path, value.clone())?,

            Mutation::Append { section, value } => match (doc.strings_mut(*section), value) {
                (Some(items), Value::Text(text)) => items.push(text.clone()),
                (None, Value::Record(project)) => doc.projects.push(project.clone()),
                _ => return Err(mismatch(section.as_str(), section.has_records()).into()),
            },

            Mutation::Remove { section, index } => match doc.strings_mut(*section) {
                Some(items) => {
                    items.remove(*index);
                }
                None => {
                    doc.projects.remove(*index);
                }
            },

            Mutation::ReplaceProject { index, project } => {
                doc.projects[*index] = project.clone();
            }

            Mutation::ReplaceDocument { document } => {
                *doc = document.as_ref().clone();
            }

            Mutation::Batch { mutations } => {
                let mut staged = doc.clone();
                for mutation in mutations {
                    mutation.apply(&mut staged)?;
                }
                *doc = staged;
            }
        }

        Ok(())
    }

    /// Check the mutation applies cleanly to `doc`
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::Set { path, value } => {
                let expects_record = matches!(
                    path,
                    KeyPath::Item {
                        section: Section::Projects,
                        ..
                    }
                );
                if expects_record != matches!(value, Value::Record(_)) {
                    return Err(mismatch(&path.to_string(), expects_record).into());
                }
                Ok(())
            }

            Mutation::Append { section, value } => {
                if section.has_records() != matches!(value, Value::Record(_)) {
                    return Err(mismatch(section.as_str(), section.has_records()).into());
                }
                Ok(())
            }

            Mutation::Remove { section, index } => check_index(doc, *section, *index),

            Mutation::ReplaceProject { index, .. } => check_index(doc, Section::Projects, *index),

            Mutation::ReplaceDocument { .. } => Ok(()),

            Mutation::Batch { mutations } => {
                let mut scratch = doc.clone();
                mutations
                    .iter()
                    .try_for_each(|mutation| mutation.apply(&mut scratch))
            }
        }
    }
}

fn check_index(doc: &Document, section: Section, index: usize) -> Result<(), MutationError> {
    let len = doc.section_len(section);
    if index >= len {
        return Err(MutationError::IndexOutOfRange {
            section: section.as_str().to_string(),
            index,
            len,
        });
    }
    Ok(())
}

fn mismatch(path: &str, expects_record: bool) -> ResolveError {
    let (expected, found) = if expects_record {
        ("a project record", "text")
    } else {
        ("text", "a project record")
    };
    ResolveError::TypeMismatch {
        path: path.to_string(),
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> Document {
        let mut doc = Document::new();
        doc.skills = vec!["Rust".into(), "Go".into(), "Zig".into()];
        doc.projects = vec![Project::new("A", "a", "", "#")];
        doc
    }

    #[test]
    fn test_remove_shifts_later_items() {
        let mut doc = doc();
        Mutation::Remove {
            section: Section::Skills,
            index: 1,
        }
        .apply(&mut doc)
        .unwrap();

        assert_eq!(doc.skills, vec!["Rust", "Zig"]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_document() {
        let mut doc = doc();
        let before = doc.clone();
        let err = Mutation::Remove {
            section: Section::Projects,
            index: 1,
        }
        .apply(&mut doc)
        .unwrap_err();

        assert_eq!(
            err,
            MutationError::IndexOutOfRange {
                section: "projects".to_string(),
                index: 1,
                len: 1
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn test_append_type_checked() {
        let mut doc = doc();
        let before = doc.clone();

        assert!(Mutation::Append {
            section: Section::Skills,
            value: Value::Record(Project::default()),
        }
        .apply(&mut doc)
        .is_err());
        assert!(Mutation::Append {
            section: Section::Projects,
            value: Value::text("x"),
        }
        .apply(&mut doc)
        .is_err());
        assert_eq!(doc, before);

        Mutation::Append {
            section: Section::Interests,
            value: Value::text("Chess"),
        }
        .apply(&mut doc)
        .unwrap();
        assert_eq!(doc.interests, vec!["Chess"]);
    }

    #[test]
    fn test_set_through_key_path() {
        let mut doc = doc();
        Mutation::Set {
            path: KeyPath::parse("projects[0].link").unwrap(),
            value: Value::text("https://a.dev"),
        }
        .apply(&mut doc)
        .unwrap();
        assert_eq!(doc.projects[0].link, "https://a.dev");

        let before = doc.clone();
        assert!(Mutation::Set {
            path: KeyPath::parse("projects[0]").unwrap(),
            value: Value::text("nope"),
        }
        .apply(&mut doc)
        .is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_replace_project_requires_existing_index() {
        let mut doc = doc();
        let project = Project::new("B", "b", "https://img.dev/b.png", "#");

        assert!(Mutation::ReplaceProject {
            index: 3,
            project: project.clone()
        }
        .apply(&mut doc)
        .is_err());

        Mutation::ReplaceProject { index: 0, project: project.clone() }
            .apply(&mut doc)
            .unwrap();
        assert_eq!(doc.projects, vec![project]);
    }

    #[test]
    fn test_batch_is_all_or_nothing() {
        let mut doc = doc();
        let before = doc.clone();
        let batch = Mutation::Batch {
            mutations: vec![
                Mutation::Set {
                    path: KeyPath::parse("resumeFileName").unwrap(),
                    value: Value::text("cv.pdf"),
                },
                Mutation::Remove {
                    section: Section::Projects,
                    index: 5,
                },
            ],
        };
        assert!(batch.apply(&mut doc).is_err());
        assert_eq!(doc, before);

        Mutation::Batch {
            mutations: vec![
                Mutation::Set {
                    path: KeyPath::parse("resumeFileName").unwrap(),
                    value: Value::text("cv.pdf"),
                },
                Mutation::Set {
                    path: KeyPath::parse("resumeLink").unwrap(),
                    value: Value::text("blob:cv"),
                },
            ],
        }
        .apply(&mut doc)
        .unwrap();
        assert_eq!(doc.resume_file_name.as_deref(), Some("cv.pdf"));
        assert_eq!(doc.resume_link.as_deref(), Some("blob:cv"));
    }

    #[test]
    fn test_mutation_serialization() {
        let mutation = Mutation::Set {
            path: KeyPath::parse("skills[2]").unwrap(),
            value: Value::text("Elm"),
        };
        let json = serde_json::to_string(&mutation).unwrap();
        assert_eq!(json, r#"{"op":"set","path":"skills[2]","value":"Elm"}"#);

        let deserialized: Mutation = serde_json::from_str(&json).unwrap();
        assert_eq!(mutation, deserialized);
    }
}
