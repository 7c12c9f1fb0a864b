//! # Key paths
//!
//! Typed addresses into a [`Document`](crate::Document).
//!
//! ```text
//! name                  → KeyPath::Field(ScalarField::Name)
//! skills[2]             → KeyPath::Item { section: Skills, index: 2 }
//! projects[0].title     → KeyPath::ItemField { section: Projects, index: 0, field: Title }
//! ```
//!
//! Textual paths only exist at the UI boundary (`data-key` attributes, CLI
//! arguments). They are parsed once into a [`KeyPath`] and the core works
//! with the typed form from there on.

use crate::ast::{ProjectField, ScalarField, Section};
use crate::error::KeyPathError;
use crate::tokenizer::{tokenize, Spanned, Token};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum KeyPath {
    /// Top-level scalar (`name`, `resumeLink`, ...)
    Field(ScalarField),

    /// Whole collection item (`skills[1]`, `projects[0]`)
    Item { section: Section, index: usize },

    /// Field of a record item (`projects[0].link`)
    ItemField {
        section: Section,
        index: usize,
        field: ProjectField,
    },
}

impl KeyPath {
    /// Parse a textual key-path
    pub fn parse(path: &str) -> Result<Self, KeyPathError> {
        KeyPathParser::new(path).parse()
    }

    pub fn field(field: ScalarField) -> Self {
        KeyPath::Field(field)
    }

    pub fn item(section: Section, index: usize) -> Self {
        KeyPath::Item { section, index }
    }

    pub fn project_field(index: usize, field: ProjectField) -> Self {
        KeyPath::ItemField {
            section: Section::Projects,
            index,
            field,
        }
    }

    /// Collection this path points into, if any
    pub fn section(&self) -> Option<Section> {
        match self {
            KeyPath::Field(_) => None,
            KeyPath::Item { section, .. } | KeyPath::ItemField { section, .. } => Some(*section),
        }
    }

    pub fn index(&self) -> Option<usize> {
        match self {
            KeyPath::Field(_) => None,
            KeyPath::Item { index, .. } | KeyPath::ItemField { index, .. } => Some(*index),
        }
    }

    /// Fields whose values are links or image sources
    pub fn is_url_bearing(&self) -> bool {
        match self {
            KeyPath::Field(field) => matches!(
                field,
                ScalarField::ProfileImage
                    | ScalarField::ResumeLink
                    | ScalarField::Linkedin
                    | ScalarField::Github
            ),
            KeyPath::ItemField { field, .. } => {
                matches!(field, ProjectField::Image | ProjectField::Link)
            }
            KeyPath::Item { .. } => false,
        }
    }

    /// Fields edited by picking a file rather than typing
    pub fn is_file_backed(&self) -> bool {
        matches!(
            self,
            KeyPath::Field(ScalarField::ResumeLink)
                | KeyPath::Field(ScalarField::ProfileImage)
                | KeyPath::ItemField {
                    field: ProjectField::Image,
                    ..
                }
        )
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPath::Field(field) => f.write_str(field.as_str()),
            KeyPath::Item { section, index } => write!(f, "{}[{}]", section.as_str(), index),
            KeyPath::ItemField {
                section,
                index,
                field,
            } => write!(f, "{}[{}].{}", section.as_str(), index, field.as_str()),
        }
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

impl From<KeyPath> for String {
    fn from(path: KeyPath) -> Self {
        path.to_string()
    }
}

impl TryFrom<String> for KeyPath {
    type Error = KeyPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        KeyPath::parse(&value)
    }
}

/// Recursive-descent parser over the token stream
struct KeyPathParser<'src> {
    path: &'src str,
    tokens: Vec<Spanned<'src>>,
    pos: usize,
}

impl<'src> KeyPathParser<'src> {
    fn new(path: &'src str) -> Self {
        Self {
            path,
            tokens: tokenize(path),
            pos: 0,
        }
    }

    fn parse(mut self) -> Result<KeyPath, KeyPathError> {
        let head = self.expect_ident("section or field name")?;

        if self.is_at_end() {
            return match ScalarField::from_name(head) {
                Some(field) => Ok(KeyPath::Field(field)),
                None if Section::from_name(head).is_some() => Err(self.error(
                    "a collection must be addressed with an index, e.g. skills[0]",
                )),
                None => Err(KeyPathError::UnknownField {
                    path: self.path.to_string(),
                    name: head.to_string(),
                }),
            };
        }

        let section = Section::from_name(head).ok_or_else(|| KeyPathError::UnknownSection {
            path: self.path.to_string(),
            name: head.to_string(),
        })?;

        self.expect(Token::LBracket, "'['")?;
        let index = match self.advance() {
            Some(Token::Index(index)) => index,
            _ => return Err(self.error_at_previous("expected an index")),
        };
        self.expect(Token::RBracket, "']'")?;

        if self.is_at_end() {
            return Ok(KeyPath::Item { section, index });
        }

        self.expect(Token::Dot, "'.' or end of path")?;
        let name = self.expect_ident("field name")?;

        if !self.is_at_end() {
            return Err(self.error("unexpected trailing input"));
        }

        if !section.has_records() {
            return Err(KeyPathError::NotARecord {
                path: self.path.to_string(),
                section: section.as_str().to_string(),
            });
        }

        let field = ProjectField::from_name(name).ok_or_else(|| KeyPathError::UnknownField {
            path: self.path.to_string(),
            name: name.to_string(),
        })?;

        Ok(KeyPath::ItemField {
            section,
            index,
            field,
        })
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn advance(&mut self) -> Option<Token<'src>> {
        let token = self.tokens.get(self.pos).and_then(|(token, _)| token.clone());
        self.pos += 1;
        token
    }

    fn expect(&mut self, expected: Token<'src>, description: &str) -> Result<(), KeyPathError> {
        match self.advance() {
            Some(token) if token == expected => Ok(()),
            _ => Err(self.error_at_previous(format!("expected {}", description))),
        }
    }

    fn expect_ident(&mut self, description: &str) -> Result<&'src str, KeyPathError> {
        match self.advance() {
            Some(Token::Ident(name)) => Ok(name),
            _ => Err(self.error_at_previous(format!("expected {}", description))),
        }
    }

    fn current_offset(&self, pos: usize) -> usize {
        self.tokens
            .get(pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.path.len())
    }

    fn error(&self, message: impl Into<String>) -> KeyPathError {
        KeyPathError::malformed(self.path, self.current_offset(self.pos), message)
    }

    fn error_at_previous(&self, message: impl Into<String>) -> KeyPathError {
        let pos = self.pos.saturating_sub(1);
        KeyPathError::malformed(self.path, self.current_offset(pos), message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_scalar() {
        assert_eq!(
            KeyPath::parse("profileImage").unwrap(),
            KeyPath::Field(ScalarField::ProfileImage)
        );
    }

    #[test]
    fn test_parse_item() {
        assert_eq!(
            KeyPath::parse("skills[3]").unwrap(),
            KeyPath::item(Section::Skills, 3)
        );
    }

    #[test]
    fn test_parse_item_field() {
        assert_eq!(
            KeyPath::parse("projects[2].title").unwrap(),
            KeyPath::project_field(2, ProjectField::Title)
        );
    }

    #[test]
    fn test_display_is_canonical() {
        for path in ["name", "interests[0]", "projects[12].link", "resumeFileName"] {
            assert_eq!(KeyPath::parse(path).unwrap().to_string(), path);
        }
    }

    #[test]
    fn test_malformed_paths() {
        for path in [
            "",
            "skills[",
            "skills[]",
            "skills[x]",
            "skills[1",
            "projects[0].",
            "projects[0]title",
            "projects[0].title.extra",
            "[0]",
            "skills[-1]",
            "skills",
        ] {
            assert!(
                matches!(KeyPath::parse(path), Err(KeyPathError::Malformed { .. })),
                "expected malformed: {:?}",
                path
            );
        }
    }

    #[test]
    fn test_unknown_names() {
        assert!(matches!(
            KeyPath::parse("socials[0]"),
            Err(KeyPathError::UnknownSection { .. })
        ));
        assert!(matches!(
            KeyPath::parse("nickname"),
            Err(KeyPathError::UnknownField { .. })
        ));
        assert!(matches!(
            KeyPath::parse("projects[0].colour"),
            Err(KeyPathError::UnknownField { .. })
        ));
        assert!(matches!(
            KeyPath::parse("skills[0].title"),
            Err(KeyPathError::NotARecord { .. })
        ));
    }

    #[test]
    fn test_url_and_file_classification() {
        let image = KeyPath::project_field(0, ProjectField::Image);
        assert!(image.is_url_bearing());
        assert!(image.is_file_backed());

        let link = KeyPath::project_field(0, ProjectField::Link);
        assert!(link.is_url_bearing());
        assert!(!link.is_file_backed());

        assert!(KeyPath::field(ScalarField::ResumeLink).is_file_backed());
        assert!(!KeyPath::field(ScalarField::About).is_url_bearing());
        assert!(!KeyPath::item(Section::Skills, 0).is_url_bearing());
    }

    #[test]
    fn test_serde_as_string() {
        let path = KeyPath::project_field(1, ProjectField::Description);
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, "\"projects[1].description\"");
        let back: KeyPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert!(serde_json::from_str::<KeyPath>("\"skills[\"").is_err());
    }
}
