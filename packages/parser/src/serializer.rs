//! JSON boundary for [`Document`]
//!
//! Persisted state and the static fallback document share one shape. Loading
//! goes through [`parse_document`], which applies the model defaults: missing
//! or `null` scalars become `""`, missing collections become empty, a
//! project without an image gets the placeholder.

use crate::ast::{Document, LINK_PLACEHOLDER, PROJECT_PLACEHOLDER_IMAGE};
use crate::error::{ParseError, ParseResult};
use serde::{Deserialize, Deserializer};

/// Parse a serialized document, applying defaults
pub fn parse_document(source: &str) -> ParseResult<Document> {
    serde_json::from_str(source).map_err(ParseError::from)
}

/// Serialize the whole document
pub fn serialize(document: &Document) -> ParseResult<String> {
    serde_json::to_string(document).map_err(ParseError::from)
}

/// Serialize the whole document with indentation (for files meant to be read)
pub fn serialize_pretty(document: &Document) -> ParseResult<String> {
    serde_json::to_string_pretty(document).map_err(ParseError::from)
}

pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.filter(|value| !value.is_empty()))
}

pub(crate) fn vec_or_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn image_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| PROJECT_PLACEHOLDER_IMAGE.to_string()))
}

pub(crate) fn link_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| LINK_PLACEHOLDER.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Project;

    #[test]
    fn test_parse_fills_missing_collections() {
        let doc = parse_document(r#"{ "name": "Ada" }"#).unwrap();
        assert_eq!(doc.name, "Ada");
        assert!(doc.skills.is_empty());
        assert!(doc.projects.is_empty());
        assert!(doc.interests.is_empty());
        assert_eq!(doc.resume_link, None);
    }

    #[test]
    fn test_parse_null_values() {
        let source = r#"{
            "name": null,
            "skills": null,
            "resumeLink": "",
            "resumeFileName": null
        }"#;
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.name, "");
        assert!(doc.skills.is_empty());
        assert_eq!(doc.resume_link, None);
        assert_eq!(doc.resume_file_name, None);
    }

    #[test]
    fn test_project_image_defaults_to_placeholder() {
        let source = r#"{ "projects": [{ "title": "Site", "description": "A site" }] }"#;
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.projects[0].image, PROJECT_PLACEHOLDER_IMAGE);
        assert_eq!(doc.projects[0].link, "#");
    }

    #[test]
    fn test_camel_case_fields() {
        let source = r#"{ "profileImage": "https://example.com/me.png", "resumeFileName": "cv.pdf" }"#;
        let doc = parse_document(source).unwrap();
        assert_eq!(doc.profile_image, "https://example.com/me.png");
        assert_eq!(doc.resume_file_name.as_deref(), Some("cv.pdf"));

        let json = serialize(&doc).unwrap();
        assert!(json.contains("\"profileImage\""));
        assert!(json.contains("\"resumeFileName\""));
    }

    #[test]
    fn test_round_trip() {
        let mut doc = Document::new();
        doc.name = "Grace".to_string();
        doc.skills = vec!["Rust".to_string(), "Go".to_string()];
        doc.interests = vec!["Chess".to_string()];
        doc.projects.push(Project::new(
            "Compiler",
            "A \"small\" compiler\nwith tabs\t",
            "https://example.com/c.png",
            "https://example.com/c",
        ));
        doc.resume_link = Some("blob:folio/3".to_string());

        let restored = parse_document(&serialize(&doc).unwrap()).unwrap();
        assert_eq!(restored, doc);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_document("{ not json").is_err());
        assert!(parse_document(r#"{ "skills": "Rust" }"#).is_err());
    }
}
