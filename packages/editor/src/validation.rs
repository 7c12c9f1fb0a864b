use crate::errors::{UploadError, ValidationError};
use crate::uploads::UploadPurpose;
use folio_parser::{KeyPath, Project, LINK_PLACEHOLDER, PROFILE_PLACEHOLDER_IMAGE, PROJECT_PLACEHOLDER_IMAGE};
use url::Url;

/// Values accepted in URL-bearing fields without parsing
pub fn is_url_exempt(value: &str) -> bool {
    value.is_empty()
        || value == LINK_PLACEHOLDER
        || value.starts_with("blob:")
        || value == PROJECT_PLACEHOLDER_IMAGE
        || value == PROFILE_PLACEHOLDER_IMAGE
}

/// Accept exempt values and absolute URLs
pub fn validate_url(value: &str) -> Result<(), ValidationError> {
    if is_url_exempt(value) {
        return Ok(());
    }
    Url::parse(value)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidUrl)
}

/// Validate `value` for the field at `key`; only URL-bearing fields are checked
pub fn validate_field(key: &KeyPath, value: &str) -> Result<(), ValidationError> {
    if key.is_url_bearing() {
        validate_url(value)?;
    }
    Ok(())
}

/// A new skill or interest must not be empty
pub fn validate_item(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::EmptyValue);
    }
    Ok(())
}

/// Title and description are required; the link must be a URL
pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.title.is_empty() || project.description.is_empty() {
        return Err(ValidationError::MissingProjectFields);
    }
    validate_url(&project.link).map_err(|_| ValidationError::InvalidProjectLink)
}

/// Check a file's declared type against what the field accepts
pub fn validate_mime(purpose: UploadPurpose, mime_type: &str) -> Result<(), UploadError> {
    match purpose {
        UploadPurpose::Resume if mime_type != "application/pdf" => Err(UploadError::NotPdf),
        UploadPurpose::Image if !mime_type.starts_with("image/") => Err(UploadError::NotImage),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_parser::ScalarField;

    #[test]
    fn test_exempt_values() {
        for value in [
            "",
            "#",
            "blob:folio/3",
            "https://via.placeholder.com/400x250",
            "https://via.placeholder.com/200",
        ] {
            assert!(validate_url(value).is_ok(), "{}", value);
        }
    }

    #[test]
    fn test_urls_must_be_absolute() {
        assert!(validate_url("https://example.com/a?b=c").is_ok());
        assert!(validate_url("file:///tmp/cv.pdf").is_ok());
        assert_eq!(validate_url("example.com"), Err(ValidationError::InvalidUrl));
        assert_eq!(validate_url("/relative/path"), Err(ValidationError::InvalidUrl));
    }

    #[test]
    fn test_only_url_fields_are_checked() {
        let about = KeyPath::field(ScalarField::About);
        let github = KeyPath::field(ScalarField::Github);
        assert!(validate_field(&about, "not a url").is_ok());
        assert!(validate_field(&github, "not a url").is_err());
        assert!(validate_field(&KeyPath::parse("projects[1].image").unwrap(), "nope").is_err());
    }

    #[test]
    fn test_project_rules() {
        let mut project = Project::new("", "desc", "", "#");
        assert_eq!(validate_project(&project), Err(ValidationError::MissingProjectFields));

        project.title = "Title".into();
        assert!(validate_project(&project).is_ok());

        project.link = "bad link".into();
        assert_eq!(validate_project(&project), Err(ValidationError::InvalidProjectLink));
    }

    #[test]
    fn test_mime_rules() {
        assert!(validate_mime(UploadPurpose::Resume, "application/pdf").is_ok());
        assert_eq!(validate_mime(UploadPurpose::Resume, "image/png"), Err(UploadError::NotPdf));
        assert!(validate_mime(UploadPurpose::Image, "image/webp").is_ok());
        assert_eq!(validate_mime(UploadPurpose::Image, "text/plain"), Err(UploadError::NotImage));
    }

    #[test]
    fn test_item_rule() {
        assert_eq!(validate_item(""), Err(ValidationError::EmptyValue));
        assert!(validate_item("Go").is_ok());
    }
}
