use serde::{Deserialize, Serialize};

/// Placeholder shown for a project without an image
pub const PROJECT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x250";

/// Placeholder shown when no profile image is configured
pub const PROFILE_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200";

/// Link target used when a link is not configured
pub const LINK_PLACEHOLDER: &str = "#";

/// Root portfolio document
///
/// Every scalar defaults to the empty string; only the two resume fields
/// are nullable. Collections are always present once loaded.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub name: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub location: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub email: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub phone: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub linkedin: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub github: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub profile_image: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub about: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub welcome: String,
    #[serde(deserialize_with = "crate::serializer::empty_as_none")]
    pub resume_link: Option<String>,
    #[serde(deserialize_with = "crate::serializer::empty_as_none")]
    pub resume_file_name: Option<String>,
    #[serde(deserialize_with = "crate::serializer::vec_or_empty")]
    pub skills: Vec<String>,
    #[serde(deserialize_with = "crate::serializer::vec_or_empty")]
    pub projects: Vec<Project>,
    #[serde(deserialize_with = "crate::serializer::vec_or_empty")]
    pub interests: Vec<String>,
}

/// Portfolio project card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub title: String,
    #[serde(deserialize_with = "crate::serializer::string_or_empty")]
    pub description: String,
    #[serde(deserialize_with = "crate::serializer::image_or_placeholder")]
    pub image: String,
    #[serde(deserialize_with = "crate::serializer::link_or_placeholder")]
    pub link: String,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image: PROJECT_PLACEHOLDER_IMAGE.to_string(),
            link: LINK_PLACEHOLDER.to_string(),
        }
    }
}

impl Project {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        link: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            link: link.into(),
        }
    }

    pub fn field(&self, field: ProjectField) -> &str {
        match field {
            ProjectField::Title => &self.title,
            ProjectField::Description => &self.description,
            ProjectField::Image => &self.image,
            ProjectField::Link => &self.link,
        }
    }

    pub fn field_mut(&mut self, field: ProjectField) -> &mut String {
        match field {
            ProjectField::Title => &mut self.title,
            ProjectField::Description => &mut self.description,
            ProjectField::Image => &mut self.image,
            ProjectField::Link => &mut self.link,
        }
    }
}

/// Top-level scalar fields of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalarField {
    Name,
    Location,
    Email,
    Phone,
    Linkedin,
    Github,
    ProfileImage,
    About,
    Welcome,
    ResumeLink,
    ResumeFileName,
}

impl ScalarField {
    pub const ALL: [ScalarField; 11] = [
        ScalarField::Name,
        ScalarField::Location,
        ScalarField::Email,
        ScalarField::Phone,
        ScalarField::Linkedin,
        ScalarField::Github,
        ScalarField::ProfileImage,
        ScalarField::About,
        ScalarField::Welcome,
        ScalarField::ResumeLink,
        ScalarField::ResumeFileName,
    ];

    /// JSON / key-path name
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarField::Name => "name",
            ScalarField::Location => "location",
            ScalarField::Email => "email",
            ScalarField::Phone => "phone",
            ScalarField::Linkedin => "linkedin",
            ScalarField::Github => "github",
            ScalarField::ProfileImage => "profileImage",
            ScalarField::About => "about",
            ScalarField::Welcome => "welcome",
            ScalarField::ResumeLink => "resumeLink",
            ScalarField::ResumeFileName => "resumeFileName",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Nullable fields (the resume pair)
    pub fn is_optional(self) -> bool {
        matches!(self, ScalarField::ResumeLink | ScalarField::ResumeFileName)
    }
}

/// Ordered collections of a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Skills,
    Interests,
    Projects,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Skills, Section::Interests, Section::Projects];

    pub fn as_str(self) -> &'static str {
        match self {
            Section::Skills => "skills",
            Section::Interests => "interests",
            Section::Projects => "projects",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.as_str() == name)
    }

    /// Singular label used in prompts ("skill", "interest", "project")
    pub fn item_label(self) -> &'static str {
        match self {
            Section::Skills => "skill",
            Section::Interests => "interest",
            Section::Projects => "project",
        }
    }

    /// Whether items are records with addressable fields
    pub fn has_records(self) -> bool {
        matches!(self, Section::Projects)
    }
}

/// Fields of a [`Project`] record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectField {
    Title,
    Description,
    Image,
    Link,
}

impl ProjectField {
    pub const ALL: [ProjectField; 4] = [
        ProjectField::Title,
        ProjectField::Description,
        ProjectField::Image,
        ProjectField::Link,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectField::Title => "title",
            ProjectField::Description => "description",
            ProjectField::Image => "image",
            ProjectField::Link => "link",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

/// A value read from or written to a key-path location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Text(String),
    Record(Project),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Record(_) => None,
        }
    }

    pub fn as_record(&self) -> Option<&Project> {
        match self {
            Value::Record(project) => Some(project),
            Value::Text(_) => None,
        }
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scalar(&self, field: ScalarField) -> Option<&str> {
        match field {
            ScalarField::Name => Some(&self.name),
            ScalarField::Location => Some(&self.location),
            ScalarField::Email => Some(&self.email),
            ScalarField::Phone => Some(&self.phone),
            ScalarField::Linkedin => Some(&self.linkedin),
            ScalarField::Github => Some(&self.github),
            ScalarField::ProfileImage => Some(&self.profile_image),
            ScalarField::About => Some(&self.about),
            ScalarField::Welcome => Some(&self.welcome),
            ScalarField::ResumeLink => self.resume_link.as_deref(),
            ScalarField::ResumeFileName => self.resume_file_name.as_deref(),
        }
    }

    pub fn set_scalar(&mut self, field: ScalarField, value: String) {
        match field {
            ScalarField::Name => self.name = value,
            ScalarField::Location => self.location = value,
            ScalarField::Email => self.email = value,
            ScalarField::Phone => self.phone = value,
            ScalarField::Linkedin => self.linkedin = value,
            ScalarField::Github => self.github = value,
            ScalarField::ProfileImage => self.profile_image = value,
            ScalarField::About => self.about = value,
            ScalarField::Welcome => self.welcome = value,
            ScalarField::ResumeLink => self.resume_link = Some(value),
            ScalarField::ResumeFileName => self.resume_file_name = Some(value),
        }
    }

    /// Number of items in a collection
    pub fn section_len(&self, section: Section) -> usize {
        match section {
            Section::Skills => self.skills.len(),
            Section::Interests => self.interests.len(),
            Section::Projects => self.projects.len(),
        }
    }

    /// String items of `skills` / `interests`; `None` for `projects`
    pub fn strings(&self, section: Section) -> Option<&Vec<String>> {
        match section {
            Section::Skills => Some(&self.skills),
            Section::Interests => Some(&self.interests),
            Section::Projects => None,
        }
    }

    pub fn strings_mut(&mut self, section: Section) -> Option<&mut Vec<String>> {
        match section {
            Section::Skills => Some(&mut self.skills),
            Section::Interests => Some(&mut self.interests),
            Section::Projects => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_document_is_empty() {
        let doc = Document::new();
        assert_eq!(doc.name, "");
        assert!(doc.resume_link.is_none());
        assert!(doc.skills.is_empty());
        assert!(doc.projects.is_empty());
        assert!(doc.interests.is_empty());
    }

    #[test]
    fn test_default_project_uses_placeholders() {
        let project = Project::default();
        assert_eq!(project.image, PROJECT_PLACEHOLDER_IMAGE);
        assert_eq!(project.link, LINK_PLACEHOLDER);
    }

    #[test]
    fn test_scalar_names_round_trip() {
        for field in ScalarField::ALL {
            assert_eq!(ScalarField::from_name(field.as_str()), Some(field));
        }
        assert_eq!(ScalarField::from_name("socials"), None);
    }

    #[test]
    fn test_set_resume_field_is_some() {
        let mut doc = Document::new();
        doc.set_scalar(ScalarField::ResumeLink, "blob:folio/1".to_string());
        assert_eq!(doc.scalar(ScalarField::ResumeLink), Some("blob:folio/1"));
        assert_eq!(doc.scalar(ScalarField::ResumeFileName), None);
    }
}
