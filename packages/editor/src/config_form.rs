//! Bulk save of the admin configuration form
//!
//! The form mirrors every document field. Submitting it rebuilds the whole
//! document: blank list entries and incomplete project rows are dropped,
//! project images and resume fields are carried over from the current
//! document since the form has no text control for them.

use crate::errors::ValidationError;
use crate::validation::validate_url;
use folio_parser::{Document, Project, PROJECT_PLACEHOLDER_IMAGE};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigForm {
    pub name: String,
    pub location: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub profile_image: String,
    pub about: String,
    pub welcome: String,
    pub skills: Vec<String>,
    pub interests: Vec<String>,
    pub projects: Vec<ProjectRow>,
}

/// Editable text of one project in the form
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRow {
    pub title: String,
    pub description: String,
    pub link: String,
}

impl ConfigForm {
    pub fn from_document(doc: &Document) -> Self {
        Self {
            name: doc.name.clone(),
            location: doc.location.clone(),
            email: doc.email.clone(),
            phone: doc.phone.clone(),
            linkedin: doc.linkedin.clone(),
            github: doc.github.clone(),
            profile_image: doc.profile_image.clone(),
            about: doc.about.clone(),
            welcome: doc.welcome.clone(),
            skills: doc.skills.clone(),
            interests: doc.interests.clone(),
            projects: doc
                .projects
                .iter()
                .map(|p| ProjectRow {
                    title: p.title.clone(),
                    description: p.description.clone(),
                    link: p.link.clone(),
                })
                .collect(),
        }
    }

    /// Build the replacement document
    ///
    /// Rejects any invalid URL with [`ValidationError::InvalidUrl`] instead of saving it.
    pub fn to_document(&self, current: &Document) -> Result<Document, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }

        let projects: Vec<Project> = self
            .projects
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.title.is_empty() && !row.description.is_empty())
            .map(|(index, row)| {
                let image = current
                    .projects
                    .get(index)
                    .map(|p| p.image.as_str())
                    .filter(|image| !image.is_empty())
                    .unwrap_or(PROJECT_PLACEHOLDER_IMAGE);
                Project::new(&row.title, &row.description, image, &row.link)
            })
            .collect();

        for url in [
            self.profile_image.as_str(),
            self.linkedin.as_str(),
            self.github.as_str(),
            current.resume_link.as_deref().unwrap_or_default(),
        ] {
            validate_url(url)?;
        }
        for project in &projects {
            validate_url(&project.image)?;
            validate_url(&project.link)?;
        }

        Ok(Document {
            name: self.name.clone(),
            location: self.location.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            linkedin: self.linkedin.clone(),
            github: self.github.clone(),
            profile_image: self.profile_image.clone(),
            about: self.about.clone(),
            welcome: self.welcome.clone(),
            resume_link: current.resume_link.clone(),
            resume_file_name: current.resume_file_name.clone(),
            skills: non_empty(&self.skills),
            interests: non_empty(&self.interests),
            projects,
        })
    }
}

fn non_empty(items: &[String]) -> Vec<String> {
    items.iter().filter(|item| !item.is_empty()).cloned().collect()
}
