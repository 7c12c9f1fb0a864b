//! Commands that change the document
//!
//! Each one unlocks a session with `--password` and goes through the same
//! open/fill/save cycle as the page.

use super::site::{file_upload, Site};
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::{EditForm, EditTarget, OpenEdit, UploadTarget, ViewUpdate};
use folio_parser::{KeyPath, ProjectField, Section};
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Key-path of the field, e.g. `about` or `projects[0].title`
    pub key: String,

    /// New value
    pub value: String,

    /// Admin password
    #[arg(long)]
    pub password: String,
}

pub fn set(args: SetArgs, cwd: &Path) -> Result<()> {
    let key = KeyPath::parse(&args.key)?;
    let mut site = Site::unlocked(cwd, &args.password)?;

    let edit = match site.session.open_edit(&key) {
        Some(OpenEdit::Form { edit }) => edit,
        Some(OpenEdit::FilePicker { .. }) => {
            bail!("{} is file-backed. Use: folio upload {} <file>", key, key)
        }
        None => bail!("Session is locked"),
    };

    match (edit.target, edit.form) {
        (EditTarget::Project { focus, .. }, EditForm::Project(mut form)) => {
            if !matches!(key, KeyPath::ItemField { .. }) {
                bail!("Set one field at a time, e.g. {}.title", key);
            }
            match focus {
                ProjectField::Title => form.title = args.value,
                ProjectField::Description => form.description = args.value,
                ProjectField::Link => form.link = args.value,
                ProjectField::Image => bail!("{} is file-backed", key),
            }
            site.session
                .set_project_form(form.title, form.description, form.link)?;
        }
        _ => site.session.set_value(args.value)?,
    }

    site.session.save_edit()?;
    println!("{} Updated {}", "✓".green(), key.to_string().cyan());
    Ok(())
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// skills, interests or projects
    pub section: String,

    /// Item text (skills and interests)
    pub value: Option<String>,

    /// Project title
    #[arg(long)]
    pub title: Option<String>,

    /// Project description
    #[arg(long)]
    pub description: Option<String>,

    /// Project link
    #[arg(long, default_value = "#")]
    pub link: String,

    /// Project image file
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Admin password
    #[arg(long)]
    pub password: String,
}

pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let section = Section::from_name(&args.section)
        .ok_or_else(|| anyhow!("Unknown section: {}", args.section))?;
    let mut site = Site::unlocked(cwd, &args.password)?;

    site.session.begin_add(section);
    if section.has_records() {
        site.session.set_project_form(
            args.title.unwrap_or_default(),
            args.description.unwrap_or_default(),
            args.link,
        )?;
        if let Some(image) = &args.image {
            site.session
                .stage_file(file_upload(&cwd.join(image))?)?;
        }
    } else {
        site.session.set_value(args.value.unwrap_or_default())?;
    }

    site.session.save_edit()?;
    let index = site.session.document().section_len(section).saturating_sub(1);
    println!(
        "{} Added {}",
        "✓".green(),
        KeyPath::item(section, index).to_string().cyan()
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct RemoveArgs {
    /// skills, interests or projects
    pub section: String,

    /// Position of the item (0-based)
    pub index: usize,

    /// Admin password
    #[arg(long)]
    pub password: String,
}

pub fn remove(args: RemoveArgs, cwd: &Path) -> Result<()> {
    let section = Section::from_name(&args.section)
        .ok_or_else(|| anyhow!("Unknown section: {}", args.section))?;
    let mut site = Site::unlocked(cwd, &args.password)?;

    site.session.remove_item(section, args.index)?;
    println!(
        "{} Removed {}",
        "✓".green(),
        KeyPath::item(section, args.index).to_string().cyan()
    );
    Ok(())
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    /// resumeLink, profileImage or projects[N].image
    pub key: String,

    /// File to use
    pub file: PathBuf,

    /// Admin password
    #[arg(long)]
    pub password: String,
}

pub fn upload(args: UploadArgs, cwd: &Path) -> Result<()> {
    let key = KeyPath::parse(&args.key)?;
    let target = UploadTarget::from_key_path(&key)
        .ok_or_else(|| anyhow!("{} is not a file-backed field", key))?;
    let upload = file_upload(&cwd.join(&args.file))?;
    let mut site = Site::unlocked(cwd, &args.password)?;

    match site.session.replace_file(target, &upload)? {
        Some(ViewUpdate::Patch { attributes, .. }) => {
            for (name, value) in attributes {
                println!("  {} {}={}", "✓".green(), name, value);
            }
        }
        Some(ViewUpdate::Full) | None => {}
    }
    println!("{} Replaced {}", "✓".green(), key.to_string().cyan());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::passwd::{passwd, PasswdArgs};
    use std::fs;

    const PASSWORD: &str = "secret1";

    fn project_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("config.json"),
            r#"{"name": "Ada", "projects": [{"title": "A", "description": "a"}]}"#,
        )
        .unwrap();
        passwd(
            PasswdArgs {
                password: PASSWORD.to_string(),
                confirm: PASSWORD.to_string(),
                current: None,
            },
            dir.path(),
        )
        .unwrap();
        dir
    }

    fn document(dir: &Path) -> folio_parser::Document {
        Site::open(dir).unwrap().session.document().clone()
    }

    #[test]
    fn test_set_scalar_and_project_field() {
        let dir = project_dir();
        set(
            SetArgs {
                key: "about".to_string(),
                value: "Hello".to_string(),
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap();
        set(
            SetArgs {
                key: "projects[0].title".to_string(),
                value: "Engine".to_string(),
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap();

        let doc = document(dir.path());
        assert_eq!(doc.about, "Hello");
        assert_eq!(doc.projects[0].title, "Engine");
        assert_eq!(doc.projects[0].description, "a");
    }

    #[test]
    fn test_wrong_password_rejected() {
        let dir = project_dir();
        let err = remove(
            RemoveArgs {
                section: "projects".to_string(),
                index: 0,
                password: "wrong".to_string(),
            },
            dir.path(),
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect password.");
        assert_eq!(document(dir.path()).projects.len(), 1);
    }

    #[test]
    fn test_add_and_remove_items() {
        let dir = project_dir();
        add(
            AddArgs {
                section: "skills".to_string(),
                value: Some("Go".to_string()),
                title: None,
                description: None,
                link: "#".to_string(),
                image: None,
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap();
        assert_eq!(document(dir.path()).skills, vec!["Go"]);

        remove(
            RemoveArgs {
                section: "skills".to_string(),
                index: 0,
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap();
        assert!(document(dir.path()).skills.is_empty());
    }

    #[test]
    fn test_upload_resume() {
        let dir = project_dir();
        fs::write(dir.path().join("cv.pdf"), b"%PDF").unwrap();
        fs::write(dir.path().join("cv.txt"), b"text").unwrap();

        let err = upload(
            UploadArgs {
                key: "resumeLink".to_string(),
                file: PathBuf::from("cv.txt"),
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Please upload a PDF file for resume.");

        upload(
            UploadArgs {
                key: "resumeLink".to_string(),
                file: PathBuf::from("cv.pdf"),
                password: PASSWORD.to_string(),
            },
            dir.path(),
        )
        .unwrap();

        let doc = document(dir.path());
        assert!(doc.resume_link.unwrap().starts_with("file://"));
        assert_eq!(doc.resume_file_name.as_deref(), Some("cv.pdf"));
    }
}
