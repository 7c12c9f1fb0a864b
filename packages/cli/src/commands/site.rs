//! Opening the portfolio of a project directory

use crate::config::Config;
use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use folio_editor::{
    EditSession, FileFallback, FileStorage, FileUpload, ObjectUrlFactory, RenderOptions,
};
use folio_parser::LINK_PLACEHOLDER;
use std::path::Path;
use tracing::warn;
use url::Url;

/// An open portfolio and its project configuration
pub struct Site {
    pub config: Config,
    pub session: EditSession,
}

impl Site {
    pub fn open(cwd: &Path) -> Result<Self> {
        let config = Config::load(cwd)?;
        let storage = FileStorage::open(config.storage_path(cwd))?;
        let mut fallback = FileFallback::new(config.fallback_path(cwd));

        let (session, report) = EditSession::open(
            Box::new(storage),
            &mut fallback,
            Box::new(FileUrls),
            RenderOptions::default(),
        )?;
        if let Some(warning) = report.warning {
            eprintln!("{} {}", "⚠️".yellow(), warning.yellow());
        }

        Ok(Self {
            config,
            session,
        })
    }

    /// Open and enter edit mode
    pub fn unlocked(cwd: &Path, password: &str) -> Result<Self> {
        let mut site = Self::open(cwd)?;
        if site.session.needs_setup() {
            return Err(anyhow!("No admin password set. Run: folio passwd"));
        }
        site.session.unlock(password)?;
        Ok(site)
    }
}

/// Mints `file://` URLs for local files
///
/// The upload handle is the file's path.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileUrls;

impl ObjectUrlFactory for FileUrls {
    fn create(&mut self, upload: &FileUpload) -> String {
        let path = Path::new(&upload.handle);
        let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        match Url::from_file_path(&absolute) {
            Ok(url) => url.to_string(),
            Err(()) => {
                warn!(path = %absolute.display(), "cannot express path as a file URL");
                LINK_PLACEHOLDER.to_string()
            }
        }
    }
}

/// Guess a MIME type from the file extension
pub fn mime_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Describe a local file as an upload
pub fn file_upload(path: &Path) -> Result<FileUpload> {
    if !path.is_file() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .context("file name is not valid UTF-8")?;
    Ok(FileUpload::new(
        name,
        mime_type(path),
        path.display().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_type(Path::new("cv.PDF")), "application/pdf");
        assert_eq!(mime_type(Path::new("me.jpeg")), "image/jpeg");
        assert_eq!(mime_type(Path::new("notes")), "application/octet-stream");
    }

    #[test]
    fn test_file_urls() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cv.pdf");
        std::fs::write(&path, b"%PDF").unwrap();

        let upload = file_upload(&path).unwrap();
        assert_eq!(upload.name, "cv.pdf");
        assert_eq!(upload.mime_type, "application/pdf");

        let url = FileUrls.create(&upload);
        assert!(url.starts_with("file://"));
        assert!(url.ends_with("/cv.pdf"));
    }

    #[test]
    fn test_missing_file_rejected() {
        assert!(file_upload(Path::new("/definitely/not/here.png")).is_err());
    }
}
