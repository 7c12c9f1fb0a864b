use folio_compiler_html::CompileOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Folio project configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding persisted entries (document, admin secret)
    #[serde(default = "default_storage_dir")]
    pub storage_dir: String,

    /// Document loaded on first run
    #[serde(default = "default_fallback_document")]
    pub fallback_document: String,

    /// Where rendered pages are written
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_site_title")]
    pub site_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
}

fn default_storage_dir() -> String {
    ".folio".to_string()
}

fn default_fallback_document() -> String {
    "config.json".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_site_title() -> String {
    "Portfolio".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn storage_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.storage_dir)
    }

    pub fn fallback_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.fallback_document)
    }

    pub fn out_path(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.out_dir)
    }

    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            site_title: self.site_title.clone(),
            stylesheet: self.stylesheet.clone(),
            script: self.script.clone(),
            ..CompileOptions::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_dir: default_storage_dir(),
            fallback_document: default_fallback_document(),
            out_dir: default_out_dir(),
            site_title: default_site_title(),
            stylesheet: None,
            script: None,
        }
    }
}
