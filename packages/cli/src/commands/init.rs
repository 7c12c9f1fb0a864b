use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_parser::{serialize_pretty, Document, Project};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Site title used in rendered pages
    #[arg(short, long, default_value = "Portfolio")]
    pub title: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

fn starter_document() -> Document {
    let mut doc = Document::new();
    doc.name = "Your Name".to_string();
    doc.welcome = "Welcome to my portfolio".to_string();
    doc.about = "A few words about you.".to_string();
    doc.skills = vec!["Rust".to_string()];
    doc.interests = vec!["Open source".to_string()];
    doc.projects = vec![Project::new(
        "First project",
        "What it does and why it matters.",
        "",
        "#",
    )];
    doc
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing portfolio...".bright_blue().bold());

    let config = Config {
        site_title: args.title,
        ..Config::default()
    };

    let fallback = config.fallback_path(cwd);
    if !fallback.exists() {
        if let Some(parent) = fallback.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&fallback, serialize_pretty(&starter_document())?)?;
        println!("  {} Created {}", "✓".green(), config.fallback_document);
    }

    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Portfolio initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: folio passwd --password <secret> --confirm <secret>");
    println!("  2. Edit {} or use: folio set <key> <value>", config.fallback_document);
    println!("  3. Run: folio render");

    Ok(())
}
