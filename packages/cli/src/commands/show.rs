use super::site::Site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_parser::{serialize_pretty, Document, ScalarField, Section};
use std::path::Path;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Print the raw document as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let site = Site::open(cwd)?;
    let doc = site.session.document();

    if args.json {
        println!("{}", serialize_pretty(doc)?);
        return Ok(());
    }

    print_document(doc);
    Ok(())
}

fn print_document(doc: &Document) {
    for field in ScalarField::ALL {
        let value = doc.scalar(field).unwrap_or_default();
        let shown = if value.is_empty() {
            "(empty)".dimmed().to_string()
        } else {
            value.replace('\n', "\n    ")
        };
        println!("{:>16}  {}", field.as_str().cyan(), shown);
    }

    for section in [Section::Skills, Section::Interests] {
        println!();
        println!("{}", section.as_str().bright_white().bold());
        for (index, item) in doc.strings(section).into_iter().flatten().enumerate() {
            println!("  [{}] {}", index, item);
        }
    }

    println!();
    println!("{}", Section::Projects.as_str().bright_white().bold());
    for (index, project) in doc.projects.iter().enumerate() {
        println!("  [{}] {}", index, project.title.bold());
        println!("      {}", project.description);
        println!("      {} {}", "link:".dimmed(), project.link);
        println!("      {} {}", "image:".dimmed(), project.image);
    }
}

#[derive(Debug, Args)]
pub struct KeysArgs {
    /// Include admin form controls
    #[arg(long)]
    pub form: bool,
}

/// List the key-paths of every editable element
pub fn keys(args: KeysArgs, cwd: &Path) -> Result<()> {
    let mut site = Site::open(cwd)?;
    let view = site.session.view();

    for key in view.editables() {
        let marker = if key.is_file_backed() { "file" } else { "text" };
        println!("{:<24} {}", key.to_string(), marker.dimmed());
    }

    if args.form {
        println!();
        for key in view.form_controls() {
            println!("{:<24} {}", key.to_string(), "form".dimmed());
        }
    }
    Ok(())
}
