use super::site::Site;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_compiler_html::compile_to_html;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Render the edit-mode page (requires --password)
    #[arg(long, requires = "password")]
    pub edit: bool,

    /// Admin password
    #[arg(long)]
    pub password: Option<String>,

    /// Also write the view tree as view.json
    #[arg(long)]
    pub json: bool,
}

pub fn render(args: RenderArgs, cwd: &Path) -> Result<()> {
    let mut site = match (&args.password, args.edit) {
        (Some(password), true) => Site::unlocked(cwd, password)?,
        _ => Site::open(cwd)?,
    };

    let options = site.config.compile_options();
    let out_dir = args
        .out_dir
        .clone()
        .map(|dir| cwd.join(dir))
        .unwrap_or_else(|| site.config.out_path(cwd));

    let view = site.session.view();
    let html = compile_to_html(view, &options)?;

    if args.stdout {
        println!("{}", html);
        return Ok(());
    }

    fs::create_dir_all(&out_dir)?;
    let page = out_dir.join("index.html");
    fs::write(&page, html)?;
    info!(path = %page.display(), "wrote page");
    println!("  {} {}", "✓".green(), page.display());

    if args.json {
        let json_file = out_dir.join("view.json");
        fs::write(&json_file, view.to_json()?)?;
        println!("  {} {}", "✓".green(), json_file.display());
    }

    println!();
    println!("{} Rendered {}", "✅".green(), site.config.site_title.bold());
    Ok(())
}
