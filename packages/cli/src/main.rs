mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, contact, init, keys, passwd, remove, render, set, show, upload, AddArgs, ContactArgs,
    InitArgs, KeysArgs, PasswdArgs, RemoveArgs, RenderArgs, SetArgs, ShowArgs, UploadArgs,
};
use std::path::PathBuf;

/// Folio - a single-page portfolio you edit in place
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new portfolio project
    Init(InitArgs),

    /// Create or change the admin password
    Passwd(PasswdArgs),

    /// Render the page to HTML
    Render(RenderArgs),

    /// Print the document
    Show(ShowArgs),

    /// List editable key-paths
    Keys(KeysArgs),

    /// Set a single field
    Set(SetArgs),

    /// Append a skill, interest or project
    Add(AddArgs),

    /// Remove an item by position
    Remove(RemoveArgs),

    /// Replace the resume, profile image or a project image
    Upload(UploadArgs),

    /// Validate a contact message
    Contact(ContactArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("FOLIO_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match cli.dir.map(Ok).unwrap_or_else(std::env::current_dir) {
        Ok(cwd) => cwd,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Passwd(args) => passwd(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Show(args) => show(args, &cwd),
        Command::Keys(args) => keys(args, &cwd),
        Command::Set(args) => set(args, &cwd),
        Command::Add(args) => add(args, &cwd),
        Command::Remove(args) => remove(args, &cwd),
        Command::Upload(args) => upload(args, &cwd),
        Command::Contact(args) => contact(args),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
