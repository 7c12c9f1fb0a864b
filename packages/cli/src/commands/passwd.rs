use super::site::Site;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Debug, Args)]
pub struct PasswdArgs {
    /// New admin password (at least 6 characters)
    #[arg(long)]
    pub password: String,

    /// Repeat of the new password
    #[arg(long)]
    pub confirm: String,

    /// Current password, required once one is set
    #[arg(long)]
    pub current: Option<String>,
}

pub fn passwd(args: PasswdArgs, cwd: &Path) -> Result<()> {
    let mut site = Site::open(cwd)?;

    if !site.session.needs_setup() {
        let current = args
            .current
            .as_deref()
            .ok_or_else(|| anyhow!("A password is already set. Pass --current to change it."))?;
        site.session.unlock(current)?;
    }

    site.session.set_password(&args.password, &args.confirm)?;
    println!("{} Admin password saved", "✓".green());
    Ok(())
}
