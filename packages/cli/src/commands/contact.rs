use anyhow::Result;
use clap::Args;
use folio_editor::ContactMessage;

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub message: String,
}

/// Check a contact message and print the confirmation; nothing is sent
pub fn contact(args: ContactArgs) -> Result<()> {
    let confirmation = ContactMessage::new(args.name, args.email, args.message).validate()?;
    println!("{}", confirmation);
    Ok(())
}
