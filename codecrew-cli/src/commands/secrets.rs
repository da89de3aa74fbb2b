//! Secrets command - manage the credentials file

use clap::{Args, Subcommand};
use codecrew_core::Secrets;

/// Manage stored API keys
#[derive(Args, Debug)]
pub struct SecretsArgs {
    #[command(subcommand)]
    pub command: SecretsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SecretsCommand {
    /// Create a secrets template with 0600 permissions
    Init,

    /// Show where the secrets file lives
    Path,
}

impl SecretsArgs {
    /// Execute the secrets command
    pub async fn execute(&self) -> anyhow::Result<()> {
        match self.command {
            SecretsCommand::Init => {
                let path = Secrets::create_template()?;
                println!("Created {}", path.display());
                println!("Add your Gemini API key there, or set GEMINI_API_KEY.");
            }
            SecretsCommand::Path => match Secrets::default_secrets_path() {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("Could not determine secrets path"),
            },
        }
        Ok(())
    }
}
