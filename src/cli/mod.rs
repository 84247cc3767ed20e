mod auth;
mod drive;
mod sheets;
mod show;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::session::Session;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

pub use drive::DriveCommand;
pub use sheets::SheetsCommand;
pub use show::ShowResource;

#[derive(Parser, Debug)]
#[command(name = "sheets-bridge")]
#[command(about = "Read and write Google Sheets and list Drive spreadsheets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the OAuth client-secret JSON file
    #[arg(long, global = true, env = "SHEETS_BRIDGE_CREDENTIALS")]
    pub credentials: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let config = self.config()?;

        match &self.command {
            Commands::Auth { reset, yes } => auth::execute(config, *reset, *yes).await,
            Commands::Show { resource } => resource.execute(&config).await,
            Commands::Drive { command } => {
                let session = Session::open(config.google)?;
                let result = command.execute(&session).await;
                session.close();
                result
            }
            Commands::Sheets { command } => {
                let session = Session::open(config.google)?;
                let result = command.execute(&session).await;
                session.close();
                result
            }
        }
    }

    fn config(&self) -> Result<Config> {
        let mut config = Config::load()?;
        if let Some(path) = &self.credentials {
            config.google.credentials_file = Some(path.clone());
        }
        Ok(config)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Authorize with Google, running the consent flow if no token is cached
    Auth {
        /// Delete cached tokens first
        #[arg(long)]
        reset: bool,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },
    /// Google Drive operations
    Drive {
        #[command(subcommand)]
        command: DriveCommand,
    },
    /// Google Sheets operations
    Sheets {
        #[command(subcommand)]
        command: SheetsCommand,
    },
}

/// Print an operation result as JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::Other(e.into()))
}
