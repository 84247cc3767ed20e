use crate::config::Config;
use crate::error::Result;
use crate::session::token_cache_path;
use clap::Subcommand;
use tracing::info;

#[derive(Subcommand, Debug)]
pub enum ShowResource {
    /// Show configuration, credentials and cache paths
    Paths,
}

impl ShowResource {
    pub async fn execute(&self, config: &Config) -> Result<()> {
        match self {
            ShowResource::Paths => show_paths(config),
        }
    }
}

fn show_paths(config: &Config) -> Result<()> {
    let config_path = Config::config_file()?;
    let credentials_path = config.google.credentials_path()?;
    let cache_dir = Config::cache_dir()?;
    let token_path = token_cache_path()?;

    info!(path = ?config_path, "Config path");
    info!(path = ?credentials_path, exists = credentials_path.exists(), "Credentials path");
    info!(path = ?cache_dir, "Cache path");
    info!(path = ?token_path, exists = token_path.exists(), "Token cache");

    Ok(())
}
