use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR_PREFIX: &str = "sheets-bridge";
const CREDENTIALS_FILE_NAME: &str = "credentials.json";
const DEFAULT_APPLICATION_NAME: &str = "sheets-bridge";

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub google: GoogleConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GoogleConfig {
    /// Path to the OAuth client-secret JSON downloaded from the Google Cloud console.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
    /// Sent as the user agent on every API call.
    #[serde(default = "default_application_name")]
    pub application_name: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            credentials_file: None,
            application_name: default_application_name(),
        }
    }
}

fn default_application_name() -> String {
    DEFAULT_APPLICATION_NAME.to_string()
}

impl GoogleConfig {
    /// Configured client-secret path, or `credentials.json` in the config directory.
    pub fn credentials_path(&self) -> Result<PathBuf> {
        match &self.credentials_file {
            Some(path) => Ok(path.clone()),
            None => Config::default_credentials_file(),
        }
    }
}

impl Config {
    /// Load the config file if present, falling back to defaults.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file()?;

        let config = match config_path.exists() {
            true => {
                let contents = fs::read_to_string(&config_path)?;
                Self::parse(&contents)?
            }
            false => Config::default(),
        };

        Ok(config)
    }

    fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;

        if config.google.application_name.trim().is_empty() {
            return Err(AppError::Config(
                "Google application_name must not be empty".to_string(),
            ));
        }

        Ok(config)
    }

    fn xdg_dirs() -> xdg::BaseDirectories {
        xdg::BaseDirectories::with_prefix(CONFIG_DIR_PREFIX)
    }

    /// Get the config file path
    pub fn config_file() -> Result<PathBuf> {
        let xdg_dirs = Self::xdg_dirs();
        xdg_dirs
            .place_config_file("config.toml")
            .map_err(|e| AppError::Config(format!("Failed to create config directory: {}", e)))
    }

    fn default_credentials_file() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_config_home()
            .map(|dir| dir.join(CREDENTIALS_FILE_NAME))
            .ok_or_else(|| AppError::Config("Failed to determine config directory".to_string()))
    }

    /// Get the cache directory path
    pub fn cache_dir() -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.get_cache_home()
            .ok_or_else(|| AppError::Config("Failed to determine cache directory".to_string()))
    }

    /// Get a cache file path
    pub fn cache_file(filename: &str) -> Result<PathBuf> {
        let xdg = Self::xdg_dirs();
        xdg.place_cache_file(filename)
            .map_err(|e| AppError::Config(format!("Failed to create cache file path: {}", e)))
    }
}
