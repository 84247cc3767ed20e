use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Credential error: {0}")]
    Credential(String),

    #[error("OAuth2 authorization error: {0}")]
    Authorization(String),

    #[error("Google Sheets API error: {0}")]
    Sheets(String),

    #[error("Google Drive API error: {0}")]
    Drive(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Reject blank identifiers before they reach the backend.
pub(crate) fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} must not be empty", field)));
    }
    Ok(())
}
