use crate::config::Config;
use crate::error::{AppError, Result};
use hyper_util::client::legacy::connect::HttpConnector;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use yup_oauth2::{
    ApplicationSecret, InstalledFlowAuthenticator, InstalledFlowReturnMethod,
    authenticator::Authenticator, hyper_rustls::HttpsConnector,
};

// Read-only access to Drive file metadata, used to list spreadsheets.
pub(crate) const DRIVE_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/drive.readonly";
// Full read/write access to spreadsheets.
pub(crate) const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const AUTH_SCOPES: [&str; 2] = [DRIVE_READONLY_SCOPE, SPREADSHEETS_SCOPE];

/// Authorized credential shared by every client a session hands out.
/// Token refresh and persistence are handled by `yup-oauth2`.
pub type Credential = Authenticator<HttpsConnector<HttpConnector>>;

/// Read the client secret, build the authenticator and verify it by fetching a token
#[instrument(name = "Authorizing with Google", skip_all, fields(path = ?credentials_path))]
pub(super) async fn acquire_credential(credentials_path: &Path) -> Result<Credential> {
    let secret = read_client_secret(credentials_path).await?;
    let auth = from_installed_flow(secret).await?;

    // Trigger authorization for both scopes up front so later calls reuse the cached token
    let _token = auth
        .token(&AUTH_SCOPES)
        .await
        .map_err(|e| AppError::Authorization(format!("Failed to get token: {}", e)))?;

    debug!("Google credential ready");
    Ok(auth)
}

async fn read_client_secret(path: &Path) -> Result<ApplicationSecret> {
    if !path.exists() {
        return Err(AppError::Credential(format!(
            "Client secret file not found at {:?}",
            path
        )));
    }

    yup_oauth2::read_application_secret(path)
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                AppError::Credential(format!("Failed to parse client secret {:?}: {}", path, e))
            }
            _ => AppError::Credential(format!("Failed to read client secret {:?}: {}", path, e)),
        })
}

async fn from_installed_flow(secret: ApplicationSecret) -> Result<Credential> {
    let token_cache_path = token_cache_path()?;

    if let Some(parent) = token_cache_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::Authorization(format!("Failed to create token cache directory: {}", e))
        })?;
    }

    // Consent happens in the browser; yup-oauth2 listens on a loopback port for the redirect
    let auth = InstalledFlowAuthenticator::builder(secret, InstalledFlowReturnMethod::HTTPRedirect)
        .persist_tokens_to_disk(token_cache_path)
        .build()
        .await
        .map_err(|e| AppError::Authorization(format!("Failed to build authenticator: {}", e)))?;

    Ok(auth)
}

/// Clear cached Google tokens by deleting the token cache file
#[instrument(name = "Clearing auth tokens for Google", skip_all)]
pub fn clear_tokens() -> Result<()> {
    let token_path = token_cache_path()?;

    if !token_path.exists() {
        debug!("No Google tokens to clear");
        return Ok(());
    }

    fs::remove_file(&token_path)
        .map_err(|e| AppError::Authorization(format!("Failed to delete tokens file: {}", e)))?;
    debug!("Cleared Google cached tokens");

    Ok(())
}

pub fn token_cache_path() -> Result<PathBuf> {
    Config::cache_file("google_tokens.json")
}
