mod auth;

pub use auth::{Credential, clear_tokens, token_cache_path};
pub(crate) use auth::{DRIVE_READONLY_SCOPE, SPREADSHEETS_SCOPE};

use crate::config::GoogleConfig;
use crate::drive::DriveClient;
use crate::error::Result;
use crate::sheets::SheetsClient;
use google_drive3::api::DriveHub;
use google_sheets4::api::Sheets;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tokio::sync::OnceCell;
use tracing::{debug, instrument};

/// Owns the Google credential and hands out API clients bound to it.
///
/// The credential is acquired lazily on first use and then shared by every
/// client the session produces. Concurrent first use runs a single OAuth
/// flow; a failed attempt leaves the session unauthorized so the next call
/// tries again.
pub struct Session {
    config: GoogleConfig,
    connector: HttpsConnector<HttpConnector>,
    credential: OnceCell<Credential>,
}

impl Session {
    /// Prepare a session. Neither the network nor the credentials file is touched yet.
    pub fn open(config: GoogleConfig) -> Result<Self> {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();

        Ok(Self {
            config,
            connector,
            credential: OnceCell::new(),
        })
    }

    pub fn is_authorized(&self) -> bool {
        self.credential.initialized()
    }

    /// Return the cached credential, running the authorization exchange on first use
    pub async fn acquire_credential(&self) -> Result<&Credential> {
        self.credential
            .get_or_try_init(|| async {
                let path = self.config.credentials_path()?;
                auth::acquire_credential(&path).await
            })
            .await
    }

    #[instrument(name = "Creating Drive client", skip_all)]
    pub async fn drive_client(&self) -> Result<DriveClient> {
        let auth = self.acquire_credential().await?.clone();
        let client = Client::builder(TokioExecutor::new()).build(self.connector.clone());

        let mut hub = DriveHub::new(client, auth);
        hub.user_agent(self.config.application_name.clone());

        Ok(DriveClient::new(hub))
    }

    #[instrument(name = "Creating Sheets client", skip_all)]
    pub async fn sheets_client(&self) -> Result<SheetsClient> {
        let auth = self.acquire_credential().await?.clone();
        let client = Client::builder(TokioExecutor::new()).build(self.connector.clone());

        let mut hub = Sheets::new(client, auth);
        hub.user_agent(self.config.application_name.clone());

        Ok(SheetsClient::new(hub))
    }

    /// End the session and drop its credential. Tokens persisted on disk are kept.
    pub fn close(self) {
        debug!(authorized = self.is_authorized(), "Closing Google session");
    }
}
