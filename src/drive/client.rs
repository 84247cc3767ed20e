use super::DriveOperations;
use crate::error::{AppError, Result};
use crate::session::DRIVE_READONLY_SCOPE;
use async_trait::async_trait;
use google_drive3::api::{DriveHub, FileList};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::instrument;

// Only ids and names are needed, plus the token that signals truncation.
const FILE_LIST_FIELDS: &str = "nextPageToken, files(id, name)";

pub struct DriveClient {
    hub: DriveHub<HttpsConnector<HttpConnector>>,
}

impl DriveClient {
    pub fn new(hub: DriveHub<HttpsConnector<HttpConnector>>) -> Self {
        Self { hub }
    }
}

#[async_trait]
impl DriveOperations for DriveClient {
    #[instrument(name = "Querying Drive files", skip(self))]
    async fn list_files(&self, query: &str, page_size: i32, order_by: &str) -> Result<FileList> {
        let (_, file_list) = self
            .hub
            .files()
            .list()
            .q(query)
            .page_size(page_size)
            .order_by(order_by)
            .param("fields", FILE_LIST_FIELDS)
            .add_scope(DRIVE_READONLY_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Drive(format!("Failed to list files: {}", e)))?;

        Ok(file_list)
    }
}
