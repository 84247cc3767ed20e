mod client;

pub use client::DriveClient;

use crate::error::Result;
use crate::models::SpreadsheetList;
use async_trait::async_trait;
use google_drive3::api::FileList;
use tracing::{debug, instrument, warn};

const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
// Largest page the Drive API hands out. Further pages are never requested.
const PAGE_SIZE: i32 = 1000;
const ORDER_BY: &str = "name";

#[async_trait]
pub trait DriveOperations {
    /// Run one `files.list` call and return the first page.
    async fn list_files(&self, query: &str, page_size: i32, order_by: &str) -> Result<FileList>;
}

/// List spreadsheets whose name contains `name_filter`, ordered by name.
///
/// An empty filter matches every spreadsheet visible to the credential. No
/// matches gives empty lists. Only the first page is read: if the backend
/// signals more results, they are dropped with a warning.
#[instrument(name = "Listing spreadsheets", skip(drive))]
pub async fn list_spreadsheets<D>(drive: &D, name_filter: &str) -> Result<SpreadsheetList>
where
    D: DriveOperations + Sync + ?Sized,
{
    let query = spreadsheet_query(name_filter);
    let file_list = drive.list_files(&query, PAGE_SIZE, ORDER_BY).await?;

    if file_list.next_page_token.is_some() {
        warn!(
            page_size = PAGE_SIZE,
            "More spreadsheets match than fit in one page, results truncated"
        );
    }

    let mut spreadsheets = SpreadsheetList::default();
    for file in file_list.files.unwrap_or_default() {
        let (Some(id), Some(name)) = (file.id, file.name) else {
            continue;
        };
        spreadsheets.names.push(name);
        spreadsheets.ids.push(id);
    }

    debug!(count = spreadsheets.ids.len(), "Found spreadsheets");
    Ok(spreadsheets)
}

fn spreadsheet_query(name_filter: &str) -> String {
    format!(
        "mimeType='{}' and name contains '{}'",
        SPREADSHEET_MIME_TYPE,
        escape_query_literal(name_filter)
    )
}

/// Escape a value for use inside a single-quoted Drive query string.
fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
