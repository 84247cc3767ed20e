mod client;
mod engine;
#[cfg(test)]
pub(crate) mod mocks;
pub mod range;

pub use client::SheetsClient;
pub use engine::SheetsEngine;

use crate::error::Result;
use crate::models::{CellMatrix, ReadOptions, WriteOptions};
use async_trait::async_trait;
use google_sheets4::api::{
    AppendValuesResponse, BatchGetValuesResponse, ClearValuesResponse, SheetProperties,
    Spreadsheet, UpdateValuesResponse, ValueRange,
};

/// One method per Sheets API call. Ranges are fully qualified A1 strings.
#[async_trait]
pub trait SheetOperations {
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: ReadOptions,
    ) -> Result<ValueRange>;

    async fn batch_get_values(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        options: ReadOptions,
    ) -> Result<BatchGetValuesResponse>;

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<UpdateValuesResponse>;

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<AppendValuesResponse>;

    async fn clear_values(&self, spreadsheet_id: &str, range: &str)
    -> Result<ClearValuesResponse>;

    /// Properties of every sheet tab, in spreadsheet order.
    async fn sheet_properties(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>>;

    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties>;

    async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet>;
}
