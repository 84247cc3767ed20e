use super::SheetOperations;
use crate::error::{AppError, Result};
use crate::models::values::MAJOR_DIMENSION;
use crate::models::{CellMatrix, ReadOptions, WriteOptions};
use crate::session::SPREADSHEETS_SCOPE;
use async_trait::async_trait;
use google_sheets4::api::{
    AddSheetRequest, AppendValuesResponse, BatchGetValuesResponse, BatchUpdateSpreadsheetRequest,
    ClearValuesRequest, ClearValuesResponse, Request, SheetProperties, Sheets, Spreadsheet,
    SpreadsheetProperties, UpdateValuesResponse, ValueRange,
};
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use tracing::instrument;

const SHEET_PROPERTIES_FIELDS: &str = "sheets.properties(sheetId,title,index)";

pub struct SheetsClient {
    hub: Sheets<HttpsConnector<HttpConnector>>,
}

impl SheetsClient {
    pub fn new(hub: Sheets<HttpsConnector<HttpConnector>>) -> Self {
        Self { hub }
    }
}

fn value_range(range: &str, values: CellMatrix) -> ValueRange {
    ValueRange {
        major_dimension: Some(MAJOR_DIMENSION.to_string()),
        range: Some(range.to_string()),
        values: Some(values),
    }
}

#[async_trait]
impl SheetOperations for SheetsClient {
    #[instrument(name = "Fetching values", skip(self))]
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: ReadOptions,
    ) -> Result<ValueRange> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_get(spreadsheet_id, range)
            .date_time_render_option(options.date_time_render)
            .major_dimension(options.major_dimension)
            .value_render_option(options.value_render.as_str())
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read range '{}': {}", range, e)))?;

        Ok(response)
    }

    #[instrument(name = "Fetching value ranges", skip(self))]
    async fn batch_get_values(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        options: ReadOptions,
    ) -> Result<BatchGetValuesResponse> {
        let mut call = self
            .hub
            .spreadsheets()
            .values_batch_get(spreadsheet_id)
            .date_time_render_option(options.date_time_render)
            .major_dimension(options.major_dimension)
            .value_render_option(options.value_render.as_str());
        for range in ranges {
            call = call.add_ranges(range);
        }

        let (_, response) = call
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to read ranges: {}", e)))?;

        Ok(response)
    }

    #[instrument(name = "Updating values", skip(self, values))]
    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<UpdateValuesResponse> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_update(value_range(range, values), spreadsheet_id, range)
            .value_input_option(options.input_mode.as_str())
            .include_values_in_response(options.include_values)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to write range '{}': {}", range, e)))?;

        Ok(response)
    }

    #[instrument(name = "Appending values", skip(self, values))]
    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<AppendValuesResponse> {
        let mut call = self
            .hub
            .spreadsheets()
            .values_append(value_range(range, values), spreadsheet_id, range)
            .value_input_option(options.input_mode.as_str())
            .include_values_in_response(options.include_values);
        if let Some(insert_data) = options.insert_data {
            call = call.insert_data_option(insert_data);
        }

        let (_, response) = call
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| {
                AppError::Sheets(format!("Failed to append to range '{}': {}", range, e))
            })?;

        Ok(response)
    }

    #[instrument(name = "Clearing values", skip(self))]
    async fn clear_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ClearValuesResponse> {
        let (_, response) = self
            .hub
            .spreadsheets()
            .values_clear(ClearValuesRequest::default(), spreadsheet_id, range)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to clear range '{}': {}", range, e)))?;

        Ok(response)
    }

    #[instrument(name = "Fetching sheet properties", skip(self))]
    async fn sheet_properties(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>> {
        let (_, spreadsheet) = self
            .hub
            .spreadsheets()
            .get(spreadsheet_id)
            .include_grid_data(false)
            .param("fields", SHEET_PROPERTIES_FIELDS)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to get spreadsheet: {}", e)))?;

        let properties = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .collect();

        Ok(properties)
    }

    #[instrument(name = "Adding sheet", skip(self))]
    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties> {
        let request = Request {
            add_sheet: Some(AddSheetRequest {
                properties: Some(SheetProperties {
                    title: Some(title.to_string()),
                    sheet_type: Some("GRID".to_string()),
                    ..Default::default()
                }),
            }),
            ..Default::default()
        };

        let batch_update = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![request]),
            include_spreadsheet_in_response: Some(false),
            ..Default::default()
        };

        let (_, response) = self
            .hub
            .spreadsheets()
            .batch_update(batch_update, spreadsheet_id)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to add sheet '{}': {}", title, e)))?;

        response
            .replies
            .and_then(|replies| replies.into_iter().next())
            .and_then(|reply| reply.add_sheet)
            .and_then(|add_sheet| add_sheet.properties)
            .ok_or_else(|| {
                AppError::Sheets("Failed to get sheet properties from add response".to_string())
            })
    }

    #[instrument(name = "Creating spreadsheet", skip(self))]
    async fn create_spreadsheet(&self, title: &str) -> Result<Spreadsheet> {
        let spreadsheet = Spreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let (_, result) = self
            .hub
            .spreadsheets()
            .create(spreadsheet)
            .add_scope(SPREADSHEETS_SCOPE)
            .doit()
            .await
            .map_err(|e| AppError::Sheets(format!("Failed to create spreadsheet: {}", e)))?;

        Ok(result)
    }
}
