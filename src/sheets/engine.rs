use super::SheetOperations;
use super::range::{DEFAULT_RANGE, DEFAULT_WRITE_ANCHOR, qualified_range, sheet_reference};
use crate::error::{AppError, Result, require};
use crate::models::{
    BatchRead, CellMatrix, ClearOutcome, CreatedSheet, CreatedSpreadsheet, ReadOptions, SheetList,
    ValueRender, WriteOptions, WriteOutcome, WriteRequest,
};
use google_sheets4::api::UpdateValuesResponse;
use tracing::{debug, info, instrument};

/// Spreadsheet operations built on top of a [`SheetOperations`] backend.
///
/// Each operation validates its parameters, issues one backend call (two for
/// `write_range` on a missing sheet and `read_ranges` without ranges) and maps
/// the response onto a typed result.
pub struct SheetsEngine<S> {
    sheets: S,
}

impl<S> SheetsEngine<S>
where
    S: SheetOperations + Sync,
{
    pub fn new(sheets: S) -> Self {
        Self { sheets }
    }

    /// Read one range as a row-major matrix. A blank range reads columns `A:ZZ`.
    #[instrument(name = "Reading range", skip(self))]
    pub async fn read_range(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        range: &str,
        unformatted: bool,
    ) -> Result<CellMatrix> {
        require("spreadsheet_id", spreadsheet_id)?;
        require("sheet_name", sheet_name)?;

        let range = qualified_range(sheet_name, range, DEFAULT_RANGE);
        let response = self
            .sheets
            .get_values(
                spreadsheet_id,
                &range,
                ReadOptions::new(ValueRender::from_unformatted(unformatted)),
            )
            .await?;

        let values = response.values.unwrap_or_default();
        debug!(rows = values.len(), "Read range");
        Ok(values)
    }

    /// Overwrite values starting at the request's range, adding the sheet first if it is missing.
    #[instrument(
        name = "Writing range",
        skip_all,
        fields(spreadsheet_id = %request.spreadsheet_id, sheet = %request.sheet_name)
    )]
    pub async fn write_range(&self, request: WriteRequest) -> Result<WriteOutcome> {
        validate_write(&request)?;

        // Titles are unique regardless of case, so "rooms" targets an existing "Rooms"
        let existing = self.list_sheets(&request.spreadsheet_id).await?;
        let (sheet_name, sheet_created) = match existing.find(&request.sheet_name) {
            Some(title) => (title.to_string(), false),
            None => {
                info!("Sheet not found, adding it before writing");
                self.sheets
                    .add_sheet(&request.spreadsheet_id, &request.sheet_name)
                    .await?;
                (request.sheet_name, true)
            }
        };

        let range = qualified_range(&sheet_name, &request.range, DEFAULT_WRITE_ANCHOR);
        let response = self
            .sheets
            .update_values(
                &request.spreadsheet_id,
                &range,
                request.values,
                WriteOptions::update(request.input_mode, request.include_values),
            )
            .await?;

        Ok(write_outcome(
            request.spreadsheet_id,
            Some(response),
            request.include_values,
            sheet_created,
        ))
    }

    /// Append rows below the table found in the request's range.
    #[instrument(
        name = "Appending range",
        skip_all,
        fields(spreadsheet_id = %request.spreadsheet_id, sheet = %request.sheet_name)
    )]
    pub async fn append_range(&self, request: WriteRequest) -> Result<WriteOutcome> {
        validate_write(&request)?;

        let range = qualified_range(&request.sheet_name, &request.range, DEFAULT_RANGE);
        let response = self
            .sheets
            .append_values(
                &request.spreadsheet_id,
                &range,
                request.values,
                WriteOptions::append(request.input_mode, request.include_values),
            )
            .await?;
        debug!(table_range = ?response.table_range, "Appended values");

        Ok(write_outcome(
            request.spreadsheet_id,
            response.updates,
            request.include_values,
            false,
        ))
    }

    /// Clear cell values (formatting is kept). A blank range clears columns `A:ZZ`.
    #[instrument(name = "Clearing range", skip(self))]
    pub async fn clear_range(
        &self,
        spreadsheet_id: &str,
        sheet_name: &str,
        range: &str,
    ) -> Result<ClearOutcome> {
        require("spreadsheet_id", spreadsheet_id)?;
        require("sheet_name", sheet_name)?;

        let range = qualified_range(sheet_name, range, DEFAULT_RANGE);
        let response = self.sheets.clear_values(spreadsheet_id, &range).await?;

        Ok(ClearOutcome {
            cleared_range: response.cleared_range.unwrap_or(range),
        })
    }

    #[instrument(name = "Listing sheets", skip(self))]
    pub async fn list_sheets(&self, spreadsheet_id: &str) -> Result<SheetList> {
        require("spreadsheet_id", spreadsheet_id)?;

        let mut sheets = SheetList::default();
        for properties in self.sheets.sheet_properties(spreadsheet_id).await? {
            sheets.titles.push(properties.title.unwrap_or_default());
            sheets.ids.push(
                properties
                    .sheet_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            );
        }

        Ok(sheets)
    }

    #[instrument(name = "Creating sheet", skip(self))]
    pub async fn create_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<CreatedSheet> {
        require("spreadsheet_id", spreadsheet_id)?;
        require("title", title)?;

        let properties = self.sheets.add_sheet(spreadsheet_id, title).await?;
        debug!(sheet_id = ?properties.sheet_id, "Created sheet");

        Ok(CreatedSheet {
            title: properties.title.unwrap_or_else(|| title.to_string()),
            spreadsheet_id: spreadsheet_id.to_string(),
        })
    }

    #[instrument(name = "Creating spreadsheet", skip(self))]
    pub async fn create_spreadsheet(&self, title: &str) -> Result<CreatedSpreadsheet> {
        require("title", title)?;

        let spreadsheet = self.sheets.create_spreadsheet(title).await?;

        let spreadsheet_id = spreadsheet
            .spreadsheet_id
            .ok_or_else(|| AppError::Sheets("Created spreadsheet has empty ID".to_string()))?;

        let url = spreadsheet
            .spreadsheet_url
            .ok_or_else(|| AppError::Sheets("Created spreadsheet has empty URL".to_string()))?;

        info!(%spreadsheet_id, "Created spreadsheet");
        Ok(CreatedSpreadsheet {
            spreadsheet_id,
            url,
        })
    }

    /// Read several ranges in one call. No ranges reads every sheet tab whole.
    #[instrument(name = "Reading ranges", skip(self))]
    pub async fn read_ranges(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        unformatted: bool,
    ) -> Result<BatchRead> {
        require("spreadsheet_id", spreadsheet_id)?;

        let ranges: Vec<String> = match ranges.is_empty() {
            true => self
                .list_sheets(spreadsheet_id)
                .await?
                .titles
                .iter()
                .map(|title| sheet_reference(title).into_owned())
                .collect(),
            false => ranges.to_vec(),
        };

        if ranges.is_empty() {
            return Ok(BatchRead::default());
        }

        let response = self
            .sheets
            .batch_get_values(
                spreadsheet_id,
                &ranges,
                ReadOptions::new(ValueRender::from_unformatted(unformatted)),
            )
            .await?;

        let mut batch = BatchRead::default();
        for value_range in response.value_ranges.unwrap_or_default() {
            batch.ranges.push(value_range.range.unwrap_or_default());
            batch.values.push(value_range.values.unwrap_or_default());
        }

        debug!(ranges = batch.ranges.len(), "Read ranges");
        Ok(batch)
    }
}

fn validate_write(request: &WriteRequest) -> Result<()> {
    require("spreadsheet_id", &request.spreadsheet_id)?;
    require("sheet_name", &request.sheet_name)?;

    if request.values.is_empty() {
        return Err(AppError::InvalidInput(
            "values must contain at least one row".to_string(),
        ));
    }

    Ok(())
}

fn write_outcome(
    requested_id: String,
    response: Option<UpdateValuesResponse>,
    include_values: bool,
    sheet_created: bool,
) -> WriteOutcome {
    let response = response.unwrap_or_default();
    let spreadsheet_id = response.spreadsheet_id.unwrap_or(requested_id);

    if !include_values {
        return WriteOutcome {
            spreadsheet_id,
            updated_values: None,
            range: None,
            sheet_created,
        };
    }

    let updated_data = response.updated_data.unwrap_or_default();
    WriteOutcome {
        spreadsheet_id,
        updated_values: Some(updated_data.values.unwrap_or_default()),
        range: response.updated_range.or(updated_data.range),
        sheet_created,
    }
}
