use super::{confirm, print_json};
use crate::error::Result;
use crate::models::{CellMatrix, InputMode, WriteRequest};
use crate::session::Session;
use crate::sheets::{SheetsClient, SheetsEngine};
use clap::{Args, Subcommand};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct Target {
    /// Spreadsheet ID, as found in its URL
    #[arg(short, long)]
    spreadsheet: String,

    /// Sheet (tab) name
    #[arg(long)]
    sheet: String,

    /// A1 range within the sheet, e.g. A1:C10
    #[arg(long, default_value = "")]
    range: String,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct ValuesInput {
    /// Values as a JSON array of rows, e.g. '[["a", 1], ["b", 2]]'
    #[arg(long)]
    json: Option<String>,

    /// Values from a header-less CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

impl ValuesInput {
    fn load(&self) -> Result<CellMatrix> {
        match (&self.json, &self.csv) {
            (Some(json), _) => parse_json_matrix(json),
            (None, Some(path)) => read_csv_matrix(path),
            (None, None) => Ok(Vec::new()),
        }
    }
}

#[derive(Args, Debug)]
pub struct WriteArgs {
    #[command(flatten)]
    target: Target,

    #[command(flatten)]
    values: ValuesInput,

    /// Store values verbatim instead of parsing them as typed input
    #[arg(long)]
    raw: bool,

    /// Echo the written values and range
    #[arg(long)]
    echo: bool,
}

impl WriteArgs {
    fn request(&self) -> Result<WriteRequest> {
        Ok(WriteRequest {
            spreadsheet_id: self.target.spreadsheet.clone(),
            sheet_name: self.target.sheet.clone(),
            range: self.target.range.clone(),
            values: self.values.load()?,
            input_mode: InputMode::from_raw(self.raw),
            include_values: self.echo,
        })
    }
}

#[derive(Subcommand, Debug)]
pub enum SheetsCommand {
    /// Read one range
    Read {
        #[command(flatten)]
        target: Target,

        /// Return typed values instead of display strings
        #[arg(long)]
        unformatted: bool,
    },
    /// Read several ranges at once; no ranges reads every sheet
    ReadRanges {
        #[arg(short, long)]
        spreadsheet: String,

        /// Fully qualified range, e.g. 'Sheet1!A1:B5'; repeatable
        #[arg(long = "range")]
        ranges: Vec<String>,

        #[arg(long)]
        unformatted: bool,
    },
    /// Overwrite a range, adding the sheet if it does not exist
    Write(WriteArgs),
    /// Append rows below the table in a range
    Append(WriteArgs),
    /// Clear the values in a range
    Clear {
        #[command(flatten)]
        target: Target,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List the sheets of a spreadsheet
    List {
        #[arg(short, long)]
        spreadsheet: String,
    },
    /// Add a sheet to a spreadsheet
    AddSheet {
        #[arg(short, long)]
        spreadsheet: String,

        #[arg(long)]
        title: String,
    },
    /// Create a new spreadsheet
    Create {
        #[arg(long)]
        title: String,

        /// Open the new spreadsheet in the default browser
        #[arg(long)]
        open: bool,
    },
}

impl SheetsCommand {
    pub async fn execute(&self, session: &Session) -> Result<()> {
        match self {
            SheetsCommand::Read {
                target,
                unformatted,
            } => {
                let values = engine(session)
                    .await?
                    .read_range(
                        &target.spreadsheet,
                        &target.sheet,
                        &target.range,
                        *unformatted,
                    )
                    .await?;
                print_json(&json!({ "values": values }))
            }
            SheetsCommand::ReadRanges {
                spreadsheet,
                ranges,
                unformatted,
            } => {
                let batch = engine(session)
                    .await?
                    .read_ranges(spreadsheet, ranges, *unformatted)
                    .await?;
                print_json(&batch)
            }
            SheetsCommand::Write(args) => {
                let request = args.request()?;
                let outcome = engine(session).await?.write_range(request).await?;
                print_json(&outcome)
            }
            SheetsCommand::Append(args) => {
                let request = args.request()?;
                let outcome = engine(session).await?.append_range(request).await?;
                print_json(&outcome)
            }
            SheetsCommand::Clear { target, yes } => {
                let prompt = format!(
                    "Clear values in '{}' of spreadsheet {}?",
                    target.sheet, target.spreadsheet
                );
                if !yes && !confirm(&prompt)? {
                    info!("Nothing cleared");
                    return Ok(());
                }
                let outcome = engine(session)
                    .await?
                    .clear_range(&target.spreadsheet, &target.sheet, &target.range)
                    .await?;
                print_json(&outcome)
            }
            SheetsCommand::List { spreadsheet } => {
                let sheets = engine(session).await?.list_sheets(spreadsheet).await?;
                print_json(&sheets)
            }
            SheetsCommand::AddSheet { spreadsheet, title } => {
                let created = engine(session)
                    .await?
                    .create_sheet(spreadsheet, title)
                    .await?;
                print_json(&created)
            }
            SheetsCommand::Create { title, open } => {
                let created = engine(session).await?.create_spreadsheet(title).await?;
                if *open {
                    if let Err(e) = open::that(&created.url) {
                        warn!(url = %created.url, "Failed to open browser: {}", e);
                    }
                }
                print_json(&created)
            }
        }
    }
}

async fn engine(session: &Session) -> Result<SheetsEngine<SheetsClient>> {
    Ok(SheetsEngine::new(session.sheets_client().await?))
}

fn parse_json_matrix(json: &str) -> Result<CellMatrix> {
    Ok(serde_json::from_str(json)?)
}

/// Every CSV field becomes a string cell; rows may differ in length.
fn read_csv_matrix(path: &Path) -> Result<CellMatrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|field| Value::String(field.to_string()))
                .collect(),
        );
    }

    Ok(rows)
}
