use super::values::CellMatrix;
use serde::{Deserialize, Serialize};

/// Spreadsheets visible to the credential; `names[i]` belongs to `ids[i]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SpreadsheetList {
    pub names: Vec<String>,
    pub ids: Vec<String>,
}

impl SpreadsheetList {
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Result of a value update or append.
///
/// `updated_values` and `range` are only populated when the request asked the
/// backend to echo them; otherwise they serialize as `null` so the key set
/// stays the same either way.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WriteOutcome {
    pub spreadsheet_id: String,
    pub updated_values: Option<CellMatrix>,
    pub range: Option<String>,
    /// The target sheet did not exist and was added before writing.
    pub sheet_created: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClearOutcome {
    pub cleared_range: String,
}

/// Sheet tabs in spreadsheet order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SheetList {
    pub titles: Vec<String>,
    pub ids: Vec<String>,
}

impl SheetList {
    /// Existing title matching `title`. Sheets treats tab titles as unique
    /// regardless of case, so the comparison ignores case.
    pub fn find(&self, title: &str) -> Option<&str> {
        let wanted = title.to_lowercase();
        self.titles
            .iter()
            .find(|t| t.to_lowercase() == wanted)
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedSheet {
    pub title: String,
    pub spreadsheet_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
    pub url: String,
}

/// Parallel sequences of resolved ranges and their values, in backend order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchRead {
    pub ranges: Vec<String>,
    pub values: Vec<CellMatrix>,
}
