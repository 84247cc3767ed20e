use serde::{Deserialize, Serialize};

/// Row-major cell values as returned by the Sheets API. Rows may be ragged:
/// the backend omits trailing empty cells.
pub type CellMatrix = Vec<Vec<serde_json::Value>>;

/// How cell values are rendered on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueRender {
    /// Display strings, as shown in the Sheets UI.
    Formatted,
    /// Typed values: numbers stay numbers, booleans stay booleans.
    Unformatted,
}

impl ValueRender {
    pub fn from_unformatted(unformatted: bool) -> Self {
        match unformatted {
            true => ValueRender::Unformatted,
            false => ValueRender::Formatted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueRender::Formatted => "FORMATTED_VALUE",
            ValueRender::Unformatted => "UNFORMATTED_VALUE",
        }
    }
}

/// Dates and times are always read back as formatted strings.
pub const DATE_TIME_RENDER: &str = "FORMATTED_STRING";

/// Value matrices are row-major on both read and write.
pub const MAJOR_DIMENSION: &str = "ROWS";

// Appended rows are inserted rather than overwriting whatever sits below the table.
pub const INSERT_ROWS: &str = "INSERT_ROWS";

/// Query options sent with every values read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    pub value_render: ValueRender,
    pub date_time_render: &'static str,
    pub major_dimension: &'static str,
}

impl ReadOptions {
    pub fn new(value_render: ValueRender) -> Self {
        Self {
            value_render,
            date_time_render: DATE_TIME_RENDER,
            major_dimension: MAJOR_DIMENSION,
        }
    }
}

/// How written values are interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    /// Stored verbatim, no type inference.
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas).
    UserEntered,
}

impl InputMode {
    pub fn from_raw(raw: bool) -> Self {
        match raw {
            true => InputMode::Raw,
            false => InputMode::UserEntered,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Raw => "RAW",
            InputMode::UserEntered => "USER_ENTERED",
        }
    }
}

/// Query options sent with a values update or append.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub input_mode: InputMode,
    /// Ask the backend to echo the written values and resolved range.
    pub include_values: bool,
    /// Only meaningful for appends.
    pub insert_data: Option<&'static str>,
}

impl WriteOptions {
    pub fn update(input_mode: InputMode, include_values: bool) -> Self {
        Self {
            input_mode,
            include_values,
            insert_data: None,
        }
    }

    pub fn append(input_mode: InputMode, include_values: bool) -> Self {
        Self {
            insert_data: Some(INSERT_ROWS),
            ..Self::update(input_mode, include_values)
        }
    }
}

/// Values to push into a range by `write_range` or `append_range`.
#[derive(Debug, Clone, PartialEq)]
pub struct WriteRequest {
    pub spreadsheet_id: String,
    pub sheet_name: String,
    /// A1 range relative to the sheet; blank selects the operation's default.
    pub range: String,
    pub values: CellMatrix,
    pub input_mode: InputMode,
    /// Ask the backend to echo the written values and resolved range.
    pub include_values: bool,
}
