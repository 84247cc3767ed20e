pub mod results;
pub mod values;

pub use results::{
    BatchRead, ClearOutcome, CreatedSheet, CreatedSpreadsheet, SheetList, SpreadsheetList,
    WriteOutcome,
};
pub use values::{CellMatrix, InputMode, ReadOptions, ValueRender, WriteOptions, WriteRequest};
