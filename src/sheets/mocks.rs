//! In-memory stand-in for the Sheets API, close enough to its value semantics
//! to exercise the engine: A1 ranges, trailing-empty trimming, render and input
//! options, append-below-table and sheet bookkeeping.

use super::SheetOperations;
use super::range::{is_a1_cell, sheet_reference};
use crate::error::{AppError, Result};
use crate::models::{CellMatrix, InputMode, ReadOptions, ValueRender, WriteOptions};
use async_trait::async_trait;
use google_sheets4::api::{
    AppendValuesResponse, BatchGetValuesResponse, ClearValuesResponse, SheetProperties,
    Spreadsheet, UpdateValuesResponse, ValueRange,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct State {
    books: BTreeMap<String, Book>,
    created: usize,
    calls: Vec<&'static str>,
    last_range: String,
    read_options: Option<ReadOptions>,
    write_options: Option<WriteOptions>,
}

struct Book {
    tabs: Vec<Tab>,
    next_sheet_id: i32,
}

struct Tab {
    id: i32,
    title: String,
    cells: Vec<Vec<Value>>,
}

impl Book {
    fn with_tabs(titles: &[&str]) -> Self {
        let tabs = titles
            .iter()
            .enumerate()
            .map(|(id, title)| Tab {
                id: id as i32,
                title: title.to_string(),
                cells: Vec::new(),
            })
            .collect::<Vec<_>>();
        Self {
            next_sheet_id: tabs.len() as i32,
            tabs,
        }
    }

    /// Tab titles match regardless of case; an empty title is the first tab.
    fn tab_mut(&mut self, title: &str) -> Result<&mut Tab> {
        if title.is_empty() {
            return self
                .tabs
                .first_mut()
                .ok_or_else(|| AppError::Sheets("Spreadsheet has no sheets".to_string()));
        }
        let wanted = title.to_lowercase();
        self.tabs
            .iter_mut()
            .find(|tab| tab.title.to_lowercase() == wanted)
            .ok_or_else(|| AppError::Sheets(format!("Unable to parse range: {}", title)))
    }
}

/// Parsed A1 range. Rows and columns are zero-based, ends inclusive.
#[derive(Debug)]
struct Area {
    sheet: String,
    first_row: usize,
    first_col: usize,
    last_row: Option<usize>,
    last_col: Option<usize>,
}

fn column_index(letters: &str) -> usize {
    letters
        .bytes()
        .fold(0, |acc, b| acc * 26 + (b.to_ascii_uppercase() - b'A' + 1) as usize)
        - 1
}

fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

/// Split `B12` into an optional column and an optional row.
fn parse_cell(cell: &str) -> (Option<usize>, Option<usize>) {
    let split = cell
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(cell.len());
    let (letters, digits) = cell.split_at(split);
    let col = (!letters.is_empty()).then(|| column_index(letters));
    let row = digits.parse::<usize>().ok().map(|r| r - 1);
    (col, row)
}

fn parse_range(range: &str) -> Area {
    let (sheet, cells) = match range.strip_prefix('\'') {
        Some(quoted) => {
            let mut name = String::new();
            let mut chars = quoted.char_indices().peekable();
            let mut rest = "";
            while let Some((i, c)) = chars.next() {
                if c == '\'' {
                    if chars.peek().map(|(_, n)| *n) == Some('\'') {
                        chars.next();
                        name.push('\'');
                        continue;
                    }
                    rest = &quoted[i + 1..];
                    break;
                }
                name.push(c);
            }
            (name, rest.strip_prefix('!').unwrap_or(""))
        }
        None => match range.split_once('!') {
            Some((sheet, cells)) => (sheet.to_string(), cells),
            // A bare cell reference points into the first sheet
            None if is_a1_cell(range) => (String::new(), range),
            None => (range.to_string(), ""),
        },
    };

    if cells.is_empty() {
        return Area {
            sheet,
            first_row: 0,
            first_col: 0,
            last_row: None,
            last_col: None,
        };
    }

    let (start, end) = match cells.split_once(':') {
        Some((start, end)) => (parse_cell(start), parse_cell(end)),
        None => (parse_cell(cells), parse_cell(cells)),
    };

    Area {
        sheet,
        first_row: start.1.unwrap_or(0),
        first_col: start.0.unwrap_or(0),
        last_row: end.1,
        last_col: end.0,
    }
}

fn is_empty_cell(value: &Value) -> bool {
    matches!(value, Value::Null) || value.as_str() == Some("")
}

fn render(value: &Value, mode: ValueRender) -> Value {
    match (mode, value) {
        (ValueRender::Unformatted, _) => value.clone(),
        (ValueRender::Formatted, Value::Number(n)) => {
            Value::String(n.as_f64().map(|f| f.to_string()).unwrap_or_default())
        }
        (ValueRender::Formatted, Value::Bool(b)) => {
            Value::String(if *b { "TRUE" } else { "FALSE" }.to_string())
        }
        (ValueRender::Formatted, _) => value.clone(),
    }
}

fn parse_input(value: Value, input_mode: InputMode) -> Value {
    if input_mode == InputMode::Raw {
        return value;
    }
    let inferred = match value.as_str() {
        Some("TRUE") => Some(Value::Bool(true)),
        Some("FALSE") => Some(Value::Bool(false)),
        Some(text) => text
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number),
        None => None,
    };
    inferred.unwrap_or(value)
}

impl Tab {
    fn read(&self, area: &Area, render_as: ValueRender) -> CellMatrix {
        let last_row = area
            .last_row
            .unwrap_or(self.cells.len().saturating_sub(1));
        let mut rows: CellMatrix = (area.first_row..=last_row)
            .map(|r| {
                let row = self.cells.get(r).map(Vec::as_slice).unwrap_or(&[]);
                let last_col = area.last_col.unwrap_or(row.len().saturating_sub(1));
                let mut cells: Vec<Value> = (area.first_col..=last_col)
                    .map(|c| row.get(c).cloned().unwrap_or(Value::Null))
                    .collect();
                while cells.last().is_some_and(is_empty_cell) {
                    cells.pop();
                }
                cells.iter().map(|v| render(v, render_as)).collect()
            })
            .collect();
        while rows.last().is_some_and(|row| row.is_empty()) {
            rows.pop();
        }
        rows
    }

    fn write(&mut self, row: usize, col: usize, values: CellMatrix, input_mode: InputMode) {
        for (r, row_values) in values.into_iter().enumerate() {
            if self.cells.len() <= row + r {
                self.cells.resize(row + r + 1, Vec::new());
            }
            let cells = &mut self.cells[row + r];
            for (c, value) in row_values.into_iter().enumerate() {
                if value.is_null() {
                    continue;
                }
                if cells.len() <= col + c {
                    cells.resize(col + c + 1, Value::Null);
                }
                cells[col + c] = parse_input(value, input_mode);
            }
        }
    }

    /// Index of the last row holding a value in columns `first_col..=last_col`.
    fn last_used_row(&self, first_col: usize, last_col: Option<usize>) -> Option<usize> {
        self.cells.iter().rposition(|row| {
            row.iter().enumerate().any(|(c, v)| {
                c >= first_col && last_col.is_none_or(|l| c <= l) && !is_empty_cell(v)
            })
        })
    }

    fn a1(&self, row: usize, col: usize, rows: usize, cols: usize) -> String {
        format!(
            "{}!{}{}:{}{}",
            sheet_reference(&self.title),
            column_name(col),
            row + 1,
            column_name(col + cols.max(1) - 1),
            row + rows.max(1)
        )
    }
}

#[derive(Clone, Default)]
pub(crate) struct MemorySheets {
    state: Arc<Mutex<State>>,
}

impl MemorySheets {
    pub(crate) fn with_spreadsheet(spreadsheet_id: &str, titles: &[&str]) -> Self {
        let sheets = Self::default();
        sheets
            .state
            .lock()
            .unwrap()
            .books
            .insert(spreadsheet_id.to_string(), Book::with_tabs(titles));
        sheets
    }

    pub(crate) fn calls_named(&self, name: &str) -> usize {
        let state = self.state.lock().unwrap();
        state.calls.iter().filter(|call| **call == name).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub(crate) fn last_range(&self) -> String {
        self.state.lock().unwrap().last_range.clone()
    }

    pub(crate) fn read_options(&self) -> Option<ReadOptions> {
        self.state.lock().unwrap().read_options
    }

    pub(crate) fn write_options(&self) -> Option<WriteOptions> {
        self.state.lock().unwrap().write_options
    }

    fn with_book<T>(
        &self,
        call: &'static str,
        spreadsheet_id: &str,
        f: impl FnOnce(&mut Book) -> Result<T>,
    ) -> Result<T> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        let book = state.books.get_mut(spreadsheet_id).ok_or_else(|| {
            AppError::Sheets(format!("Requested entity was not found: {}", spreadsheet_id))
        })?;
        f(book)
    }

    fn write_values(
        &self,
        call: &'static str,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
        append: bool,
    ) -> Result<UpdateValuesResponse> {
        self.state.lock().unwrap().write_options = Some(options);
        let WriteOptions {
            input_mode,
            include_values,
            ..
        } = options;
        let area = parse_range(range);
        let rows = values.len();
        let cols = values.iter().map(Vec::len).max().unwrap_or(0);

        self.with_book(call, spreadsheet_id, |book| {
            let tab = book.tab_mut(&area.sheet)?;
            let row = match append {
                true => tab
                    .last_used_row(area.first_col, area.last_col)
                    .map_or(area.first_row, |last| (last + 1).max(area.first_row)),
                false => area.first_row,
            };
            tab.write(row, area.first_col, values, input_mode);

            let updated_range = tab.a1(row, area.first_col, rows, cols);
            let updated_data = include_values.then(|| {
                let written = parse_range(&updated_range);
                ValueRange {
                    range: Some(updated_range.clone()),
                    values: Some(tab.read(&written, ValueRender::Formatted)),
                    ..Default::default()
                }
            });

            Ok(UpdateValuesResponse {
                spreadsheet_id: Some(spreadsheet_id.to_string()),
                updated_range: Some(updated_range),
                updated_rows: Some(rows as i32),
                updated_columns: Some(cols as i32),
                updated_data,
                ..Default::default()
            })
        })
    }
}

#[async_trait]
impl SheetOperations for MemorySheets {
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        options: ReadOptions,
    ) -> Result<ValueRange> {
        {
            let mut state = self.state.lock().unwrap();
            state.last_range = range.to_string();
            state.read_options = Some(options);
        }
        let area = parse_range(range);
        self.with_book("get_values", spreadsheet_id, |book| {
            let values = book.tab_mut(&area.sheet)?.read(&area, options.value_render);
            Ok(ValueRange {
                range: Some(range.to_string()),
                values: (!values.is_empty()).then_some(values),
                ..Default::default()
            })
        })
    }

    async fn batch_get_values(
        &self,
        spreadsheet_id: &str,
        ranges: &[String],
        options: ReadOptions,
    ) -> Result<BatchGetValuesResponse> {
        self.state.lock().unwrap().read_options = Some(options);
        self.with_book("batch_get_values", spreadsheet_id, |book| {
            let mut value_ranges = Vec::new();
            for range in ranges {
                let area = parse_range(range);
                let values = book.tab_mut(&area.sheet)?.read(&area, options.value_render);
                value_ranges.push(ValueRange {
                    range: Some(range.clone()),
                    values: (!values.is_empty()).then_some(values),
                    ..Default::default()
                });
            }
            Ok(BatchGetValuesResponse {
                spreadsheet_id: Some(spreadsheet_id.to_string()),
                value_ranges: Some(value_ranges),
                ..Default::default()
            })
        })
    }

    async fn update_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<UpdateValuesResponse> {
        self.write_values("update_values", spreadsheet_id, range, values, options, false)
    }

    async fn append_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        values: CellMatrix,
        options: WriteOptions,
    ) -> Result<AppendValuesResponse> {
        let updates =
            self.write_values("append_values", spreadsheet_id, range, values, options, true)?;
        Ok(AppendValuesResponse {
            spreadsheet_id: Some(spreadsheet_id.to_string()),
            table_range: Some(range.to_string()),
            updates: Some(updates),
            ..Default::default()
        })
    }

    async fn clear_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<ClearValuesResponse> {
        let area = parse_range(range);
        self.with_book("clear_values", spreadsheet_id, |book| {
            let tab = book.tab_mut(&area.sheet)?;
            let last_row = area.last_row.unwrap_or(usize::MAX);
            for (r, row) in tab.cells.iter_mut().enumerate() {
                if r < area.first_row || r > last_row {
                    continue;
                }
                for (c, cell) in row.iter_mut().enumerate() {
                    if c >= area.first_col && area.last_col.is_none_or(|l| c <= l) {
                        *cell = Value::Null;
                    }
                }
            }
            Ok(ClearValuesResponse {
                spreadsheet_id: Some(spreadsheet_id.to_string()),
                cleared_range: Some(range.to_string()),
                ..Default::default()
            })
        })
    }

    async fn sheet_properties(&self, spreadsheet_id: &str) -> Result<Vec<SheetProperties>> {
        self.with_book("sheet_properties", spreadsheet_id, |book| {
            Ok(book
                .tabs
                .iter()
                .enumerate()
                .map(|(index, tab)| SheetProperties {
                    sheet_id: Some(tab.id),
                    title: Some(tab.title.clone()),
                    index: Some(index as i32),
                    ..Default::default()
                })
                .collect())
        })
    }

    async fn add_sheet(&self, spreadsheet_id: &str, title: &str) -> Result<SheetProperties> {
        self.with_book("add_sheet", spreadsheet_id, |book| {
            let wanted = title.to_lowercase();
            if book.tabs.iter().any(|tab| tab.title.to_lowercase() == wanted) {
                return Err(AppError::Sheets(format!(
                    "A sheet with the name \"{}\" already exists",
                    title
                )));
            }
            let id = book.next_sheet_id;
            book.next_sheet_id += 1;
            book.tabs.push(Tab {
                id,
                title: title.to_string(),
                cells: Vec::new(),
            });
            Ok(SheetProperties {
                sheet_id: Some(id),
                title: Some(title.to_string()),
                index: Some(book.tabs.len() as i32 - 1),
                ..Default::default()
            })
        })
    }

    async fn create_spreadsheet(&self, _title: &str) -> Result<Spreadsheet> {
        let mut state = self.state.lock().unwrap();
        state.calls.push("create_spreadsheet");
        state.created += 1;
        let spreadsheet_id = format!("created-{}", state.created);
        state
            .books
            .insert(spreadsheet_id.clone(), Book::with_tabs(&["Sheet1"]));

        Ok(Spreadsheet {
            spreadsheet_url: Some(format!(
                "https://docs.google.com/spreadsheets/d/{}/edit",
                spreadsheet_id
            )),
            spreadsheet_id: Some(spreadsheet_id),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letters() {
        assert_eq!(column_index("A"), 0);
        assert_eq!(column_index("ZZ"), 701);
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
    }

    #[test]
    fn test_parse_quoted_range() {
        let area = parse_range("'O''Neil Rooms'!B2:C");
        assert_eq!(area.sheet, "O'Neil Rooms");
        assert_eq!((area.first_row, area.first_col), (1, 1));
        assert_eq!((area.last_row, area.last_col), (None, Some(2)));
    }

    #[test]
    fn test_bare_cell_reference_targets_first_sheet() {
        let area = parse_range("FY24");
        assert_eq!(area.sheet, "");
        assert_eq!((area.first_row, area.first_col), (23, column_index("FY")));

        let area = parse_range("'FY24'");
        assert_eq!(area.sheet, "FY24");
        assert_eq!((area.last_row, area.last_col), (None, None));
    }
}
