//! Source table loading.
//!
//! Reads the first (or a named) sheet of a spreadsheet with `calamine`, or a
//! delimited text file with `csv`, into a [`SourceTable`]: the header row plus every
//! data row as display strings. Cells that are empty, errors, NaN, or placeholder
//! tokens become `None` so downstream code only ever sees "text" or "missing".

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, ExcelDateTime, Reader, open_workbook_auto};
use chrono::Timelike;
use log::debug;

use crate::io_utils;

/// Tokens treated as a missing value when they make up a whole cell.
pub const PLACEHOLDER_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    #[default]
    TreatAsMissing,
    Keep,
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub sheet: Option<String>,
    pub placeholders: PlaceholderPolicy,
    pub delimiter: Option<u8>,
    pub input_encoding: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl SourceTable {
    /// Builds a table from already formatted cells, dropping rows with no values.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(Option::is_some))
            .collect();
        Self { headers, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell<'a>(row: &'a [Option<String>], column: usize) -> Option<&'a str> {
        row.get(column).and_then(|cell| cell.as_deref())
    }
}

pub fn load_table(path: &Path, options: &LoadOptions) -> Result<SourceTable> {
    if !path.exists() {
        return Err(anyhow!("Source file {path:?} does not exist"));
    }
    let table = if io_utils::is_delimited(path) {
        load_delimited(path, options)?
    } else {
        load_spreadsheet(path, options)?
    };
    debug!("Columns in {:?}: {:?}", path, table.headers);
    Ok(table)
}

fn load_spreadsheet(path: &Path, options: &LoadOptions) -> Result<SourceTable> {
    let mut workbook =
        open_workbook_auto(path).with_context(|| format!("Opening workbook {path:?}"))?;
    let sheet = match &options.sheet {
        Some(name) => name.clone(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| anyhow!("Workbook {path:?} has no sheets"))?,
    };
    let range = workbook
        .worksheet_range(&sheet)
        .with_context(|| format!("Reading sheet '{sheet}' from {path:?}"))?;

    // The used range starts at the first non-empty cell; leading empty columns still
    // count towards column positions.
    let offset = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header_row) => pad_columns(offset, header_row, PlaceholderPolicy::Keep)
            .into_iter()
            .enumerate()
            .map(|(idx, text)| header_name(idx, text))
            .collect(),
        None => Vec::new(),
    };
    let body: Vec<Vec<Option<String>>> = rows
        .map(|row| pad_columns(offset, row, options.placeholders))
        .collect();
    Ok(SourceTable::new(headers, body))
}

fn pad_columns(
    offset: usize,
    row: &[Data],
    placeholders: PlaceholderPolicy,
) -> Vec<Option<String>> {
    std::iter::repeat_n(None, offset)
        .chain(row.iter().map(|cell| cell_text(cell, placeholders)))
        .collect()
}

fn load_delimited(path: &Path, options: &LoadOptions) -> Result<SourceTable> {
    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let encoding = io_utils::resolve_encoding(options.input_encoding.as_deref())?;
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers: Vec<String> = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {path:?}"))?
        .into_iter()
        .enumerate()
        .map(|(idx, raw)| header_name(idx, normalize_text(&raw, PlaceholderPolicy::Keep)))
        .collect();

    let mut body: Vec<Vec<Option<String>>> = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        body.push(
            decoded
                .iter()
                .map(|raw| normalize_text(raw, options.placeholders))
                .collect(),
        );
    }
    Ok(SourceTable::new(headers, body))
}

fn header_name(index: usize, text: Option<String>) -> String {
    text.unwrap_or_else(|| format!("Unnamed: {index}"))
}

/// Display string for a spreadsheet cell, or `None` when the cell holds no value.
pub fn cell_text(cell: &Data, placeholders: PlaceholderPolicy) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            normalize_text(s, placeholders)
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => format_number(*f),
        Data::Bool(b) => Some(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => Some(format_datetime(dt)),
    }
}

pub fn normalize_text(raw: &str, placeholders: PlaceholderPolicy) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    if placeholders == PlaceholderPolicy::TreatAsMissing && PLACEHOLDER_TOKENS.contains(&raw) {
        return None;
    }
    Some(raw.to_string())
}

pub fn format_number(value: f64) -> Option<String> {
    if value.is_nan() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        Some(format!("{value:.0}"))
    } else {
        Some(value.to_string())
    }
}

fn format_datetime(value: &ExcelDateTime) -> String {
    if value.is_duration() {
        return format_number(value.as_f64()).unwrap_or_default();
    }
    match value.as_datetime() {
        Some(dt) if dt.num_seconds_from_midnight() == 0 => dt.format("%Y-%m-%d").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format_number(value.as_f64()).unwrap_or_default(),
    }
}
