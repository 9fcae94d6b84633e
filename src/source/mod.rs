//! Tabular record loading
//!
//! Spreadsheets go through calamine, delimited text through csv. Both are
//! reduced to a [`Table`] of text cells before records are extracted, so the
//! column handling below is shared.

pub mod spreadsheet;
pub mod delimited;

use crate::error::{CertError, Result};
use crate::models::{ColumnLabels, Record, RecordFilter};
use std::path::Path;

/// Options that influence how a table file is read
#[derive(Debug, Clone)]
pub struct SourceOptions {
    pub columns: ColumnLabels,
    /// Worksheet to read; the first one when unset
    pub sheet: Option<String>,
    pub csv_delimiter: u8,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            columns: ColumnLabels::default(),
            sheet: None,
            csv_delimiter: b',',
        }
    }
}

/// Raw table: trimmed header labels and text rows with their 1-based row numbers
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

/// Load every record from `path`. Any failure is fatal for the run.
pub fn load(path: &Path, options: &SourceOptions) -> Result<Vec<Record>> {
    let table = read_table(path, options)?;
    let records = records_from_table(&table, &options.columns)
        .map_err(|reason| CertError::load(path, reason))?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Load and filter in one step
pub fn load_filtered(
    path: &Path,
    options: &SourceOptions,
    filter: &RecordFilter,
) -> Result<Vec<Record>> {
    let records = load(path, options)?;
    let total = records.len();
    let records = filter.apply(records);
    if !filter.is_empty() {
        log::info!("{} of {} records match the filters", records.len(), total);
    }
    Ok(records)
}

fn read_table(path: &Path, options: &SourceOptions) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("xlsx" | "xlsm" | "xlsb" | "xls" | "ods") => {
            spreadsheet::read_sheet(path, options.sheet.as_deref())
        }
        Some("csv") => delimited::read_csv(path, options.csv_delimiter),
        _ => Err(CertError::load(
            path,
            "unsupported input format, expected .xlsx, .xls, .ods or .csv",
        )),
    }
}

/// Resolve the configured columns against the header row and build records.
/// Rows whose cells are all empty are dropped.
pub fn records_from_table(
    table: &Table,
    columns: &ColumnLabels,
) -> std::result::Result<Vec<Record>, String> {
    let index_of = |label: &str| -> std::result::Result<usize, String> {
        let wanted = label.trim();
        table
            .headers
            .iter()
            .position(|h| h == wanted)
            .ok_or_else(|| format!("missing column '{}'", wanted))
    };

    let customer = index_of(&columns.customer)?;
    let code = index_of(&columns.code)?;
    let street = index_of(&columns.street)?;
    let city = index_of(&columns.city)?;

    let cell = |row: &[String], idx: usize| row.get(idx).cloned().unwrap_or_default();

    Ok(table
        .rows
        .iter()
        .filter(|(_, row)| row.iter().any(|c| !c.is_empty()))
        .map(|(number, row)| Record {
            row: *number,
            customer: cell(row, customer),
            code: cell(row, code),
            street: cell(row, street),
            city: cell(row, city),
        })
        .collect())
}
