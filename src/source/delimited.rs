//! Delimited text reading

use super::Table;
use crate::error::{CertError, Result};
use csv::ReaderBuilder;
use std::path::Path;

pub fn read_csv(path: &Path, delimiter: u8) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| CertError::load(path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CertError::load(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows: Vec<(usize, Vec<String>)> = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.map_err(|e| CertError::load(path, e))?;
        rows.push((idx + 2, record.iter().map(str::to_string).collect()));
    }

    Ok(Table { headers, rows })
}
