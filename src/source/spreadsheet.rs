//! Spreadsheet reading (xlsx, xls, xlsb, ods)

use super::Table;
use crate::error::{CertError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Read one worksheet. The first non-empty row of the used range is the header.
pub fn read_sheet(path: &Path, sheet: Option<&str>) -> Result<Table> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CertError::load(path, e))?;

    let range = match sheet {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| CertError::load(path, format!("sheet '{}': {}", name, e)))?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| CertError::load(path, "workbook has no worksheets"))?
            .map_err(|e| CertError::load(path, e))?,
    };

    let first_row = range.start().map(|(r, _)| r as usize).unwrap_or(0);
    let mut rows = range.rows().enumerate();

    let headers: Vec<String> = match rows.next() {
        Some((_, header)) => header.iter().map(|c| cell_text(c).trim().to_string()).collect(),
        None => return Err(CertError::load(path, "worksheet is empty")),
    };

    let rows: Vec<(usize, Vec<String>)> = rows
        .map(|(idx, row)| {
            let cells = row.iter().map(cell_text).collect::<Vec<String>>();
            (first_row + idx + 1, cells)
        })
        .collect();

    Ok(Table { headers, rows })
}

/// Text form of a cell. Whole floats drop their fractional part so numeric
/// codes read back the way they were typed.
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        other => other.to_string(),
    }
}
