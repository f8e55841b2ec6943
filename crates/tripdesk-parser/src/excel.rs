//! Excel quotation parser using calamine
//!
//! Sheets are read without a header row, blank cells are dropped, and
//! the surviving cells of each row are joined with the `" | "` delimiter
//! so the row structure survives as a hint for the NER model. Rows with
//! no surviving cells are skipped entirely, so no output line ever
//! consists solely of delimiters.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{ParserError, Result, CELL_DELIMITER};

/// Parse an xlsx/xls workbook into delimiter-joined text lines
pub fn parse(path: &Path) -> Result<String> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| ParserError::ExcelError(e.to_string()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut lines = Vec::new();

    for sheet_name in &sheet_names {
        let Ok(range) = workbook.worksheet_range(sheet_name) else {
            continue;
        };

        for row in range.rows() {
            if let Some(line) = row_to_line(row) {
                lines.push(line);
            }
        }
    }

    Ok(lines.join("\n"))
}

/// Join the non-blank cells of a row, or `None` when nothing survives
fn row_to_line(row: &[Data]) -> Option<String> {
    let cells: Vec<String> = row
        .iter()
        .map(cell_to_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if cells.is_empty() {
        None
    } else {
        Some(cells.join(CELL_DELIMITER))
    }
}

/// Convert a cell to its text form; missing cells become empty strings
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // Format without unnecessary decimals
            if f.fract() == 0.0 {
                format!("{}", *f as i64)
            } else {
                format!("{f}")
            }
        }
        Data::Int(i) => format!("{i}"),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
        Data::DateTime(dt) => format!("{dt}"),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}
