//! PDF quotation parser using pdf-extract
//!
//! Text is extracted page by page (pdf-extract marks page breaks with
//! form feeds). After each page's text, lines that look like table rows
//! are re-emitted in the `" | "` delimiter convention so tabular price
//! sheets keep their column alignment. This whitespace-column heuristic
//! stands in for a dedicated table extractor; pure-Rust PDF libraries do
//! not expose one.

use std::path::Path;

use crate::{ParserError, Result, CELL_DELIMITER};

/// Parse a PDF into page-ordered text plus detected table rows
pub fn parse(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| ParserError::PdfError(e.to_string()))?;

    let mut full_text = String::new();

    // Form feed separates pages in pdf-extract output
    for page in text.split('\x0C') {
        if !page.trim().is_empty() {
            full_text.push_str(page);
            full_text.push('\n');
        }

        for row in detect_table_rows(page) {
            full_text.push_str(&row.join(CELL_DELIMITER));
            full_text.push('\n');
        }
    }

    Ok(full_text)
}

/// Find lines whose columns are separated by tabs or runs of spaces.
///
/// A line counts as a table row when splitting on those separators
/// yields at least two cells; single-column prose is left alone.
fn detect_table_rows(page: &str) -> Vec<Vec<String>> {
    page.lines().filter_map(split_table_line).collect()
}

fn split_table_line(line: &str) -> Option<Vec<String>> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut space_run = 0usize;

    for ch in line.chars() {
        match ch {
            '\t' => {
                cells.push(current.trim().to_string());
                current.clear();
                space_run = 0;
            }
            ' ' => {
                space_run += 1;
                current.push(ch);
            }
            _ => {
                // Two or more spaces end a column
                if space_run >= 2 {
                    let cell = current.trim().to_string();
                    current.clear();
                    cells.push(cell);
                }
                space_run = 0;
                current.push(ch);
            }
        }
    }

    let last = current.trim().to_string();
    if !last.is_empty() || !cells.is_empty() {
        cells.push(last);
    }

    if cells.len() >= 2 {
        Some(cells)
    } else {
        None
    }
}
