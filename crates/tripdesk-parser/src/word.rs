//! DOCX quotation parser using docx-rs
//!
//! Collects non-blank paragraph texts in document order, then flattens
//! each table row into a `" | "` joined line. Newlines inside table
//! cells become spaces so one row stays on one output line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use docx_rs::read_docx;

use crate::{ParserError, Result, CELL_DELIMITER};

/// Parse a Word document into paragraph lines followed by table lines
pub fn parse(path: &Path) -> Result<String> {
    let mut file = File::open(path).map_err(|e| ParserError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut buf = Vec::new();
    file.read_to_end(&mut buf).map_err(|e| ParserError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    let docx = read_docx(&buf).map_err(|e| ParserError::DocxError(e.to_string()))?;

    let mut paragraphs = Vec::new();
    let mut table_lines = Vec::new();

    for child in docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let text = paragraph_text(&para);
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    paragraphs.push(trimmed.to_string());
                }
            }
            docx_rs::DocumentChild::Table(tbl) => {
                for row in &tbl.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    if let Some(line) = row_to_line(tr) {
                        table_lines.push(line);
                    }
                }
            }
            _ => {}
        }
    }

    paragraphs.extend(table_lines);
    Ok(paragraphs.join("\n"))
}

/// Concatenate the run texts of a paragraph
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

/// Join a table row's cells; `None` when every cell is blank.
///
/// Empty cells are kept in the join so column positions stay aligned.
fn row_to_line(tr: &docx_rs::TableRow) -> Option<String> {
    let cells: Vec<String> = tr
        .cells
        .iter()
        .map(|cell| {
            let docx_rs::TableRowChild::TableCell(tc) = cell;
            cell_text(tc)
        })
        .collect();

    if cells.iter().any(|c| !c.is_empty()) {
        Some(cells.join(CELL_DELIMITER))
    } else {
        None
    }
}

/// Flatten a cell's paragraphs into one line, newlines become spaces
fn cell_text(tc: &docx_rs::TableCell) -> String {
    let mut parts = Vec::new();
    for child in &tc.children {
        if let docx_rs::TableCellContent::Paragraph(para) = child {
            parts.push(paragraph_text(para));
        }
    }
    parts.join(" ").replace('\n', " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run, Table, TableCell, TableRow};

    fn write_docx(#[allow(unused_mut)] mut docx: Docx) -> tempfile::NamedTempFile {
        let file = tempfile::Builder::new().suffix(".docx").tempfile().unwrap();
        docx.build().pack(file.as_file()).unwrap();
        file
    }

    fn para(text: &str) -> Paragraph {
        Paragraph::new().add_run(Run::new().add_text(text))
    }

    fn cell(text: &str) -> TableCell {
        TableCell::new().add_paragraph(para(text))
    }

    #[test]
    fn test_paragraphs_then_tables() {
        let docx = Docx::new()
            .add_paragraph(para("다낭 골프 패키지 견적"))
            .add_paragraph(para("   "))
            .add_table(Table::new(vec![
                TableRow::new(vec![cell("호텔"), cell("롯데호텔")]),
                TableRow::new(vec![cell(""), cell("")]),
            ]))
            .add_paragraph(para("문의: 02-1234-5678"));

        let file = write_docx(docx);
        let text = parse(file.path()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        // Paragraph lines come first, blank paragraph and blank row dropped
        assert_eq!(
            lines,
            vec!["다낭 골프 패키지 견적", "문의: 02-1234-5678", "호텔 | 롯데호텔"]
        );
    }

    #[test]
    fn test_row_with_one_filled_cell_keeps_empties() {
        let docx = Docx::new().add_table(Table::new(vec![TableRow::new(vec![
            cell("포함사항"),
            cell(""),
        ])]));

        let file = write_docx(docx);
        let text = parse(file.path()).unwrap();
        assert_eq!(text, "포함사항 | ");
    }
}
