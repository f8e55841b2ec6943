//! Tripdesk Parser - Quotation document parsing
//!
//! Converts uploaded quotation files (txt, xlsx/xls, pdf, docx) into a
//! single normalized text blob for the NER pipeline. Tabular structure
//! is preserved with a `" | "` cell delimiter so the downstream model
//! keeps the column alignment as a hint.
//!
//! The public entry point is [`parse_file`], which never fails: internal
//! parse errors are logged and demoted to an empty string, and unknown
//! extensions yield a fixed "unsupported format" message. Callers must
//! treat an empty string as "no extractable content".

use std::path::Path;

use thiserror::Error;

pub mod excel;
pub mod pdf;
pub mod text;
pub mod word;

/// Cell delimiter used when flattening tabular data into text
pub const CELL_DELIMITER: &str = " | ";

/// Fixed message returned for file types the parser does not handle
pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "지원하지 않는 파일 형식입니다.";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur during document parsing.
///
/// These stay internal to the parser layer; [`parse_file`] converts them
/// into the empty-string sentinel after logging.
#[derive(Error, Debug)]
pub enum ParserError {
    /// IO error while reading the file
    #[error("IO error reading file: {path}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// PDF parsing error
    #[error("PDF parsing error: {0}")]
    PdfError(String),

    /// DOCX parsing error
    #[error("DOCX parsing error: {0}")]
    DocxError(String),

    /// Excel parsing error
    #[error("Excel parsing error: {0}")]
    ExcelError(String),

    /// Text is neither valid UTF-8 nor valid cp949
    #[error("Text encoding error: {0}")]
    EncodingError(String),
}

pub type Result<T> = std::result::Result<T, ParserError>;

// ============================================================================
// File Type Detection
// ============================================================================

/// Supported file types, detected from the lowercase extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    PlainText,
    Xlsx,
    Xls,
    Pdf,
    Docx,
    Unknown,
}

impl FileType {
    /// Detect file type from an extension string
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" => Self::PlainText,
            "xlsx" => Self::Xlsx,
            "xls" => Self::Xls,
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Unknown)
    }
}

impl std::fmt::Display for FileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PlainText => write!(f, "txt"),
            Self::Xlsx => write!(f, "xlsx"),
            Self::Xls => write!(f, "xls"),
            Self::Pdf => write!(f, "pdf"),
            Self::Docx => write!(f, "docx"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ============================================================================
// Entry Point
// ============================================================================

/// Extract text from a file, propagating parser errors.
///
/// Dispatches purely on the file extension. Unknown extensions yield the
/// fixed [`UNSUPPORTED_FORMAT_MESSAGE`] rather than an error.
pub fn extract_text(path: &Path) -> Result<String> {
    match FileType::from_path(path) {
        FileType::PlainText => text::parse(path),
        FileType::Xlsx | FileType::Xls => excel::parse(path),
        FileType::Pdf => pdf::parse(path),
        FileType::Docx => word::parse(path),
        FileType::Unknown => Ok(UNSUPPORTED_FORMAT_MESSAGE.to_string()),
    }
}

/// Extract text from a file without failing.
///
/// A missing file or any internal parse error is logged with the file
/// path and demoted to an empty string.
pub fn parse_file(path: &Path) -> String {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "file does not exist");
        return String::new();
    }

    match extract_text(path) {
        Ok(content) => content,
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "file parsing failed");
            String::new()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
