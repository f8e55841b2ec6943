//! Tripdesk Core - Domain models and shared types
//!
//! This crate defines the abstractions used throughout the tripdesk
//! extraction pipeline:
//! - Entity label inventory (BIO tag scheme for the quotation NER model)
//! - The fixed ERP form schema (`FormDocument`)
//! - Extraction result types returned to callers
//! - Common error types
//! - Configuration management

pub mod config;
pub mod form;
pub mod label;

pub use config::{AppConfig, ConfigError, ExtractionConfig, LoggingConfig, ModelConfig};
pub use form::FormDocument;
pub use label::{BioLabel, EntityCategory, TagMap, LABEL_COUNT};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error taxonomy for the extraction pipeline.
///
/// These are handled locally and converted into an [`ExtractionResult`]
/// status by the orchestrator; they never escape `extract()` as errors.
#[derive(Error, Debug)]
pub enum TripdeskError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("No extractable text in file: {0}")]
    EmptyExtraction(String),

    #[error("NER model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Internal parse failure for {path}: {detail}")]
    InternalParseFailure { path: String, detail: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, TripdeskError>;

// ============================================================================
// Extraction Result
// ============================================================================

/// Outcome classification for a single extraction call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    /// Full pipeline ran; `data` holds the populated form
    Success,
    /// Text was extracted but the model was unavailable; `raw_text`
    /// holds a preview the operator can review and fill manually
    Warning,
    /// Nothing usable could be extracted; `message` explains why
    Error,
}

impl std::fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Tagged result of one document extraction.
///
/// Built fresh per call and handed back to the caller; nothing here is
/// persisted by the pipeline itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Outcome classification
    pub status: ExtractionStatus,

    /// Name of the processed file (no directory components)
    pub file_name: String,

    /// Populated ERP form, present only on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FormDocument>,

    /// Raw per-category entity spans, kept for audit/debugging
    pub raw_data: TagMap,

    /// Truncated preview of the parsed text, present only on warning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// Human-readable explanation, present on warning/error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// When this extraction completed
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// Successful extraction with a populated form
    pub fn success(file_name: impl Into<String>, data: FormDocument, raw_data: TagMap) -> Self {
        Self {
            status: ExtractionStatus::Success,
            file_name: file_name.into(),
            data: Some(data),
            raw_data,
            raw_text: None,
            message: None,
            extracted_at: Utc::now(),
        }
    }

    /// Degraded extraction: text is available but the model is not
    pub fn warning(
        file_name: impl Into<String>,
        raw_text: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            status: ExtractionStatus::Warning,
            file_name: file_name.into(),
            data: None,
            raw_data: TagMap::new(),
            raw_text: Some(raw_text.into()),
            message: Some(message.into()),
            extracted_at: Utc::now(),
        }
    }

    /// Failed extraction with a short human-readable message
    pub fn error(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: ExtractionStatus::Error,
            file_name: file_name.into(),
            data: None,
            raw_data: TagMap::new(),
            raw_text: None,
            message: Some(message.into()),
            extracted_at: Utc::now(),
        }
    }

    /// Whether the pipeline produced a usable form
    pub fn is_success(&self) -> bool {
        self.status == ExtractionStatus::Success
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result_carries_form() {
        let result = ExtractionResult::success("quote.xlsx", FormDocument::default(), TagMap::new());
        assert!(result.is_success());
        assert!(result.data.is_some());
        assert!(result.raw_text.is_none());
        assert!(result.message.is_none());
    }

    #[test]
    fn test_warning_result_has_preview_but_no_form() {
        let result = ExtractionResult::warning("quote.pdf", "preview text", "model unavailable");
        assert_eq!(result.status, ExtractionStatus::Warning);
        assert!(result.data.is_none());
        assert_eq!(result.raw_text.as_deref(), Some("preview text"));
    }

    #[test]
    fn test_error_result_serializes_without_data_key() {
        let result = ExtractionResult::error("quote.rtf", "unsupported");
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("data").is_none());
        assert_eq!(json["status"], "error");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ExtractionStatus::Success.to_string(), "success");
        assert_eq!(ExtractionStatus::Warning.to_string(), "warning");
        assert_eq!(ExtractionStatus::Error.to_string(), "error");
    }
}
