//! Tripdesk configuration management
//!
//! Configuration comes from defaults, an optional TOML file, and
//! environment variable overrides, in that precedence order.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Model artifact locations and inference limits
    pub model: ModelConfig,

    /// Extraction pipeline behavior
    pub extraction: ExtractionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables on top of defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_override()
    }

    /// Load from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path,
            message: e.to_string(),
        })
    }

    /// Apply environment variable overrides (env takes precedence)
    pub fn with_env_override(mut self) -> Result<Self, ConfigError> {
        if let Ok(dir) = std::env::var("TRIPDESK_MODEL_DIR") {
            self.model.model_dir = PathBuf::from(dir);
        }
        if let Ok(secs) = std::env::var("TRIPDESK_TIMEOUT_SECS") {
            self.extraction.timeout_secs =
                secs.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "TRIPDESK_TIMEOUT_SECS".to_string(),
                    value: secs,
                })?;
        }
        if let Ok(level) = std::env::var("TRIPDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(self)
    }
}

/// Model artifact locations and inference limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding the tokenizer and model subfolders
    pub model_dir: PathBuf,

    /// Subfolder with `tokenizer.json`
    pub tokenizer_subdir: String,

    /// Subfolder with the token-classification ONNX export
    pub ner_subdir: String,

    /// Maximum encoded sequence length; text beyond this is dropped,
    /// not chunked
    pub max_seq_len: usize,
}

impl ModelConfig {
    /// Path to the tokenizer artifact
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(&self.tokenizer_subdir).join("tokenizer.json")
    }

    /// Path to the model artifact
    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(&self.ner_subdir).join("model.onnx")
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            tokenizer_subdir: "tokenizer".to_string(),
            ner_subdir: "koelectra_ner".to_string(),
            max_seq_len: 512,
        }
    }
}

/// Extraction pipeline behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Characters of parsed text returned on a model-unavailable warning
    pub preview_chars: usize,

    /// Deadline for one extraction call (parse + inference)
    pub timeout_secs: u64,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            preview_chars: 200,
            timeout_secs: 60,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// JSON format for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.model.max_seq_len, 512);
        assert_eq!(config.extraction.preview_chars, 200);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_artifact_paths() {
        let config = ModelConfig::default();
        assert!(config
            .tokenizer_path()
            .ends_with("tokenizer/tokenizer.json"));
        assert!(config.model_path().ends_with("koelectra_ner/model.onnx"));
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[model]
model_dir = "/srv/models"
tokenizer_subdir = "tokenizer"
ner_subdir = "koelectra_ner"
max_seq_len = 256

[extraction]
preview_chars = 100
timeout_secs = 10

[logging]
level = "debug"
json_format = false
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model.model_dir, PathBuf::from("/srv/models"));
        assert_eq!(config.model.max_seq_len, 256);
        assert_eq!(config.extraction.preview_chars, 100);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(AppConfig::from_file("/nonexistent/tripdesk.toml").is_err());
    }
}
