//! Extraction orchestrator
//!
//! The public entry point of the pipeline. Drives
//! parse → inference → aggregation → mapping and always returns a
//! well-formed [`ExtractionResult`]:
//!
//! - empty or unsupported input → `error`
//! - model unavailable or inference failure → `warning` with a short
//!   text preview the operator can fill in manually
//! - otherwise → `success` with the populated form and the raw tag map
//!
//! There are no retries; a failed call is terminal and the caller
//! resubmits with a new file.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tripdesk_core::{AppConfig, ExtractionResult};
use tripdesk_parser::{parse_file, UNSUPPORTED_FORMAT_MESSAGE};

use crate::{bio, mapper, NerError, NerModel};

/// Error message for files that produced no text
const EMPTY_EXTRACTION_MESSAGE: &str = "텍스트 추출에 실패했습니다.";

/// Warning message when the model cannot run
const MODEL_UNAVAILABLE_MESSAGE: &str =
    "NER 모델을 사용할 수 없습니다. 추출된 텍스트를 확인 후 직접 입력해 주세요.";

/// Error message when a call exceeds the configured deadline
const TIMEOUT_MESSAGE: &str = "처리 시간이 초과되었습니다.";

/// Document extraction service.
///
/// Construct once per process and share; the contained model is loaded
/// at construction time, not lazily, so the hosting process owns its
/// lifecycle.
pub struct Extractor {
    config: AppConfig,
    ner: Option<NerModel>,
}

impl Extractor {
    /// Build an extractor, loading model artifacts from the configured
    /// directory. Missing artifacts degrade to a model-less extractor
    /// that returns warning results.
    pub fn new(config: AppConfig) -> Self {
        let ner = match NerModel::load(&config.model) {
            Ok(model) => Some(model),
            Err(NerError::ModelUnavailable(dir)) => {
                tracing::warn!(model_dir = %dir, "NER artifacts missing; running without model");
                None
            }
            Err(err) => {
                tracing::error!(error = %err, "NER model failed to load; running without model");
                None
            }
        };

        Self { config, ner }
    }

    /// Whether a usable model was loaded
    pub fn has_model(&self) -> bool {
        self.ner.is_some()
    }

    /// Extract a structured form from the file at `path`.
    ///
    /// Never fails: every failure mode is folded into the result's
    /// status field.
    pub fn extract(&self, path: &Path) -> ExtractionResult {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let text = parse_file(path);

        if text == UNSUPPORTED_FORMAT_MESSAGE {
            return ExtractionResult::error(file_name, UNSUPPORTED_FORMAT_MESSAGE);
        }
        if text.trim().is_empty() {
            return ExtractionResult::error(file_name, EMPTY_EXTRACTION_MESSAGE);
        }

        let Some(ner) = &self.ner else {
            return ExtractionResult::warning(
                file_name,
                preview(&text, self.config.extraction.preview_chars),
                MODEL_UNAVAILABLE_MESSAGE,
            );
        };

        let tokens = match ner.infer(&text) {
            Ok(tokens) => tokens,
            Err(err) => {
                tracing::error!(file = %file_name, error = %err, "NER inference failed");
                return ExtractionResult::warning(
                    file_name,
                    preview(&text, self.config.extraction.preview_chars),
                    MODEL_UNAVAILABLE_MESSAGE,
                );
            }
        };

        let tag_map = bio::aggregate(&tokens);
        let form = mapper::map_to_form(&tag_map);

        tracing::info!(
            file = %file_name,
            categories = tag_map.len(),
            "extraction complete"
        );

        ExtractionResult::success(file_name, form, tag_map)
    }

    /// Run [`extract`](Self::extract) on a blocking worker with the
    /// configured deadline; expiry yields an error result.
    pub async fn extract_with_timeout(self: &Arc<Self>, path: impl Into<PathBuf>) -> ExtractionResult {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let deadline = Duration::from_secs(self.config.extraction.timeout_secs);
        let extractor = Arc::clone(self);

        let task = tokio::task::spawn_blocking(move || extractor.extract(&path));

        match tokio::time::timeout(deadline, task).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_err)) => {
                tracing::error!(file = %file_name, error = %join_err, "extraction task failed");
                ExtractionResult::error(file_name, EMPTY_EXTRACTION_MESSAGE)
            }
            Err(_) => {
                tracing::warn!(file = %file_name, timeout_secs = deadline.as_secs(), "extraction timed out");
                ExtractionResult::error(file_name, TIMEOUT_MESSAGE)
            }
        }
    }
}

/// First `max_chars` characters of `text`, on a char boundary
fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tripdesk_core::ExtractionStatus;

    /// Extractor with a model dir that holds no artifacts
    fn modelless_extractor() -> Extractor {
        let mut config = AppConfig::default();
        config.model.model_dir = PathBuf::from("/nonexistent/models");
        Extractor::new(config)
    }

    fn write_txt(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn test_missing_artifacts_degrade_to_warning() {
        let extractor = modelless_extractor();
        assert!(!extractor.has_model());

        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(&dir, "quote.txt", &"다낭 골프 패키지 ".repeat(50));

        let result = extractor.extract(&path);
        assert_eq!(result.status, ExtractionStatus::Warning);
        assert!(result.data.is_none());

        let preview = result.raw_text.unwrap();
        assert!(preview.chars().count() <= 200);
    }

    #[test]
    fn test_unsupported_extension_is_an_error() {
        let extractor = modelless_extractor();

        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(&dir, "quote.rtf", "{\\rtf1 hello}");

        let result = extractor.extract(&path);
        assert_eq!(result.status, ExtractionStatus::Error);
        assert_eq!(result.message.as_deref(), Some(UNSUPPORTED_FORMAT_MESSAGE));
        assert!(result.data.is_none());
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let extractor = modelless_extractor();

        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(&dir, "empty.txt", "");

        let result = extractor.extract(&path);
        assert_eq!(result.status, ExtractionStatus::Error);
        assert_eq!(result.message.as_deref(), Some(EMPTY_EXTRACTION_MESSAGE));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let extractor = modelless_extractor();
        let result = extractor.extract(Path::new("/nonexistent/quote.txt"));
        assert_eq!(result.status, ExtractionStatus::Error);
    }

    #[test]
    fn test_result_carries_file_name_only() {
        let extractor = modelless_extractor();

        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(&dir, "견적서.txt", "다낭 3박 4일");

        let result = extractor.extract(&path);
        assert_eq!(result.file_name, "견적서.txt");
    }

    #[tokio::test]
    async fn test_timeout_wrapper_passes_results_through() {
        let extractor = Arc::new(modelless_extractor());

        let dir = tempfile::tempdir().unwrap();
        let path = write_txt(&dir, "quote.txt", "서울 출발 패키지");

        let result = extractor.extract_with_timeout(path).await;
        assert_eq!(result.status, ExtractionStatus::Warning);
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let text = "가나다라마".repeat(100);
        let p = preview(&text, 200);
        assert_eq!(p.chars().count(), 200);
    }
}
