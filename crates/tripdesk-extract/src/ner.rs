//! NER inference adapter
//!
//! Wraps the fine-tuned KoELECTRA token-classification export (ONNX)
//! and its sub-word tokenizer. The model is an opaque collaborator:
//! token ids in, per-position label logits out. This module owns the
//! id→label decoding and the special-token filtering; everything else
//! about the artifacts belongs to the training toolchain.
//!
//! `ort` inference takes `&mut Session`, so the session sits behind a
//! mutex and concurrent extractions serialize on it.

use std::sync::Mutex;

use ort::{
    inputs,
    session::{builder::GraphOptimizationLevel, Session},
    value::Value,
};
use thiserror::Error;
use tokenizers::Tokenizer;

use tripdesk_core::{BioLabel, ModelConfig};

use crate::TaggedToken;

// ============================================================================
// Error Types
// ============================================================================

/// Errors from the inference adapter
#[derive(Error, Debug)]
pub enum NerError {
    /// Model or tokenizer artifact is missing at the configured path.
    /// Callers degrade to a text-preview warning, never crash.
    #[error("NER artifacts not found under {0}")]
    ModelUnavailable(String),

    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    #[error("Inference error: {0}")]
    Inference(String),
}

pub type Result<T> = std::result::Result<T, NerError>;

// ============================================================================
// Model
// ============================================================================

/// Loaded token-classification model and tokenizer.
///
/// Construct once and reuse for the process lifetime; loading is the
/// expensive part and inference is read-only apart from the session
/// lock.
pub struct NerModel {
    session: Mutex<Session>,
    tokenizer: Tokenizer,
    max_seq_len: usize,
}

impl NerModel {
    /// Load the tokenizer and ONNX session described by `config`.
    ///
    /// Returns [`NerError::ModelUnavailable`] when either artifact is
    /// absent so the caller can degrade gracefully.
    pub fn load(config: &ModelConfig) -> Result<Self> {
        let tokenizer_path = config.tokenizer_path();
        let model_path = config.model_path();

        if !tokenizer_path.exists() || !model_path.exists() {
            return Err(NerError::ModelUnavailable(
                config.model_dir.display().to_string(),
            ));
        }

        let _ = ort::init();

        let session = Session::builder()
            .map_err(|e| NerError::Inference(e.to_string()))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| NerError::Inference(e.to_string()))?
            .with_intra_threads(4)
            .map_err(|e| NerError::Inference(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e| NerError::Inference(e.to_string()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| NerError::Tokenizer(e.to_string()))?;

        tracing::info!(
            model = %model_path.display(),
            tokenizer = %tokenizer_path.display(),
            "NER model loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
            max_seq_len: config.max_seq_len,
        })
    }

    /// Run token classification over `text`.
    ///
    /// The encoding is truncated to the configured maximum length; text
    /// beyond it is silently dropped, not chunked. Structural tokens
    /// ([CLS], [SEP], padding) are excluded from the returned sequence.
    pub fn infer(&self, text: &str) -> Result<Vec<TaggedToken>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| NerError::Tokenizer(e.to_string()))?;

        let seq_len = encoding.get_ids().len().min(self.max_seq_len);
        if seq_len == 0 {
            return Ok(Vec::new());
        }

        let input_ids: Vec<i64> = encoding.get_ids()[..seq_len]
            .iter()
            .map(|&id| id as i64)
            .collect();
        let attention_mask: Vec<i64> = encoding.get_attention_mask()[..seq_len]
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding.get_type_ids()[..seq_len]
            .iter()
            .map(|&t| t as i64)
            .collect();

        let input_ids_tensor = Value::from_array(([1_usize, seq_len], input_ids.into_boxed_slice()))
            .map_err(|e| NerError::Inference(e.to_string()))?;
        let attention_mask_tensor =
            Value::from_array(([1_usize, seq_len], attention_mask.into_boxed_slice()))
                .map_err(|e| NerError::Inference(e.to_string()))?;
        let token_type_ids_tensor =
            Value::from_array(([1_usize, seq_len], token_type_ids.into_boxed_slice()))
                .map_err(|e| NerError::Inference(e.to_string()))?;

        let label_ids = {
            let mut session = self
                .session
                .lock()
                .map_err(|_| NerError::Inference("session lock poisoned".to_string()))?;

            let outputs = session
                .run(inputs![
                    "input_ids" => input_ids_tensor,
                    "attention_mask" => attention_mask_tensor,
                    "token_type_ids" => token_type_ids_tensor,
                ])
                .map_err(|e| NerError::Inference(e.to_string()))?;

            let (shape, logits) = outputs[0]
                .try_extract_tensor::<f32>()
                .map_err(|e| NerError::Inference(e.to_string()))?;

            decode_argmax(&shape_dims(shape), logits)
        };

        let tokens = encoding.get_tokens();
        let special = encoding.get_special_tokens_mask();

        let tagged = label_ids
            .into_iter()
            .enumerate()
            .take(seq_len)
            .filter(|(i, _)| special.get(*i) != Some(&1))
            .map(|(i, id)| {
                // Ids outside the label table decode to O
                let label = BioLabel::from_id(id).unwrap_or(BioLabel::Outside);
                TaggedToken::new(tokens[i].clone(), label)
            })
            .collect();

        Ok(tagged)
    }
}

/// Collect `[batch, seq, labels]` dims as usize
fn shape_dims(shape: &[i64]) -> Vec<usize> {
    shape.iter().map(|&d| d as usize).collect()
}

/// Per-position argmax over the label axis of `[1, seq, labels]` logits
fn decode_argmax(shape: &[usize], logits: &[f32]) -> Vec<usize> {
    let (seq_len, num_labels) = match shape {
        [_, seq, labels] => (*seq, *labels),
        _ => return Vec::new(),
    };

    (0..seq_len)
        .map(|pos| {
            let row = &logits[pos * num_labels..(pos + 1) * num_labels];
            row.iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(idx, _)| idx)
                .unwrap_or(0)
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
