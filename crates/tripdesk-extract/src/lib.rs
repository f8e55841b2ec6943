//! Tripdesk Extract - Document-to-form extraction pipeline
//!
//! Drives the full quotation understanding flow:
//! parse → NER inference → BIO tag aggregation → form mapping.
//!
//! The [`pipeline::Extractor`] is the public entry point; it always
//! returns a well-formed [`tripdesk_core::ExtractionResult`], converting
//! every failure mode into a status value instead of an error.

pub mod bio;
pub mod mapper;
pub mod ner;
pub mod pipeline;

pub use ner::{NerError, NerModel};
pub use pipeline::Extractor;

use tripdesk_core::BioLabel;

/// Sub-word continuation marker emitted by the WordPiece tokenizer
pub const SUBWORD_PREFIX: &str = "##";

/// One tokenizer output position with its predicted label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedToken {
    /// Raw surface form as emitted by the tokenizer (may carry the
    /// `##` continuation marker)
    pub text: String,

    /// Predicted BIO label for this position
    pub label: BioLabel,
}

impl TaggedToken {
    pub fn new(text: impl Into<String>, label: BioLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }

    /// Whether this token continues the previous word
    pub fn is_continuation(&self) -> bool {
        self.text.starts_with(SUBWORD_PREFIX)
    }

    /// Surface form with the continuation marker stripped
    pub fn surface(&self) -> &str {
        self.text.strip_prefix(SUBWORD_PREFIX).unwrap_or(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_strips_continuation_marker() {
        let token = TaggedToken::new("##호텔", BioLabel::Outside);
        assert!(token.is_continuation());
        assert_eq!(token.surface(), "호텔");

        let token = TaggedToken::new("롯데", BioLabel::Outside);
        assert!(!token.is_continuation());
        assert_eq!(token.surface(), "롯데");
    }
}
