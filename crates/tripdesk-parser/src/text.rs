//! Plain-text parser with legacy Korean encoding fallback
//!
//! Quotation text files are usually UTF-8, but chat-log exports from
//! older Windows tools arrive in cp949. `encoding_rs::EUC_KR` is the
//! windows-949 superset, so it covers both.

use std::path::Path;

use crate::{ParserError, Result};

/// Read a text file as UTF-8, retrying with cp949 on decode failure
pub fn parse(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| ParserError::IoError {
        path: path.display().to_string(),
        source: e,
    })?;

    match String::from_utf8(bytes) {
        Ok(content) => Ok(content),
        Err(err) => {
            let bytes = err.into_bytes();
            let (decoded, _, had_errors) = encoding_rs::EUC_KR.decode(&bytes);
            if had_errors {
                Err(ParserError::EncodingError(format!(
                    "{} is neither valid UTF-8 nor cp949",
                    path.display()
                )))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}
