//! Error types for the Extractor

use thiserror::Error;

/// Reasons a single category extraction can fail
///
/// These never abort a document: the coordinator records the reason and
/// substitutes an empty record.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Oracle call failed
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// Oracle call exceeded the configured timeout
    #[error("Extraction timeout after {0}s")]
    Timeout(u64),

    /// Output was JSON but not the expected shape
    #[error("Invalid output format: {0}")]
    InvalidFormat(String),

    /// Output was not JSON
    #[error("JSON parse error: {0}")]
    JsonParse(String),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}
