//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::PageIndex;
use std::path::Path;

/// Structured-extraction model
///
/// Implemented by the infrastructure layer (assayer-llm). The model is an
/// untrusted black box: its output may be malformed, partial or wrong.
pub trait ExtractionOracle {
    /// Error type for oracle calls
    type Error;

    /// Run one extraction
    ///
    /// `instructions` carries the category's schema and rules, `content` the
    /// rendered page subset. Returns the raw JSON text the model produced.
    fn extract(&self, instructions: &str, content: &str) -> Result<String, Self::Error>;
}

/// Source of page text for one document
///
/// Implemented by the application layer (assayer-cli)
pub trait DocumentLoader {
    /// Error type for load failures
    type Error;

    /// Load every page of the document, in order, indexed from 0
    fn load(&self, path: &Path) -> Result<PageIndex, Self::Error>;
}
