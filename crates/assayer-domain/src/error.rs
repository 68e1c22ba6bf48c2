//! Domain error types

use thiserror::Error;

/// Errors raised while constructing domain values
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Page records must be numbered 0..n in order
    #[error("Page out of order: expected index {expected}, found {found}")]
    PageOutOfOrder {
        /// Position in the sequence
        expected: usize,
        /// Index carried by the page
        found: usize,
    },

    /// Unknown extraction category name
    #[error("Unknown extraction category: {0}")]
    UnknownCategory(String),
}
