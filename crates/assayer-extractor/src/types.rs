//! Outcome types for one document extraction

use crate::error::ExtractorError;
use assayer_domain::{ExtractionCategory, MiningReport};
use serde::Serialize;

/// Result of one category pass
///
/// `record` is always usable: on failure it is the empty record and
/// `failure` holds the reason.
#[derive(Debug)]
pub struct CategoryOutcome<T> {
    /// Which pass produced this
    pub category: ExtractionCategory,

    /// The coerced record (empty on failure)
    pub record: T,

    /// Page indices sent to the oracle
    pub pages: Vec<usize>,

    /// List items dropped during coercion
    pub skipped_items: usize,

    /// Why the pass produced nothing, if it failed
    pub failure: Option<ExtractorError>,

    /// Wall time of the pass in milliseconds
    pub elapsed_ms: u64,
}

impl<T> CategoryOutcome<T> {
    /// Whether the pass succeeded
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Summarize without the record
    pub fn report(&self) -> CategoryReport {
        CategoryReport {
            category: self.category,
            pages_selected: self.pages.len(),
            skipped_items: self.skipped_items,
            failure: self.failure.as_ref().map(|e| e.to_string()),
            elapsed_ms: self.elapsed_ms,
        }
    }
}

/// Per-category summary kept alongside the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryReport {
    /// Which pass
    pub category: ExtractionCategory,

    /// Number of pages sent
    pub pages_selected: usize,

    /// List items dropped during coercion
    pub skipped_items: usize,

    /// Failure reason, if the pass failed
    pub failure: Option<String>,

    /// Wall time of the pass in milliseconds
    pub elapsed_ms: u64,
}

/// Result of extracting one document
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// The consolidated, validated report
    pub report: MiningReport,

    /// One entry per category, in [`ExtractionCategory::ALL`] order
    pub categories: Vec<CategoryReport>,

    /// Metadata about the extraction
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Categories whose pass failed
    pub fn failed_categories(&self) -> Vec<ExtractionCategory> {
        self.categories
            .iter()
            .filter(|c| c.failure.is_some())
            .map(|c| c.category)
            .collect()
    }

    /// Total items skipped across categories
    pub fn skipped_items(&self) -> usize {
        self.categories.iter().map(|c| c.skipped_items).sum()
    }
}

/// Metadata about an extraction operation
#[derive(Debug, Clone)]
pub struct ExtractionMetadata {
    /// Source identifier
    pub source_id: String,

    /// Pages in the document
    pub total_pages: usize,

    /// Pages tagged by the classifier (sum over categories)
    pub total_tags: usize,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Unix timestamp (seconds) when extraction finished
    pub timestamp: u64,
}
