//! Assayer Extractor
//!
//! Turns the pages of one technical report into a validated
//! [`MiningReport`](assayer_domain::MiningReport).
//!
//! # Overview
//!
//! Each document goes through four independent extraction passes
//! (metadata, resources, reserves, economics). For every pass the extractor
//! selects the relevant pages, sends them to the extraction model together
//! with the pass's fixed JSON schema, and coerces the answer into a typed
//! record. A pass that fails yields its empty record; the other three are
//! unaffected.
//!
//! # Architecture
//!
//! ```text
//!                         ┌─ metadata  ─┐
//! PageIndex → Classifier ─┼─ resources ─┼→ Gatekeeper → MiningReport
//!                         ├─ reserves  ─┤
//!                         └─ economics ─┘
//! ```
//!
//! # Key Features
//!
//! - **Concurrent passes**: the four oracle calls run together on the
//!   blocking pool, each bounded by a timeout
//! - **Failure isolation**: oracle errors, timeouts and unparsable output
//!   only empty the affected category
//! - **Per-item coercion**: malformed table rows are skipped and counted
//! - **Tolerant parsing**: fenced JSON and numbers written as strings
//!
//! # Example Usage
//!
//! ```no_run
//! use assayer_domain::PageIndex;
//! use assayer_extractor::{Extractor, ExtractorConfig};
//! use assayer_gatekeeper::Gatekeeper;
//! use assayer_llm::MockOracle;
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let oracle = Arc::new(MockOracle::new("{}"));
//! let extractor = Extractor::new(oracle, Gatekeeper::default_config(), ExtractorConfig::default());
//!
//! let pages = PageIndex::from_texts(["Title page", "TABLE 14-1 Mineral Resource Estimate"]);
//! let result = extractor.extract("report_001", &pages).await;
//!
//! println!("Status: {}", result.report.validation.status);
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;

#[cfg(test)]
mod tests;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::{parse_record, Coercer, FromModelOutput};
pub use prompt::{instructions_for, PromptBuilder};
pub use types::{CategoryOutcome, CategoryReport, ExtractionMetadata, ExtractionResult};
