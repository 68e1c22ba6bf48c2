//! Assayer Domain Layer
//!
//! Core value types and trait interfaces shared by every Assayer crate.
//!
//! ## Key Concepts
//!
//! - **Page / PageIndex**: The ordered, immutable text of one report document
//! - **ExtractionCategory**: The four independent extraction passes
//!   (metadata, resources, reserves, economics)
//! - **Records**: Typed results of each pass; absent values stay `None`
//! - **ValidationReport**: Cross-category findings plus derived summaries
//! - **MiningReport**: The consolidated, persisted output for one document
//!
//! ## Architecture
//!
//! - No I/O and no network access
//! - Infrastructure (PDF loading, model providers) implements the traits in
//!   [`traits`] from other crates

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod error;
pub mod lenient;
pub mod normalize;
pub mod page;
pub mod records;
pub mod report;
pub mod traits;

// Re-exports for convenience
pub use category::ExtractionCategory;
pub use error::DomainError;
pub use page::{Page, PageIndex};
pub use records::{
    Economics, MineralReserves, MineralResources, ProjectMetadata, ReserveItem, ResourceItem,
};
pub use report::{
    EconomicsSummary, MetadataSummary, MiningReport, ReportSummary, ReservesSummary,
    ResourcesSummary, ValidationReport, ValidationStatus,
};
