//! Assayer Locator
//!
//! Decides which pages of a technical report are worth sending to the
//! extraction model.
//!
//! # Overview
//!
//! A report is several hundred pages long; each extraction category only
//! needs a few dozen of them. The locator works in two steps:
//!
//! 1. [`PageClassifier`] scans every page once and tags it against table
//!    citations (`TABLE 14-1`) and keyword groups (`MINERAL RESERVE`,
//!    `CAPEX`, ...), producing a [`CategoryTagMap`].
//! 2. [`PageSelector`] unions the relevant tag sets per
//!    [`ExtractionCategory`](assayer_domain::ExtractionCategory), falls back
//!    to a fixed page range when nothing matched, and truncates to a
//!    page budget.
//!
//! ```text
//! PageIndex → PageClassifier → CategoryTagMap → PageSelector → page list
//! ```
//!
//! # Example Usage
//!
//! ```
//! use assayer_domain::{ExtractionCategory, PageIndex};
//! use assayer_locator::{PageCategory, PageClassifier, PageSelector};
//!
//! let pages = PageIndex::from_texts([
//!     "Title page",
//!     "TABLE 14-1 Mineral Resource Estimate",
//! ]);
//!
//! let tags = PageClassifier::default().classify(&pages);
//! assert!(tags.pages(PageCategory::ResourceTables).contains(&1));
//!
//! let selected = PageSelector::default().select(&tags, pages.len(), ExtractionCategory::Resources, 30);
//! assert_eq!(selected, vec![1]);
//! ```

#![warn(missing_docs)]

mod category;
mod classifier;
mod config;
mod selector;

pub use category::{CategoryTagMap, PageCategory};
pub use classifier::PageClassifier;
pub use config::{ClassifierConfig, KeywordGroup, PageRange, SelectorConfig, TableRule};
pub use selector::PageSelector;
