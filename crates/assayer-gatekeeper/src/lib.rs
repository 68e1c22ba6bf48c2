//! Assayer Gatekeeper
//!
//! Cross-checks the four extraction records of one report and derives its
//! validation status.
//!
//! The Gatekeeper provides:
//! - Per-category summaries (totals, distinct categories, display strings)
//! - Consistency checks (reserves never exceed resources)
//! - Anomaly flags (low-tonnage rows, missing qualified persons)
//! - Exploration-stage handling of empty resource and reserve tables
//!
//! Findings never abort anything: they become `errors` or `warnings`, and the
//! status is ERROR if any error exists, else WARNING if any warning, else OK.
//!
//! # Examples
//!
//! ```
//! use assayer_domain::{Economics, MineralReserves, MineralResources, ProjectMetadata, ValidationStatus};
//! use assayer_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let report = gatekeeper.validate(
//!     &ProjectMetadata::default(),
//!     &MineralResources::default(),
//!     &MineralReserves::default(),
//!     &Economics::default(),
//! );
//!
//! // No resources on a project that is not exploration-stage
//! assert_eq!(report.status, ValidationStatus::Error);
//! ```

#![warn(missing_docs)]

mod config;
mod validator;

pub use config::ValidationConfig;
pub use validator::Gatekeeper;
