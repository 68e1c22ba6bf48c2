//! Assayer CLI library.
//!
//! Batch extraction of NI 43-101 technical reports: document loading,
//! provider selection, the batch pipeline, configuration and output
//! formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod loader;
pub mod oracle;
pub mod output;
pub mod pipeline;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use loader::{load_document, FileLoader, LoaderError};
pub use oracle::ConfiguredOracle;
pub use output::Formatter;
pub use pipeline::{build_extractor, run_batch, BatchOptions, BatchSummary};
