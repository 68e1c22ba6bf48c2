//! Validate command implementation.

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::{read_report, write_report};
use assayer_domain::{MiningReport, ValidationReport};
use assayer_gatekeeper::Gatekeeper;
use std::path::Path;
use tracing::info;

/// Recompute the validation of a stored report.
///
/// With `write`, the stored `validation` is replaced and the file rewritten.
pub fn revalidate(path: &Path, gatekeeper: &Gatekeeper, write: bool) -> Result<ValidationReport> {
    let mut report: MiningReport = read_report(path)?;
    let validation = gatekeeper.validate_report(&report);

    if write {
        if report.validation != validation {
            info!("Updating validation in {}", path.display());
        }
        report.validation = validation.clone();
        write_report(path, &report)?;
    }

    Ok(validation)
}

/// Execute the validate command.
pub fn execute_validate(args: ValidateArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let gatekeeper = Gatekeeper::new(config.validation.clone());
    let validation = revalidate(&args.report, &gatekeeper, args.write)?;

    println!("{}", formatter.format_validation(&validation)?);
    if args.write {
        println!(
            "{}",
            formatter.success(&format!("Validation written to {}", args.report.display()))
        );
    }

    Ok(())
}
