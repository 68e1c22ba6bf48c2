//! Run command implementation.

use crate::cli::RunArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::loader::FileLoader;
use crate::oracle::ConfiguredOracle;
use crate::output::Formatter;
use crate::pipeline::{build_extractor, run_batch, BatchOptions, BatchSummary};
use std::sync::Arc;

/// Execute the run command.
///
/// Synchronous on purpose: the provider's blocking HTTP client is created
/// and dropped outside the runtime.
pub fn execute_run(args: RunArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let options = BatchOptions::from_settings(&config.batch).with_overrides(
        args.input,
        args.output,
        args.jobs,
    );
    if options.jobs == 0 {
        return Err(CliError::InvalidInput(
            "jobs must be greater than 0".to_string(),
        ));
    }

    let oracle = Arc::new(ConfiguredOracle::from_settings(
        &config.llm,
        config.extractor.extraction_timeout(),
    )?);

    let summary = {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;
        let extractor = Arc::new(build_extractor(Arc::clone(&oracle), config));
        runtime.block_on(run_batch(extractor, Arc::new(FileLoader), &options))?
    };

    print_summary(&summary, formatter)?;
    Ok(())
}

fn print_summary(summary: &BatchSummary, formatter: &Formatter) -> Result<()> {
    if formatter.format() == OutputFormat::Table {
        for document in &summary.documents {
            println!("{}\n", formatter.format_document(document)?);
        }
    }
    println!("{}", formatter.format_batch(summary)?);
    Ok(())
}
