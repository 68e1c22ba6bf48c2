//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Assayer CLI - Extract structured mining data from NI 43-101 technical reports.
#[derive(Debug, Parser)]
#[command(name = "assayer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "ASSAYER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (paths and statuses only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract every report in a directory into JSON files
    Run(RunArgs),

    /// Show which pages of a report each extraction would read
    Scan(ScanArgs),

    /// Re-run validation over a stored JSON report
    Validate(ValidateArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Directory containing the reports (.pdf / .txt)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory receiving the JSON reports
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Documents processed concurrently
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Report file (.pdf or .txt)
    pub file: PathBuf,
}

/// Arguments for the validate command.
#[derive(Debug, Parser)]
pub struct ValidateArgs {
    /// Stored JSON report
    pub report: PathBuf,

    /// Replace the stored validation with the recomputed one
    #[arg(long)]
    pub write: bool,
}

/// Arguments for config management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_command() {
        let cli = Cli::parse_from(["assayer", "run", "--input", "data", "-j", "4"]);
        match cli.command {
            Command::Run(args) => {
                assert_eq!(args.input, Some(PathBuf::from("data")));
                assert_eq!(args.jobs, Some(4));
                assert!(args.output.is_none());
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["assayer", "scan", "report.pdf", "--format", "json", "-vv"]);
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Command::Scan(_)));
    }

    #[test]
    fn test_config_init_command() {
        let cli = Cli::parse_from(["assayer", "config", "init", "--force"]);
        match cli.command {
            Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            }) => assert!(force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_validate_requires_report() {
        assert!(Cli::try_parse_from(["assayer", "validate"]).is_err());
    }
}
