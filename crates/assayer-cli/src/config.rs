//! Configuration management for the CLI.
//!
//! One TOML file holds every layer's settings: the model provider, the
//! extractor, the validation rules, the page locator and the batch defaults.
//! Missing sections fall back to their defaults.

use crate::error::{CliError, Result};
use assayer_extractor::ExtractorConfig;
use assayer_gatekeeper::ValidationConfig;
use assayer_locator::{ClassifierConfig, SelectorConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Model provider
    #[serde(default)]
    pub llm: LlmSettings,

    /// Batch defaults
    #[serde(default)]
    pub batch: BatchSettings,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Extraction coordinator
    #[serde(default)]
    pub extractor: ExtractorConfig,

    /// Validation rules
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Page selection
    #[serde(default)]
    pub selector: SelectorConfig,

    /// Page classification patterns
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Model provider kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    /// OpenAI-compatible chat completions API
    OpenAi,
    /// Local Ollama instance
    Ollama,
}

/// Model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Which provider to call
    #[serde(default = "default_provider")]
    pub provider: Provider,

    /// Model name; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// API endpoint; provider default when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP timeout per request (seconds); provider default when absent.
    /// Must be below `extraction_timeout_secs`, which also caps retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Batch defaults, overridable on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Directory scanned for reports
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory receiving the JSON reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Output file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// File extensions picked up (lowercase, without dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Documents processed concurrently
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".assayer").join("config.toml"))
    }

    /// Resolve an explicit path or the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(p.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist; the default path falls back to the
    /// built-in defaults when absent.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;

        if resolved.exists() {
            let contents = fs::read_to_string(&resolved)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else if path.is_some() {
            Err(CliError::Config(format!(
                "Config file not found: {}",
                resolved.display()
            )))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        let sections = [
            ("extractor", self.extractor.validate()),
            ("validation", self.validation.validate()),
            ("selector", self.selector.validate()),
            ("classifier", self.classifier.validate()),
        ];
        for (name, outcome) in sections {
            outcome.map_err(|e| CliError::Config(format!("[{}] {}", name, e)))?;
        }

        if self.batch.jobs == 0 {
            return Err(CliError::Config("[batch] jobs must be greater than 0".into()));
        }
        if self.batch.extensions.is_empty() {
            return Err(CliError::Config("[batch] extensions must not be empty".into()));
        }
        if self.llm.max_retries == 0 {
            return Err(CliError::Config("[llm] max_retries must be greater than 0".into()));
        }
        if let Some(timeout) = self.llm.timeout_secs {
            if timeout >= self.extractor.extraction_timeout_secs {
                return Err(CliError::Config(format!(
                    "[llm] timeout_secs ({}) must be less than [extractor] extraction_timeout_secs ({})",
                    timeout, self.extractor.extraction_timeout_secs
                )));
            }
        }
        Ok(())
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: None,
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: None,
            max_retries: default_max_retries(),
        }
    }
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            extensions: default_extensions(),
            jobs: default_jobs(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_provider() -> Provider {
    Provider::OpenAi
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

fn default_file_prefix() -> String {
    "mining_report_".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["pdf".to_string(), "txt".to_string()]
}

fn default_jobs() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
