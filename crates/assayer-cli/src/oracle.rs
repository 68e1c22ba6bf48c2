//! Oracle selection from configuration.

use crate::config::{LlmSettings, Provider};
use crate::error::{CliError, Result};
use assayer_domain::traits::ExtractionOracle;
use assayer_llm::{ollama, openai, LlmError, OllamaOracle, OpenAiOracle};
use std::time::Duration;
use tracing::info;

/// The provider chosen in `[llm]`
pub enum ConfiguredOracle {
    /// OpenAI-compatible API
    OpenAi(OpenAiOracle),
    /// Local Ollama
    Ollama(OllamaOracle),
}

impl ConfiguredOracle {
    /// Build the provider described by `settings`
    ///
    /// `budget` bounds one call including retries; pass the extraction
    /// timeout so a provider never outlives the category waiting on it.
    /// Must be called outside an async context: the HTTP client is blocking.
    pub fn from_settings(settings: &LlmSettings, budget: Duration) -> Result<Self> {
        let oracle = match settings.provider {
            Provider::OpenAi => {
                let api_key = std::env::var(&settings.api_key_env).map_err(|_| {
                    CliError::Config(format!(
                        "Environment variable {} is not set",
                        settings.api_key_env
                    ))
                })?;
                let oracle = OpenAiOracle::with_endpoint(
                    settings
                        .endpoint
                        .as_deref()
                        .unwrap_or(openai::DEFAULT_ENDPOINT),
                    api_key,
                    settings.model.as_deref().unwrap_or(openai::DEFAULT_MODEL),
                    settings.timeout_secs.unwrap_or(openai::DEFAULT_TIMEOUT_SECS),
                )?
                .with_max_retries(settings.max_retries)
                .with_deadline(budget);
                Self::OpenAi(oracle)
            }
            Provider::Ollama => {
                let oracle = OllamaOracle::with_timeout(
                    settings
                        .endpoint
                        .as_deref()
                        .unwrap_or(ollama::DEFAULT_ENDPOINT),
                    settings.model.as_deref().unwrap_or(ollama::DEFAULT_MODEL),
                    settings.timeout_secs.unwrap_or(ollama::DEFAULT_TIMEOUT_SECS),
                )?
                .with_max_retries(settings.max_retries)
                .with_deadline(budget);
                Self::Ollama(oracle)
            }
        };

        info!("Using {} model {}", oracle.provider_name(), oracle.model());
        Ok(oracle)
    }

    /// Provider label for logs
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::OpenAi(_) => "OpenAI",
            Self::Ollama(_) => "Ollama",
        }
    }

    /// Model name
    pub fn model(&self) -> &str {
        match self {
            Self::OpenAi(o) => o.model(),
            Self::Ollama(o) => o.model(),
        }
    }
}

impl ExtractionOracle for ConfiguredOracle {
    type Error = LlmError;

    fn extract(&self, instructions: &str, content: &str) -> std::result::Result<String, Self::Error> {
        match self {
            Self::OpenAi(o) => o.extract(instructions, content),
            Self::Ollama(o) => o.extract(instructions, content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_from_settings() {
        let settings = LlmSettings {
            provider: Provider::Ollama,
            model: Some("qwen2.5".to_string()),
            ..LlmSettings::default()
        };

        let oracle = ConfiguredOracle::from_settings(&settings, Duration::from_secs(120)).unwrap();
        assert_eq!(oracle.provider_name(), "Ollama");
        assert_eq!(oracle.model(), "qwen2.5");
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let settings = LlmSettings {
            provider: Provider::OpenAi,
            api_key_env: "ASSAYER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..LlmSettings::default()
        };

        let result = ConfiguredOracle::from_settings(&settings, Duration::from_secs(120));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
