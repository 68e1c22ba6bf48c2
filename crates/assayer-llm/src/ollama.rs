//! Ollama Provider Implementation
//!
//! Runs extractions against a local Ollama instance, keeping report text on
//! the machine.
//!
//! # Features
//!
//! - Instructions sent as the system prompt, pages as the prompt
//! - JSON format mode and temperature 0
//! - Retry logic with exponential backoff
//!
//! # Examples
//!
//! ```no_run
//! use assayer_llm::OllamaOracle;
//!
//! let oracle = OllamaOracle::new("http://localhost:11434", "llama3.1").unwrap();
//! ```

use crate::{attempt_timeout, backoff, retry_fits, LlmError};
use assayer_domain::traits::ExtractionOracle;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default model
pub const DEFAULT_MODEL: &str = "llama3.1";

/// Default timeout for a single request; local models are slow on long pages
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Default number of retry attempts
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Ollama API provider for local inference
pub struct OllamaOracle {
    endpoint: String,
    model: String,
    client: Client,
    request_timeout: Duration,
    deadline: Option<Duration>,
    max_retries: u32,
}

/// Request body for Ollama generate API
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    system: &'a str,
    prompt: &'a str,
    format: &'static str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaOracle {
    /// Create a new Ollama provider
    ///
    /// # Parameters
    ///
    /// - `endpoint`: Ollama API endpoint (e.g., "http://localhost:11434")
    /// - `model`: Model to use (e.g., "llama3.1", "qwen2.5")
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(endpoint, model, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a new Ollama provider with a request timeout
    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let request_timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
            request_timeout,
            deadline: None,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Create a new Ollama provider on `http://localhost:11434`
    pub fn default_endpoint(model: impl Into<String>) -> Result<Self, LlmError> {
        Self::new(DEFAULT_ENDPOINT, model)
    }

    /// Set the maximum number of retry attempts
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries.max(1);
        self
    }

    /// Bound one call, retries and backoff included, to `deadline`
    ///
    /// Each attempt's timeout is cut to the time left, and no retry starts
    /// once its backoff would run past the deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate(&self, system: &str, prompt: &str) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request_body = OllamaGenerateRequest {
            model: &self.model,
            system,
            prompt,
            format: "json",
            stream: false,
            options: OllamaOptions { temperature: 0.0 },
        };

        let started = Instant::now();
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            let request = self
                .client
                .post(&url)
                .timeout(attempt_timeout(started, self.request_timeout, self.deadline))
                .json(&request_body);
            match request.send() {
                Ok(response) => {
                    if response.status().is_success() {
                        return response
                            .json::<OllamaGenerateResponse>()
                            .map(|r| r.response)
                            .map_err(|e| {
                                LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                            });
                    } else if response.status() == reqwest::StatusCode::NOT_FOUND {
                        return Err(LlmError::ModelNotAvailable(self.model.clone()));
                    } else {
                        let status = response.status();
                        let error_text = response
                            .text()
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            attempts += 1;
            if attempts < self.max_retries {
                let delay = backoff(attempts);
                if !retry_fits(started, delay, self.deadline) {
                    warn!(
                        "Ollama attempt {}/{} failed, no time left to retry",
                        attempts, self.max_retries
                    );
                    break;
                }
                warn!(
                    "Ollama attempt {}/{} failed, retrying in {:?}",
                    attempts, self.max_retries, delay
                );
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl ExtractionOracle for OllamaOracle {
    type Error = LlmError;

    fn extract(&self, instructions: &str, content: &str) -> Result<String, Self::Error> {
        debug!(
            "Calling Ollama model {} with {} chars of content",
            self.model,
            content.len()
        );
        self.generate(instructions, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ollama_oracle_creation() {
        let oracle = OllamaOracle::new("http://localhost:11434", "llama3.1").unwrap();
        assert_eq!(oracle.endpoint, "http://localhost:11434");
        assert_eq!(oracle.model(), "llama3.1");
        assert_eq!(oracle.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_ollama_oracle_default_endpoint() {
        let oracle = OllamaOracle::default_endpoint("qwen2.5").unwrap();
        assert_eq!(oracle.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_ollama_oracle_with_max_retries() {
        let oracle = OllamaOracle::default_endpoint("qwen2.5")
            .unwrap()
            .with_max_retries(5);
        assert_eq!(oracle.max_retries, 5);
    }

    #[test]
    fn test_request_uses_json_format() {
        let body = OllamaGenerateRequest {
            model: "m",
            system: "rules",
            prompt: "pages",
            format: "json",
            stream: false,
            options: OllamaOptions { temperature: 0.0 },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["format"], "json");
        assert_eq!(json["system"], "rules");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_ollama_deadline_caps_request_timeout() {
        let oracle = OllamaOracle::new("http://127.0.0.1:9", "llama3.1")
            .unwrap()
            .with_max_retries(4)
            .with_deadline(Duration::from_millis(300));
        assert_eq!(oracle.request_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let started = Instant::now();
        let result = oracle.extract("rules", "pages");
        assert!(matches!(result, Err(LlmError::Communication(_))));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_ollama_error_handling() {
        let oracle = OllamaOracle::with_timeout("http://127.0.0.1:9", "llama3.1", 2)
            .unwrap()
            .with_max_retries(1);

        let result = oracle.extract("rules", "pages");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }

    #[test]
    #[ignore] // Only run when Ollama is available
    fn test_ollama_extract_integration() {
        let oracle = OllamaOracle::default_endpoint("llama3.1").unwrap();
        let result = oracle.extract("Return {\"ok\": true} as JSON.", "");
        if let Ok(response) = result {
            assert!(!response.is_empty());
        }
    }
}
