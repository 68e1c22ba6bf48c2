//! OpenAI-compatible chat completions provider
//!
//! Sends the category instructions as the system message and the rendered
//! pages as the user message, with temperature 0 and JSON-object response
//! format. Works with any endpoint that speaks the `/chat/completions`
//! protocol.
//!
//! # Examples
//!
//! ```no_run
//! use assayer_llm::OpenAiOracle;
//!
//! let oracle = OpenAiOracle::new("sk-...", "gpt-4o").unwrap();
//! ```

use crate::{attempt_timeout, backoff, retry_fits, LlmError};
use assayer_domain::traits::ExtractionOracle;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default timeout for a single HTTP request
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default number of attempts per call
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Chat-completions oracle
pub struct OpenAiOracle {
    endpoint: String,
    model: String,
    api_key: String,
    client: Client,
    request_timeout: Duration,
    deadline: Option<Duration>,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    content: Option<String>,
}

impl OpenAiOracle {
    /// Create a provider against the default endpoint
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a provider against a custom endpoint
    pub fn with_endpoint(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }

        let request_timeout = Duration::from_secs(timeout_secs);
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
            client,
            request_timeout,
            deadline: None,
            max_retries: DEFAULT_MAX_RETRIES,
        })
    }

    /// Set the maximum number of attempts
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

    fn complete(&self, instructions: &str, content: &str) -> Result<String, LlmError> {
        let url = format!("{}/chat/completions", self.endpoint);
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage { role: "system", content: instructions },
                ChatMessage { role: "user", content },
            ],
            temperature: 0.0,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let started = Instant::now();
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_retries {
            match self
                .client
                .post(&url)
                .bearer_auth(&self.api_key)
                .timeout(attempt_timeout(started, self.request_timeout, self.deadline))
                .json(&body)
                .send()
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatResponse = response.json().map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return parsed
                            .choices
                            .into_iter()
                            .next()
                            .and_then(|c| c.message.content)
                            .ok_or_else(|| {
                                LlmError::InvalidResponse("Response has no content".to_string())
                            });
                    }
                    match status {
                        StatusCode::NOT_FOUND => {
                            return Err(LlmError::ModelNotAvailable(self.model.clone()));
                        }
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            return Err(LlmError::Config(format!("HTTP {}: check API key", status)));
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            last_error = Some(LlmError::RateLimitExceeded);
                        }
                        _ => {
                            let error_text = response
                                .text()
                                .unwrap_or_else(|_| "Unknown error".to_string());
                            last_error = Some(LlmError::Communication(format!(
                                "HTTP {}: {}",
                                status, error_text
                            )));
                        }
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
                        "Chat completion attempt {}/{} failed, no time left to retry",
                        attempts, self.max_retries
                    );
                    break;
                }
                warn!(
                    "Chat completion attempt {}/{} failed, retrying in {:?}",
                    attempts, self.max_retries, delay
                );
                std::thread::sleep(delay);
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
    }
}

impl ExtractionOracle for OpenAiOracle {
    type Error = LlmError;

    fn extract(&self, instructions: &str, content: &str) -> Result<String, Self::Error> {
        debug!(
            "Calling {} with {} chars of content",
            self.model,
            content.len()
        );
        self.complete(instructions, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_oracle_creation() {
        let oracle = OpenAiOracle::new("sk-test", "gpt-4o").unwrap();
        assert_eq!(oracle.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(oracle.model(), "gpt-4o");
        assert_eq!(oracle.max_retries, DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_openai_oracle_rejects_empty_key() {
        let result = OpenAiOracle::new("  ", "gpt-4o");
        assert!(matches!(result, Err(LlmError::Config(_))));
    }

    #[test]
    fn test_openai_oracle_trims_endpoint() {
        let oracle =
            OpenAiOracle::with_endpoint("http://localhost:8000/v1/", "key", "local", 5).unwrap();
        assert_eq!(oracle.endpoint, "http://localhost:8000/v1");
    }

    #[test]
    fn test_max_retries_at_least_one() {
        let oracle = OpenAiOracle::new("sk-test", "gpt-4o").unwrap().with_max_retries(0);
        assert_eq!(oracle.max_retries, 1);
    }

    #[test]
    fn test_request_shape() {
        let body = ChatRequest {
            model: "gpt-4o",
            messages: [
                ChatMessage { role: "system", content: "rules" },
                ChatMessage { role: "user", content: "pages" },
            ],
            temperature: 0.0,
            response_format: ResponseFormat { kind: "json_object" },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "pages");
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["temperature"], 0.0);
    }

    #[test]
    fn test_deadline_stops_retries() {
        let oracle = OpenAiOracle::with_endpoint("http://127.0.0.1:9", "key", "m", 2)
            .unwrap()
            .with_max_retries(5)
            .with_deadline(Duration::from_millis(500));
        assert_eq!(oracle.deadline, Some(Duration::from_millis(500)));

        let started = Instant::now();
        let result = oracle.extract("rules", "pages");
        assert!(matches!(result, Err(LlmError::Communication(_))));
        // Five attempts with backoff would sleep 15s
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_connection_error() {
        let oracle = OpenAiOracle::with_endpoint("http://127.0.0.1:9", "key", "m", 2)
            .unwrap()
            .with_max_retries(1);
        let result = oracle.extract("rules", "pages");
        assert!(matches!(result, Err(LlmError::Communication(_))));
    }
}
