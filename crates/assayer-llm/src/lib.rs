//! Assayer LLM Provider Layer
//!
//! Pluggable implementations of the `ExtractionOracle` trait from
//! `assayer-domain`.
//!
//! # Providers
//!
//! - `MockOracle`: Deterministic mock for testing
//! - `OpenAiOracle`: OpenAI-compatible chat completions in JSON mode
//! - `OllamaOracle`: Local Ollama API in JSON format mode
//!
//! All providers are synchronous; callers in async code run them on the
//! blocking pool.
//!
//! # Examples
//!
//! ```
//! use assayer_llm::MockOracle;
//! use assayer_domain::traits::ExtractionOracle;
//!
//! let oracle = MockOracle::new("{}");
//! let result = oracle.extract("instructions", "pages").unwrap();
//! assert_eq!(result, "{}");
//! ```

#![warn(missing_docs)]

pub mod ollama;
pub mod openai;

use assayer_domain::traits::ExtractionOracle;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;

pub use ollama::OllamaOracle;
pub use openai::OpenAiOracle;

/// Errors that can occur during oracle calls
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from the provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Missing credentials or bad settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Exponential backoff delay before retry `attempt` (1-based): 1s, 2s, 4s, ...
pub(crate) fn backoff(attempt: u32) -> Duration {
    Duration::from_secs(2u64.pow(attempt.saturating_sub(1).min(6)))
}

/// Whether waiting `delay` still leaves time for another attempt
pub(crate) fn retry_fits(started: Instant, delay: Duration, deadline: Option<Duration>) -> bool {
    deadline.is_none_or(|d| started.elapsed() + delay < d)
}

/// Timeout for the next attempt: the request timeout, cut to what is left
/// of the deadline
pub(crate) fn attempt_timeout(
    started: Instant,
    request: Duration,
    deadline: Option<Duration>,
) -> Duration {
    match deadline {
        Some(d) => request.min(d.saturating_sub(started.elapsed())),
        None => request,
    }
}

/// Mock oracle for deterministic testing
///
/// Responses are keyed by the exact instruction text, so one mock can serve
/// every extraction category. Unknown instructions get the default response.
///
/// # Examples
///
/// ```
/// use assayer_llm::MockOracle;
/// use assayer_domain::traits::ExtractionOracle;
///
/// let mut oracle = MockOracle::default();
/// oracle.add_response("metadata rules", r#"{"project_info": {}}"#);
/// oracle.add_error("reserve rules");
///
/// assert_eq!(oracle.extract("metadata rules", "").unwrap(), r#"{"project_info": {}}"#);
/// assert!(oracle.extract("reserve rules", "").is_err());
/// assert_eq!(oracle.extract("other", "").unwrap(), "{}");
/// ```
#[derive(Debug, Clone)]
pub struct MockOracle {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockReply>>>,
    call_count: Arc<Mutex<usize>>,
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
    Delayed(Duration, String),
}

impl MockOracle {
    /// Create a new MockOracle with a fixed response for all instructions
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Add a specific response for given instructions
    pub fn add_response(&mut self, instructions: impl Into<String>, response: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(instructions.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for given instructions
    pub fn add_error(&mut self, instructions: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(instructions.into(), MockReply::Error);
    }

    /// Configure to sleep before answering, for timeout tests
    pub fn add_delayed_response(
        &mut self,
        instructions: impl Into<String>,
        delay: Duration,
        response: impl Into<String>,
    ) {
        self.responses
            .lock()
            .unwrap()
            .insert(instructions.into(), MockReply::Delayed(delay, response.into()));
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *self.call_count.lock().unwrap() = 0;
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new("{}")
    }
}

impl ExtractionOracle for MockOracle {
    type Error = LlmError;

    fn extract(&self, instructions: &str, _content: &str) -> Result<String, Self::Error> {
        *self.call_count.lock().unwrap() += 1;

        let reply = self.responses.lock().unwrap().get(instructions).cloned();
        match reply {
            Some(MockReply::Text(response)) => Ok(response),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            Some(MockReply::Delayed(delay, response)) => {
                std::thread::sleep(delay);
                Ok(response)
            }
            None => Ok(self.default_response.clone()),
        }
    }
}
