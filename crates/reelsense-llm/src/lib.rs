//! ReelSense LLM Provider Layer
//!
//! Implementations of the `CompletionProvider` trait from `reelsense-domain`.
//! The extractor only sees the trait, so providers can be swapped without
//! touching orchestration.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use reelsense_llm::MockProvider;
//! use reelsense_domain::{CompletionProvider, CompletionRequest};
//!
//! let provider = MockProvider::new(r#"{"metadata": {}, "sentiment": {}}"#);
//! let request = CompletionRequest::new("system", "I like action movies");
//! let result = provider.complete(&request).unwrap();
//! assert!(result.contains("metadata"));
//! ```

#![warn(missing_docs)]

pub mod openai;

use reelsense_domain::{CompletionProvider, CompletionRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Credential rejected by the API
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid response envelope from the API
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider misconfiguration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum Scripted {
    Response(String),
    Error(String),
}

#[derive(Debug, Default)]
struct MockState {
    queue: VecDeque<Scripted>,
    matchers: Vec<(String, Scripted)>,
    requests: Vec<CompletionRequest>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Resolution order per call:
///
/// 1. The next queued response (see [`push_response`](Self::push_response))
/// 2. The first matcher whose fragment occurs in the request input
/// 3. The default response
///
/// # Examples
///
/// ```
/// use reelsense_llm::MockProvider;
/// use reelsense_domain::{CompletionProvider, CompletionRequest};
///
/// let provider = MockProvider::default();
/// provider.add_response("hello", "greeting");
/// provider.push_response("first");
///
/// let req = CompletionRequest::new("system", "hello there");
/// assert_eq!(provider.complete(&req).unwrap(), "first");
/// assert_eq!(provider.complete(&req).unwrap(), "greeting");
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all requests
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Queue a one-shot response, consumed before matchers and the default
    pub fn push_response(&self, response: impl Into<String>) {
        self.state().queue.push_back(Scripted::Response(response.into()));
    }

    /// Queue a one-shot error
    pub fn push_error(&self, message: impl Into<String>) {
        self.state().queue.push_back(Scripted::Error(message.into()));
    }

    /// Respond with `response` whenever the request input contains `fragment`
    pub fn add_response(&self, fragment: impl Into<String>, response: impl Into<String>) {
        self.state()
            .matchers
            .push((fragment.into(), Scripted::Response(response.into())));
    }

    /// Fail whenever the request input contains `fragment`
    pub fn add_error(&self, fragment: impl Into<String>) {
        self.state()
            .matchers
            .push((fragment.into(), Scripted::Error("Mock error".to_string())));
    }

    /// Get the number of times complete was called
    pub fn call_count(&self) -> usize {
        self.state().requests.len()
    }

    /// Reset the call count and recorded requests
    pub fn reset_call_count(&self) {
        self.state().requests.clear();
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.state().requests.clone()
    }

    /// The most recent request, if any
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.state().requests.last().cloned()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl CompletionProvider for MockProvider {
    type Error = LlmError;

    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        let mut state = self.state();
        state.requests.push(request.clone());

        let scripted = match state.queue.pop_front() {
            Some(next) => next,
            None => state
                .matchers
                .iter()
                .find(|(fragment, _)| request.input.contains(fragment.as_str()))
                .map(|(_, scripted)| scripted.clone())
                .unwrap_or_else(|| Scripted::Response(self.default_response.clone())),
        };

        match scripted {
            Scripted::Response(response) => Ok(response),
            Scripted::Error(message) => Err(LlmError::Other(message)),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
