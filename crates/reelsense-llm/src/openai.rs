//! OpenAI Provider Implementation
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint.
//!
//! # Features
//!
//! - Async HTTP communication with bearer authentication
//! - Configurable endpoint, model and request timeout
//! - Optional retry with exponential backoff for 429/5xx responses
//!
//! # Examples
//!
//! ```no_run
//! use reelsense_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o-mini").unwrap();
//!
//! // `complete_async` is the native entry point; the `CompletionProvider`
//! // trait offers a blocking wrapper for synchronous callers.
//! ```

use crate::LlmError;
use reelsense_domain::{CompletionProvider, CompletionRequest};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default chat completions endpoint
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts (no retry)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1;

/// OpenAI-compatible chat completions provider
#[derive(Clone)]
pub struct OpenAiProvider {
    api_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
    max_attempts: u32,
    retry_budget: Option<Duration>,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_attempts", &self.max_attempts)
            .field("retry_budget", &self.retry_budget)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize, Debug)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider against the default endpoint
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the API key is blank or the HTTP
    /// client cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }

        Ok(Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key,
            model: model.into(),
            client: build_client(Duration::from_secs(DEFAULT_TIMEOUT_SECS))?,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_budget: None,
        })
    }

    /// Point the provider at a different OpenAI-compatible endpoint
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Set the per-request HTTP timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, LlmError> {
        self.client = build_client(timeout)?;
        Ok(self)
    }

    /// Set the maximum number of attempts (1 disables retry)
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Stop retrying once the next backoff would end past `budget`
    ///
    /// Callers that abandon the request after a deadline set this to the
    /// same deadline so retries do not outlive them.
    pub fn with_retry_budget(mut self, budget: Duration) -> Self {
        self.retry_budget = Some(budget);
        self
    }

    /// Endpoint in use
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Send one chat completion request and return the trimmed message text
    ///
    /// # Errors
    ///
    /// - [`LlmError::Unauthorized`] on 401/403
    /// - [`LlmError::ModelNotAvailable`] on 404
    /// - [`LlmError::RateLimitExceeded`] on 429 once attempts are exhausted
    /// - [`LlmError::Communication`] on network failures and other statuses
    /// - [`LlmError::InvalidResponse`] when the envelope has no message text
    pub async fn complete_async(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.instructions,
                },
                ChatMessage {
                    role: "user",
                    content: &request.input,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let started = Instant::now();
        let mut attempts = 0;
        let mut last_error = None;

        while attempts < self.max_attempts {
            attempts += 1;
            debug!(model = %self.model, attempt = attempts, "Sending chat completion request");

            match self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
            {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let parsed: ChatResponse = response.json().await.map_err(|e| {
                            LlmError::InvalidResponse(format!("Failed to parse response: {}", e))
                        })?;
                        return extract_content(parsed);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());

                    match status {
                        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                            return Err(LlmError::Unauthorized(error_text));
                        }
                        StatusCode::NOT_FOUND => {
                            return Err(LlmError::ModelNotAvailable(self.model.clone()));
                        }
                        StatusCode::TOO_MANY_REQUESTS => {
                            last_error = Some(LlmError::RateLimitExceeded);
                        }
                        s if s.is_server_error() => {
                            last_error = Some(LlmError::Communication(format!(
                                "HTTP {}: {}",
                                s, error_text
                            )));
                        }
                        s => {
                            return Err(LlmError::Communication(format!(
                                "HTTP {}: {}",
                                s, error_text
                            )));
                        }
                    }
                }
                Err(e) => {
                    last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
                }
            }

            if attempts < self.max_attempts {
                // Exponential backoff: 1s, 2s, 4s, etc.
                let delay = Duration::from_secs(2u64.pow(attempts - 1));
                if let Some(budget) = self.retry_budget {
                    if started.elapsed() + delay >= budget {
                        warn!(attempt = attempts, ?budget, "Retry budget exhausted");
                        break;
                    }
                }
                warn!(attempt = attempts, ?delay, "Chat completion failed, retrying");
                tokio::time::sleep(delay).await;
            }
        }

        Err(last_error
            .unwrap_or_else(|| LlmError::Communication("Max attempts exceeded".to_string())))
    }
}

fn build_client(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))
}

fn extract_content(response: ChatResponse) -> Result<String, LlmError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
}

impl CompletionProvider for OpenAiProvider {
    type Error = LlmError;

    /// Blocking wrapper around [`OpenAiProvider::complete_async`]
    ///
    /// Must not be called from an async task; use `spawn_blocking` there.
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error> {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle.block_on(self.complete_async(request)),
            Err(_) => tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
                .block_on(self.complete_async(request)),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
