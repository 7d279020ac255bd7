//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction contract and the
//! NLU collaborator. Implementations live in other crates.

/// A single completion request sent to the NLU collaborator
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Fixed system instructions
    pub instructions: String,

    /// User message: rule set, utterance and expected Sentiment Key
    pub input: String,

    /// Sampling temperature (kept low for determinism)
    pub temperature: f32,

    /// Upper bound on response length
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Create a request with the given instructions and input
    pub fn new(instructions: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            input: input.into(),
            temperature: 0.1,
            max_tokens: 250,
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum response length
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Trait for the NLU collaborator
///
/// Implemented by the infrastructure layer (reelsense-llm). A single call
/// returns the full text of one response; there is no streaming.
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error;

    /// Complete one request, returning the raw response text
    fn complete(&self, request: &CompletionRequest) -> Result<String, Self::Error>;

    /// Model identifier, used for logging
    fn model_name(&self) -> &str {
        "llm"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("system", "user");
        assert_eq!(request.temperature, 0.1);
        assert_eq!(request.max_tokens, 250);
    }

    #[test]
    fn test_request_builders() {
        let request = CompletionRequest::new("system", "user")
            .with_temperature(0.0)
            .with_max_tokens(512);
        assert_eq!(request.temperature, 0.0);
        assert_eq!(request.max_tokens, 512);
    }
}
