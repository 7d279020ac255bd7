//! Error types for the CLI application.

use reelsense_extractor::ExtractorError;
use reelsense_llm::LlmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No usable API credential at startup
    #[error("API key required: pass --api-key, set OPENAI_API_KEY, or add llm.api_key to the config file")]
    MissingApiKey,

    /// Blank utterance, rejected before extraction
    #[error("Empty input")]
    EmptyInput,

    /// Extraction error
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// LLM provider setup error
    #[error("Provider error: {0}")]
    Llm(#[from] LlmError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}
