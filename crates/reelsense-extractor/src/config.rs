//! Configuration for the Extractor

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How post-hoc alignment violations are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentPolicy {
    /// Fail the call with `AlignmentMismatch`
    #[default]
    Strict,
    /// Log a warning and return the records unmodified
    Lenient,
}

/// Configuration for the Extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Sampling temperature sent with every request
    pub temperature: f32,

    /// Upper bound on response length (tokens)
    pub max_tokens: u32,

    /// Maximum time for a single collaborator call (seconds)
    pub extraction_timeout_secs: u64,

    /// Maximum utterance length (characters)
    pub max_utterance_length: usize,

    /// Alignment validation policy
    pub alignment: AlignmentPolicy,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature {} out of range [0.0, 2.0]", self.temperature));
        }
        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        if self.max_utterance_length == 0 {
            return Err("max_utterance_length must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 250,
            extraction_timeout_secs: 30,
            max_utterance_length: 2_000,
            alignment: AlignmentPolicy::Strict,
        }
    }
}

impl ExtractorConfig {
    /// Strict preset: alignment violations fail the call
    pub fn strict() -> Self {
        Self::default()
    }

    /// Lenient preset: only key presence is enforced, violations are logged
    pub fn lenient() -> Self {
        Self {
            alignment: AlignmentPolicy::Lenient,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
