//! Error types for the Extractor

use reelsense_domain::AlignmentIssue;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Utterance is blank or whitespace-only
    #[error("Empty input")]
    EmptyInput,

    /// Utterance exceeds the configured maximum length
    #[error("Utterance too long: {0} chars (max: {1})")]
    UtteranceTooLong(usize, usize),

    /// The NLU collaborator call failed outright
    #[error("Transport error: {0}")]
    Transport(String),

    /// The NLU collaborator did not answer in time
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    /// Response is not the expected structured format
    #[error("Malformed response ({reason}): {raw}")]
    MalformedResponse {
        /// What was wrong with it
        reason: String,
        /// Raw response text, kept for diagnosis
        raw: String,
    },

    /// Response lacks `metadata` and/or `sentiment`
    #[error("Incomplete response: missing {}", .missing.join(", "))]
    IncompleteResponse {
        /// Names of the missing top-level keys
        missing: Vec<String>,
    },

    /// Metadata and sentiment records violate the alignment contract
    #[error("Alignment mismatch: {0}")]
    AlignmentMismatch(#[from] AlignmentIssue),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Build a [`ExtractorError::MalformedResponse`]
    pub fn malformed(reason: impl Into<String>, raw: impl Into<String>) -> Self {
        ExtractorError::MalformedResponse {
            reason: reason.into(),
            raw: raw.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_lists_missing_keys() {
        let err = ExtractorError::IncompleteResponse {
            missing: vec!["metadata".to_string(), "sentiment".to_string()],
        };
        assert_eq!(err.to_string(), "Incomplete response: missing metadata, sentiment");
    }

    #[test]
    fn test_malformed_carries_raw_text() {
        let err = ExtractorError::malformed("expected value", "not json");
        assert!(err.to_string().contains("not json"));
    }

    #[test]
    fn test_alignment_from_issue() {
        let err: ExtractorError = AlignmentIssue::CountMismatch { entities: 2, labels: 1 }.into();
        assert!(matches!(err, ExtractorError::AlignmentMismatch(_)));
        assert_eq!(
            err.to_string(),
            "Alignment mismatch: 1 sentiment labels for 2 metadata entities"
        );
    }
}
