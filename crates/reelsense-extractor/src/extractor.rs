//! Core Extractor implementation

use crate::config::{AlignmentPolicy, ExtractorConfig};
use crate::error::ExtractorError;
use crate::parser::parse_llm_response;
use crate::prompt::PromptBuilder;
use crate::types::Extraction;
use reelsense_domain::{
    alignment_issues, decompose_compound, is_whitelisted, CompletionProvider, CompletionRequest,
    MetadataRecord, TurnCounter,
};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Extractor turns one utterance into aligned metadata and sentiment
///
/// Holds no per-turn state; the only mutable field is the atomic turn
/// counter, so a single instance can serve concurrent callers.
pub struct Extractor<P>
where
    P: CompletionProvider,
{
    provider: Arc<P>,
    config: ExtractorConfig,
    turns: TurnCounter,
}

impl<P> Extractor<P>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    /// Create a new Extractor
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::Config`] if the configuration is invalid.
    pub fn new(provider: P, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self {
            provider: Arc::new(provider),
            config,
            turns: TurnCounter::new(),
        })
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Number of turns issued so far
    pub fn turns(&self) -> u64 {
        self.turns.current()
    }

    /// Extract metadata and sentiment from one utterance
    ///
    /// Blank input is rejected before the turn counter moves or the
    /// collaborator is called.
    pub async fn extract(&self, utterance: &str) -> Result<Extraction, ExtractorError> {
        if utterance.trim().is_empty() {
            return Err(ExtractorError::EmptyInput);
        }

        let length = utterance.chars().count();
        if length > self.config.max_utterance_length {
            return Err(ExtractorError::UtteranceTooLong(
                length,
                self.config.max_utterance_length,
            ));
        }

        let start = Instant::now();

        // Key is minted before the request exists
        let (turn, sentiment_key) = self.turns.next_key();

        info!(
            turn,
            key = %sentiment_key,
            model = self.provider.model_name(),
            "Starting extraction"
        );

        let request = PromptBuilder::new(utterance, &sentiment_key)
            .build()
            .with_temperature(self.config.temperature)
            .with_max_tokens(self.config.max_tokens);

        debug!("Prompt length: {} chars", request.input.len());

        let raw = timeout(self.config.extraction_timeout(), self.call_llm(request))
            .await
            .map_err(|_| ExtractorError::Timeout(self.config.extraction_timeout_secs))??;

        debug!("LLM response length: {} chars", raw.len());

        let (metadata, sentiment) = parse_llm_response(&raw)?;

        let issues = alignment_issues(&metadata, &sentiment, &sentiment_key);
        match (self.config.alignment, issues.into_iter().next()) {
            (_, None) => {}
            (AlignmentPolicy::Strict, Some(issue)) => {
                warn!(turn, %issue, "Rejecting misaligned response");
                return Err(ExtractorError::AlignmentMismatch(issue));
            }
            (AlignmentPolicy::Lenient, Some(issue)) => {
                warn!(turn, %issue, "Passing through misaligned response");
            }
        }

        note_genres(turn, &metadata);

        info!(
            turn,
            fields = metadata.len(),
            entities = metadata.entity_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Extraction complete"
        );

        Ok(Extraction {
            turn,
            sentiment_key,
            metadata,
            sentiment,
        })
    }

    /// Call the LLM provider
    async fn call_llm(&self, request: CompletionRequest) -> Result<String, ExtractorError> {
        let llm = Arc::clone(&self.provider);

        // Call in a blocking context since CompletionProvider is not async
        tokio::task::spawn_blocking(move || {
            llm.complete(&request)
                .map_err(|e| ExtractorError::Transport(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Transport(format!("Task join error: {}", e)))?
    }
}

/// Log genre tokens the rule set would not have produced
///
/// Informational only; the whitelist is not enforced locally.
fn note_genres(turn: u64, metadata: &MetadataRecord) {
    for genre in metadata.field_entities("genre") {
        if is_whitelisted(genre) {
            continue;
        }
        match decompose_compound(genre) {
            Some(parts) => debug!(turn, genre, ?parts, "Compound genre was not decomposed"),
            None => debug!(turn, genre, "Genre outside the whitelist"),
        }
    }
}
