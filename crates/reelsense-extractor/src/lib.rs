//! ReelSense Extractor
//!
//! Converts one movie-preference utterance into a metadata record and an
//! aligned sentiment record using an LLM.
//!
//! # Overview
//!
//! The Extractor is the front-end normalization stage of the recommender. It
//! sends the extraction rule set, a per-turn Sentiment Key and the utterance
//! to the NLU collaborator, then validates what comes back before handing it
//! to the caller.
//!
//! # Architecture
//!
//! ```text
//! Utterance → Extractor → CompletionProvider → JSON → Parser → Alignment check → (metadata, sentiment)
//! ```
//!
//! # Key Features
//!
//! - **Rule Set Prompting**: genre whitelist, negation, dedup and counting rules
//! - **Per-turn Keys**: atomic turn counter mints `<n>_user_dialogue`
//! - **Structural Validation**: malformed and incomplete responses are typed errors
//! - **Alignment Backstop**: label count, key and greeting rules checked locally
//! - **Bounded Calls**: every collaborator call runs under a timeout
//!
//! # Example Usage
//!
//! ```no_run
//! use reelsense_extractor::{Extractor, ExtractorConfig};
//! use reelsense_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(
//!     r#"{"metadata": {"genre": "action"}, "sentiment": {"1_user_dialogue": "like"}}"#,
//! );
//! let extractor = Extractor::new(llm, ExtractorConfig::default())?;
//!
//! let result = extractor.extract("I like action movies").await?;
//!
//! println!("Metadata: {}", result.metadata);
//! println!("Sentiment: {}", result.sentiment);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod parser;
mod prompt;
mod types;


pub use config::{AlignmentPolicy, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use parser::parse_llm_response;
pub use prompt::{PromptBuilder, SYSTEM_INSTRUCTIONS};
pub use types::{AlignedEntity, Extraction};
