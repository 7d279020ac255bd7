//! ReelSense Domain Layer
//!
//! This crate contains the extraction contract for ReelSense: the value
//! objects produced for every user turn and the policy rules that keep them
//! consistent. It has ZERO external dependencies and defines the trait
//! interface the NLU collaborator must satisfy.
//!
//! ## Key Concepts
//!
//! - **Metadata Record**: ordered field → value map extracted from one utterance
//! - **Entity**: one comma-separated unit inside a metadata value
//! - **Sentiment Record**: one key (the Sentiment Key) mapped to per-entity labels
//! - **Turn Counter**: per-orchestrator counter used to mint Sentiment Keys
//! - **Genre Whitelist**: the closed vocabulary allowed in the `genre` field
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - Pure policy and value objects only
//! - Collaborator implementations live in `reelsense-llm`
//! - Orchestration lives in `reelsense-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alignment;
pub mod genre;
pub mod metadata;
pub mod sentiment;
pub mod traits;
pub mod turn;

// Re-exports for convenience
pub use alignment::{alignment_issues, check_alignment, AlignmentIssue};
pub use genre::{decompose_compound, is_whitelisted, COMPOUND_GENRES, GENRE_WHITELIST};
pub use metadata::{Field, MetadataRecord};
pub use sentiment::{Sentiment, SentimentKey, SentimentRecord};
pub use traits::{CompletionProvider, CompletionRequest};
pub use turn::TurnCounter;
