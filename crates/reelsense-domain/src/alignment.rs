//! Alignment checks between metadata and sentiment records
//!
//! The collaborator is instructed to follow the extraction rules, but nothing
//! forces it to. These checks are the local backstop: they recompute the
//! entity count and compare it, and the other invariants, against what came
//! back.

use crate::metadata::{Field, MetadataRecord};
use crate::sentiment::{Sentiment, SentimentKey, SentimentRecord};
use std::collections::HashSet;
use std::fmt;

/// A violation of the metadata/sentiment contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlignmentIssue {
    /// The sentiment record is keyed by something other than the minted key
    KeyMismatch {
        /// Key minted for this turn
        expected: String,
        /// Key the collaborator returned
        actual: String,
    },

    /// Label count differs from the computed entity count
    CountMismatch {
        /// Entities in the metadata record
        entities: usize,
        /// Labels in the sentiment record
        labels: usize,
    },

    /// A label outside `like`, `dislike`, `neutral`
    InvalidLabel(String),

    /// `greet` shares the record with other fields
    GreetingNotExclusive(usize),

    /// A greeting was labelled something other than `neutral`
    GreetingNotNeutral(String),

    /// The same entity appears twice in one field (case-insensitive)
    DuplicateEntity {
        /// Field holding the duplicate
        field: String,
        /// The repeated entity
        entity: String,
    },
}

impl fmt::Display for AlignmentIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlignmentIssue::KeyMismatch { expected, actual } => {
                write!(f, "sentiment key '{}' does not match expected '{}'", actual, expected)
            }
            AlignmentIssue::CountMismatch { entities, labels } => {
                write!(f, "{} sentiment labels for {} metadata entities", labels, entities)
            }
            AlignmentIssue::InvalidLabel(label) => {
                write!(f, "invalid sentiment label '{}'", label)
            }
            AlignmentIssue::GreetingNotExclusive(fields) => {
                write!(f, "greet must be the only field, found {} fields", fields)
            }
            AlignmentIssue::GreetingNotNeutral(value) => {
                write!(f, "greeting sentiment must be 'neutral', got '{}'", value)
            }
            AlignmentIssue::DuplicateEntity { field, entity } => {
                write!(f, "duplicate entity '{}' in field '{}'", entity, field)
            }
        }
    }
}

impl std::error::Error for AlignmentIssue {}

/// Collect every contract violation, in a stable order
pub fn alignment_issues(
    metadata: &MetadataRecord,
    sentiment: &SentimentRecord,
    expected_key: &SentimentKey,
) -> Vec<AlignmentIssue> {
    let mut issues = Vec::new();

    if sentiment.key != expected_key.as_str() {
        issues.push(AlignmentIssue::KeyMismatch {
            expected: expected_key.to_string(),
            actual: sentiment.key.clone(),
        });
    }

    let labels = sentiment.raw_labels();
    for label in &labels {
        if Sentiment::parse(label).is_none() {
            issues.push(AlignmentIssue::InvalidLabel(label.to_string()));
        }
    }

    if metadata.is_greeting() {
        if metadata.len() > 1 {
            issues.push(AlignmentIssue::GreetingNotExclusive(metadata.len()));
        } else if labels != [Sentiment::Neutral.as_str()] {
            issues.push(AlignmentIssue::GreetingNotNeutral(sentiment.value.clone()));
        }
    }

    let entities = metadata.entity_count();
    if entities != labels.len() {
        issues.push(AlignmentIssue::CountMismatch {
            entities,
            labels: labels.len(),
        });
    }

    for (name, _) in metadata.iter() {
        if Field::parse(name).is_single_valued() {
            continue;
        }
        let mut seen = HashSet::new();
        for entity in metadata.field_entities(name) {
            if !seen.insert(entity.to_lowercase()) {
                issues.push(AlignmentIssue::DuplicateEntity {
                    field: name.to_string(),
                    entity: entity.to_string(),
                });
            }
        }
    }

    issues
}

/// Check the contract, failing on the first violation
pub fn check_alignment(
    metadata: &MetadataRecord,
    sentiment: &SentimentRecord,
    expected_key: &SentimentKey,
) -> Result<(), AlignmentIssue> {
    match alignment_issues(metadata, sentiment, expected_key).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> SentimentKey {
        SentimentKey::for_turn(1)
    }

    #[test]
    fn test_aligned_genre_with_negation() {
        let metadata = MetadataRecord::new().with("genre", "horror, romantic");
        let sentiment = SentimentRecord::new("1_user_dialogue", "like, dislike");
        assert!(check_alignment(&metadata, &sentiment, &key()).is_ok());
    }

    #[test]
    fn test_aligned_genre_and_review() {
        let metadata = MetadataRecord::new()
            .with("genre", "superhero")
            .with("review", "Marvel films with quality dialogue");
        let sentiment = SentimentRecord::new("1_user_dialogue", "like, like");
        assert!(check_alignment(&metadata, &sentiment, &key()).is_ok());
    }

    #[test]
    fn test_key_mismatch() {
        let metadata = MetadataRecord::new().with("genre", "action");
        let sentiment = SentimentRecord::new("2_user_dialogue", "like");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::KeyMismatch {
                expected: "1_user_dialogue".to_string(),
                actual: "2_user_dialogue".to_string(),
            })
        );
    }

    #[test]
    fn test_count_mismatch() {
        let metadata = MetadataRecord::new().with("genre", "action, comedy");
        let sentiment = SentimentRecord::new("1_user_dialogue", "like");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::CountMismatch { entities: 2, labels: 1 })
        );
    }

    #[test]
    fn test_invalid_label() {
        let metadata = MetadataRecord::new().with("genre", "action");
        let sentiment = SentimentRecord::new("1_user_dialogue", "positive");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::InvalidLabel("positive".to_string()))
        );
    }

    #[test]
    fn test_greeting_must_be_exclusive() {
        let metadata = MetadataRecord::new()
            .with("greet", "hi")
            .with("genre", "action");
        let sentiment = SentimentRecord::new("1_user_dialogue", "neutral, like");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::GreetingNotExclusive(2))
        );
    }

    #[test]
    fn test_greeting_must_be_neutral() {
        let metadata = MetadataRecord::new().with("greet", "hello there");
        let sentiment = SentimentRecord::new("1_user_dialogue", "like");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::GreetingNotNeutral("like".to_string()))
        );
    }

    #[test]
    fn test_duplicate_entity_case_insensitive() {
        let metadata = MetadataRecord::new().with("genre", "superhero, Superhero");
        let sentiment = SentimentRecord::new("1_user_dialogue", "like, like");
        assert_eq!(
            check_alignment(&metadata, &sentiment, &key()),
            Err(AlignmentIssue::DuplicateEntity {
                field: "genre".to_string(),
                entity: "Superhero".to_string(),
            })
        );
    }

    #[test]
    fn test_collects_all_issues() {
        let metadata = MetadataRecord::new().with("genre", "action, action");
        let sentiment = SentimentRecord::new("9_user_dialogue", "like");
        let issues = alignment_issues(&metadata, &sentiment, &key());
        assert_eq!(issues.len(), 3);
    }
}
