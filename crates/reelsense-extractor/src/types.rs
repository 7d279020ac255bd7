//! Result types for extraction

use reelsense_domain::{Field, MetadataRecord, SentimentKey, SentimentRecord};

/// Result of one extraction turn
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Turn number minted for this call
    pub turn: u64,

    /// Sentiment Key sent to the collaborator
    pub sentiment_key: SentimentKey,

    /// Extracted metadata, as returned
    pub metadata: MetadataRecord,

    /// Sentiment annotation, as returned
    pub sentiment: SentimentRecord,
}

/// One metadata entity paired with its sentiment label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedEntity<'a> {
    /// Field the entity came from
    pub field: Field,
    /// The entity text
    pub entity: &'a str,
    /// Label at the same position, if the collaborator supplied one
    pub label: Option<&'a str>,
}

impl Extraction {
    /// Split into the `(metadata, sentiment)` pair
    pub fn into_pair(self) -> (MetadataRecord, SentimentRecord) {
        (self.metadata, self.sentiment)
    }

    /// Zip entities with labels positionally
    ///
    /// When counts differ (lenient policy) surplus entities get `None` and
    /// surplus labels are dropped.
    pub fn aligned_entities(&self) -> Vec<AlignedEntity<'_>> {
        let labels = self.sentiment.raw_labels();
        self.metadata
            .entities()
            .into_iter()
            .enumerate()
            .map(|(idx, (field, entity))| AlignedEntity {
                field,
                entity,
                label: labels.get(idx).copied(),
            })
            .collect()
    }
}
