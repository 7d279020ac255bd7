//! Sentiment labels, keys and records

use std::fmt;

/// Per-entity sentiment label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentiment {
    /// The user wants this entity
    Like,
    /// The user rejects this entity
    Dislike,
    /// No polarity (greetings)
    Neutral,
}

impl Sentiment {
    /// Get the label as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Like => "like",
            Sentiment::Dislike => "dislike",
            Sentiment::Neutral => "neutral",
        }
    }

    /// Parse a label; only the exact lowercase vocabulary is accepted
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Sentiment::Like),
            "dislike" => Some(Sentiment::Dislike),
            "neutral" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

impl std::str::FromStr for Sentiment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sentiment label: {}", s))
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call key binding a sentiment record to its turn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SentimentKey(String);

impl SentimentKey {
    /// Key for the given turn number, e.g. `3_user_dialogue`
    pub fn for_turn(turn: u64) -> Self {
        Self(format!("{}_user_dialogue", turn))
    }

    /// Borrow the key text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SentimentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sentiment annotation for one turn
///
/// Holds the single key echoed by the collaborator and its raw
/// comma-separated label list, exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentRecord {
    /// Key echoed by the collaborator
    pub key: String,
    /// Comma-separated labels, e.g. `"like, dislike"`
    pub value: String,
}

impl SentimentRecord {
    /// Create a record from a key and raw value
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build a record from parsed labels
    pub fn from_labels(key: &SentimentKey, labels: &[Sentiment]) -> Self {
        let value = labels
            .iter()
            .map(Sentiment::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self::new(key.as_str(), value)
    }

    /// Raw label tokens, trimmed, blank items skipped
    pub fn raw_labels(&self) -> Vec<&str> {
        self.value
            .split(',')
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .collect()
    }

    /// Parse every label, failing on the first token outside the vocabulary
    pub fn labels(&self) -> Result<Vec<Sentiment>, String> {
        self.raw_labels().into_iter().map(str::parse).collect()
    }

    /// Number of labels
    pub fn label_count(&self) -> usize {
        self.raw_labels().len()
    }
}

impl fmt::Display for SentimentRecord {
    /// Renders the record as its literal JSON-like form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{:?}: {:?}}}", self.key, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_vocabulary() {
        assert_eq!("like".parse::<Sentiment>(), Ok(Sentiment::Like));
        assert_eq!("dislike".parse::<Sentiment>(), Ok(Sentiment::Dislike));
        assert_eq!("neutral".parse::<Sentiment>(), Ok(Sentiment::Neutral));
        assert!("Like".parse::<Sentiment>().is_err());
        assert!("positive".parse::<Sentiment>().is_err());
    }

    #[test]
    fn test_sentiment_key_format() {
        assert_eq!(SentimentKey::for_turn(1).as_str(), "1_user_dialogue");
        assert_eq!(SentimentKey::for_turn(42).to_string(), "42_user_dialogue");
    }

    #[test]
    fn test_record_labels() {
        let record = SentimentRecord::new("1_user_dialogue", "like, dislike");
        assert_eq!(record.labels().unwrap(), vec![Sentiment::Like, Sentiment::Dislike]);
        assert_eq!(record.label_count(), 2);
    }

    #[test]
    fn test_record_invalid_label() {
        let record = SentimentRecord::new("1_user_dialogue", "like, meh");
        assert!(record.labels().is_err());
        assert_eq!(record.label_count(), 2);
    }

    #[test]
    fn test_from_labels() {
        let key = SentimentKey::for_turn(7);
        let record = SentimentRecord::from_labels(&key, &[Sentiment::Like, Sentiment::Like]);
        assert_eq!(record.key, "7_user_dialogue");
        assert_eq!(record.value, "like, like");
    }

    #[test]
    fn test_display_literal_form() {
        let record = SentimentRecord::new("1_user_dialogue", "neutral");
        assert_eq!(record.to_string(), r#"{"1_user_dialogue": "neutral"}"#);
    }
}
