//! Metadata record module
//!
//! A metadata record is the flat field → value map extracted from one
//! utterance. Field order is significant: sentiment labels are aligned to
//! entities in the order fields appear here.

use std::fmt;

/// A metadata field name
///
/// The policy defines six fields. Any other name the collaborator emits is
/// kept as [`Field::Other`] and treated as multi-valued.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Field {
    /// Pure greeting, always the only field when present
    Greet,
    /// Whitelisted genres
    Genre,
    /// Director names
    Director,
    /// Actor names
    Actor,
    /// Release years
    Year,
    /// Free-text summary of descriptive preferences
    Review,
    /// A field outside the policy set
    Other(String),
}

impl Field {
    /// Get the field name as it appears on the wire
    pub fn as_str(&self) -> &str {
        match self {
            Field::Greet => "greet",
            Field::Genre => "genre",
            Field::Director => "director",
            Field::Actor => "actor",
            Field::Year => "year",
            Field::Review => "review",
            Field::Other(name) => name,
        }
    }

    /// Parse a field from its wire name
    pub fn parse(name: &str) -> Self {
        match name {
            "greet" => Field::Greet,
            "genre" => Field::Genre,
            "director" => Field::Director,
            "actor" => Field::Actor,
            "year" => Field::Year,
            "review" => Field::Review,
            other => Field::Other(other.to_string()),
        }
    }

    /// Single-valued fields always count as exactly one entity
    pub fn is_single_valued(&self) -> bool {
        matches!(self, Field::Greet | Field::Review)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field → value mapping for one turn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataRecord {
    entries: Vec<(String, String)>,
}

impl MetadataRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a field, replacing the value in place if the name already exists
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Get the raw value of a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Check whether a field is present
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no fields were extracted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(field, value)` pairs in record order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// True when the record is a greeting
    pub fn is_greeting(&self) -> bool {
        self.contains(Field::Greet.as_str())
    }

    /// Entities of a single field, left to right
    ///
    /// Single-valued fields yield their whole value. Multi-valued fields are
    /// split on commas; blank items are skipped.
    pub fn field_entities(&self, field: &str) -> Vec<&str> {
        self.get(field)
            .map(|value| split_entities(&Field::parse(field), value))
            .unwrap_or_default()
    }

    /// All entities across the record, in alignment order
    pub fn entities(&self) -> Vec<(Field, &str)> {
        let mut out = Vec::new();
        for (name, value) in &self.entries {
            let field = Field::parse(name);
            for entity in split_entities(&field, value) {
                out.push((field.clone(), entity));
            }
        }
        out
    }

    /// Total entity count used for sentiment alignment
    pub fn entity_count(&self) -> usize {
        self.entries
            .iter()
            .map(|(name, value)| split_entities(&Field::parse(name), value).len())
            .sum()
    }
}

fn split_entities<'a>(field: &Field, value: &'a str) -> Vec<&'a str> {
    if field.is_single_valued() {
        return vec![value.trim()];
    }
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

impl fmt::Display for MetadataRecord {
    /// Renders the record as its literal JSON-like form
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (idx, (name, value)) in self.entries.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{:?}: {:?}", name, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetadataRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = MetadataRecord::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: a multi-valued field contributes one entity per non-blank item
        #[test]
        fn test_entity_count_matches_items(items in prop::collection::vec("[a-z]{1,8}", 1..8)) {
            let record = MetadataRecord::new().with("genre", items.join(", "));
            prop_assert_eq!(record.entity_count(), items.len());
        }

        /// Property: review always counts once regardless of commas
        #[test]
        fn test_review_counts_once(text in "[a-z ,]{1,40}") {
            let record = MetadataRecord::new().with("review", text);
            prop_assert_eq!(record.entity_count(), 1);
        }

        /// Property: total count is the sum over fields
        #[test]
        fn test_entity_count_is_additive(
            genres in prop::collection::vec("[a-z]{1,8}", 1..5),
            actors in prop::collection::vec("[A-Z][a-z]{1,8}", 1..5),
        ) {
            let record = MetadataRecord::new()
                .with("genre", genres.join(", "))
                .with("actor", actors.join(", "));
            prop_assert_eq!(record.entity_count(), genres.len() + actors.len());
            prop_assert_eq!(record.entities().len(), record.entity_count());
        }
    }
}
