//! Genre whitelist and compound decomposition
//!
//! These tables are the single source of truth for genre policy. The
//! extractor renders them into the collaborator instructions, so changing a
//! token here changes what the model is told.

/// The closed genre vocabulary, in canonical order.
pub const GENRE_WHITELIST: [&str; 20] = [
    "action",
    "thriller",
    "horror",
    "comedy",
    "drama",
    "romance",
    "sci-fi",
    "fantasy",
    "adventure",
    "crime",
    "mystery",
    "documentary",
    "animation",
    "musical",
    "western",
    "war",
    "biography",
    "family",
    "psychological",
    "superhero",
];

/// Fixed decomposition of compound genre phrases into whitelist tokens.
pub const COMPOUND_GENRES: [(&str, &[&str]); 5] = [
    ("action thriller", &["action", "thriller"]),
    ("romantic comedy", &["romance", "comedy"]),
    ("sci-fi horror", &["sci-fi", "horror"]),
    ("action adventure", &["action", "adventure"]),
    ("drama thriller", &["drama", "thriller"]),
];

/// Check whether a token is a whitelisted genre (case-insensitive)
pub fn is_whitelisted(token: &str) -> bool {
    let token = token.trim().to_lowercase();
    GENRE_WHITELIST.iter().any(|g| *g == token)
}

/// Decompose a compound genre phrase into its whitelist tokens
///
/// Returns `None` for phrases that are not in the compound table.
pub fn decompose_compound(phrase: &str) -> Option<&'static [&'static str]> {
    let phrase = phrase.trim().to_lowercase();
    COMPOUND_GENRES
        .iter()
        .find(|(compound, _)| *compound == phrase)
        .map(|(_, parts)| *parts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_has_twenty_unique_tokens() {
        let mut tokens = GENRE_WHITELIST.to_vec();
        tokens.sort_unstable();
        tokens.dedup();
        assert_eq!(tokens.len(), 20);
    }

    #[test]
    fn test_is_whitelisted() {
        assert!(is_whitelisted("horror"));
        assert!(is_whitelisted(" Sci-Fi "));
        assert!(!is_whitelisted("scary"));
        assert!(!is_whitelisted("romantic"));
        assert!(!is_whitelisted("Marvel"));
    }

    #[test]
    fn test_decompose_compound() {
        assert_eq!(decompose_compound("Romantic Comedy"), Some(&["romance", "comedy"][..]));
        assert_eq!(decompose_compound("sci-fi horror"), Some(&["sci-fi", "horror"][..]));
        assert_eq!(decompose_compound("scary movie"), None);
    }

    #[test]
    fn test_compound_parts_are_whitelisted() {
        for (_, parts) in COMPOUND_GENRES {
            for part in parts {
                assert!(is_whitelisted(part), "{} is not whitelisted", part);
            }
        }
    }
}
