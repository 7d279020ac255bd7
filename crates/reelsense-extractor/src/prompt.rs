//! LLM prompt engineering for metadata and sentiment extraction
//!
//! The rule set is rendered here and nowhere else. Genre tables come from
//! `reelsense_domain::genre` so the prompt and local validation share one
//! source of truth.

use reelsense_domain::{CompletionRequest, SentimentKey, COMPOUND_GENRES, GENRE_WHITELIST};

/// Fixed system message sent with every request
pub const SYSTEM_INSTRUCTIONS: &str = "You are an expert at extracting movie metadata and analyzing sentiment. \
For greetings, always return 'neutral' sentiment. \
For movie metadata, analyze each entity's sentiment carefully. Return only JSON.";

/// Builds the per-turn request for the NLU collaborator
pub struct PromptBuilder<'a> {
    utterance: &'a str,
    sentiment_key: &'a SentimentKey,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(utterance: &'a str, sentiment_key: &'a SentimentKey) -> Self {
        Self {
            utterance,
            sentiment_key,
        }
    }

    /// Build the completion request with default parameters
    pub fn build(&self) -> CompletionRequest {
        CompletionRequest::new(SYSTEM_INSTRUCTIONS, self.build_input())
    }

    /// Build the user message: output contract, rule set, utterance
    pub fn build_input(&self) -> String {
        let mut prompt = String::new();

        // 1. Output contract with the expected key
        prompt.push_str(&output_contract(self.sentiment_key));
        prompt.push_str("\n\n");

        // 2. Extraction rules
        prompt.push_str(NEGATION_RULES);
        prompt.push_str("\n\n");
        prompt.push_str(&genre_rules());
        prompt.push_str("\n\n");
        prompt.push_str(REVIEW_RULES);
        prompt.push_str("\n\n");
        prompt.push_str(ALIGNMENT_RULES);
        prompt.push_str("\n\n");
        prompt.push_str(DEDUPLICATION_RULES);
        prompt.push_str("\n\n");

        // 3. Final reminders
        prompt.push_str(OUTPUT_FORMAT_REMINDER);
        prompt.push_str("\n\n");

        // 4. The utterance
        prompt.push_str(&format!("User: {:?}\n", self.utterance));

        prompt
    }
}

fn output_contract(key: &SentimentKey) -> String {
    format!(
        r#"Output **only** valid JSON with exactly two keys:

"metadata": one flat object
- Greeting only (hi, hello, good morning, ...): {{"greet": "<exact words>"}} and nothing else
- Movie metadata: use the keys genre, director, actor, year
- Several values for one key: a single comma-separated string in the exact order mentioned
- Descriptive content beyond metadata: add a "review" key next to the metadata keys
- No metadata and not a greeting: {{"review": "<direct summary>"}}

"sentiment": one object
- Key: "{key}"
- Value for greetings: always "neutral"
- Value otherwise: comma-separated labels matching the exact order of the metadata entities"#
    )
}

fn genre_rules() -> String {
    let whitelist = GENRE_WHITELIST.join(", ");
    let compounds: Vec<String> = COMPOUND_GENRES
        .iter()
        .map(|(phrase, parts)| format!("- \"{}\" -> \"{}\"", phrase, parts.join(", ")))
        .collect();

    format!(
        r#"GENRES:
- Valid genres, and the only tokens allowed in "genre": {whitelist}
- Compound phrases decompose into their parts:
{compounds}
  and likewise for other combinations
- Production companies are NOT genres: "Marvel", "DC", "Disney"
- Movie characteristics are NOT genres: "character development", "performances", "storylines", "themes", "cinematography", "dialogue", "special effects"
- Production companies and characteristics belong in "review"
- Extract a genre only when the user literally says the genre word; never infer one
  - "scary movie" is not "horror", "love story" is not "romance"
  - "funny film" is not "comedy", "emotional scenes" is not "drama"
  - "character growth" is not "drama", "love interest" is not "romance"
- Example: "psychological movies with character development" -> {{"genre": "psychological", "review": "Character-driven psychological films"}}, sentiment "like, like"
- Example: "Marvel superhero films with good dialogue" -> {{"genre": "superhero", "review": "Marvel films with quality dialogue"}}, sentiment "like, like""#,
        whitelist = whitelist,
        compounds = compounds.join("\n"),
    )
}

const NEGATION_RULES: &str = r#"ENTITIES AND NEGATION:
- Extract ALL mentioned entities, including those under "not", "but not", "except", "hate"
- A negated entity keeps its place in mention order and gets "dislike"
- "I like horror but not romantic" -> {"genre": "horror, romantic"}, sentiment "like, dislike"
- "I want action not comedy" -> {"genre": "action, comedy"}, sentiment "like, dislike"
- "I love Nolan but hate Tom Cruise" -> sentiment "like, dislike"
- "I want Christopher Nolan films but not with Tom Cruise" -> {"director": "Christopher Nolan", "actor": "Tom Cruise"}, sentiment "like, dislike"
- "I love action and comedy movies" -> {"genre": "action, comedy"}, sentiment "like, like"
- Never give "dislike" to a genre the user actually likes; negative aspects go into review phrasing"#;

const REVIEW_RULES: &str = r#"REVIEW:
- Add "review" only when there is descriptive content beyond genres, directors and actors
- "I like action movies" -> {"genre": "action"} with no review
- "I like action movies with great stunts" -> {"genre": "action", "review": "Movies with great stunts"}
- A direct, concise summary of 8-12 words; do not start with "User seeks" or "User wants"
- Describe what the user WANTS: "I love X but hate Y" -> "X without Y"
- "I enjoy Marvel films but not cheesy dialogue" -> "Marvel films without cheesy dialogue"
- The review label is "like" when it describes what the user wants"#;

const ALIGNMENT_RULES: &str = r#"SENTIMENT ALIGNMENT:
- The number of labels must equal the TOTAL number of metadata entities
- genre, director, actor, year: each comma-separated item is 1 entity ("action, comedy, drama" = 3)
- greet, review: always exactly 1 entity
- Label order mirrors entity order: keys in output order, then left to right within each value
- {"genre": "horror, romance"} -> 2 entities -> "like, dislike"
- {"genre": "superhero, action", "review": "Marvel films with good dialogue"} -> 2 + 1 = 3 entities -> "like, like, like"
- {"actor": "Tom Cruise"} -> 1 entity -> "like"
- Use only the lowercase labels like, dislike, neutral; decide each one from context"#;

const DEDUPLICATION_RULES: &str = r#"DEDUPLICATION:
- Remove duplicates inside comma-separated values, keeping the first mention
- "superhero, superhero, action, action" -> "superhero, action"
- "Marvel and DC superhero films" -> genre "superhero" (once)
- "action sequences" -> genre "action" (once)"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Remember:
- Return ONLY the JSON object, no explanations
- NEVER wrap the JSON in triple back-ticks
- Label count must EXACTLY match the metadata entity count"#;
