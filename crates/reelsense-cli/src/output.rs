//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use reelsense_domain::{MetadataRecord, SentimentRecord};
use reelsense_extractor::Extraction;
use serde_json::{Map, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_extraction(&self, extraction: &Extraction) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_extraction_json(extraction),
            OutputFormat::Table => self.format_extraction_table(extraction),
        }
    }

    /// Metadata record on one line, sentiment record on the next.
    fn format_extraction_json(&self, extraction: &Extraction) -> Result<String> {
        let metadata = serde_json::to_string(&metadata_value(&extraction.metadata))?;
        let sentiment = serde_json::to_string(&sentiment_value(&extraction.sentiment))?;
        Ok(format!("{}\n{}", metadata, sentiment))
    }

    /// One row per entity with its aligned label.
    fn format_extraction_table(&self, extraction: &Extraction) -> Result<String> {
        let key_line = format!("Key: {}", extraction.sentiment.key);

        let aligned = extraction.aligned_entities();
        if aligned.is_empty() {
            return Ok(format!(
                "{}\n{}",
                self.colorize("No metadata extracted.", "yellow"),
                key_line
            ));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Field", "Entity", "Sentiment"]);

        for (idx, row) in aligned.iter().enumerate() {
            builder.push_record([
                (idx + 1).to_string(),
                row.field.to_string(),
                row.entity.to_string(),
                row.label.unwrap_or("-").to_string(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        Ok(format!("{}\n{}", table, key_line))
    }

    /// Format an error message on a single line.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", single_line(message)), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Escape line breaks so a message prints as one line.
fn single_line(message: &str) -> String {
    message
        .trim_end()
        .replace("\r\n", "\\n")
        .replace(['\n', '\r'], "\\n")
}

/// Metadata as a JSON object, field order kept.
pub fn metadata_value(metadata: &MetadataRecord) -> Value {
    let map: Map<String, Value> = metadata
        .iter()
        .map(|(field, value)| (field.to_string(), Value::String(value.to_string())))
        .collect();
    Value::Object(map)
}

/// Sentiment as a single-entry JSON object.
pub fn sentiment_value(sentiment: &SentimentRecord) -> Value {
    let mut map = Map::new();
    map.insert(sentiment.key.clone(), Value::String(sentiment.value.clone()));
    Value::Object(map)
}
