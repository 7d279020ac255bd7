//! ReelSense CLI library.
//!
//! This library provides the core functionality for the ReelSense command-line interface,
//! including configuration management, provider setup, the REPL and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;

use reelsense_extractor::Extractor;
use reelsense_llm::OpenAiProvider;

/// Apply command-line overrides on top of the loaded configuration.
pub fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.llm.model = model.clone();
    }
    if let Some(alignment) = cli.alignment {
        config.extractor.alignment = alignment.into();
    }
}

/// Build the OpenAI-backed extractor from resolved settings.
///
/// # Errors
///
/// Fails when no API key is available or the configuration is invalid.
pub fn build_extractor(config: &Config, api_key: Option<&str>) -> Result<Extractor<OpenAiProvider>> {
    let api_key = config.resolve_api_key(api_key)?;

    let deadline = config.extractor.extraction_timeout();
    let provider = OpenAiProvider::new(api_key, config.llm.model.clone())?
        .with_api_url(config.llm.api_url.clone())
        .with_timeout(deadline)?
        .with_max_attempts(config.llm.max_attempts)
        .with_retry_budget(deadline);

    Ok(Extractor::new(provider, config.extractor.clone())?)
}
