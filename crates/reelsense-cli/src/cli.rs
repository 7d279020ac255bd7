//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use reelsense_extractor::AlignmentPolicy;
use std::path::PathBuf;

/// ReelSense - Extract movie metadata and sentiment from natural language.
#[derive(Debug, Parser)]
#[command(name = "reelsense")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Model name (overrides the config file)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Alignment validation policy (overrides the config file)
    #[arg(long, value_enum, global = true)]
    pub alignment: Option<AlignmentArg>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Literal metadata and sentiment records (default)
    Json,
    /// One row per entity with its aligned sentiment
    Table,
}

/// Alignment policy options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AlignmentArg {
    /// Reject misaligned responses
    Strict,
    /// Warn and pass misaligned responses through
    Lenient,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract metadata and sentiment from a single utterance
    Extract(ExtractArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Utterance to analyze (words are joined with spaces)
    #[arg(required = true, trailing_var_arg = true)]
    pub utterance: Vec<String>,
}

impl ExtractArgs {
    /// The utterance as one string
    pub fn text(&self) -> String {
        self.utterance.join(" ")
    }
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Table => crate::config::OutputFormat::Table,
        }
    }
}

impl From<AlignmentArg> for AlignmentPolicy {
    fn from(arg: AlignmentArg) -> Self {
        match arg {
            AlignmentArg::Strict => AlignmentPolicy::Strict,
            AlignmentArg::Lenient => AlignmentPolicy::Lenient,
        }
    }
}
