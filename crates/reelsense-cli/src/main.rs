//! ReelSense CLI - Extract movie metadata and sentiment from natural language.

use clap::Parser;
use reelsense_cli::commands;
use reelsense_cli::repl;
use reelsense_cli::{Cli, Command, Config, Formatter};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> reelsense_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load config, writing defaults on first run
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => {
            let path = Config::path()?;
            let config = Config::load_from(&path)?;
            if !path.exists() {
                if let Err(e) = config.save() {
                    debug!(error = %e, "Could not write default config");
                }
            }
            config
        }
    };
    reelsense_cli::apply_overrides(&mut config, &cli);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    // Create formatter
    let formatter = Formatter::new(format, color_enabled);

    // Fail at startup without a credential
    let extractor = reelsense_cli::build_extractor(&config, cli.api_key.as_deref())?;
    debug!(model = %config.llm.model, api_url = %config.llm.api_url, "Extractor ready");

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&extractor, &formatter, config.settings.history_size).await?;
        }
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &extractor, &formatter).await?;
        }
    }

    Ok(())
}

/// Log to stderr; stdout carries records only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
