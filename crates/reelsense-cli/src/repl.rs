//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use reelsense_domain::CompletionProvider;
use reelsense_extractor::Extractor;
use rustyline::error::ReadlineError;
use rustyline::{Config as EditorConfig, DefaultEditor};
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl<P>(
    extractor: &Extractor<P>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    println!(
        "{}",
        formatter.info("ReelSense REPL - Describe the movies you like, 'help' for commands, 'exit' to quit")
    );
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(history_size)
        .map(|builder| builder.auto_add_history(false).build())
        .map_err(editor_error)?;
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("reelsense> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.trim()).ok();
                }

                if let Step::Exit = handle_line(extractor, formatter, &line).await {
                    println!("{}", formatter.info("Goodbye!"));
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    if let Err(e) = editor.save_history(&history_path) {
        debug!(error = %e, "Failed to save REPL history");
    }

    Ok(())
}

/// What the loop does after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Read the next line
    Continue,
    /// Leave the loop
    Exit,
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// `quit`, `exit` or `q`, any case
    Exit,
    /// `help` or `?`
    Help,
    /// Whitespace only
    Empty,
    /// Anything else is an utterance
    Utterance(String),
}

/// Parse a REPL line.
pub fn parse_repl_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }

    match line.to_lowercase().as_str() {
        "exit" | "quit" | "q" => ReplCommand::Exit,
        "help" | "?" => ReplCommand::Help,
        _ => ReplCommand::Utterance(line.to_string()),
    }
}

/// Evaluate one line, printing records or a diagnostic.
///
/// Failures are printed and never end the loop.
pub async fn handle_line<P>(extractor: &Extractor<P>, formatter: &Formatter, line: &str) -> Step
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    match parse_repl_line(line) {
        ReplCommand::Exit => return Step::Exit,
        ReplCommand::Help => print_help(formatter),
        ReplCommand::Empty => {
            eprintln!("{}", formatter.warning(&CliError::EmptyInput.to_string()));
        }
        ReplCommand::Utterance(utterance) => {
            match commands::run_extraction(extractor, &utterance, formatter).await {
                Ok(output) => println!("{}", output),
                Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
            }
        }
    }
    Step::Continue
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        err
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let reelsense_dir = Config::home_dir()?;
    std::fs::create_dir_all(&reelsense_dir)?;
    Ok(reelsense_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Type a movie preference and press Enter:"));
    println!();
    println!("  I like horror but not romantic     - genres with per-genre sentiment");
    println!("  Nolan films without Tom Cruise     - directors and actors");
    println!("  hello                              - greetings come back neutral");
    println!();
    println!("  help, ?                            - Show this help");
    println!("  exit, quit, q                      - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use reelsense_extractor::ExtractorConfig;
    use reelsense_llm::MockProvider;

    #[test]
    fn test_exit_tokens_any_case() {
        for token in ["quit", "EXIT", "Q", "  exit  ", "Quit"] {
            assert_eq!(parse_repl_line(token), ReplCommand::Exit, "{:?}", token);
        }
    }

    #[test]
    fn test_help_and_empty() {
        assert_eq!(parse_repl_line("?"), ReplCommand::Help);
        assert_eq!(parse_repl_line("HELP"), ReplCommand::Help);
        assert_eq!(parse_repl_line(""), ReplCommand::Empty);
        assert_eq!(parse_repl_line(" \t "), ReplCommand::Empty);
    }

    #[test]
    fn test_utterance_is_trimmed_not_lowercased() {
        assert_eq!(
            parse_repl_line("  I like Christopher Nolan "),
            ReplCommand::Utterance("I like Christopher Nolan".to_string())
        );
        assert_eq!(
            parse_repl_line("quit talking about horror"),
            ReplCommand::Utterance("quit talking about horror".to_string())
        );
    }

    #[tokio::test]
    async fn test_loop_survives_errors_and_blank_lines() {
        let llm = MockProvider::default();
        llm.push_error("connection refused");
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default()).unwrap();
        let formatter = Formatter::new(OutputFormat::Json, false);

        assert_eq!(handle_line(&extractor, &formatter, "   ").await, Step::Continue);
        assert_eq!(llm.call_count(), 0);

        assert_eq!(handle_line(&extractor, &formatter, "I like action").await, Step::Continue);
        assert_eq!(llm.call_count(), 1);

        assert_eq!(handle_line(&extractor, &formatter, "Q").await, Step::Exit);
        assert_eq!(llm.call_count(), 1);
    }
}
