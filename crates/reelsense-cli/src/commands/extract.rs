//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use reelsense_domain::CompletionProvider;
use reelsense_extractor::Extractor;

/// Execute the extract command.
pub async fn execute_extract<P>(
    args: ExtractArgs,
    extractor: &Extractor<P>,
    formatter: &Formatter,
) -> Result<()>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    let output = run_extraction(extractor, &args.text(), formatter).await?;
    println!("{}", output);
    Ok(())
}

/// Run one extraction and render it.
///
/// Blank input fails with [`CliError::EmptyInput`] without touching the
/// extractor.
pub async fn run_extraction<P>(
    extractor: &Extractor<P>,
    utterance: &str,
    formatter: &Formatter,
) -> Result<String>
where
    P: CompletionProvider + Send + Sync + 'static,
    P::Error: std::fmt::Display,
{
    if utterance.trim().is_empty() {
        return Err(CliError::EmptyInput);
    }

    let extraction = extractor.extract(utterance).await?;
    formatter.format_extraction(&extraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use reelsense_extractor::{ExtractorConfig, ExtractorError};
    use reelsense_llm::MockProvider;

    fn setup(response: &str) -> (MockProvider, Extractor<MockProvider>, Formatter) {
        let llm = MockProvider::new(response);
        let extractor = Extractor::new(llm.clone(), ExtractorConfig::default()).unwrap();
        (llm, extractor, Formatter::new(OutputFormat::Json, false))
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_extractor() {
        let (llm, extractor, formatter) = setup("{}");

        let result = run_extraction(&extractor, "   \t", &formatter).await;

        assert!(matches!(result, Err(CliError::EmptyInput)));
        assert_eq!(llm.call_count(), 0);
        assert_eq!(extractor.turns(), 0);
    }

    #[tokio::test]
    async fn test_successful_extraction_renders_records() {
        let (_, extractor, formatter) = setup(
            r#"{"metadata": {"greet": "hello"}, "sentiment": {"1_user_dialogue": "neutral"}}"#,
        );

        let output = run_extraction(&extractor, "hello", &formatter).await.unwrap();

        assert_eq!(output, "{\"greet\":\"hello\"}\n{\"1_user_dialogue\":\"neutral\"}");
    }

    #[tokio::test]
    async fn test_extractor_errors_pass_through() {
        let (_, extractor, formatter) = setup("not json at all");

        let result = run_extraction(&extractor, "I like action", &formatter).await;

        assert!(matches!(
            result,
            Err(CliError::Extractor(ExtractorError::MalformedResponse { .. }))
        ));
    }
}
