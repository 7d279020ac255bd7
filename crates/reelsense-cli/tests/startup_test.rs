//! Startup wiring: config file, flag overrides and credential checks.

use clap::Parser;
use reelsense_cli::{apply_overrides, build_extractor, Cli, CliError, Config};
use reelsense_extractor::AlignmentPolicy;
use std::fs;
use tempfile::tempdir;

fn write_config(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_missing_api_key_is_startup_error() {
    let config = Config::default();
    let result = build_extractor(&config, None);
    assert!(matches!(result, Err(CliError::MissingApiKey)));
}

#[test]
fn test_blank_api_key_is_startup_error() {
    let (_dir, path) = write_config("[llm]\napi_key = \"   \"\n");
    let config = Config::load_from(&path).unwrap();
    assert!(matches!(build_extractor(&config, Some("")), Err(CliError::MissingApiKey)));
}

#[test]
fn test_key_from_config_file_builds_extractor() {
    let (_dir, path) = write_config(
        "[llm]\napi_key = \"sk-file\"\nmodel = \"gpt-4o\"\n\n[extractor]\nextraction_timeout_secs = 5\n",
    );
    let config = Config::load_from(&path).unwrap();

    let extractor = build_extractor(&config, None).unwrap();
    assert_eq!(extractor.config().extraction_timeout_secs, 5);
    assert_eq!(extractor.turns(), 0);
}

#[test]
fn test_flags_override_config_file() {
    let (_dir, path) = write_config("[llm]\nmodel = \"gpt-4o\"\n\n[extractor]\nalignment = \"strict\"\n");
    let mut config = Config::load_from(&path).unwrap();

    let cli = Cli::parse_from([
        "reelsense",
        "--model",
        "gpt-4o-mini",
        "--alignment",
        "lenient",
        "--api-key",
        "sk-flag",
    ]);
    apply_overrides(&mut config, &cli);

    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.extractor.alignment, AlignmentPolicy::Lenient);
    let extractor = build_extractor(&config, cli.api_key.as_deref()).unwrap();
    assert_eq!(extractor.config().alignment, AlignmentPolicy::Lenient);
}

#[test]
fn test_malformed_config_file_is_error() {
    let (_dir, path) = write_config("[settings\ncolor = true\n");
    assert!(matches!(Config::load_from(&path), Err(CliError::Toml(_))));
}
