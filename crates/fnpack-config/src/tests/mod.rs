//! Tests for configuration parsing and defaults.

use clap::Parser;
use rstest::rstest;

use crate::{Config, LogFormat, default_log_filter};

#[derive(Debug, Parser)]
struct Harness {
    #[command(flatten)]
    config: Config,
}

fn parse(args: &[&str]) -> Config {
    let argv = std::iter::once("fnpack").chain(args.iter().copied());
    Harness::try_parse_from(argv)
        .expect("arguments should parse")
        .config
}

#[test]
fn defaults_match_constructor() {
    let config = Config::default();
    assert_eq!(config.log_filter(), default_log_filter());
    assert_eq!(config.log_format(), LogFormat::Compact);
    assert!(!config.strict_paths());
    assert!(config.analysis().report_generated());
}

#[test]
fn flags_override_defaults() {
    let config = parse(&[
        "--log-filter",
        "fnpack_core=debug",
        "--log-format",
        "json",
        "--strict-paths",
        "--quiet-generation",
    ]);
    assert_eq!(config.log_filter(), "fnpack_core=debug");
    assert_eq!(config.log_format(), LogFormat::Json);
    let analysis = config.analysis();
    assert!(analysis.strict_paths());
    assert!(!analysis.report_generated());
}

#[rstest]
#[case("json", LogFormat::Json)]
#[case("JSON", LogFormat::Json)]
#[case("compact", LogFormat::Compact)]
fn parses_log_formats(#[case] text: &str, #[case] expected: LogFormat) {
    assert_eq!(text.parse::<LogFormat>(), Ok(expected));
}

#[test]
fn rejects_unknown_log_format() {
    let argv = ["fnpack", "--log-format", "pretty"];
    assert!(Harness::try_parse_from(argv).is_err());
}

#[test]
fn deserialises_partial_documents() {
    let config: Config =
        serde_json::from_str(r#"{"strict_paths": true}"#).expect("valid configuration");
    assert!(config.strict_paths());
    assert_eq!(config.log_filter(), "info");
    assert_eq!(config.log_format(), LogFormat::Compact);
}

#[test]
fn deserialises_log_format_in_snake_case() {
    let config: Config =
        serde_json::from_str(r#"{"log_format": "json"}"#).expect("valid configuration");
    assert_eq!(config.log_format(), LogFormat::Json);
    assert_eq!(
        serde_json::to_value(config.log_format()).expect("serialisable"),
        serde_json::json!("json")
    );
}

#[test]
fn builder_overrides_logging() {
    let config = Config::default()
        .with_log_filter("warn")
        .with_log_format(LogFormat::Json);
    assert_eq!(config.log_filter(), "warn");
    assert_eq!(config.log_format(), LogFormat::Json);
}
