//! Integration tests for runtime configuration
//!
//! Tests TOML loading, validation, and the parser it configures.

use turnreport_foundation::ErrorKind;
use turnreport_parser::SectionKind;
use turnreport_runtime::{AdvisorConfig, TraceSettings};

#[test]
fn full_document() {
    let config = AdvisorConfig::from_toml_str(
        r#"
parallelism = 4
batch_timeout_secs = 60
cursor_history = 8
pretty = true
sections = ["header", "regions"]

[trace]
enabled = true
json = true
buffer_size = 2000
events = ["region-parsed"]
"#,
    )
    .unwrap();
    assert_eq!(config.parallelism, 4);
    assert_eq!(config.batch_timeout_secs, 60);
    assert!(config.pretty);
    assert_eq!(
        config.trace,
        TraceSettings {
            enabled: true,
            json: true,
            buffer_size: 2000,
            events: vec!["region-parsed".into()],
        }
    );
    let parser = config.parser().unwrap();
    assert!(parser.sections().contains(SectionKind::Regions));
    assert!(!parser.sections().contains(SectionKind::Battles));
}

#[test]
fn empty_document_is_the_default() {
    assert_eq!(AdvisorConfig::from_toml_str("").unwrap(), AdvisorConfig::default());
}

#[test]
fn unknown_trace_key_is_rejected() {
    let err = AdvisorConfig::from_toml_str("[trace]\ncolour = true\n").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Config(_)));
}

#[test]
fn zero_timeout_is_rejected() {
    let err = AdvisorConfig::new().with_timeout(0).validate().unwrap_err();
    assert!(err.to_string().contains("batch_timeout_secs"));
}

#[test]
fn load_names_the_file() {
    let path = std::env::temp_dir().join("turnreport_config_test.toml");
    std::fs::write(&path, "parallelism = 0\n").unwrap();
    let err = AdvisorConfig::load(&path).unwrap_err();
    let _ = std::fs::remove_file(&path);
    assert!(matches!(err.kind, ErrorKind::Config(_)));
    let source = err.context.and_then(|c| c.source).unwrap();
    assert!(source.ends_with("turnreport_config_test.toml"));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = AdvisorConfig::load("/nonexistent/turnreport.toml").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io(_)));
}

#[test]
fn cursor_history_must_be_positive() {
    assert!(AdvisorConfig::new().with_cursor_history(1).validate().is_ok());
    let err = AdvisorConfig::new().with_cursor_history(0).validate().unwrap_err();
    assert!(err.to_string().contains("cursor_history"));
}
