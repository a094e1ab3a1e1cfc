//! Integration tests for the full resolution pipeline.
//!
//! These tests exercise the complete workflow over real temporary files:
//! file loading, command-line overlay precedence, aliasing, required-key
//! validation, and conversion. They complement the unit tests in the
//! library modules by covering the components working together.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tempfile::TempDir;

use conflate::{Config, ConverterError, Error};

// ============================================================================
// Test Utilities
// ============================================================================

/// Helper to create a configuration file in a temporary directory.
fn write_config(dir: &Path, filename: &str, content: &str) -> PathBuf {
    let path = dir.join(filename);
    fs::write(&path, content).unwrap();
    path
}

/// Helper to build an owned argv from string literals.
fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|token| (*token).to_string()).collect()
}

/// Converter parsing a decimal string into a JSON number.
fn to_number(value: &Value) -> Result<Value, ConverterError> {
    let text = value.as_str().ok_or("expected a string value")?;
    Ok(Value::from(text.parse::<u64>()?))
}

// ============================================================================
// File loading
// ============================================================================

#[test]
fn test_file_values_are_addressable() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "app.json",
        r#"{"one": 5, "var1": {"var2": "hello"}}"#,
    );

    let mut config = Config::new();
    config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap();

    assert_eq!(config.get("one"), Some(&json!(5)));
    assert_eq!(config.get("var1.var2"), Some(&json!("hello")));
    assert!(config.has("var1"));
    assert!(!config.has("var1.missing"));
}

#[test]
fn test_missing_file_reports_not_found() {
    let mut config = Config::new();
    let err = config
        .parse(Some(Path::new("/missing/nowhere/app.json")), &argv(&["tool"]))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_malformed_document_is_distinct_from_missing() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "bad.json", "{\n    invalid:\n}\n");

    let mut config = Config::new();
    let err = config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
    assert!(!err.is_not_found());
}

#[test]
fn test_empty_file_is_malformed() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "empty.json", "");

    let mut config = Config::new();
    let err = config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument { .. }));
}

#[test]
fn test_empty_object_document_is_valid() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", "{}");

    let mut config = Config::new();
    config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap();
    assert!(config.document().keys().is_empty());
}

#[test]
fn test_delimiter_in_key_rejected_at_any_depth() {
    let dir = TempDir::new().unwrap();

    let top = write_config(dir.path(), "top.json", r#"{"a.b": 1234}"#);
    let mut config = Config::new();
    let err = config.parse(Some(top.as_path()), &argv(&["tool"])).unwrap_err();
    assert!(matches!(err, Error::InvalidKeyStructure { .. }));

    let nested = write_config(dir.path(), "nested.json", r#"{"b": {"c": {"d.e": 5}}}"#);
    let mut config = Config::new();
    let err = config.parse(Some(nested.as_path()), &argv(&["tool"])).unwrap_err();
    assert!(matches!(err, Error::InvalidKeyStructure { .. }));
}

// ============================================================================
// Command-line precedence
// ============================================================================

#[test]
fn test_command_line_overrides_file_value() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"one": 5}"#);

    let mut config = Config::new();
    config.parse(Some(path.as_path()), &argv(&["tool", "one=100"])).unwrap();

    // The override is the raw command-line string, not coerced to a number.
    assert_eq!(config.get("one"), Some(&json!("100")));
}

#[test]
fn test_nested_override_restructures_value() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"one": {"two": 5}}"#);

    let mut config = Config::new();
    config
        .parse(Some(path.as_path()), &argv(&["tool", "one.two=100"]))
        .unwrap();

    assert_eq!(config.get("one"), Some(&json!({"two": "100"})));
    assert_eq!(config.get("one.two"), Some(&json!("100")));
}

#[test]
fn test_overlay_deeper_than_existing_structure() {
    let mut config = Config::new();
    config
        .parse(None, &argv(&["tool", "a.b.c.d=1"]))
        .unwrap();
    assert_eq!(config.get("a.b.c.d"), Some(&json!("1")));
    assert_eq!(config.get("a.b"), Some(&json!({"c": {"d": "1"}})));
}

#[test]
fn test_overlay_conflicting_with_leaf_fails() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"a": 1}"#);

    let mut config = Config::new();
    let err = config
        .parse(Some(path.as_path()), &argv(&["tool", "a.b=2"]))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKeyStructure { .. }));
}

#[test]
fn test_unresolvable_partial_path_is_absent() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"a": {"x": 1}}"#);

    let mut config = Config::new();
    config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap();
    assert!(config.get("a.b.c").is_none());
}

// ============================================================================
// Config file from the command line
// ============================================================================

#[test]
fn test_config_file_named_on_command_line() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"level": 123}"#);

    let mut config = Config::new();
    config
        .parse(
            None,
            &argv(&["tool", &format!("--config-file={}", path.display())]),
        )
        .unwrap();

    assert_eq!(config.get("level"), Some(&json!(123)));
    // The canonical file key itself lands in the merged tree.
    assert!(config.has("configfile"));
}

#[test]
fn test_command_line_file_wins_over_default_path() {
    let dir = TempDir::new().unwrap();
    let fallback = write_config(dir.path(), "default.json", r#"{"which": "default"}"#);
    let chosen = write_config(dir.path(), "override.json", r#"{"which": "override"}"#);

    let mut config = Config::new();
    config
        .parse(
            Some(fallback.as_path()),
            &argv(&["tool", &format!("-c={}", chosen.display())]),
        )
        .unwrap();

    assert_eq!(config.get("which"), Some(&json!("override")));
}

#[test]
fn test_command_line_file_must_exist() {
    let dir = TempDir::new().unwrap();
    let fallback = write_config(dir.path(), "default.json", "{}");

    // A bad path from the command line is not silently ignored in favor of
    // the programmatic default.
    let mut config = Config::new();
    let err = config
        .parse(
            Some(fallback.as_path()),
            &argv(&["tool", "-c=/missing/nowhere/app.json"]),
        )
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_no_file_at_all_starts_empty() {
    let mut config = Config::new();
    config.parse(None, &argv(&["tool", "only=overlay"])).unwrap();
    assert_eq!(config.get("only"), Some(&json!("overlay")));
}

// ============================================================================
// Required keys and conversion
// ============================================================================

#[test]
fn test_required_key_missing_names_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", "{}");

    let mut config = Config::new();
    config.require_key("one");
    let err = config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap_err();
    match err {
        Error::MissingRequiredKey { key } => assert_eq!(key, "one"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_required_key_from_file_or_command_line() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"one": "hello"}"#);

    let mut config = Config::new();
    config.require_key("one");
    config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap();

    let mut config = Config::new();
    config.require_key("two");
    config.parse(Some(path.as_path()), &argv(&["tool", "two=2"])).unwrap();
}

#[test]
fn test_conversion_applies_after_merge() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"port": "1000"}"#);

    let mut config = Config::new();
    config.require_key_with("port", to_number);
    config
        .parse(Some(path.as_path()), &argv(&["tool", "port=8080"]))
        .unwrap();

    // The converter sees the command-line value, which merged last.
    assert_eq!(config.get("port"), Some(&json!(8080)));
}

#[test]
fn test_conversion_failure_names_key_and_cause() {
    let mut config = Config::new();
    config.require_key_with("port", to_number);
    let err = config
        .parse(None, &argv(&["tool", "port=not-a-number"]))
        .unwrap_err();

    assert!(err.is_conversion_failure());
    let display = format!("{err}");
    assert!(display.contains("port"));
    assert!(std::error::Error::source(&err).is_some());
}

// ============================================================================
// Aliasing and positional arguments
// ============================================================================

#[test]
fn test_alias_keyword_full_pipeline() {
    let mut config = Config::new();
    config.rename_keys("verbose", &["-v", "--verbose", "verbose", "verb"]);
    config.parse(None, &argv(&["tool", "-v=2"])).unwrap();

    assert_eq!(config.get("verbose"), Some(&json!("2")));
    assert!(config.extra_args().is_empty());
}

#[test]
fn test_alias_bare_token_dedup() {
    let mut config = Config::new();
    config.rename_keys("verbose", &["-v", "--verbose", "verbose", "verb"]);
    config
        .parse(None, &argv(&["tool", "-v", "--verbose", "verb", "verbose"]))
        .unwrap();

    assert_eq!(config.extra_args(), ["verbose"]);
    assert!(config.has_extra_arg("verbose"));
    assert!(!config.has_extra_arg("-v"));
}

#[test]
fn test_keyword_and_positional_stay_separate() {
    let mut config = Config::new();
    config
        .parse(None, &argv(&["tool", "arg1", "var1=123", "arg2", "var2=hello"]))
        .unwrap();

    assert!(config.has_extra_arg("arg1"));
    assert!(config.has_extra_arg("arg2"));
    assert!(!config.has_extra_arg("var1"));
    assert!(!config.has_extra_arg("var2"));
    assert_eq!(config.program(), Some("tool"));
}

// ============================================================================
// Custom delimiters
// ============================================================================

#[test]
fn test_custom_delimiter_pipeline() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        dir.path(),
        "app.json",
        r#"{"key1": {"key2": {"key3": false}}}"#,
    );

    let mut config = Config::with_delimiter('>');
    config
        .parse(Some(path.as_path()), &argv(&["tool", "key1>key2>key3=true"]))
        .unwrap();

    assert_eq!(config.get("key1>key2>key3"), Some(&json!("true")));
    assert_eq!(config.document().delimiter(), '>');
}

#[test]
fn test_custom_delimiter_permits_dotted_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(dir.path(), "app.json", r#"{"a.b": 1}"#);

    // With '>' as the delimiter, '.' is an ordinary key character.
    let mut config = Config::with_delimiter('>');
    config.parse(Some(path.as_path()), &argv(&["tool"])).unwrap();
    assert_eq!(config.get("a.b"), Some(&json!(1)));
}
