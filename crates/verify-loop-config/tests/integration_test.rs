use std::fs;
use std::path::Path;
use tempfile::TempDir;
use verify_loop_config::templates::GO_TEMPLATE;
use verify_loop_config::{
    load_config, load_config_from_file, load_raw, Check, ConfigError, RawValue,
};

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("hooks.config");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_go_reference_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, GO_TEMPLATE);

    let raw = load_raw(&path).unwrap();
    assert_eq!(raw.get("LANGUAGE"), Some(&RawValue::Scalar("go".to_string())));
    assert_eq!(raw.get("TYPE_CMD"), Some(&RawValue::Scalar(String::new())));
    assert!(!raw.contains_key("CUSTOM_PROTECTED_FILES"));

    let config = load_config(&path).unwrap();
    assert_eq!(config.language.as_deref(), Some("go"));
    assert_eq!(config.format_cmd, "gofmt -l -w .");
    assert_eq!(config.imports_cmd, "goimports -w .");
    assert_eq!(config.build_cmd, "go build ./...");
    assert_eq!(config.vet_cmd, "go vet ./...");
    assert_eq!(config.lint_cmd, "golangci-lint run");
    assert_eq!(config.type_cmd, "");
    assert_eq!(config.test_cmd, "go test -race ./...");

    assert_eq!(config.format_weight, 10);
    assert_eq!(config.build_weight, 40);
    assert_eq!(config.vet_weight, 10);
    assert_eq!(config.lint_weight, 20);
    assert_eq!(config.type_weight, 0);
    assert_eq!(config.test_weight, 20);
    assert_eq!(config.total_weight(), 110);
    assert_eq!(config.active_weight(), 100);

    assert_eq!(config.threshold, 80);
    assert!(config.is_skipped(Check::Type));
    assert!(config.custom_protected_files.is_empty());
    assert!(!config.is_protected(Path::new("go.sum")));
}

#[test]
fn test_loading_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, GO_TEMPLATE);

    let first = load_config_from_file(&path).unwrap();
    let second = load_config_from_file(&path).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.raw, second.raw);
}

#[test]
fn test_uncommented_protected_files() {
    let dir = TempDir::new().unwrap();
    let content = GO_TEMPLATE.replace(
        "# CUSTOM_PROTECTED_FILES=(\"go.sum\")",
        "CUSTOM_PROTECTED_FILES=(\"go.sum\" \"go.mod\")",
    );
    let path = write_config(&dir, &content);

    let config = load_config(&path).unwrap();
    assert_eq!(config.custom_protected_files.patterns(), &["go.sum", "go.mod"]);
    assert!(config.is_protected(Path::new("pkg/go.mod")));
    assert!(!config.is_protected(Path::new("main.go")));
}

#[test]
fn test_ldflags_value_preserved() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "BUILD_CMD=\"go build ./... -ldflags=-X\"\n");

    let config = load_config(&path).unwrap();
    assert_eq!(config.build_cmd, "go build ./... -ldflags=-X");
}

#[test]
fn test_threshold_boundaries_from_file() {
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "THRESHOLD=0\n");
    assert_eq!(load_config(&path).unwrap().threshold, 0);

    let path = write_config(&dir, "THRESHOLD=100\n");
    assert_eq!(load_config(&path).unwrap().threshold, 100);

    let path = write_config(&dir, "THRESHOLD=101\n");
    let err = load_config(&path).unwrap_err();
    assert!(matches!(err, ConfigError::OutOfRange { .. }));
    assert_eq!(err.key(), Some("THRESHOLD"));
}

#[test]
fn test_malformed_line_reports_line_number() {
    let dir = TempDir::new().unwrap();
    let content = GO_TEMPLATE.replace("THRESHOLD=80", "FOO BAR");
    let path = write_config(&dir, &content);

    let expected_line = GO_TEMPLATE
        .lines()
        .position(|line| line == "THRESHOLD=80")
        .unwrap()
        + 1;

    let err = load_config(&path).unwrap_err();
    assert_eq!(err.line(), Some(expected_line));
    assert!(err.to_string().contains("FOO BAR"));
}

#[test]
fn test_omitted_threshold_uses_default() {
    let dir = TempDir::new().unwrap();
    let content: String = GO_TEMPLATE
        .lines()
        .filter(|line| !line.starts_with("THRESHOLD="))
        .map(|line| format!("{line}\n"))
        .collect();
    let path = write_config(&dir, &content);

    let loaded = load_config_from_file(&path).unwrap();
    assert!(!loaded.raw.contains_key("THRESHOLD"));
    assert_eq!(loaded.config.threshold, 80);
}
