//! Integration tests for config warning behavior.

use std::fs;
use std::process::{Command, Stdio};

/// An unreadable config falls back to defaults with a warning; the command
/// itself then fails on the missing session file.
#[test]
fn test_config_warning_on_invalid_toml() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join("wmsession");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    fs::write(config_dir.join("config.toml"), "invalid toml [[[")
        .expect("Failed to write invalid config");

    let output = Command::new(env!("CARGO_BIN_EXE_wmsession"))
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["restore", "-f", "missing.json"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute wmsession");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(
        stderr.contains("Tip: Check"),
        "Expected tip about config files in stderr, got: {}",
        stderr
    );
    assert!(!output.status.success());
}

#[test]
fn test_config_warning_names_explicit_file() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let explicit = temp_dir.path().join("custom.toml");
    fs::write(&explicit, "[restore]\npoll_interval_ms = 0\n").expect("Failed to write config");

    let output = Command::new(env!("CARGO_BIN_EXE_wmsession"))
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["--config", explicit.to_str().unwrap(), "restore", "-f", "missing.json"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute wmsession");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Warning: Could not load config"),
        "Expected warning in stderr, got: {}",
        stderr
    );
    assert!(stderr.contains("custom.toml"), "stderr: {}", stderr);
}

#[test]
fn test_no_warning_on_valid_config() {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_dir = temp_dir.path().join("wmsession");
    fs::create_dir_all(&config_dir).expect("Failed to create config dir");
    fs::write(
        config_dir.join("config.toml"),
        r#"
[restore]
timeout_ms = 5000

[resolve]
allow_raw_cmdline = false
"#,
    )
    .expect("Failed to write valid config");

    let output = Command::new(env!("CARGO_BIN_EXE_wmsession"))
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["restore", "-f", "missing.json"])
        .stdin(Stdio::null())
        .output()
        .expect("Failed to execute wmsession");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("Warning: Could not load config"),
        "Valid config should not produce a warning, got: {}",
        stderr
    );
}
