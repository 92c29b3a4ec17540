//! Integration tests for CLI argument handling
//!
//! Runs the binary for the paths that exit without touching the network or
//! the terminal.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cityforecast"))
        .args(args)
        .env_remove("OPENWEATHER_API_KEY")
        .env_remove("OPENWEATHER_BASE_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute cityforecast")
}

/// Writes a config file into a fresh temp directory
fn config_file(content: &str) -> (TempDir, String) {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("Failed to write config");
    let path = path.to_string_lossy().to_string();
    (dir, path)
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("cityforecast"),
        "Help should mention cityforecast"
    );
    assert!(stdout.contains("--plain"), "Help should mention --plain flag");
    assert!(stdout.contains("--json"), "Help should mention --json flag");
}

#[test]
fn test_plain_without_city_fails() {
    let output = run_cli(&["--plain"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("city name is required"),
        "Should explain that a city is needed: {}",
        stderr
    );
}

#[test]
fn test_plain_and_json_together_fail() {
    let output = run_cli(&["Lisbon", "--plain", "--json"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_api_key_reports_remediation() {
    let (_dir, path) = config_file("unit = \"c\"\n");
    let output = run_cli(&["--plain", "Lisbon", "--config", &path]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("API key not configured"),
        "Should report the missing key: {}",
        stderr
    );
    assert!(stderr.contains("OPENWEATHER_API_KEY"));
    assert!(output.stdout.is_empty(), "Nothing should reach stdout");
}

#[test]
fn test_invalid_unit_fails() {
    let (_dir, path) = config_file("");
    let output = run_cli(&["--plain", "Lisbon", "--unit", "kelvin", "--config", &path]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid value for unit"),
        "Should name the bad setting: {}",
        stderr
    );
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("absent.toml");
    let output = run_cli(&["--plain", "Lisbon", "--config", &path.to_string_lossy()]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read config file"), "{}", stderr);
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use cityforecast::cli::{Cli, OutputMode};

    #[test]
    fn test_json_mode_with_city() {
        let cli = Cli::parse_from(["cityforecast", "--json", "São Paulo"]);
        assert_eq!(
            cli.output_mode().unwrap(),
            OutputMode::Json {
                city: "São Paulo".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["cityforecast", "--plan"]).is_err());
    }
}
