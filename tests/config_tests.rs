//! Configuration module tests
//!
//! Tests for configuration loading, validation, and parsing from environment
//! variables.
//!
//! Uses temp-env to safely manage environment variables during tests,
//! automatically restoring them after each test completes.

use qmux::config::{Config, LogLevel, ValidationSeverity};
use temp_env::with_vars;

/// Test that detected defaults are used when no variables are set
#[test]
fn test_detected_defaults() {
    // Skip this test if .env file exists, as dotenv() will load vars from it
    if std::path::Path::new(".env").exists() {
        eprintln!("Skipping test_detected_defaults: .env file exists");
        return;
    }

    with_vars(
        vec![
            ("QMUX_OPERATING_SYSTEM", None::<&str>),
            ("QMUX_WORKING_DIRECTORY", None::<&str>),
            ("QMUX_ORIGIN", None::<&str>),
            ("LOG_LEVEL", None::<&str>),
        ],
        || {
            let config = Config::from_env().expect("Should load config with defaults");
            assert_eq!(config.operating_system, std::env::consts::OS);
            assert!(!config.working_directory.is_empty());
            assert_eq!(config.origin, "CLI", "Default origin should be CLI");
            assert_eq!(config.log_level, LogLevel::Info);
        },
    );
}

/// Test that explicit environment overrides are used
#[test]
fn test_environment_overrides() {
    with_vars(
        vec![
            ("QMUX_OPERATING_SYSTEM", Some("macos")),
            ("QMUX_WORKING_DIRECTORY", Some("/workspace")),
            ("QMUX_ORIGIN", Some("IDE")),
            ("LOG_LEVEL", Some("debug")),
        ],
        || {
            let config = Config::from_env().expect("Should load config");
            assert_eq!(config.operating_system, "macos");
            assert_eq!(config.working_directory, "/workspace");
            assert_eq!(config.origin, "IDE");
            assert_eq!(config.log_level, LogLevel::Debug);
        },
    );
}

/// Test log level parsing
#[test]
fn test_log_level_parsing() {
    let levels = vec!["trace", "debug", "info", "warn", "error"];
    for level in levels {
        with_vars(vec![("LOG_LEVEL", Some(level))], || {
            let config = Config::from_env().expect("Should load config");
            assert_eq!(
                format!("{:?}", config.log_level).to_lowercase(),
                level,
                "Should parse log level correctly"
            );
        });
    }
}

/// Test that log level parsing is case-insensitive with info fallback
#[test]
fn test_log_level_fallback() {
    with_vars(vec![("LOG_LEVEL", Some("DEBUG"))], || {
        let config = Config::from_env().expect("Should load config");
        assert_eq!(config.log_level, LogLevel::Debug);
    });

    with_vars(vec![("LOG_LEVEL", Some("noisy"))], || {
        let config = Config::from_env().expect("Should load config");
        assert_eq!(config.log_level, LogLevel::Info, "Unknown level should fall back to info");
    });
}

/// Test trace enablement helper
#[test]
fn test_is_trace_enabled() {
    assert!(LogLevel::Trace.is_trace_enabled());
    assert!(LogLevel::Debug.is_trace_enabled());
    assert!(!LogLevel::Info.is_trace_enabled());
    assert!(!LogLevel::Warn.is_trace_enabled());
    assert!(!LogLevel::Error.is_trace_enabled());
}

/// Test the environment descriptor wire mapping
#[test]
fn test_env_state_mapping() {
    let config = Config {
        operating_system: "linux".to_string(),
        working_directory: "/srv/app".to_string(),
        origin: "CLI".to_string(),
        log_level: LogLevel::Info,
    };

    let env_state = config.env_state();
    assert_eq!(env_state.operating_system, "linux");
    assert_eq!(env_state.current_working_directory, "/srv/app");
}

/// Test that a well-formed configuration validates cleanly
#[test]
fn test_validate_clean_config() {
    let config = Config {
        operating_system: "linux".to_string(),
        working_directory: "/srv/app".to_string(),
        origin: "CLI".to_string(),
        log_level: LogLevel::Info,
    };

    assert!(config.validate().is_empty(), "Valid config should produce no issues");
}

/// Test that empty fields are reported with appropriate severities
#[test]
fn test_validate_reports_issues() {
    let config = Config {
        operating_system: String::new(),
        working_directory: "relative/path".to_string(),
        origin: String::new(),
        log_level: LogLevel::Info,
    };

    let issues = config.validate();
    assert_eq!(issues.len(), 3);

    let os_issue = issues.iter().find(|i| i.field == "QMUX_OPERATING_SYSTEM").unwrap();
    assert_eq!(os_issue.severity, ValidationSeverity::Error);

    let cwd_issue = issues.iter().find(|i| i.field == "QMUX_WORKING_DIRECTORY").unwrap();
    assert_eq!(cwd_issue.severity, ValidationSeverity::Warning);

    let origin_issue = issues.iter().find(|i| i.field == "QMUX_ORIGIN").unwrap();
    assert_eq!(origin_issue.severity, ValidationSeverity::Warning);
}
