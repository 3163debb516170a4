//!
//! Configuration management for the QMux request converter.
//!
//! Handles loading configuration from environment variables with sensible
//! defaults detected from the running process. Follows Single Responsibility
//! Principle - manages all configuration concerns.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use std::env;

use crate::converter::amazonq::EnvState;
use crate::error::Result;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application configuration structure.
///
/// Carries the environment descriptor stamped on every converted user turn,
/// the origin marker, and the logging level. All values have working defaults
/// so a bare environment still produces valid requests.
#[derive(Debug, Clone)]
pub struct Config {
    /** operating system reported to the backend */
    pub operating_system: String,
    /** working directory reported to the backend */
    pub working_directory: String,
    /** request origin marker, "CLI" unless overridden */
    pub origin: String,
    /** application logging level */
    pub log_level: LogLevel,
}

///
/// Logging level enumeration.
///
/// Defines available log levels with helper methods for level checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

///
/// Configuration validation issue.
///
/// Represents a single validation problem found during configuration check.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Configuration field name
    pub field: String,
    /// Severity of the issue
    pub severity: ValidationSeverity,
    /// Description of the issue
    pub message: String,
    /// Optional suggestion for fixing the issue
    pub suggestion: Option<String>,
}

///
/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationSeverity {
    /// Error - configuration is invalid and will cause failures
    Error,
    /// Warning - configuration may work but has potential issues
    Warning,
    /// Info - informational note about configuration
    Info,
}

/* --- constants ------------------------------------------------------------------------------ */

/** Origin marker used when none is configured */
const DEFAULT_ORIGIN: &str = "CLI";

/** Working directory reported when the process cwd cannot be determined */
const FALLBACK_WORKING_DIRECTORY: &str = "/";

/* --- start of code -------------------------------------------------------------------------- */

impl LogLevel {
    ///
    /// Check if trace-level logging is enabled.
    ///
    /// Returns true for Trace and Debug levels, which enable detailed logging
    /// of conversion steps.
    ///
    /// # Returns
    ///  * `true` if trace logging should be enabled
    ///  * `false` otherwise
    pub fn is_trace_enabled(self) -> bool {
        matches!(self, LogLevel::Trace | LogLevel::Debug)
    }
}

impl From<&str> for LogLevel {
    ///
    /// Convert string representation to LogLevel enum.
    ///
    /// Case-insensitive conversion with Info as the default fallback.
    ///
    /// # Arguments
    ///  * `s` - string representation of log level
    ///
    /// # Returns
    ///  * Corresponding LogLevel enum value
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "trace" => LogLevel::Trace,
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warn" => LogLevel::Warn,
            "error" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl Default for Config {
    ///
    /// Configuration with values detected from the running process.
    fn default() -> Self {
        Config {
            operating_system: detect_operating_system(),
            working_directory: detect_working_directory(),
            origin: DEFAULT_ORIGIN.to_string(),
            log_level: LogLevel::Info,
        }
    }
}

impl Config {
    ///
    /// Load configuration from environment variables.
    ///
    /// Attempts to load .env file if present, then reads configuration from
    /// environment variables, falling back to values detected from the
    /// running process. Follows Open/Closed Principle - can be extended
    /// without modification.
    ///
    /// # Returns
    ///  * Configuration object with all settings loaded
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let operating_system =
            env::var("QMUX_OPERATING_SYSTEM").unwrap_or_else(|_| detect_operating_system());
        let working_directory =
            env::var("QMUX_WORKING_DIRECTORY").unwrap_or_else(|_| detect_working_directory());
        let origin = env::var("QMUX_ORIGIN").unwrap_or_else(|_| DEFAULT_ORIGIN.to_string());
        let log_level = Self::get_log_level();

        Ok(Config { operating_system, working_directory, origin, log_level })
    }

    ///
    /// Environment descriptor in backend wire form.
    ///
    /// # Returns
    ///  * EnvState carrying the configured OS and working directory
    pub fn env_state(&self) -> EnvState {
        EnvState {
            operating_system: self.operating_system.clone(),
            current_working_directory: self.working_directory.clone(),
        }
    }

    ///
    /// Get the log level from environment or use default.
    ///
    /// # Returns
    ///  * LogLevel enum value
    fn get_log_level() -> LogLevel {
        let log_level_str = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        LogLevel::from(log_level_str.as_str())
    }

    ///
    /// Validate configuration and return detailed validation results.
    ///
    /// Checks all configuration values for correctness and provides helpful
    /// suggestions for any issues found.
    ///
    /// # Returns
    ///  * Vector of validation issues (empty if all valid)
    pub fn validate(&self) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.operating_system.is_empty() {
            issues.push(ValidationIssue {
                field: "QMUX_OPERATING_SYSTEM".to_string(),
                severity: ValidationSeverity::Error,
                message: "Operating system name is empty".to_string(),
                suggestion: Some(
                    "Set QMUX_OPERATING_SYSTEM or unset it to use the detected value".to_string(),
                ),
            });
        }

        if self.working_directory.is_empty() {
            issues.push(ValidationIssue {
                field: "QMUX_WORKING_DIRECTORY".to_string(),
                severity: ValidationSeverity::Error,
                message: "Working directory is empty".to_string(),
                suggestion: Some(
                    "Set QMUX_WORKING_DIRECTORY or unset it to use the process cwd".to_string(),
                ),
            });
        } else if !self.working_directory.starts_with('/') && !self.working_directory.contains(':')
        {
            issues.push(ValidationIssue {
                field: "QMUX_WORKING_DIRECTORY".to_string(),
                severity: ValidationSeverity::Warning,
                message: format!(
                    "Working directory is not an absolute path: {}",
                    self.working_directory
                ),
                suggestion: Some("Use an absolute path like /home/user/project".to_string()),
            });
        }

        if self.origin.is_empty() {
            issues.push(ValidationIssue {
                field: "QMUX_ORIGIN".to_string(),
                severity: ValidationSeverity::Warning,
                message: "Origin marker is empty".to_string(),
                suggestion: Some(format!("The backend expects \"{}\" here", DEFAULT_ORIGIN)),
            });
        }

        issues
    }
}

///
/// Operating system name of the running process.
fn detect_operating_system() -> String {
    env::consts::OS.to_string()
}

///
/// Working directory of the running process, or "/" when unavailable.
fn detect_working_directory() -> String {
    env::current_dir()
        .map(|path| path.to_string_lossy().into_owned())
        .unwrap_or_else(|_| FALLBACK_WORKING_DIRECTORY.to_string())
}
