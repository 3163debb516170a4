//!
//! Error handling for the QMux request converter.
//!
//! Defines all error types used throughout the crate using thiserror
//! for ergonomic error handling. Follows Rust best practices for error design.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- uses ------------------------------------------------------------------------------------ */

use thiserror::Error;

/* --- types ----------------------------------------------------------------------------------- */

///
/// Application error types following Rust best practices.
///
/// Covers all possible error conditions that can occur during request conversion.
/// Uses thiserror for automatic Display and Error trait implementations.
#[derive(Error, Debug)]
pub enum QmuxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Conversion error: {0}")]
    Conversion(String),
}

/* --- start of code -------------------------------------------------------------------------- */

/// Result type alias for cleaner error handling throughout the application
pub type Result<T> = std::result::Result<T, QmuxError>;
