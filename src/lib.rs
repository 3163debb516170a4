//! # QMux - Chat Request to Amazon Q Converter Library
//!
//! This crate translates chat-completion requests between incompatible JSON
//! schemas: OpenAI-style and Anthropic/Claude-style requests are converted into
//! the Amazon Q conversation format (an ordered history of alternating
//! user/assistant turns plus a single current message). While usable as a
//! binary, this library exposes its core functionality for programmatic use.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use qmux::{Config, ClaudeToAmazonQConverter};
//! use qmux::converter::claude_to_amazonq::ClaudeRequest;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = Config::from_env()?;
//!
//!     // Parse an incoming Claude request and convert it
//!     let request: ClaudeRequest = serde_json::from_str(r#"{
//!         "model": "claude-sonnet-4-5",
//!         "messages": [{"role": "user", "content": "Hello!"}]
//!     }"#)?;
//!     let converter = ClaudeToAmazonQConverter::new(&config);
//!     let amazonq = converter.convert(request, None)?;
//!
//!     println!("{}", serde_json::to_string_pretty(&amazonq)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration management and environment variable handling
//! - [`converter`] - Format conversion from OpenAI/Claude to Amazon Q format
//! - [`error`] - Error types and handling

pub mod config;
pub mod converter;
pub mod error;

// Re-export commonly used types
pub use config::{Config, ValidationIssue, ValidationSeverity};
pub use converter::{ClaudeToAmazonQConverter, OpenAiToAmazonQConverter};
pub use error::QmuxError;

/// Converts a Claude-format request into an Amazon Q request.
///
/// This is a convenience function that builds a converter from the given
/// configuration and runs a single conversion.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `request` - Claude format request
/// * `conversation_id` - Identifier of the conversation being continued, or
///   `None` to start a fresh one
///
/// # Errors
///
/// Returns a `QmuxError` if conversion fails.
pub fn claude_to_amazonq(
    config: &Config,
    request: converter::claude_to_amazonq::ClaudeRequest,
    conversation_id: Option<String>,
) -> error::Result<converter::amazonq::AmazonQRequest> {
    ClaudeToAmazonQConverter::new(config).convert(request, conversation_id)
}

/// Converts an OpenAI-format request into an Amazon Q request.
///
/// This is a convenience function that builds a converter from the given
/// configuration and runs a single conversion.
///
/// # Arguments
///
/// * `config` - Application configuration
/// * `request` - OpenAI format request
///
/// # Errors
///
/// Returns a `QmuxError` if conversion fails.
pub fn openai_to_amazonq(
    config: &Config,
    request: converter::openai_to_amazonq::OpenAiRequest,
) -> error::Result<converter::amazonq::AmazonQRequest> {
    OpenAiToAmazonQConverter::new(config).convert(request)
}
