//!
//! Format conversion modules for OpenAI and Claude API compatibility.
//!
//! Handles conversion from OpenAI and Anthropic/Claude request formats into
//! the Amazon Q conversation format. Each converter follows Single
//! Responsibility Principle and focuses on a specific conversion direction;
//! the target wire schema is shared.
//!
//! Authors:
//!   Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp

/* --- modules --------------------------------------------------------------------------------- */

pub mod amazonq;
pub mod claude_to_amazonq;
pub mod openai_to_amazonq;

/* --- start of code -------------------------------------------------------------------------- */

pub use claude_to_amazonq::ClaudeToAmazonQConverter;
pub use openai_to_amazonq::OpenAiToAmazonQConverter;
