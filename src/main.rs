//! # QMux - Chat Request to Amazon Q Converter
//!
//! A converter that translates OpenAI- and Anthropic/Claude-compatible chat
//! completion requests into the Amazon Q conversation format. Built with Rust
//! following SOLID principles for type safety, performance, and reliability.
//!
//! ## Features
//!
//! - **Claude request conversion**: Typed content blocks, tool calls, tool
//!   results and images flattened into an alternating turn history
//! - **OpenAI request conversion**: Text-only transcript flattening
//! - **Tool Documentation**: Oversized tool descriptions truncated in the spec
//!   and re-injected as a documentation section
//! - **Error Handling**: Comprehensive error handling with proper Result types
//! - **Type Safety**: Leverages Rust's type system for compile-time safety
//! - **Configurable Logging**: Structured logging with tracing
//!
//! ## Quick Start
//!
//! ```bash
//! # Convert a Claude request read from stdin
//! qmux < claude_request.json
//!
//! # Convert an OpenAI request
//! qmux --from openai < openai_request.json
//! ```
//!
//! ## Configuration
//!
//! Configure the converter using environment variables:
//!
//! ```bash
//! # Optional: environment descriptor reported to the backend
//! export QMUX_OPERATING_SYSTEM=linux
//! export QMUX_WORKING_DIRECTORY=/home/user/project
//!
//! # Optional: origin marker (default: CLI)
//! export QMUX_ORIGIN=CLI
//!
//! # Optional: logging
//! export LOG_LEVEL=info
//! ```
//!
//! ## License
//!
//! Licensed under either of Apache License, Version 2.0 or MIT license at your option.
//!
//! Authors: Jaro <yarenty@gmail.com>
//!
//! Copyright (c) 2026 SkyCorp
//!

/* --- uses ------------------------------------------------------------------------------------ */

use std::env;
use std::io::Read;

use tracing::Level;

use qmux::config::{Config, LogLevel, ValidationSeverity};
use qmux::converter::claude_to_amazonq::ClaudeRequest;
use qmux::converter::openai_to_amazonq::OpenAiRequest;
use qmux::error::{QmuxError, Result};
use qmux::{ClaudeToAmazonQConverter, OpenAiToAmazonQConverter};

/* --- constants ------------------------------------------------------------------------------ */

/** the version as defined in cargo.toml */
const VERSION: &str = env!("CARGO_PKG_VERSION");

/* --- types ----------------------------------------------------------------------------------- */

///
/// Source request format selected with `--from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceFormat {
    /** Anthropic/Claude messages format (default) */
    Claude,
    /** OpenAI chat completions format */
    OpenAi,
}

/* --- start of code -------------------------------------------------------------------------- */

///
/// Main application entry point for the QMux converter.
///
/// Handles CLI arguments, initializes logging, reads one JSON request from
/// stdin, converts it, and writes the Amazon Q JSON to stdout.
fn main() {
    // Handle CLI arguments before config loading
    handle_cli_args();

    if let Err(e) = run() {
        // Print error message line by line to ensure proper formatting
        let error_msg = format!("{}", e);
        eprintln!("Error:");
        for line in error_msg.lines() {
            eprintln!("{}", line);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::from_env()?;
    initialize_logging(&config);

    let source = parse_source_format()?;

    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;

    let output = match source {
        SourceFormat::Claude => {
            let request: ClaudeRequest = serde_json::from_str(&input)?;
            let converter = ClaudeToAmazonQConverter::new(&config);
            serde_json::to_string_pretty(&converter.convert(request, None)?)?
        }
        SourceFormat::OpenAi => {
            let request: OpenAiRequest = serde_json::from_str(&input)?;
            let converter = OpenAiToAmazonQConverter::new(&config);
            serde_json::to_string_pretty(&converter.convert(request)?)?
        }
    };

    println!("{}", output);
    Ok(())
}

///
/// Handle command line arguments like --version and --help before config loading.
///
/// This ensures these commands work even without proper configuration.
fn handle_cli_args() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        return; // No arguments, proceed with normal conversion
    }

    match args[1].as_str() {
        "--version" | "-V" => {
            println!("qmux {}", VERSION);
            std::process::exit(0);
        }
        "--help" | "-h" => {
            print_help();
            std::process::exit(0);
        }
        "validate" => {
            let exit_code = run_validate();
            std::process::exit(exit_code);
        }
        "--from" => {
            // Handled during the normal run
        }
        _ => {
            // Unknown command or option - show error and help
            if args[1].starts_with('-') {
                eprintln!("Error: Unknown option: {}", args[1]);
                eprintln!();
                print_help();
                std::process::exit(1);
            } else {
                eprintln!("Error: Unknown command: {}", args[1]);
                eprintln!();
                eprintln!("Available commands:");
                eprintln!("  validate  - Validate configuration");
                eprintln!();
                eprintln!("Available options:");
                eprintln!("  --from FORMAT  - Source format: claude or openai");
                eprintln!("  --version, -V  - Show version");
                eprintln!("  --help, -h     - Show help");
                eprintln!();
                eprintln!("Run 'qmux --help' for more information.");
                std::process::exit(1);
            }
        }
    }
}

///
/// Resolve the source format from the --from option.
///
/// # Returns
///  * Selected source format, Claude when the option is absent
///  * `QmuxError::Config` for an unknown format name
fn parse_source_format() -> Result<SourceFormat> {
    let args: Vec<String> = env::args().collect();

    let Some(pos) = args.iter().position(|arg| arg == "--from") else {
        return Ok(SourceFormat::Claude);
    };

    match args.get(pos + 1).map(String::as_str) {
        Some("claude") => Ok(SourceFormat::Claude),
        Some("openai") => Ok(SourceFormat::OpenAi),
        Some(other) => Err(QmuxError::Config(format!(
            "Unknown source format: {}\n\
             \n\
             Supported formats: claude, openai",
            other
        ))),
        None => Err(QmuxError::Config(
            "--from requires a format argument (claude or openai)".to_string(),
        )),
    }
}

///
/// Print help information for the QMux CLI.
fn print_help() {
    println!("QMux v{}", VERSION);
    println!("Converter translating OpenAI/Claude chat requests to Amazon Q format");
    println!();
    println!("USAGE:");
    println!("    qmux [COMMAND] [OPTIONS] < request.json");
    println!();
    println!("COMMANDS:");
    println!("    validate            Validate configuration and exit");
    println!();
    println!("OPTIONS:");
    println!("    --from FORMAT       Source format: claude (default) or openai");
    println!("    -h, --help          Print help information");
    println!("    -V, --version       Print version information");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    QMUX_OPERATING_SYSTEM     Operating system reported to the backend (default: detected)");
    println!("    QMUX_WORKING_DIRECTORY    Working directory reported to the backend (default: cwd)");
    println!("    QMUX_ORIGIN               Origin marker (default: CLI)");
    println!(
        "    LOG_LEVEL                 Log level: trace, debug, info, warn, error (default: info)"
    );
    println!();
    println!("EXAMPLES:");
    println!("    qmux < request.json             Convert a Claude request");
    println!("    qmux --from openai < req.json   Convert an OpenAI request");
    println!("    qmux validate                   Validate and exit");
    println!();
    println!("For more information, visit: https://github.com/yarenty/qmux");
}

///
/// Run the validate command: check configuration and report issues.
///
/// # Returns
///  * Process exit code: 0 when no errors were found, 1 otherwise
fn run_validate() -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[ERROR] Failed to load configuration: {}", e);
            return 1;
        }
    };

    let issues = config.validate();
    if issues.is_empty() {
        println!("Configuration is valid.");
        return 0;
    }

    let mut has_errors = false;
    for issue in &issues {
        let tag = match issue.severity {
            ValidationSeverity::Error => {
                has_errors = true;
                "[ERROR]"
            }
            ValidationSeverity::Warning => "[WARN]",
            ValidationSeverity::Info => "[INFO]",
        };
        println!("{} {}: {}", tag, issue.field, issue.message);
        if let Some(suggestion) = &issue.suggestion {
            println!("        {}", suggestion);
        }
    }

    if has_errors { 1 } else { 0 }
}

///
/// Initialize the tracing subscriber from the configured log level.
fn initialize_logging(config: &Config) {
    let log_level = match config.log_level {
        LogLevel::Trace => Level::TRACE,
        LogLevel::Debug => Level::DEBUG,
        LogLevel::Info => Level::INFO,
        LogLevel::Warn => Level::WARN,
        LogLevel::Error => Level::ERROR,
    };

    // Logs go to stderr; stdout carries the converted request only.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
