//! CLI - Command Line Interface for RadioMix
//!
//! Every operation is scriptable. All output is JSON-parseable.
//!
//! # Examples
//!
//! ```bash
//! # Resolve a mix
//! radiomix mix "bohemian rhapsody" --limit 10 --json
//!
//! # Relay the audio of a track to a file
//! radiomix relay https://youtu.be/fJ9rUzIMcZQ --title "Bohemian Rhapsody"
//!
//! # Pipe it into a player
//! radiomix relay https://youtu.be/fJ9rUzIMcZQ --mode play --stdout | mpv -
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::error::RadioMixError;
use crate::models::DeliveryMode;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Provider (network, auth, quota) error
    ProviderError = 3,
    /// Nothing matched the query
    NotFound = 4,
    /// Missing API key or bad configuration
    ConfigError = 5,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

impl From<&RadioMixError> for ExitCode {
    fn from(err: &RadioMixError) -> Self {
        match err {
            RadioMixError::InvalidArgument(_) => ExitCode::InvalidArgs,
            RadioMixError::NotFound(_) => ExitCode::NotFound,
            RadioMixError::Provider(_) => ExitCode::ProviderError,
            RadioMixError::Configuration(_) => ExitCode::ConfigError,
        }
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// RadioMix - radio mixes and audio streams for any song
#[derive(Parser, Debug)]
#[command(
    name = "radiomix",
    version,
    about = "Resolve radio mixes for a song and relay their audio",
    after_help = "EXAMPLES:\n\
                  radiomix mix \"bohemian rhapsody\" -l 10   Resolve a 10-track mix\n\
                  radiomix relay https://youtu.be/ID       Save the audio of a track\n\
                  radiomix relay URL --mode play --stdout  Stream the audio to stdout"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the radio mix of a song
    #[command(visible_alias = "m")]
    Mix(MixCmd),

    /// Relay the audio of a track
    #[command(visible_alias = "r")]
    Relay(RelayCmd),
}

/// Resolve the radio mix seeded by the best match for a song title
#[derive(Args, Debug)]
pub struct MixCmd {
    /// Song title to search for
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of tracks (default from config, else 50)
    #[arg(long, short = 'l', value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,
}

/// Relay the audio of a YouTube video without buffering it
#[derive(Args, Debug)]
pub struct RelayCmd {
    /// Video URL (youtu.be, watch, embed or /v/ form)
    #[arg(required = true)]
    pub url: String,

    /// Display name used for the filename
    #[arg(long, short = 't')]
    pub title: Option<String>,

    /// Delivery mode: "download" (attachment), anything else plays inline
    #[arg(long, short = 'm', default_value = "download")]
    pub mode: String,

    /// Write the audio to this path (default: the sanitized filename)
    #[arg(long, short = 'o', conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Write the audio to stdout
    #[arg(long)]
    pub stdout: bool,
}

impl RelayCmd {
    pub fn delivery_mode(&self) -> DeliveryMode {
        DeliveryMode::from_str_loose(&self.mode)
    }
}

// =============================================================================
// JSON Output Types
// =============================================================================

/// Generic JSON output wrapper with status
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Summary of a finished relay
#[derive(Debug, Serialize, Deserialize)]
pub struct RelaySummary {
    pub video_id: String,
    pub content_type: String,
    pub content_disposition: String,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    pub bytes: u64,
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data
    pub fn print<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        if self.json {
            let output = JsonOutput::success(data);
            println!("{}", serde_json::to_string_pretty(&output)?);
        } else {
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print a library error with its semantic exit code
    pub fn fail(&self, err: &RadioMixError) -> ExitCode {
        self.error(err.to_string(), ExitCode::from(err))
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl std::fmt::Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
