//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: field error (bad dimensions)
//! - 11: I/O error (PNG or seed file read/write)
//! - 12: input error (unknown theme, bad color, bad config JSON, invalid contact form)
//! - 13: serialization error

use constellation_core::ConstellationError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A field-level error that is not the user's input.
    Field(ConstellationError),
    Io(String),
    /// A user input error (theme name, color, config values, form fields).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<ConstellationError> for CliError {
    fn from(e: ConstellationError) -> Self {
        match e {
            ConstellationError::Io(msg) => CliError::Io(msg),
            ConstellationError::UnknownTheme(_)
            | ConstellationError::InvalidColor(_)
            | ConstellationError::InvalidPalette(_)
            | ConstellationError::InvalidConfig(_) => CliError::Input(e.to_string()),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
