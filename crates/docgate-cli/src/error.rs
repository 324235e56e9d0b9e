//! CLI-specific error types and exit codes.

use docgate_core::{ConfigError, PathError};
use docgate_mcp::ServerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration missing, unreadable or incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The installation failed validation.
    #[error("Invalid installation:\n  {}", .0.join("\n  "))]
    Invalid(Vec<String>),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The protocol server stopped with an error.
    #[error("Server error: {0}")]
    Server(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow sysexits.h where one fits:
    /// - 1: General error
    /// - 74: EX_IOERR
    /// - 78: EX_CONFIG
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Invalid(_) => 78,
            Self::Io(_) => 74,
            Self::Server(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<ServerError> for CliError {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Io(e) => Self::Io(e.to_string()),
            other => Self::Server(other.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
