//! Path-related error types.
//!
//! Provides semantic errors for path operations without exposing
//! implementation details or adapter-specific concerns.

use thiserror::Error;

/// Errors that can occur while locating docgate's roots.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the user's configuration directory.
    #[error("Cannot determine user configuration directory")]
    NoConfigDir,

    /// Could not determine where the running executable lives.
    #[error("Cannot determine executable location: {0}")]
    NoExecutableDir(String),

    /// Failed to get the current working directory.
    #[error("Cannot determine current directory: {0}")]
    CurrentDirError(String),
}
