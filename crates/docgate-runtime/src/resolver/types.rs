//! Types for executable resolution.

use std::fmt;
use std::path::PathBuf;

/// A command resolved to a concrete executable.
#[derive(Debug, Clone)]
pub struct ResolveResult {
    pub resolved_path: PathBuf,
    /// Every location checked, for diagnostics.
    pub attempts: Vec<Attempt>,
    /// Non-fatal notes such as an absolute path falling back to its basename.
    pub warnings: Vec<String>,
}

/// One candidate location and what was found there.
#[derive(Debug, Clone)]
pub struct Attempt {
    pub candidate: PathBuf,
    pub outcome: AttemptOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Ok,
    NotFound,
    NotAFile,
    NotExecutable,
    PermissionDenied,
    IoError(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "OK"),
            Self::NotFound => write!(f, "not found"),
            Self::NotAFile => write!(f, "not a file"),
            Self::NotExecutable => write!(f, "not executable"),
            Self::PermissionDenied => write!(f, "permission denied"),
            Self::IoError(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Command is empty")]
    EmptyCommand,

    #[error("Could not resolve '{command}' to an executable path. Tried:\n{attempts}")]
    NotResolved { command: String, attempts: String },
}

impl ResolveError {
    /// Build a `NotResolved` error listing every attempt.
    pub fn not_resolved(command: impl Into<String>, attempts: &[Attempt]) -> Self {
        let listed = attempts
            .iter()
            .map(|a| format!("  - {}: {}", a.candidate.display(), a.outcome))
            .collect::<Vec<_>>()
            .join("\n");

        Self::NotResolved {
            command: command.into(),
            attempts: if listed.is_empty() {
                "  (no candidates checked)".to_string()
            } else {
                listed
            },
        }
    }
}
