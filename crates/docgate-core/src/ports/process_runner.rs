//! Process runner trait definition.
//!
//! This port defines how operation handlers launch the external converters.
//! Implementations capture output, enforce limits and classify failures so
//! callers never inspect message text.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Default per-stream capture ceiling (10 MiB).
pub const DEFAULT_OUTPUT_LIMIT: usize = 10 * 1024 * 1024;

/// What to launch.
///
/// `Direct` passes an argument vector with no shell involved. `Shell` runs a
/// program through the operator's shell so launcher scripts on the shell's
/// PATH resolve; it is reserved for the renderer launcher. The runner places
/// `program` on the command line as-is and quotes every argument for the
/// shell it uses, so arguments are never expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Direct {
        program: String,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
        /// Extra environment variables for the child.
        env: Vec<(String, String)>,
    },
    Shell {
        program: String,
        args: Vec<String>,
        working_dir: Option<PathBuf>,
        env: Vec<(String, String)>,
    },
}

impl Invocation {
    /// Direct invocation with no working directory or environment overrides.
    pub fn direct<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Direct {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// Shell invocation with no working directory or environment overrides.
    pub fn shell<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Shell {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            working_dir: None,
            env: Vec::new(),
        }
    }

    /// Set the child's working directory.
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        match &mut self {
            Self::Direct { working_dir, .. } | Self::Shell { working_dir, .. } => {
                *working_dir = Some(dir.into());
            }
        }
        self
    }

    /// Add an environment variable for the child.
    #[must_use]
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        match &mut self {
            Self::Direct { env, .. } | Self::Shell { env, .. } => {
                env.push((key.into(), value.into()));
            }
        }
        self
    }

    pub fn working_dir(&self) -> Option<&PathBuf> {
        match self {
            Self::Direct { working_dir, .. } | Self::Shell { working_dir, .. } => {
                working_dir.as_ref()
            }
        }
    }

    pub fn env(&self) -> &[(String, String)] {
        match self {
            Self::Direct { env, .. } | Self::Shell { env, .. } => env,
        }
    }

    /// The program and its arguments, whichever way it is launched.
    pub fn command(&self) -> (&str, &[String]) {
        match self {
            Self::Direct { program, args, .. } | Self::Shell { program, args, .. } => {
                (program.as_str(), args.as_slice())
            }
        }
    }

    pub const fn is_shell(&self) -> bool {
        matches!(self, Self::Shell { .. })
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (program, args) = self.command();
        if self.is_shell() {
            f.write_str("[shell] ")?;
        }
        write!(f, "{program}")?;
        for arg in args {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Which captured stream a limit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

impl fmt::Display for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
        })
    }
}

/// Why a process did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessFailure {
    /// The program (or the shell's command) could not be found.
    #[error("Command not found")]
    CommandNotFound,

    #[error("Failed to start {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    /// Non-zero exit; `None` when terminated by a signal.
    #[error("{}", match .0 {
        Some(code) => format!("Process exited with code {code}"),
        None => "Process terminated by signal".to_string(),
    })]
    ExitStatus(Option<i32>),

    #[error("Process output on {stream} exceeded {limit} bytes")]
    OutputLimitExceeded { stream: OutputStream, limit: usize },

    #[error("Process timed out after {}s", .0.as_secs())]
    TimedOut(Duration),

    #[error("I/O error while running process: {0}")]
    Io(String),
}

/// Captured result of one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
    /// Set whenever `success` is false.
    pub error: Option<ProcessFailure>,
}

impl ProcessOutput {
    /// A successful run with the given stdout.
    pub fn succeeded(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
            error: None,
        }
    }

    /// A failed run with no captured output.
    pub fn failed(failure: ProcessFailure) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(failure),
        }
    }

    /// Attach captured stderr.
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = stderr.into();
        self
    }

    pub fn is_command_not_found(&self) -> bool {
        matches!(self.error, Some(ProcessFailure::CommandNotFound))
    }

    /// Captured streams formatted as a diagnostics block.
    pub fn diagnostics(&self) -> String {
        let mut out = String::new();
        if let Some(failure) = &self.error {
            out.push_str(&failure.to_string());
            out.push('\n');
        }
        if !self.stdout.trim().is_empty() {
            out.push_str("\nSTDOUT:\n");
            out.push_str(self.stdout.trim_end());
            out.push('\n');
        }
        if !self.stderr.trim().is_empty() {
            out.push_str("\nSTDERR:\n");
            out.push_str(self.stderr.trim_end());
            out.push('\n');
        }
        out
    }
}

/// Launches external converter processes.
///
/// Never fails at the type level: spawn errors, limits and exit codes are
/// all reported through [`ProcessOutput::error`].
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, invocation: &Invocation) -> ProcessOutput;
}
