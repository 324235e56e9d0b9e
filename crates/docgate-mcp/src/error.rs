//! Per-request error taxonomy for the operation handlers.

use docgate_core::{ProcessOutput, ToolOutcome};
use thiserror::Error;

/// Why an operation did not produce its artifact.
#[derive(Debug, Error)]
pub enum OperationError {
    /// Bad arguments or missing/unsuitable input files.
    #[error("{0}")]
    Validation(String),

    /// The external converter failed; `details` carries its output.
    #[error("{message}")]
    Process { message: String, details: String },

    /// The converter reported success but the artifact is missing.
    #[error("{message}")]
    Postcondition { message: String, details: String },

    /// Broken installation or unexpected I/O failure.
    #[error("{0}")]
    Internal(String),
}

impl OperationError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Failure of a converter run, with its captured streams as details.
    pub fn process(message: impl Into<String>, output: &ProcessOutput) -> Self {
        Self::Process {
            message: message.into(),
            details: output.diagnostics(),
        }
    }

    /// Missing artifact after a successful run.
    pub fn postcondition(message: impl Into<String>, output: &ProcessOutput) -> Self {
        Self::Postcondition {
            message: message.into(),
            details: output.diagnostics(),
        }
    }
}

impl From<OperationError> for ToolOutcome {
    fn from(err: OperationError) -> Self {
        match err {
            OperationError::Validation(message) | OperationError::Internal(message) => {
                Self::error(message)
            }
            OperationError::Process { message, details }
            | OperationError::Postcondition { message, details } => {
                Self::error_with_details(message, details)
            }
        }
    }
}
