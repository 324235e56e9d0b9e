//! The uniform result envelope returned by every operation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Outcome of one operation request.
///
/// Exactly one variant is set; callers branch on [`ToolOutcome::is_error`]
/// rather than parsing message text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ToolOutcome {
    Success {
        /// Human-readable summary.
        message: String,
        /// Structured payload (paths produced, format, ...).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<Value>,
    },
    Error {
        /// Short, directly displayable headline.
        message: String,
        /// Multi-line diagnostics such as captured stdout/stderr.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
}

impl ToolOutcome {
    /// Create a success outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success {
            message: message.into(),
            data: None,
        }
    }

    /// Create a success outcome carrying structured data.
    pub fn success_with_data(message: impl Into<String>, data: Value) -> Self {
        Self::Success {
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create an error outcome.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
            details: None,
        }
    }

    /// Create an error outcome with a detail block; empty details are dropped.
    pub fn error_with_details(message: impl Into<String>, details: impl Into<String>) -> Self {
        let details = details.into();
        Self::Error {
            message: message.into(),
            details: (!details.trim().is_empty()).then_some(details),
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Headline of either variant.
    pub fn message(&self) -> &str {
        match self {
            Self::Success { message, .. } | Self::Error { message, .. } => message,
        }
    }

    /// Render as the text block sent back to the assistant.
    pub fn to_text(&self) -> String {
        match self {
            Self::Success { message, .. } => message.clone(),
            Self::Error {
                message,
                details: Some(details),
            } => format!("Error: {message}\n\n{details}"),
            Self::Error { message, .. } => format!("Error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_and_error_are_exclusive() {
        let ok = ToolOutcome::success_with_data("done", json!({"output": "a.docx"}));
        assert!(!ok.is_error());
        assert_eq!(ok.message(), "done");

        let err = ToolOutcome::error("boom");
        assert!(err.is_error());
        assert_eq!(err.to_text(), "Error: boom");
    }

    #[test]
    fn blank_details_are_dropped() {
        let err = ToolOutcome::error_with_details("failed", "  \n");
        assert_eq!(
            err,
            ToolOutcome::Error {
                message: "failed".into(),
                details: None
            }
        );
    }

    #[test]
    fn details_follow_headline() {
        let err = ToolOutcome::error_with_details("failed", "STDERR:\ntraceback");
        assert_eq!(err.to_text(), "Error: failed\n\nSTDERR:\ntraceback");
    }

    #[test]
    fn serializes_with_status_tag() {
        let value = serde_json::to_value(ToolOutcome::error("nope")).unwrap();
        assert_eq!(value, json!({"status": "error", "message": "nope"}));
    }
}
