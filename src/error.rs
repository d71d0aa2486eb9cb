//! Error types for fitstats
//!
//! The statistics themselves never fail: empty or sparse histories produce
//! zero-valued results. Errors only come from the edges: loading input
//! or configuration, parsing dates and writing exports.

use std::path::PathBuf;
use thiserror::Error;

use crate::export::ExportError;

/// Top-level error type for fitstats operations
#[derive(Debug, Error)]
pub enum StatsError {
    /// Activity input file does not exist
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// A date string that is not a calendar date
    #[error("Invalid date '{value}': {reason}")]
    InvalidDate { value: String, reason: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Export errors
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Result type alias for fitstats operations
pub type Result<T> = std::result::Result<T, StatsError>;

impl StatsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            StatsError::InputNotFound { .. } => ErrorSeverity::Warning,
            StatsError::InvalidDate { .. } => ErrorSeverity::Warning,
            StatsError::Configuration(_) => ErrorSeverity::Error,
            StatsError::Io(_) => ErrorSeverity::Error,
            StatsError::Json(_) => ErrorSeverity::Error,
            StatsError::Export(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            StatsError::InputNotFound { path } => {
                format!("Could not find activity file: {}", path.display())
            }
            StatsError::InvalidDate { value, .. } => {
                format!("'{}' is not a valid date. Use the YYYY-MM-DD format.", value)
            }
            StatsError::Json(err) => {
                format!(
                    "Activity file is not valid JSON (line {}, column {}).",
                    err.line(),
                    err.column()
                )
            }
            StatsError::Export(ExportError::UnsupportedFormat(format)) => {
                format!("Cannot export to '{}'. Use json, csv or text.", format)
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents operation but system can continue
    Error,
    /// Warning that doesn't prevent operation
    Warning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = StatsError::InputNotFound {
            path: PathBuf::from("/data/activity.json"),
        };
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = StatsError::Configuration("bad".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Error);
        assert!(err.user_message().starts_with("Configuration error"));
    }

    #[test]
    fn test_user_messages() {
        let err = StatsError::InputNotFound {
            path: PathBuf::from("activity.json"),
        };
        assert!(err.user_message().contains("Could not find"));

        let err = StatsError::InvalidDate {
            value: "2024-13-01".to_string(),
            reason: "input is out of range".to_string(),
        };
        assert!(err.user_message().contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let err: StatsError = parse_err.into();

        assert!(matches!(err, StatsError::Json(_)));
        assert!(err.user_message().contains("line 1"));
    }

    #[test]
    fn test_export_error_conversion() {
        let err: StatsError = ExportError::UnsupportedFormat("xml".to_string()).into();
        assert!(err.user_message().contains("'xml'"));
    }
}
