//! Custom error types for notion-expenses
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for notion-expenses operations
#[derive(Error, Debug)]
pub enum ExpenseError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required credential was not supplied anywhere
    #[error("Missing credential: {name} is not set (use the environment, a CLI flag, or secrets.json)")]
    MissingCredential { name: &'static str },

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Transport-level failures (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The Notion API answered with a non-success status
    #[error("Notion API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// The API returned something that breaks the pagination contract
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Snapshot cache errors
    #[error("Cache error: {0}")]
    Cache(String),
}

impl ExpenseError {
    /// Create a "missing credential" error
    pub fn missing_credential(name: &'static str) -> Self {
        Self::MissingCredential { name }
    }

    /// Check if the API rejected the credentials
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for ExpenseError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ExpenseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for ExpenseError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Http(format!("request timed out: {}", err))
        } else {
            Self::Http(err.to_string())
        }
    }
}

impl From<csv::Error> for ExpenseError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl From<serde_yaml::Error> for ExpenseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Export(err.to_string())
    }
}

/// Result type alias for notion-expenses operations
pub type ExpenseResult<T> = Result<T, ExpenseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpenseError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_missing_credential_names_variable() {
        let err = ExpenseError::missing_credential("NOTION_TOKEN");
        assert!(err.to_string().contains("NOTION_TOKEN"));
    }

    #[test]
    fn test_api_error_unauthorized() {
        let err = ExpenseError::Api {
            status: 401,
            code: "unauthorized".into(),
            message: "API token is invalid.".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(
            err.to_string(),
            "Notion API error 401 (unauthorized): API token is invalid."
        );

        let err = ExpenseError::Api {
            status: 500,
            code: "internal_server_error".into(),
            message: "boom".into(),
        };
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ExpenseError = io_err.into();
        assert!(matches!(err, ExpenseError::Io(_)));
    }
}
