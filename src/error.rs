//! Defines the application's primary error type `AppError` and a convenience `Result` alias.
//!
//! Uses the `thiserror` crate for ergonomic error definition and provides `From`
//! implementations to convert common external errors into `AppError` variants.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Transport-level failure talking to a NASA host (`reqwest`).
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// The NASA API answered with a non-success status.
    ///
    /// `body` holds the upstream JSON payload, or the raw text as a JSON string
    /// when the payload was not JSON.
    #[error("Upstream returned {status}")]
    Upstream { status: u16, body: serde_json::Value },

    /// No NASA API key is available for an endpoint that needs one.
    #[error("NASA API key is not configured")]
    MissingApiKey,

    /// A request or command parameter failed validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error during JSON parsing (`serde_json`). Wrapped in Arc as serde_json::Error is not Clone.
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// An environment value was present but unusable.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress bar style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

impl AppError {
    /// HTTP status to report for this error when it reaches a client.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Upstream { status, .. } => *status,
            AppError::InvalidParameter(_) => 400,
            _ => 500,
        }
    }

    /// Detail payload for the error envelope: the upstream body when there is one,
    /// otherwise the error message.
    pub fn details(&self) -> serde_json::Value {
        match self {
            AppError::Upstream { body, .. } => body.clone(),
            other => serde_json::Value::String(other.to_string()),
        }
    }
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

// --- From implementations ---
// Arc is used for non-Clone error types.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn upstream_error_keeps_status_and_body() {
        let err = AppError::Upstream {
            status: 403,
            body: json!({"error": {"code": "API_KEY_INVALID"}}),
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.details()["error"]["code"], "API_KEY_INVALID");
    }

    #[test]
    fn other_errors_map_to_500_with_message() {
        let err = AppError::MissingApiKey;
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.details(), json!("NASA API key is not configured"));
    }

    #[test]
    fn invalid_parameter_is_a_bad_request() {
        assert_eq!(AppError::InvalidParameter("sol".into()).status_code(), 400);
    }
}
