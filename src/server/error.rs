//! JSON error envelope returned by every proxy route.

use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of an error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Error type for HTTP handlers: a status plus an `ErrorBody`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: error.into(),
                details: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error)
    }

    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    /// Maps a failure of the outbound call for one route.
    ///
    /// `context` names what was being fetched ("Failed to fetch APOD data").
    /// Upstream statuses pass through with NASA's body as `details`; a missing
    /// key and invalid parameters get their own messages.
    pub fn from_app(context: &str, err: AppError) -> Self {
        match err {
            AppError::MissingApiKey => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            },
            AppError::InvalidParameter(msg) => Self::bad_request(msg),
            other => {
                let status = StatusCode::from_u16(other.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                Self::new(status, context).with_details(other.details())
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
