use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("OpenAI API key not configured")]
    ApiKeyNotConfigured,

    #[error("Missing or invalid 'input' field")]
    InvalidInput,

    /// Non-success answer from the speech provider, relayed as-is
    #[error("Upstream provider returned status {status}")]
    Upstream { status: StatusCode, body: Bytes },

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error body. `details` is only present for internal failures.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InvalidInput => StatusCode::BAD_REQUEST,
            Self::Upstream { status, .. } => *status,
            Self::ApiKeyNotConfigured | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        match self {
            Self::Internal(details) => ErrorResponse {
                error: "Internal server error".to_string(),
                details: Some(details.clone()),
            },
            other => ErrorResponse {
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = %status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, status = %status.as_u16(), "Request rejected");
        }

        match self {
            Self::Upstream { status, body } => (
                status,
                [(header::CONTENT_TYPE, "application/json")],
                Body::from(body),
            )
                .into_response(),
            other => (status, Json(other.to_response())).into_response(),
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
