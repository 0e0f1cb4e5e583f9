use axum::http::StatusCode;
use bytes::Bytes;

use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SpeechServiceError {
    #[error("speech provider credential is not configured")]
    NotConfigured,
    #[error("{0}")]
    MalformedBody(String),
    #[error("missing or invalid input")]
    MissingInput,
    #[error("speech provider rejected the request with status {status}")]
    Rejected { status: StatusCode, body: Bytes },
    #[error("{0}")]
    Dependency(String),
}

impl From<SpeechServiceError> for AppError {
    fn from(err: SpeechServiceError) -> Self {
        match err {
            SpeechServiceError::NotConfigured => AppError::ApiKeyNotConfigured,
            SpeechServiceError::MissingInput => AppError::InvalidInput,
            SpeechServiceError::Rejected { status, body } => AppError::Upstream { status, body },
            SpeechServiceError::MalformedBody(msg) | SpeechServiceError::Dependency(msg) => {
                AppError::Internal(msg)
            }
        }
    }
}
