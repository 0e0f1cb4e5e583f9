use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::{
    domain::speech::{SpeechRequest, SpeechService, SpeechServiceApi},
    error::{AppError, AppResult},
};

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, apikey";

pub struct SpeechController {
    speech_service: Arc<SpeechService>,
    max_request_bytes: usize,
}

impl SpeechController {
    pub fn new(speech_service: Arc<SpeechService>, max_request_bytes: usize) -> Self {
        Self {
            speech_service,
            max_request_bytes,
        }
    }

    /// Any method, any path. Preflight is answered before anything else.
    pub async fn handle(
        State(controller): State<Arc<SpeechController>>,
        request: Request,
    ) -> Response {
        match *request.method() {
            Method::OPTIONS => Self::preflight(),
            Method::POST => controller.synthesize(request).await.into_response(),
            _ => AppError::MethodNotAllowed.into_response(),
        }
    }

    /// OPTIONS - CORS preflight, empty body
    pub fn preflight() -> Response {
        (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN),
                (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
            ],
        )
            .into_response()
    }

    /// POST - Relay a synthesis request to the speech provider
    async fn synthesize(&self, request: Request) -> AppResult<Response> {
        // The credential gate comes before the body is touched
        if !self.speech_service.is_configured() {
            return Err(AppError::ApiKeyNotConfigured);
        }

        let body = axum::body::to_bytes(request.into_body(), self.max_request_bytes)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read request body: {}", e)))?;

        let speech_request = SpeechRequest::parse(&body)?;
        let audio = self.speech_service.synthesize(speech_request).await?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("audio/mpeg"));
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(audio.len()));

        Ok((StatusCode::OK, headers, Body::from(audio)).into_response())
    }
}
