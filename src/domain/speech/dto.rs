use axum::http::StatusCode;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::SpeechServiceError;

pub const DEFAULT_MODEL: &str = "tts-1";
pub const DEFAULT_VOICE: &str = "onyx";
pub const DEFAULT_RESPONSE_FORMAT: &str = "mp3";
pub const DEFAULT_SPEED: f64 = 1.0;

/// Inbound body of a synthesis call. Only `input` is mandatory.
///
/// Optional fields are kept as raw JSON and forwarded untouched, so a value
/// of the wrong type is judged by the provider rather than here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeechRequest {
    pub input: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_format: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Value>,
}

impl SpeechRequest {
    /// Parse a raw request body.
    ///
    /// Bytes that are not JSON at all are a `MalformedBody`; JSON without a
    /// non-empty string `input` is `MissingInput`.
    pub fn parse(body: &[u8]) -> Result<Self, SpeechServiceError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| SpeechServiceError::MalformedBody(e.to_string()))?;

        let has_input = value
            .get("input")
            .and_then(Value::as_str)
            .is_some_and(|input| !input.is_empty());
        if !has_input {
            return Err(SpeechServiceError::MissingInput);
        }

        serde_json::from_value(value).map_err(|e| SpeechServiceError::MalformedBody(e.to_string()))
    }

    /// Fill every unset field with the provider defaults
    pub fn resolve(self) -> SynthesisRequest {
        SynthesisRequest {
            model: self.model.unwrap_or_else(|| Value::from(DEFAULT_MODEL)),
            input: self.input,
            voice: self.voice.unwrap_or_else(|| Value::from(DEFAULT_VOICE)),
            response_format: self
                .response_format
                .unwrap_or_else(|| Value::from(DEFAULT_RESPONSE_FORMAT)),
            speed: self.speed.unwrap_or_else(|| Value::from(DEFAULT_SPEED)),
        }
    }
}

/// Body sent to the provider's speech endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SynthesisRequest {
    pub model: Value,
    pub input: String,
    pub voice: Value,
    pub response_format: Value,
    pub speed: Value,
}

/// What the provider answered
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisOutcome {
    Audio(Bytes),
    Rejected { status: StatusCode, body: Bytes },
}
