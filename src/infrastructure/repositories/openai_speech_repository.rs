use super::speech_repository::SpeechRepository;
use crate::domain::speech::{SynthesisOutcome, SynthesisRequest};
use async_trait::async_trait;
use axum::http::StatusCode;
use std::time::{Duration, Instant};

const SPEECH_PATH: &str = "/audio/speech";

/// OpenAI `audio/speech` implementation of the speech repository
pub struct OpenAiSpeechRepository {
    http_client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiSpeechRepository {
    pub fn new(http_client: reqwest::Client, base_url: &str, api_key: String) -> Self {
        Self {
            http_client,
            endpoint: speech_endpoint(base_url),
            api_key,
        }
    }

    /// Build the shared HTTP client, with a total timeout when one is configured
    pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn speech_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SPEECH_PATH)
}

#[async_trait]
impl SpeechRepository for OpenAiSpeechRepository {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutcome, String> {
        let start_time = Instant::now();

        tracing::info!(
            endpoint = %self.endpoint,
            model = %request.model,
            voice = %request.voice,
            input_length = request.input.len(),
            "Calling OpenAI speech API"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    model = %request.model,
                    voice = %request.voice,
                    "OpenAI speech API call failed"
                );
                format!("OpenAI speech request failed: {}", e)
            })?;

        let status = StatusCode::from_u16(response.status().as_u16())
            .map_err(|e| format!("OpenAI speech API returned an invalid status: {}", e))?;

        let body = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read OpenAI speech response: {}", e))?;

        if !status.is_success() {
            tracing::warn!(
                status = %status.as_u16(),
                latency_ms = start_time.elapsed().as_millis(),
                "OpenAI speech API returned an error"
            );
            return Ok(SynthesisOutcome::Rejected { status, body });
        }

        tracing::info!(
            provider = "openai",
            model = %request.model,
            voice = %request.voice,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = request.input.len(),
            audio_size_bytes = body.len(),
            "Speech synthesis completed"
        );

        Ok(SynthesisOutcome::Audio(body))
    }
}
