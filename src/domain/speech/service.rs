use super::dto::{SpeechRequest, SynthesisOutcome};
use super::error::SpeechServiceError;
use crate::infrastructure::repositories::SpeechRepository;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;

pub struct SpeechService {
    speech_repo: Option<Arc<dyn SpeechRepository>>,
}

impl SpeechService {
    /// `speech_repo` is `None` when no provider credential is configured
    pub fn new(speech_repo: Option<Arc<dyn SpeechRepository>>) -> Self {
        Self { speech_repo }
    }
}

#[async_trait]
pub trait SpeechServiceApi: Send + Sync {
    /// Whether a provider credential is available
    fn is_configured(&self) -> bool;

    /// Synthesize speech for a validated request
    ///
    /// This operation:
    /// - Fills in provider defaults for unset fields
    /// - Calls the speech provider exactly once
    /// - Returns the buffered audio, or the provider's own rejection
    async fn synthesize(&self, request: SpeechRequest) -> Result<Bytes, SpeechServiceError>;
}

#[async_trait]
impl SpeechServiceApi for SpeechService {
    fn is_configured(&self) -> bool {
        self.speech_repo.is_some()
    }

    async fn synthesize(&self, request: SpeechRequest) -> Result<Bytes, SpeechServiceError> {
        let speech_repo = self
            .speech_repo
            .as_ref()
            .ok_or(SpeechServiceError::NotConfigured)?;

        let request = request.resolve();

        tracing::info!(
            model = %request.model,
            voice = %request.voice,
            response_format = %request.response_format,
            speed = %request.speed,
            input_length = request.input.len(),
            "Speech synthesis request"
        );

        match speech_repo
            .synthesize(&request)
            .await
            .map_err(SpeechServiceError::Dependency)?
        {
            SynthesisOutcome::Audio(audio) => Ok(audio),
            SynthesisOutcome::Rejected { status, body } => {
                tracing::warn!(
                    status = %status.as_u16(),
                    body_size = body.len(),
                    "Speech provider rejected the request"
                );
                Err(SpeechServiceError::Rejected { status, body })
            }
        }
    }
}
