use crate::domain::speech::{SynthesisOutcome, SynthesisRequest};
use async_trait::async_trait;

/// Repository for speech synthesis calls.
/// Abstracts the upstream text-to-speech provider.
///
/// Implementations are responsible for:
/// - Attaching the provider credential
/// - Issuing a single request per call (no retries)
/// - Buffering the provider's full answer
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Forward a resolved synthesis request to the provider
    ///
    /// A provider that answers with a non-success status is not an error here:
    /// it is returned as `SynthesisOutcome::Rejected` so callers can relay it.
    ///
    /// # Errors
    /// Returns error if the provider is unreachable or its body cannot be read
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisOutcome, String>;
}
