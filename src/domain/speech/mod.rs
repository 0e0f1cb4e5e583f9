pub mod dto;
pub mod error;
pub mod service;

pub use dto::{SpeechRequest, SynthesisOutcome, SynthesisRequest};
pub use error::SpeechServiceError;
pub use service::{SpeechService, SpeechServiceApi};
