use async_trait::async_trait;

use crate::domain::Transcription;

#[derive(Debug, Clone, Default)]
pub struct RecognitionOptions {
    /// MIME type of the audio payload; defaults to a generic webm container.
    pub mime_type: Option<String>,
    /// Primary language; provider auto-detects when absent.
    pub language_code: Option<String>,
    /// Candidate languages for auto-detection.
    pub alternative_languages: Option<Vec<String>>,
}

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe raw audio bytes. A single attempt per invocation.
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &RecognitionOptions,
    ) -> Result<Transcription, RecognitionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("no transcription result from the speech provider")]
    EmptyTranscript,
    #[error("no speech credentials configured: set a service access token or an API key")]
    AuthUnavailable,
    #[error("invalid audio payload: {0}")]
    InvalidAudio(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
