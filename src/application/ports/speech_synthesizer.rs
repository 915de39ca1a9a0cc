use async_trait::async_trait;

use crate::domain::{AudioFormat, SsmlGender, SynthesizedAudio};

#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub language_code: String,
    pub voice_name: Option<String>,
    pub audio_format: AudioFormat,
    pub speaking_rate: f64,
    pub pitch: f64,
    pub volume_gain_db: f64,
    pub ssml_gender: SsmlGender,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            language_code: "en-US".to_string(),
            voice_name: None,
            audio_format: AudioFormat::Mp3,
            speaking_rate: 1.0,
            pitch: 0.0,
            volume_gain_db: 0.0,
            ssml_gender: SsmlGender::Neutral,
        }
    }
}

impl SynthesisOptions {
    pub fn for_language(language_code: impl Into<String>) -> Self {
        Self {
            language_code: language_code.into(),
            ..Self::default()
        }
    }
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize speech for the given text.
    ///
    /// Implementations may substitute a fallback voice when the requested one
    /// is unsupported, but the substitution must be visible in the returned
    /// `voice_name`. At most two bounded fallback attempts are allowed.
    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthesizedAudio, SynthesisError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech synthesis credentials not configured")]
    ServiceUnavailable,
    #[error("permission denied by the speech synthesis provider")]
    PermissionDenied,
    #[error("invalid language code, voice name, or audio format: {0}")]
    InvalidArgument(String),
    #[error("speech synthesis quota exceeded")]
    QuotaExceeded,
    #[error("speech synthesis failed: {0}")]
    SynthesisFailed(String),
}
