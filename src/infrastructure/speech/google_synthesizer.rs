use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde_json::json;

use crate::application::ports::{SpeechSynthesizer, SynthesisError, SynthesisOptions};
use crate::domain::SynthesizedAudio;

use super::auth::SpeechAuth;
use super::voices::default_voice_for;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Google Cloud Text-to-Speech REST API.
///
/// When the requested voice does not exist the client retries with a bounded,
/// deterministic fallback chain: once with the premium tier swapped for
/// `Standard`, then once with a voice built purely from the language code.
pub struct GoogleTextToSpeechClient {
    client: reqwest::Client,
    endpoint: String,
    auth: Option<SpeechAuth>,
}

enum AttemptFailure {
    VoiceNotFound(String),
    Fatal(SynthesisError),
}

impl GoogleTextToSpeechClient {
    pub fn new(base_url: impl Into<String>, auth: Option<SpeechAuth>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/v1/text:synthesize",
                base_url.into().trim_end_matches('/')
            ),
            auth,
        }
    }

    pub fn is_available(&self) -> bool {
        self.auth.is_some()
    }

    async fn attempt(
        &self,
        text: &str,
        voice_name: &str,
        options: &SynthesisOptions,
    ) -> Result<Bytes, AttemptFailure> {
        let auth = self
            .auth
            .as_ref()
            .ok_or(AttemptFailure::Fatal(SynthesisError::ServiceUnavailable))?;

        let body = json!({
            "input": { "text": text },
            "voice": {
                "languageCode": options.language_code,
                "name": voice_name,
                "ssmlGender": options.ssml_gender.as_str(),
            },
            "audioConfig": {
                "audioEncoding": options.audio_format.provider_encoding(),
                "speakingRate": options.speaking_rate,
                "pitch": options.pitch,
                "volumeGainDb": options.volume_gain_db,
            },
        });

        let request = self.client.post(&self.endpoint).timeout(REQUEST_TIMEOUT);
        let request = auth.authorize(request).await.map_err(|e| {
            AttemptFailure::Fatal(SynthesisError::SynthesisFailed(e.to_string()))
        })?;

        let response = request.json(&body).send().await.map_err(|e| {
            AttemptFailure::Fatal(SynthesisError::SynthesisFailed(format!("request: {}", e)))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error")
                .to_string();

            if status.as_u16() == 400 && message.contains("does not exist") {
                return Err(AttemptFailure::VoiceNotFound(message));
            }

            let error = match status.as_u16() {
                403 => SynthesisError::PermissionDenied,
                429 => SynthesisError::QuotaExceeded,
                400 => SynthesisError::InvalidArgument(message),
                _ => SynthesisError::SynthesisFailed(format!("status {}: {}", status, message)),
            };
            return Err(AttemptFailure::Fatal(error));
        }

        let payload: serde_json::Value = response.json().await.map_err(|e| {
            AttemptFailure::Fatal(SynthesisError::SynthesisFailed(format!(
                "parse response: {}",
                e
            )))
        })?;

        let encoded = payload
            .get("audioContent")
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                AttemptFailure::Fatal(SynthesisError::SynthesisFailed(
                    "response missing audioContent".to_string(),
                ))
            })?;

        let audio = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| {
                AttemptFailure::Fatal(SynthesisError::SynthesisFailed(format!(
                    "decode audio: {}",
                    e
                )))
            })?;

        Ok(Bytes::from(audio))
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTextToSpeechClient {
    async fn synthesize(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        if self.auth.is_none() {
            return Err(SynthesisError::ServiceUnavailable);
        }
        if text.trim().is_empty() {
            return Err(SynthesisError::InvalidArgument(
                "text is required for speech synthesis".to_string(),
            ));
        }

        let requested = options
            .voice_name
            .clone()
            .unwrap_or_else(|| default_voice_for(&options.language_code).to_string());

        let mut candidates = vec![requested.clone()];
        let tier_substituted = requested.replace("Wavenet", "Standard");
        if tier_substituted != requested {
            candidates.push(tier_substituted);
        }
        // Built from the language code alone so the last resort never depends
        // on the tier substitution having changed anything.
        let basic = format!("{}-Standard-A", options.language_code);
        if !candidates.contains(&basic) {
            candidates.push(basic);
        }

        let mut last_not_found = String::new();
        for (index, voice) in candidates.iter().enumerate() {
            match self.attempt(text, voice, options).await {
                Ok(audio) => {
                    if index > 0 {
                        tracing::warn!(
                            requested = %requested,
                            used = %voice,
                            "Requested voice unavailable, used fallback voice"
                        );
                    }
                    tracing::info!(
                        voice = %voice,
                        bytes = audio.len(),
                        format = %options.audio_format,
                        "Text-to-speech synthesis completed"
                    );
                    return Ok(SynthesizedAudio {
                        audio,
                        format: options.audio_format,
                        language_code: options.language_code.clone(),
                        voice_name: voice.clone(),
                    });
                }
                Err(AttemptFailure::VoiceNotFound(message)) => {
                    tracing::debug!(voice = %voice, "Voice does not exist, trying next fallback");
                    last_not_found = message;
                }
                Err(AttemptFailure::Fatal(error)) => return Err(error),
            }
        }

        Err(SynthesisError::InvalidArgument(last_not_found))
    }
}
