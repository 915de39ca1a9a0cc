use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use serde_json::json;

use crate::application::ports::{RecognitionError, RecognitionOptions, SpeechRecognizer};
use crate::domain::Transcription;

use super::auth::SpeechAuth;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_MIME_TYPE: &str = "audio/webm";

/// Languages offered to the provider for auto-detection when the caller does
/// not supply a candidate list.
const DEFAULT_ALTERNATIVE_LANGUAGES: &[&str] = &[
    "en-US", "zh-CN", "zh-TW", "es-ES", "fr-FR", "de-DE", "ja-JP", "ko-KR", "ar-SA", "hi-IN",
    "th-TH", "vi-VN", "it-IT", "pt-BR", "ru-RU", "nl-NL",
];

/// Client for the Google Cloud Speech-to-Text REST API.
pub struct GoogleSpeechClient {
    client: reqwest::Client,
    endpoint: String,
    auth: Option<SpeechAuth>,
    default_language: String,
}

impl GoogleSpeechClient {
    pub fn new(
        base_url: impl Into<String>,
        auth: Option<SpeechAuth>,
        default_language: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!(
                "{}/v1/speech:recognize",
                base_url.into().trim_end_matches('/')
            ),
            auth,
            default_language: default_language.into(),
        }
    }
}

/// Map a MIME type to the provider's encoding enum. `None` lets the provider
/// auto-detect rather than rejecting unknown types.
fn encoding_from_mime(mime_type: &str) -> Option<&'static str> {
    let lower = mime_type.to_lowercase();
    if lower.contains("wav") || lower.contains("x-wav") {
        Some("LINEAR16")
    } else if lower.contains("flac") {
        Some("FLAC")
    } else if lower.contains("amr-wb") {
        Some("AMR_WB")
    } else if lower.contains("amr") {
        Some("AMR")
    } else if lower.contains("webm") {
        Some("WEBM_OPUS")
    } else if lower.contains("ogg") || lower.contains("opus") {
        Some("OGG_OPUS")
    } else if lower.contains("mp3") || lower.contains("mpeg") {
        Some("MP3")
    } else {
        None
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn transcribe(
        &self,
        audio: &[u8],
        options: &RecognitionOptions,
    ) -> Result<Transcription, RecognitionError> {
        if audio.is_empty() {
            return Err(RecognitionError::InvalidAudio(
                "audio payload is empty".to_string(),
            ));
        }

        let auth = self
            .auth
            .as_ref()
            .ok_or(RecognitionError::AuthUnavailable)?;

        let mime_type = options
            .mime_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let language_code = options
            .language_code
            .clone()
            .filter(|l| !l.is_empty() && l != "auto")
            .unwrap_or_else(|| self.default_language.clone());
        let alternatives: Vec<String> = options
            .alternative_languages
            .clone()
            .unwrap_or_else(|| {
                DEFAULT_ALTERNATIVE_LANGUAGES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let mut config = json!({
            "languageCode": language_code,
            "alternativeLanguageCodes": alternatives,
            "enableAutomaticPunctuation": true,
            "model": "default",
        });
        if let Some(encoding) = encoding_from_mime(&mime_type) {
            config["encoding"] = json!(encoding);
        }

        let body = json!({
            "config": config,
            "audio": {
                "content": base64::engine::general_purpose::STANDARD.encode(audio),
            },
        });

        tracing::debug!(
            bytes = audio.len(),
            mime = %mime_type,
            language = %language_code,
            "Sending audio to Google Speech-to-Text"
        );

        let request = self.client.post(&self.endpoint).timeout(REQUEST_TIMEOUT);
        let request = auth
            .authorize(request)
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(e.to_string()))?;

        let response = request
            .json(&body)
            .send()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("request: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            let message = body
                .pointer("/error/message")
                .and_then(|m| m.as_str())
                .unwrap_or("unknown error");
            return Err(RecognitionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, message
            )));
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| RecognitionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        let results = raw
            .get("results")
            .and_then(|r| r.as_array())
            .cloned()
            .unwrap_or_default();

        let transcript = results
            .iter()
            .filter_map(|r| r.pointer("/alternatives/0/transcript").and_then(|t| t.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string();

        if transcript.is_empty() {
            return Err(RecognitionError::EmptyTranscript);
        }

        let language_hint = results
            .first()
            .and_then(|r| r.get("languageCode"))
            .and_then(|l| l.as_str())
            .map(String::from);

        tracing::info!(chars = transcript.len(), "Speech-to-text transcription completed");

        Ok(Transcription::new(transcript, language_hint, raw))
    }
}
