use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::ports::{
    ChatClient, SpeechRecognizer, SpeechSynthesizer, SynthesisError, SynthesisOptions,
};
use crate::application::services::AudioPipelineRequest;
use crate::domain::{AudioFormat, PipelineOutcome, SsmlGender, SynthesizedAudio};
use crate::infrastructure::speech::voices;
use crate::presentation::state::AppState;

use super::envelope::{error_response, status_from_code};
use super::translation::{HistoryItem, history_to_turns};

const MAX_SYNTHESIS_TEXT_LENGTH: usize = 5000;

fn synthesis_status(error: &SynthesisError) -> StatusCode {
    match error {
        SynthesisError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        SynthesisError::PermissionDenied => StatusCode::FORBIDDEN,
        SynthesisError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        SynthesisError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
        SynthesisError::SynthesisFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioPayload {
    audio_content: String,
    format: String,
    size: usize,
    voice_name: String,
    language_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    saved_as: Option<String>,
}

impl AudioPayload {
    fn from_audio(audio: &SynthesizedAudio, saved_as: Option<String>) -> Self {
        Self {
            audio_content: BASE64.encode(&audio.audio),
            format: audio.format.as_str().to_string(),
            size: audio.size(),
            voice_name: audio.voice_name.clone(),
            language_code: audio.language_code.clone(),
            saved_as,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextToSpeechRequest {
    pub text: String,
    pub language_code: Option<String>,
    pub voice_name: Option<String>,
    pub audio_format: Option<AudioFormat>,
    pub speaking_rate: Option<f64>,
    pub pitch: Option<f64>,
    pub volume_gain_db: Option<f64>,
    pub ssml_gender: Option<String>,
}

fn synthesis_options_from(request: &TextToSpeechRequest) -> SynthesisOptions {
    let language_code = request
        .language_code
        .as_deref()
        .map(voices::language_code_for)
        .unwrap_or_else(|| "en-US".to_string());
    let defaults = SynthesisOptions::default();
    SynthesisOptions {
        language_code,
        voice_name: request.voice_name.clone().filter(|v| !v.is_empty()),
        audio_format: request.audio_format.unwrap_or_default(),
        speaking_rate: request.speaking_rate.unwrap_or(defaults.speaking_rate),
        pitch: request.pitch.unwrap_or(defaults.pitch),
        volume_gain_db: request.volume_gain_db.unwrap_or(defaults.volume_gain_db),
        ssml_gender: request
            .ssml_gender
            .as_deref()
            .and_then(|g| g.parse().ok())
            .unwrap_or(SsmlGender::Neutral),
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn text_to_speech_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<TextToSpeechRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.text.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "A non-empty text field is required",
        );
    }
    if request.text.chars().count() > MAX_SYNTHESIS_TEXT_LENGTH {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Text too long",
            format!(
                "Text for synthesis is limited to {} characters",
                MAX_SYNTHESIS_TEXT_LENGTH
            ),
        );
    }

    let options = synthesis_options_from(&request);
    match state.synthesizer.synthesize(&request.text, &options).await {
        Ok(audio) => {
            let saved_as = save_audio(&state, &audio).await;
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": AudioPayload::from_audio(&audio, saved_as),
                    "message": "Speech synthesis completed successfully",
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Speech synthesis failed");
            error_response(synthesis_status(&e), "Speech synthesis failed", e.to_string())
        }
    }
}

async fn save_audio<C, R, S>(
    state: &AppState<C, R, S>,
    audio: &SynthesizedAudio,
) -> Option<String>
where
    C: ChatClient,
    R: SpeechRecognizer,
    S: SpeechSynthesizer,
{
    let store = state.audio_store.as_ref()?;
    match store.save(&audio.audio, audio.format).await {
        Ok(saved) => Some(saved.filename),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to persist audio file");
            None
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateAndSpeakRequest {
    pub message: String,
    #[serde(default)]
    pub chatflow_id: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
    pub voice_name: Option<String>,
    pub audio_format: Option<AudioFormat>,
}

#[tracing::instrument(skip(state, request))]
pub async fn translate_and_speak_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<TranslateAndSpeakRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.message.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "A non-empty message is required",
        );
    }

    let flow_id = request
        .chatflow_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.settings.flowise.default_translation_flow.clone());
    if flow_id.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "No chatflowId provided and no default configured",
        );
    }

    let target = request
        .target_language
        .clone()
        .unwrap_or_else(|| "en".to_string());

    let translation = match state
        .translation_service
        .translate_text(
            &request.message,
            &flow_id,
            request.source_language.clone(),
            Some(target.clone()),
            history_to_turns(request.history),
        )
        .await
    {
        Ok(translation) => translation,
        Err(e) => {
            tracing::error!(error = %e, "Translation failed before synthesis");
            return error_response(
                status_from_code(e.status_code()),
                "Translation failed",
                e.to_string(),
            );
        }
    };

    let options = SynthesisOptions {
        language_code: voices::language_code_for(&target),
        voice_name: request.voice_name.filter(|v| !v.is_empty()),
        audio_format: request.audio_format.unwrap_or_default(),
        ..SynthesisOptions::default()
    };

    let mut warnings = Vec::new();
    let audio = match state
        .synthesizer
        .synthesize(&translation.translated_text, &options)
        .await
    {
        Ok(audio) => Some(audio),
        Err(e) => {
            tracing::warn!(error = %e, "Synthesis failed, returning text-only translation");
            warnings.push(format!("Text-to-speech failed: {}", e));
            None
        }
    };

    let mut audio_payload = None;
    if let Some(audio) = &audio {
        let saved_as = save_audio(&state, audio).await;
        audio_payload = Some(AudioPayload::from_audio(audio, saved_as));
    }

    let mut body = json!({
        "success": true,
        "data": {
            "originalText": translation.original_text,
            "translatedText": translation.translated_text,
            "sourceLanguage": translation.source_language,
            "targetLanguage": translation.target_language,
            "audio": audio_payload,
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Translation and speech synthesis completed",
    });
    if !warnings.is_empty() {
        body["warnings"] = json!(warnings);
    }

    (StatusCode::OK, Json(body)).into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn audio_translate_speak_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut audio: Option<(Vec<u8>, Option<String>)> = None;
    let mut chatflow_id = String::new();
    let mut source_language: Option<String> = None;
    let mut target_language: Option<String> = None;
    let mut voice_name: Option<String> = None;
    let mut audio_format: Option<AudioFormat> = None;
    let mut synthesize_speech = true;

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or_default() {
            "audio" | "file" => {
                let mime = field.content_type().map(|m| m.to_string());
                if let Ok(bytes) = field.bytes().await {
                    audio = Some((bytes.to_vec(), mime));
                }
            }
            "chatflowId" => chatflow_id = field.text().await.unwrap_or_default(),
            "sourceLanguage" => {
                source_language = field.text().await.ok().filter(|v| !v.is_empty());
            }
            "targetLanguage" => {
                target_language = field.text().await.ok().filter(|v| !v.is_empty());
            }
            "voiceName" => {
                voice_name = field.text().await.ok().filter(|v| !v.is_empty());
            }
            "audioFormat" => {
                audio_format = field.text().await.ok().and_then(|v| v.parse().ok());
            }
            "synthesizeSpeech" => {
                if let Ok(value) = field.text().await {
                    synthesize_speech = value != "false" && value != "0";
                }
            }
            _ => {}
        }
    }

    let Some((audio_bytes, mime_type)) = audio else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "An audio file upload is required",
        );
    };

    if chatflow_id.is_empty() {
        chatflow_id = state.settings.flowise.default_translation_flow.clone();
    }

    let synthesis_language = target_language
        .as_deref()
        .map(voices::language_code_for)
        .unwrap_or_else(|| "en-US".to_string());
    let synthesis = SynthesisOptions {
        language_code: synthesis_language,
        voice_name,
        audio_format: audio_format.unwrap_or_default(),
        ..SynthesisOptions::default()
    };

    let request = AudioPipelineRequest {
        audio: audio_bytes,
        mime_type,
        flow_id: chatflow_id,
        source_language,
        target_language,
        language_hints: None,
        synthesize_speech,
        synthesis,
    };

    match state.audio_pipeline.run(request).await {
        Ok(outcome) => pipeline_response(&state, outcome).await,
        Err(e) => {
            tracing::error!(error = %e, "Audio pipeline failed");
            error_response(
                status_from_code(e.status_code()),
                "Audio processing failed",
                e.to_string(),
            )
        }
    }
}

async fn pipeline_response<C, R, S>(
    state: &AppState<C, R, S>,
    outcome: PipelineOutcome,
) -> axum::response::Response
where
    C: ChatClient,
    R: SpeechRecognizer,
    S: SpeechSynthesizer,
{
    let mut audio_payload = None;
    if let Some(audio) = &outcome.audio {
        let saved_as = save_audio(state, audio).await;
        audio_payload = Some(AudioPayload::from_audio(audio, saved_as));
    }

    let mut body = json!({
        "success": true,
        "data": {
            "transcription": {
                "text": outcome.transcription.text,
                "languageHint": outcome.transcription.language_hint,
            },
            "originalText": outcome.translation.original_text,
            "translatedText": outcome.translation.translated_text,
            "sourceLanguage": outcome.translation.source_language,
            "targetLanguage": outcome.translation.target_language,
            "audio": audio_payload,
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Audio translation completed successfully",
    });
    if !outcome.warnings.is_empty() {
        body["warnings"] = json!(outcome.warnings);
    }

    (StatusCode::OK, Json(body)).into_response()
}

pub async fn tts_languages_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "supportedLanguages": voices::supported_languages(),
            "audioFormats": AudioFormat::all()
                .iter()
                .map(|f| f.as_str())
                .collect::<Vec<_>>(),
        },
        "message": "Text-to-speech languages retrieved successfully",
    }))
}
