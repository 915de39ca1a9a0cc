use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::ports::{ChatClient, SpeechRecognizer, SpeechSynthesizer};
use crate::domain::{ChatRole, ChatTurn};
use crate::infrastructure::observability::sanitize_message;
use crate::presentation::state::AppState;

use super::envelope::{error_response, status_from_code};

const MAX_MESSAGE_LENGTH: usize = 5000;

#[derive(Deserialize)]
pub struct HistoryItem {
    pub message: String,
    pub r#type: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTranslationRequest {
    pub message: String,
    #[serde(default)]
    pub chatflow_id: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextTranslationResponse {
    pub success: bool,
    pub data: TranslationData,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationData {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub timestamp: String,
}

pub(super) fn history_to_turns(history: Vec<HistoryItem>) -> Vec<ChatTurn> {
    history
        .into_iter()
        .map(|item| ChatTurn {
            role: match item.r#type.as_str() {
                "apiMessage" | "assistant" => ChatRole::Assistant,
                _ => ChatRole::User,
            },
            content: item.message,
        })
        .collect()
}

#[tracing::instrument(skip(state, request))]
pub async fn text_translation_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<TextTranslationRequest>,
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
    if request.message.chars().count() > MAX_MESSAGE_LENGTH {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Message too long",
            format!("Messages are limited to {} characters", MAX_MESSAGE_LENGTH),
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

    tracing::debug!(message = %sanitize_message(&request.message), "Translating text");

    match state
        .translation_service
        .translate_text(
            &request.message,
            &flow_id,
            request.source_language,
            request.target_language,
            history_to_turns(request.history),
        )
        .await
    {
        Ok(translation) => (
            StatusCode::OK,
            Json(TextTranslationResponse {
                success: true,
                data: TranslationData {
                    original_text: translation.original_text,
                    translated_text: translation.translated_text,
                    source_language: translation.source_language,
                    target_language: translation.target_language,
                    timestamp: Utc::now().to_rfc3339(),
                },
                message: "Text translation completed successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Text translation failed");
            error_response(
                status_from_code(e.status_code()),
                "Translation failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTranslationResponse {
    pub success: bool,
    pub data: ImageTranslationData,
    pub message: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageTranslationData {
    pub original_text: String,
    pub translated_text: String,
    pub detected_language: String,
    pub description: String,
    pub timestamp: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn image_translation_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let mut image: Option<(Vec<u8>, String)> = None;
    let mut chatflow_id = String::new();
    let mut source_language = "auto".to_string();
    let mut target_language = "auto".to_string();

    while let Ok(Some(field)) = multipart.next_field().await {
        match field.name().unwrap_or_default() {
            "file" => {
                let mime = field
                    .content_type()
                    .unwrap_or("image/png")
                    .to_string();
                if let Ok(bytes) = field.bytes().await {
                    image = Some((bytes.to_vec(), mime));
                }
            }
            "chatflowId" => chatflow_id = field.text().await.unwrap_or_default(),
            "sourceLanguage" => source_language = field.text().await.unwrap_or_default(),
            "targetLanguage" => target_language = field.text().await.unwrap_or_default(),
            _ => {}
        }
    }

    let Some((image_bytes, mime_type)) = image.filter(|(bytes, _)| !bytes.is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "An image file upload is required",
        );
    };

    if chatflow_id.is_empty() {
        chatflow_id = state.settings.flowise.default_translation_flow.clone();
    }
    if chatflow_id.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "No chatflowId provided and no default configured",
        );
    }

    match state
        .translation_service
        .translate_image(
            &image_bytes,
            &mime_type,
            &chatflow_id,
            &source_language,
            &target_language,
        )
        .await
    {
        Ok((normalized, _answer)) => (
            StatusCode::OK,
            Json(ImageTranslationResponse {
                success: true,
                data: ImageTranslationData {
                    original_text: normalized.original_text,
                    translated_text: normalized.translated_text,
                    detected_language: normalized.detected_language,
                    description: normalized.description,
                    timestamp: Utc::now().to_rfc3339(),
                },
                message: "Image translation completed successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Image translation failed");
            error_response(
                status_from_code(e.status_code()),
                "Image translation failed",
                e.to_string(),
            )
        }
    }
}

pub async fn chatflows_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    match state.chat_client.list_flows().await {
        Ok(flows) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": flows,
                "message": "Chatflows retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to retrieve chatflows");
            error_response(
                status_from_code(e.status_code()),
                "Chatflow listing failed",
                e.to_string(),
            )
        }
    }
}

pub async fn languages_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "supportedLanguages": [
                { "code": "en", "name": "English" },
                { "code": "es", "name": "Spanish" },
                { "code": "fr", "name": "French" },
                { "code": "de", "name": "German" },
                { "code": "it", "name": "Italian" },
                { "code": "pt", "name": "Portuguese" },
                { "code": "ru", "name": "Russian" },
                { "code": "ja", "name": "Japanese" },
                { "code": "ko", "name": "Korean" },
                { "code": "zh", "name": "Chinese" },
                { "code": "ar", "name": "Arabic" },
                { "code": "hi", "name": "Hindi" },
                { "code": "th", "name": "Thai" },
                { "code": "vi", "name": "Vietnamese" },
                { "code": "auto", "name": "Auto-detect" },
            ],
            "commonTouristLanguages": [
                "en", "es", "fr", "de", "it", "pt", "ja", "ko", "zh", "ar",
            ],
        },
        "message": "Supported languages retrieved successfully",
    }))
}
