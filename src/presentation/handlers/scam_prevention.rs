use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{ChatClient, SpeechRecognizer, SpeechSynthesizer};
use crate::application::services::RED_FLAGS;
use crate::presentation::state::AppState;

use super::envelope::{error_response, status_from_code};
use super::translation::{HistoryItem, history_to_turns};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAdviceRequest {
    pub item: String,
    pub price: f64,
    pub currency: String,
    pub location: Option<String>,
    #[serde(default)]
    pub chatflow_id: Option<String>,
    #[serde(default)]
    pub history: Vec<HistoryItem>,
}

#[tracing::instrument(skip(state, request))]
pub async fn price_advice_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<PriceAdviceRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.item.trim().is_empty() || request.currency.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "item, price and currency are required",
        );
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid price",
            "price must be a non-negative number",
        );
    }

    let flow_id = request
        .chatflow_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.settings.flowise.price_advisor_flow.clone());
    if flow_id.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "No chatflowId provided and no default configured",
        );
    }

    match state
        .scam_prevention_service
        .price_advice(
            &request.item,
            request.price,
            &request.currency,
            request.location.as_deref(),
            &flow_id,
            history_to_turns(request.history),
        )
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "item": request.item,
                    "price": request.price,
                    "currency": request.currency,
                    "location": request.location,
                    "advice": answer,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Price advice retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Price advice request failed");
            error_response(
                status_from_code(e.status_code()),
                "Price advice failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamDetectionRequest {
    pub situation: String,
    pub location: Option<String>,
    #[serde(default)]
    pub red_flags: Vec<String>,
    #[serde(default = "default_urgency")]
    pub urgency: String,
    pub chatflow_id: String,
}

fn default_urgency() -> String {
    "medium".to_string()
}

#[tracing::instrument(skip(state, request))]
pub async fn detect_scam_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<ScamDetectionRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.situation.trim().is_empty() || request.chatflow_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "situation and chatflowId are required",
        );
    }

    match state
        .scam_prevention_service
        .detect_scam(
            &request.situation,
            request.location.as_deref(),
            &request.red_flags,
            &request.urgency,
            &request.chatflow_id,
        )
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "analysis": answer,
                    "urgency": request.urgency,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Scam analysis completed successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Scam detection request failed");
            error_response(
                status_from_code(e.status_code()),
                "Scam analysis failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyAdviceRequest {
    pub query: String,
    pub location: Option<String>,
    #[serde(default = "default_advice_type")]
    pub advice_type: String,
    pub chatflow_id: String,
}

fn default_advice_type() -> String {
    "general safety".to_string()
}

#[tracing::instrument(skip(state, request))]
pub async fn safety_advice_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<SafetyAdviceRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.query.trim().is_empty() || request.chatflow_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "query and chatflowId are required",
        );
    }

    match state
        .scam_prevention_service
        .safety_advice(
            &request.query,
            request.location.as_deref(),
            &request.advice_type,
            &request.chatflow_id,
        )
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "advice": answer,
                    "adviceType": request.advice_type,
                    "location": request.location,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Safety advice retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Safety advice request failed");
            error_response(
                status_from_code(e.status_code()),
                "Safety advice failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScamPreventionTestRequest {
    #[serde(default = "default_test_type")]
    pub test_type: String,
    pub chatflow_id: Option<String>,
}

fn default_test_type() -> String {
    "price".to_string()
}

/// Exercises one of the advice paths with canned sample data. `testType`
/// selects price advice, scam detection, or general safety advice.
pub async fn scam_prevention_test_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<ScamPreventionTestRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let flow_id = request
        .chatflow_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| state.settings.flowise.price_advisor_flow.clone());
    if flow_id.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "No chatflowId provided and no default configured",
        );
    }

    let service = &state.scam_prevention_service;
    let (test_data, result) = match request.test_type.as_str() {
        "price" => (
            json!({
                "item": "Handmade ceramic bowl",
                "price": 25,
                "currency": "USD",
                "location": "Bangkok, Thailand",
            }),
            service
                .price_advice(
                    "Handmade ceramic bowl",
                    25.0,
                    "USD",
                    Some("Bangkok, Thailand"),
                    &flow_id,
                    Vec::new(),
                )
                .await,
        ),
        "scam" => (
            json!({
                "situation": "Secret temple offer",
                "location": "Siem Reap, Cambodia",
                "urgency": "medium",
            }),
            service
                .detect_scam(
                    "Someone offered to show me a secret temple that is not in \
                     guidebooks, but wants money upfront and will not let me see it first",
                    Some("Siem Reap, Cambodia"),
                    &[
                        "Asking for money upfront".to_string(),
                        "Will not show the location first".to_string(),
                    ],
                    "medium",
                    &flow_id,
                )
                .await,
        ),
        _ => (
            json!({
                "query": "Common tourist scams in Southeast Asia",
                "location": "Southeast Asia",
                "adviceType": "general",
            }),
            service
                .safety_advice(
                    "What are the most common tourist scams in Southeast Asia?",
                    Some("Southeast Asia"),
                    "general",
                    &flow_id,
                )
                .await,
        ),
    };

    match result {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "testType": request.test_type,
                    "testData": test_data,
                    "response": answer,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Scam prevention test completed",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Scam prevention test failed");
            error_response(
                status_from_code(e.status_code()),
                "Scam prevention test failed",
                e.to_string(),
            )
        }
    }
}

pub async fn red_flags_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "redFlags": RED_FLAGS,
            "count": RED_FLAGS.len(),
        },
        "message": "Common scam red flags retrieved successfully",
    }))
}

pub async fn scam_prevention_health_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "service": "scam-prevention",
            "status": "operational",
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Scam prevention service is healthy",
    }))
}
