use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{ChatClient, SpeechRecognizer, SpeechSynthesizer};
use crate::application::services::TripParams;
use crate::domain::ChatTurn;
use crate::presentation::state::AppState;

use super::envelope::{error_response, status_from_code};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizedRequest {
    pub message: String,
    pub chatflow_id: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

#[tracing::instrument(skip(state, request))]
pub async fn personalized_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<PersonalizedRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.message.trim().is_empty() || request.chatflow_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "message and chatflowId are required",
        );
    }

    match state
        .recommendation_service
        .personalized(&request.message, &request.chatflow_id, request.history)
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "recommendations": answer,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Recommendations retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Recommendation request failed");
            error_response(
                status_from_code(e.status_code()),
                "Recommendations request failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CulturalEtiquetteRequest {
    pub location: String,
    #[serde(default)]
    pub topics: Vec<String>,
    pub chatflow_id: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn cultural_etiquette_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<CulturalEtiquetteRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.location.trim().is_empty() || request.chatflow_id.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "location and chatflowId are required",
        );
    }

    match state
        .recommendation_service
        .cultural_etiquette(&request.location, &request.topics, &request.chatflow_id)
        .await
    {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "location": request.location,
                    "etiquette": answer,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Cultural etiquette information retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Cultural etiquette request failed");
            error_response(
                status_from_code(e.status_code()),
                "Cultural etiquette request failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComprehensiveRequest {
    pub location: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default = "default_budget")]
    pub budget: String,
    #[serde(default = "default_duration")]
    pub duration: String,
    #[serde(default = "default_travel_style")]
    pub travel_style: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    pub recommendations_chatflow_id: String,
    pub cultural_etiquette_chatflow_id: Option<String>,
    #[serde(default = "default_include_etiquette")]
    pub include_cultural_etiquette: bool,
}

fn default_budget() -> String {
    "medium".to_string()
}

fn default_duration() -> String {
    "1 week".to_string()
}

fn default_travel_style() -> String {
    "tourist".to_string()
}

fn default_include_etiquette() -> bool {
    true
}

/// Bundles trip recommendations with cultural etiquette for the same location.
/// A side whose upstream call fails comes back as null instead of failing the
/// whole request.
#[tracing::instrument(skip(state, request))]
pub async fn comprehensive_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<ComprehensiveRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.location.trim().is_empty() || request.recommendations_chatflow_id.trim().is_empty()
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "location and recommendationsChatflowId are required",
        );
    }

    let params = TripParams {
        location: request.location.clone(),
        interests: request.interests.clone(),
        budget: request.budget.clone(),
        duration: request.duration.clone(),
        travel_style: request.travel_style.clone(),
        dietary_restrictions: request.dietary_restrictions,
    };
    let etiquette_flow = request
        .cultural_etiquette_chatflow_id
        .as_deref()
        .filter(|id| request.include_cultural_etiquette && !id.trim().is_empty());

    let advice = state
        .recommendation_service
        .comprehensive(&params, &request.recommendations_chatflow_id, etiquette_flow)
        .await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "data": {
                "recommendations": advice.recommendations,
                "culturalEtiquette": advice.cultural_etiquette,
                "metadata": {
                    "location": request.location,
                    "interests": request.interests,
                    "budget": request.budget,
                    "duration": request.duration,
                    "travelStyle": request.travel_style,
                    "timestamp": Utc::now().to_rfc3339(),
                },
            },
            "message": "Comprehensive travel recommendations generated successfully",
        })),
    )
        .into_response()
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsTestRequest {
    #[serde(default = "default_test_location")]
    pub location: String,
    #[serde(default = "default_test_interests")]
    pub interests: Vec<String>,
    #[serde(default = "default_budget")]
    pub budget: String,
    pub chatflow_id: Option<String>,
}

fn default_test_location() -> String {
    "Paris, France".to_string()
}

fn default_test_interests() -> Vec<String> {
    vec!["culture".to_string(), "food".to_string()]
}

/// Runs the trip-recommendations prompt with canned sample data.
pub async fn recommendations_test_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<RecommendationsTestRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let Some(flow_id) = request.chatflow_id.filter(|id| !id.trim().is_empty()) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "chatflowId is required for testing",
        );
    };

    let params = TripParams {
        interests: request.interests.clone(),
        budget: request.budget.clone(),
        ..TripParams::for_location(request.location.clone())
    };

    match state.recommendation_service.for_trip(&params, &flow_id).await {
        Ok(answer) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "location": request.location,
                    "interests": request.interests,
                    "budget": request.budget,
                    "recommendations": answer,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Test recommendations completed successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Test recommendations failed");
            error_response(
                status_from_code(e.status_code()),
                "Recommendations request failed",
                e.to_string(),
            )
        }
    }
}

pub async fn interests_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "interests": [
                "food", "history", "art", "nature", "nightlife", "shopping",
                "architecture", "museums", "beaches", "hiking", "photography",
                "local-culture", "festivals", "family-friendly",
            ],
            "travelStyles": [
                "budget", "luxury", "adventure", "relaxation", "cultural", "business",
            ],
        },
        "message": "Available interests retrieved successfully",
    }))
}

pub async fn recommendations_health_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "service": "recommendations",
            "status": "operational",
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Recommendations service is healthy",
    }))
}
