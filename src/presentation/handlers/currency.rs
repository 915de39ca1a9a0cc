use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use crate::application::ports::{ChatClient, SpeechRecognizer, SpeechSynthesizer};
use crate::application::services::{CurrencyInsight, SUPPORTED_CURRENCIES};
use crate::presentation::state::AppState;

use super::envelope::{error_response, status_from_code};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRequest {
    pub amount: f64,
    pub from_currency: String,
    pub to_currency: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn convert_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<ConversionRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.from_currency.trim().is_empty() || request.to_currency.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "amount, fromCurrency and toCurrency are required",
        );
    }

    match state
        .currency_service
        .convert(request.amount, &request.from_currency, &request.to_currency)
        .await
    {
        Ok(conversion) => {
            let parsed = conversion.parsed.as_ref();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": {
                        "originalAmount": conversion.original_amount,
                        "fromCurrency": conversion.from_currency,
                        "toCurrency": conversion.to_currency,
                        "convertedAmount": parsed.map(|p| p.converted_amount),
                        "conversionRate": parsed.map(|p| p.conversion_rate),
                        "aiResponse": conversion.ai_response,
                        "timestamp": Utc::now().to_rfc3339(),
                    },
                    "message": "Currency conversion completed successfully",
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Currency conversion failed");
            error_response(
                status_from_code(e.status_code()),
                "Currency conversion failed",
                e.to_string(),
            )
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatesRequest {
    pub base_currency: String,
    #[serde(default)]
    pub target_currencies: Vec<String>,
}

fn insight_data(insight: &CurrencyInsight) -> serde_json::Value {
    json!({
        "baseCurrency": insight.base_currency,
        "targetCurrencies": insight.target_currencies,
        "aiResponse": insight.ai_response,
        "marketContext": insight.snapshot.market_context,
        "timeContext": insight.snapshot.time_context,
        "volatility": insight.snapshot.volatility,
        "timestamp": Utc::now().to_rfc3339(),
    })
}

#[tracing::instrument(skip(state, request))]
pub async fn exchange_rates_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<RatesRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.base_currency.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "baseCurrency is required",
        );
    }

    match state
        .currency_service
        .exchange_rates(&request.base_currency, &request.target_currencies)
        .await
    {
        Ok(insight) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": insight_data(&insight),
                "message": "Exchange rates retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Exchange rates request failed");
            error_response(
                status_from_code(e.status_code()),
                "Exchange rates lookup failed",
                e.to_string(),
            )
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn currency_info_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Path(currency): Path<String>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    match state.currency_service.currency_info(&currency).await {
        Ok(insight) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "currency": insight.base_currency,
                    "aiResponse": insight.ai_response,
                    "marketContext": insight.snapshot.market_context,
                    "timeContext": insight.snapshot.time_context,
                    "timestamp": Utc::now().to_rfc3339(),
                },
                "message": "Currency information retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Currency info request failed");
            error_response(
                status_from_code(e.status_code()),
                "Currency info lookup failed",
                e.to_string(),
            )
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn market_insights_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
    Json(request): Json<RatesRequest>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    if request.base_currency.trim().is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields",
            "baseCurrency is required",
        );
    }

    match state
        .currency_service
        .market_insights(&request.base_currency, &request.target_currencies)
        .await
    {
        Ok(insight) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": insight_data(&insight),
                "message": "Market insights retrieved successfully",
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Market insights request failed");
            error_response(
                status_from_code(e.status_code()),
                "Market insights lookup failed",
                e.to_string(),
            )
        }
    }
}

/// Runs a fixed 100 USD to EUR conversion so the conversion path can be
/// exercised without crafting a request body.
pub async fn currency_test_handler<C, R, S>(
    State(state): State<AppState<C, R, S>>,
) -> impl IntoResponse
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    match state.currency_service.convert(100.0, "USD", "EUR").await {
        Ok(conversion) => {
            let parsed = conversion.parsed.as_ref();
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "data": {
                        "testData": {
                            "amount": 100,
                            "fromCurrency": "USD",
                            "toCurrency": "EUR",
                        },
                        "convertedAmount": parsed.map(|p| p.converted_amount),
                        "conversionRate": parsed.map(|p| p.conversion_rate),
                        "aiResponse": conversion.ai_response,
                        "timestamp": Utc::now().to_rfc3339(),
                    },
                    "message": "Currency conversion test completed",
                })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Currency conversion test failed");
            error_response(
                status_from_code(e.status_code()),
                "Currency conversion failed",
                e.to_string(),
            )
        }
    }
}

pub async fn supported_currencies_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "supportedCurrencies": SUPPORTED_CURRENCIES,
            "count": SUPPORTED_CURRENCIES.len(),
        },
        "message": "Supported currencies retrieved successfully",
    }))
}

pub async fn currency_health_handler() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "service": "currency",
            "status": "operational",
            "timestamp": Utc::now().to_rfc3339(),
        },
        "message": "Currency service is healthy",
    }))
}
