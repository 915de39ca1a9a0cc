use axum::Json;
use axum::response::IntoResponse;
use serde_json::json;

/// Root index: service metadata and a map of the available endpoints.
pub async fn index_handler() -> impl IntoResponse {
    Json(json!({
        "message": "AI Travel Assistant API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "translation": "/api/translation",
            "textTranslation": "/api/translation/text",
            "imageTranslation": "/api/translation/image",
            "languages": "/api/translation/languages",
            "chatflows": "/api/translation/chatflows",
            "textToSpeech": "/api/translation/text-to-speech",
            "translateAndSpeak": "/api/translation/translate-and-speak",
            "audioTranslateSpeak": "/api/translation/audio-translate-speak",
            "ttsLanguages": "/api/translation/tts-languages",
            "currencyConvert": "/api/currency/convert",
            "currencySupported": "/api/currency/supported",
            "recommendations": "/api/recommendations/personalized",
            "culturalEtiquette": "/api/recommendations/cultural-etiquette",
            "priceAdvice": "/api/scam-prevention/price-advice",
            "scamDetection": "/api/scam-prevention/detect",
            "safetyAdvice": "/api/scam-prevention/advice",
            "transportationOptions": "/api/transportation/options",
            "transportationDirections": "/api/transportation/directions",
        },
    }))
}

/// 404 fallback listing the routes that do exist.
pub async fn not_found_handler(uri: axum::http::Uri) -> impl IntoResponse {
    (
        axum::http::StatusCode::NOT_FOUND,
        Json(json!({
            "success": false,
            "error": "Endpoint not found",
            "message": format!("The requested endpoint {} does not exist", uri.path()),
            "availableEndpoints": [
                "GET /",
                "GET /health",
                "POST /api/translation/text",
                "POST /api/translation/test",
                "POST /api/translation/image",
                "GET /api/translation/languages",
                "GET /api/translation/chatflows",
                "POST /api/translation/text-to-speech",
                "POST /api/translation/translate-and-speak",
                "POST /api/translation/audio-translate-speak",
                "GET /api/translation/tts-languages",
                "POST /api/currency/convert",
                "GET /api/currency/supported",
                "GET /api/currency/health",
                "POST /api/recommendations/personalized",
                "POST /api/recommendations/cultural-etiquette",
                "GET /api/recommendations/interests",
                "GET /api/recommendations/health",
                "POST /api/scam-prevention/price-advice",
                "POST /api/scam-prevention/detect",
                "POST /api/scam-prevention/advice",
                "GET /api/scam-prevention/red-flags",
                "GET /api/scam-prevention/health",
                "POST /api/transportation/options",
                "GET /api/transportation/realtime",
                "POST /api/transportation/directions",
                "GET /api/transportation/status",
            ],
        })),
    )
}
