use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ChatClient, SpeechRecognizer, SpeechSynthesizer};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    currency, health_handler, index_handler, not_found_handler, recommendations, scam_prevention,
    speech, translation, transportation,
};
use crate::presentation::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn create_router<C, R, S>(state: AppState<C, R, S>) -> Router
where
    C: ChatClient + 'static,
    R: SpeechRecognizer + 'static,
    S: SpeechSynthesizer + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let translation_routes = Router::new()
        .route("/text", post(translation::text_translation_handler::<C, R, S>))
        .route("/test", post(translation::text_translation_handler::<C, R, S>))
        .route("/languages", get(translation::languages_handler))
        .route("/chatflows", get(translation::chatflows_handler::<C, R, S>))
        .route("/image", post(translation::image_translation_handler::<C, R, S>))
        .route("/text-to-speech", post(speech::text_to_speech_handler::<C, R, S>))
        .route(
            "/translate-and-speak",
            post(speech::translate_and_speak_handler::<C, R, S>),
        )
        .route(
            "/audio-translate-speak",
            post(speech::audio_translate_speak_handler::<C, R, S>),
        )
        .route("/tts-languages", get(speech::tts_languages_handler));

    let currency_routes = Router::new()
        .route("/convert", post(currency::convert_handler::<C, R, S>))
        .route(
            "/exchange-rates",
            post(currency::exchange_rates_handler::<C, R, S>),
        )
        .route(
            "/info/{currency}",
            get(currency::currency_info_handler::<C, R, S>),
        )
        .route(
            "/market-insights",
            post(currency::market_insights_handler::<C, R, S>),
        )
        .route("/supported", get(currency::supported_currencies_handler))
        .route("/test", post(currency::currency_test_handler::<C, R, S>))
        .route("/health", get(currency::currency_health_handler));

    let recommendation_routes = Router::new()
        .route(
            "/personalized",
            post(recommendations::personalized_handler::<C, R, S>),
        )
        .route(
            "/cultural-etiquette",
            post(recommendations::cultural_etiquette_handler::<C, R, S>),
        )
        .route(
            "/comprehensive",
            post(recommendations::comprehensive_handler::<C, R, S>),
        )
        .route(
            "/test",
            post(recommendations::recommendations_test_handler::<C, R, S>),
        )
        .route("/interests", get(recommendations::interests_handler))
        .route("/health", get(recommendations::recommendations_health_handler));

    let scam_prevention_routes = Router::new()
        .route(
            "/price-advice",
            post(scam_prevention::price_advice_handler::<C, R, S>),
        )
        .route("/detect", post(scam_prevention::detect_scam_handler::<C, R, S>))
        .route("/advice", post(scam_prevention::safety_advice_handler::<C, R, S>))
        .route(
            "/test",
            post(scam_prevention::scam_prevention_test_handler::<C, R, S>),
        )
        .route("/red-flags", get(scam_prevention::red_flags_handler))
        .route("/health", get(scam_prevention::scam_prevention_health_handler));

    let transportation_routes = Router::new()
        .route(
            "/options",
            post(transportation::transport_options_handler::<C, R, S>),
        )
        .route("/realtime", get(transportation::realtime_handler))
        .route(
            "/directions",
            post(transportation::directions_handler::<C, R, S>),
        )
        .route(
            "/location/track",
            post(transportation::location_track_handler),
        )
        .route(
            "/location/realtime",
            get(transportation::location_realtime_handler),
        )
        .route(
            "/location/nearby",
            get(transportation::location_nearby_handler),
        )
        .route("/help", get(transportation::help_handler))
        .route(
            "/status",
            get(transportation::transportation_status_handler::<C, R, S>),
        );

    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .nest("/api/translation", translation_routes)
        .nest("/api/currency", currency_routes)
        .nest("/api/recommendations", recommendation_routes)
        .nest("/api/scam-prevention", scam_prevention_routes)
        .nest("/api/transportation", transportation_routes)
        .fallback(not_found_handler)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
