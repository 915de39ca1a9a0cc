use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use wayfarer::application::ports::DirectionsProvider;
use wayfarer::application::services::{
    AudioPipeline, CurrencyService, RecommendationService, ScamPreventionService,
    TranslationService,
};
use wayfarer::infrastructure::chat::FlowiseClient;
use wayfarer::infrastructure::maps::{GoogleDirectionsClient, MockDirectionsProvider};
use wayfarer::infrastructure::observability::{TracingConfig, init_tracing};
use wayfarer::infrastructure::speech::{GoogleSpeechClient, GoogleTextToSpeechClient, SpeechAuth};
use wayfarer::infrastructure::storage::LocalAudioStore;
use wayfarer::presentation::{AppState, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let chat_client = Arc::new(FlowiseClient::new(
        settings.flowise.base_url.clone(),
        settings.flowise.api_key.clone(),
    ));

    let speech_auth = SpeechAuth::from_credentials(
        settings.speech.access_token.clone(),
        settings.speech.api_key.clone(),
    );
    let recognizer = Arc::new(GoogleSpeechClient::new(
        settings.speech.endpoint.clone(),
        speech_auth,
        settings.speech.default_language.clone(),
    ));

    let synthesis_auth = SpeechAuth::from_credentials(
        settings.synthesis.access_token.clone(),
        settings.synthesis.api_key.clone(),
    );
    let synthesizer = Arc::new(GoogleTextToSpeechClient::new(
        settings.synthesis.endpoint.clone(),
        synthesis_auth,
    ));

    let directions: Arc<dyn DirectionsProvider> = if settings.maps.use_mock {
        tracing::info!("Using mock directions provider");
        Arc::new(MockDirectionsProvider)
    } else {
        Arc::new(GoogleDirectionsClient::new(
            settings.maps.endpoint.clone(),
            settings.maps.api_key.clone().unwrap_or_default(),
        ))
    };

    let audio_store = settings
        .audio_output
        .enabled
        .then(|| Arc::new(LocalAudioStore::new(settings.audio_output.directory.clone())));

    let state = AppState {
        chat_client: Arc::clone(&chat_client),
        synthesizer: Arc::clone(&synthesizer),
        translation_service: Arc::new(TranslationService::new(Arc::clone(&chat_client))),
        audio_pipeline: Arc::new(AudioPipeline::new(
            Arc::clone(&recognizer),
            Arc::clone(&chat_client),
            Arc::clone(&synthesizer),
        )),
        currency_service: Arc::new(CurrencyService::new(
            Arc::clone(&chat_client),
            settings.flowise.currency_flow.clone(),
        )),
        recommendation_service: Arc::new(RecommendationService::new(Arc::clone(&chat_client))),
        scam_prevention_service: Arc::new(ScamPreventionService::new(Arc::clone(&chat_client))),
        directions,
        audio_store,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        tracing::error!("Failed to install shutdown signal handler");
    }
    tracing::info!("Shutting down");
}
