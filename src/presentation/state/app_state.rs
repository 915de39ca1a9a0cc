use std::sync::Arc;

use crate::application::ports::{
    ChatClient, DirectionsProvider, SpeechRecognizer, SpeechSynthesizer,
};
use crate::application::services::{
    AudioPipeline, CurrencyService, RecommendationService, ScamPreventionService,
    TranslationService,
};
use crate::infrastructure::storage::LocalAudioStore;
use crate::presentation::config::Settings;

pub struct AppState<C, R, S>
where
    C: ChatClient,
    R: SpeechRecognizer,
    S: SpeechSynthesizer,
{
    pub chat_client: Arc<C>,
    pub synthesizer: Arc<S>,
    pub translation_service: Arc<TranslationService<C>>,
    pub audio_pipeline: Arc<AudioPipeline<R, C, S>>,
    pub currency_service: Arc<CurrencyService<C>>,
    pub recommendation_service: Arc<RecommendationService<C>>,
    pub scam_prevention_service: Arc<ScamPreventionService<C>>,
    pub directions: Arc<dyn DirectionsProvider>,
    pub audio_store: Option<Arc<LocalAudioStore>>,
    pub settings: Settings,
}

impl<C, R, S> Clone for AppState<C, R, S>
where
    C: ChatClient,
    R: SpeechRecognizer,
    S: SpeechSynthesizer,
{
    fn clone(&self) -> Self {
        Self {
            chat_client: Arc::clone(&self.chat_client),
            synthesizer: Arc::clone(&self.synthesizer),
            translation_service: Arc::clone(&self.translation_service),
            audio_pipeline: Arc::clone(&self.audio_pipeline),
            currency_service: Arc::clone(&self.currency_service),
            recommendation_service: Arc::clone(&self.recommendation_service),
            scam_prevention_service: Arc::clone(&self.scam_prevention_service),
            directions: Arc::clone(&self.directions),
            audio_store: self.audio_store.clone(),
            settings: self.settings.clone(),
        }
    }
}
