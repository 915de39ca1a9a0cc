pub mod answer_normalizer;
mod audio_pipeline;
mod currency_service;
mod recommendation_service;
mod scam_prevention_service;
mod translation_service;

pub use answer_normalizer::{extract_answer, normalize_image_translation};
pub use audio_pipeline::{AudioPipeline, AudioPipelineRequest, PipelineError};
pub use currency_service::{
    CurrencyConversion, CurrencyError, CurrencyInsight, CurrencyService, MarketSnapshot,
    ParsedConversion, SUPPORTED_CURRENCIES, market_snapshot, parse_conversion,
};
pub use recommendation_service::{ComprehensiveAdvice, RecommendationService, TripParams};
pub use scam_prevention_service::{RED_FLAGS, ScamPreventionService};
pub use translation_service::TranslationService;
