mod auth;
mod google_recognizer;
mod google_synthesizer;
pub mod voices;

pub use auth::{SpeechAuth, StaticTokenProvider, TokenError, TokenProvider};
pub use google_recognizer::GoogleSpeechClient;
pub use google_synthesizer::GoogleTextToSpeechClient;
