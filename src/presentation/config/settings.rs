use std::path::PathBuf;

use super::Environment;

/// Process-wide configuration, read from the environment once at startup and
/// treated as immutable shared state afterwards.
#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: Environment,
    pub server: ServerSettings,
    pub flowise: FlowiseSettings,
    pub speech: SpeechSettings,
    pub synthesis: SynthesisSettings,
    pub maps: MapsSettings,
    pub audio_output: AudioOutputSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct FlowiseSettings {
    pub base_url: String,
    pub api_key: String,
    /// Flow used when a translation request does not name one.
    pub default_translation_flow: String,
    pub currency_flow: String,
    pub price_advisor_flow: String,
}

#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub default_language: String,
}

#[derive(Debug, Clone)]
pub struct SynthesisSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MapsSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub use_mock: bool,
}

#[derive(Debug, Clone)]
pub struct AudioOutputSettings {
    pub enabled: bool,
    pub directory: PathBuf,
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: std::env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(3000),
            },
            flowise: FlowiseSettings {
                base_url: env_or("FLOWISE_API_URL", "https://cloud.flowiseai.com"),
                api_key: std::env::var("FLOWISE_API_KEY").unwrap_or_default(),
                default_translation_flow: std::env::var("DEFAULT_TRANSLATION_CHATFLOW_ID")
                    .unwrap_or_default(),
                currency_flow: std::env::var("CURRENCY_CHATFLOW_ID").unwrap_or_default(),
                price_advisor_flow: std::env::var("DEFAULT_PRICE_ADVISOR_CHATFLOW_ID")
                    .unwrap_or_default(),
            },
            speech: SpeechSettings {
                endpoint: env_or("GOOGLE_SPEECH_ENDPOINT", "https://speech.googleapis.com"),
                api_key: non_empty_env("GOOGLE_SPEECH_API_KEY"),
                access_token: non_empty_env("GOOGLE_ACCESS_TOKEN"),
                default_language: env_or("GOOGLE_SPEECH_LANGUAGE_CODE", "en-US"),
            },
            synthesis: SynthesisSettings {
                endpoint: env_or("GOOGLE_TTS_ENDPOINT", "https://texttospeech.googleapis.com"),
                api_key: non_empty_env("GOOGLE_TTS_API_KEY")
                    .or_else(|| non_empty_env("GOOGLE_API_KEY")),
                access_token: non_empty_env("GOOGLE_ACCESS_TOKEN"),
            },
            maps: MapsSettings {
                endpoint: env_or("GOOGLE_MAPS_ENDPOINT", "https://maps.googleapis.com"),
                api_key: non_empty_env("GOOGLE_MAPS_API_KEY"),
                use_mock: std::env::var("TRANSPORTATION_USE_MOCK")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
            },
            audio_output: AudioOutputSettings {
                enabled: std::env::var("AUDIO_OUTPUT_ENABLED")
                    .map(|v| v.to_lowercase() == "true" || v == "1")
                    .unwrap_or(false),
                directory: PathBuf::from(env_or("AUDIO_OUTPUT_DIR", "audio-output")),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
