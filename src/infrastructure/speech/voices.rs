use serde::Serialize;

/// Per-language default voices. Chinese, Arabic and Hindi use Standard-tier
/// voices because the provider has no Wavenet voices for those locales.
const DEFAULT_VOICES: &[(&str, &str, &str)] = &[
    ("en", "en-US", "en-US-Wavenet-D"),
    ("es", "es-ES", "es-ES-Wavenet-B"),
    ("fr", "fr-FR", "fr-FR-Wavenet-A"),
    ("de", "de-DE", "de-DE-Wavenet-A"),
    ("it", "it-IT", "it-IT-Wavenet-A"),
    ("pt", "pt-PT", "pt-PT-Wavenet-A"),
    ("ru", "ru-RU", "ru-RU-Wavenet-A"),
    ("ja", "ja-JP", "ja-JP-Wavenet-A"),
    ("ko", "ko-KR", "ko-KR-Wavenet-A"),
    ("zh", "cmn-CN", "cmn-CN-Standard-A"),
    ("ar", "ar-XA", "ar-XA-Standard-A"),
    ("hi", "hi-IN", "hi-IN-Standard-A"),
    ("th", "th-TH", "th-TH-Standard-A"),
    ("vi", "vi-VN", "vi-VN-Standard-A"),
];

pub const HARD_FALLBACK_VOICE: &str = "en-US-Wavenet-D";

/// Default voice for a language code, matching on the language prefix.
pub fn default_voice_for(language_code: &str) -> &'static str {
    let prefix = language_code.split('-').next().unwrap_or(language_code);
    DEFAULT_VOICES
        .iter()
        .find(|(code, _, _)| *code == prefix)
        .map(|(_, _, voice)| *voice)
        .unwrap_or(HARD_FALLBACK_VOICE)
}

/// Full synthesis locale for a language code. Short codes ("es") resolve
/// through the voice table; full locales pass through unchanged.
pub fn language_code_for(code: &str) -> String {
    if code.contains('-') {
        return code.to_string();
    }
    DEFAULT_VOICES
        .iter()
        .find(|(prefix, _, _)| *prefix == code)
        .map(|(_, locale, _)| locale.to_string())
        .unwrap_or_else(|| "en-US".to_string())
}

pub fn language_name(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "es" => "Spanish",
        "fr" => "French",
        "de" => "German",
        "it" => "Italian",
        "pt" => "Portuguese",
        "ru" => "Russian",
        "ja" => "Japanese",
        "ko" => "Korean",
        "zh" => "Chinese",
        "ar" => "Arabic",
        "hi" => "Hindi",
        "th" => "Thai",
        "vi" => "Vietnamese",
        _ => "Unknown",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedLanguage {
    pub code: &'static str,
    pub language_code: &'static str,
    pub default_voice: &'static str,
    pub name: &'static str,
}

pub fn supported_languages() -> Vec<SupportedLanguage> {
    DEFAULT_VOICES
        .iter()
        .map(|(code, language_code, voice)| SupportedLanguage {
            code,
            language_code,
            default_voice: voice,
            name: language_name(code),
        })
        .collect()
}
