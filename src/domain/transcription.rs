/// Result of one speech-recognition call. Produced once, never mutated.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub text: String,
    pub language_hint: Option<String>,
    /// Untouched provider payload, kept for callers that want segment details.
    pub raw: serde_json::Value,
}

impl Transcription {
    pub fn new(text: impl Into<String>, language_hint: Option<String>, raw: serde_json::Value) -> Self {
        Self {
            text: text.into(),
            language_hint,
            raw,
        }
    }
}
