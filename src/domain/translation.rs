/// Completed text translation. Either language may be "auto".
#[derive(Debug, Clone)]
pub struct Translation {
    pub original_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Structured fields recovered from a free-form image-translation answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageTranslation {
    pub original_text: String,
    pub translated_text: String,
    pub detected_language: String,
    pub description: String,
}
