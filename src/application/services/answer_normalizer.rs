use std::sync::OnceLock;

use regex::Regex;

use crate::domain::ImageTranslation;

const TRANSLATION_UNAVAILABLE: &str = "Translation not available";
const EXTRACTED_FROM_IMAGE: &str = "Text extracted from image";
const SECTION_MARKER: &str = "Translation:";

/// Extract the answer text from a provider reply that may expose it under any
/// of several field names.
pub fn extract_answer(raw: &serde_json::Value) -> Option<String> {
    for field in ["answer", "text", "response"] {
        if let Some(answer) = raw.get(field).and_then(|v| v.as_str()) {
            if !answer.trim().is_empty() {
                return Some(answer.to_string());
            }
        }
    }
    None
}

type Strategy = fn(&str) -> Option<ImageTranslation>;

/// Recover structured translation fields from a free-form AI answer.
///
/// Strategies are tried in order until one yields a usable result; absence of
/// structure degrades to placeholder text, never to an error.
pub fn normalize_image_translation(raw: &str, source_language: &str) -> ImageTranslation {
    const STRATEGIES: &[Strategy] = &[
        parse_embedded_json,
        parse_labeled_lines,
        parse_section_marker,
    ];

    let mut result = STRATEGIES
        .iter()
        .find_map(|strategy| strategy(raw))
        .unwrap_or_else(|| script_fallback(raw));

    if result.detected_language.is_empty() {
        result.detected_language = if source_language.is_empty() {
            "auto".to_string()
        } else {
            source_language.to_string()
        };
    }

    result
}

/// Strategy 1: parse the first balanced top-level `{...}` span as JSON.
fn parse_embedded_json(raw: &str) -> Option<ImageTranslation> {
    let span = first_json_span(raw)?;
    let value: serde_json::Value = serde_json::from_str(span).ok()?;

    let original = value.get("originalText").and_then(|v| v.as_str());
    let translated = value.get("translatedText").and_then(|v| v.as_str());

    if original.is_none() && translated.is_none() {
        return None;
    }

    Some(ImageTranslation {
        original_text: original.unwrap_or(EXTRACTED_FROM_IMAGE).to_string(),
        translated_text: translated.unwrap_or(TRANSLATION_UNAVAILABLE).to_string(),
        detected_language: value
            .get("detectedLanguage")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        description: value
            .get("description")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
    })
}

/// Strategy 2: labeled `original:`/`source:` and `translated:`/`translation:`
/// lines, case-insensitive; both must be present.
fn parse_labeled_lines(raw: &str) -> Option<ImageTranslation> {
    static ORIGINAL: OnceLock<Regex> = OnceLock::new();
    static TRANSLATED: OnceLock<Regex> = OnceLock::new();

    let original_re = ORIGINAL
        .get_or_init(|| Regex::new(r"(?im)^\s*(?:original|source)\s*:\s*(.+)$").unwrap());
    let translated_re = TRANSLATED
        .get_or_init(|| Regex::new(r"(?im)^\s*(?:translated|translation)\s*:\s*(.+)$").unwrap());

    let original = original_re.captures(raw)?.get(1)?.as_str().trim();
    let translated = translated_re.captures(raw)?.get(1)?.as_str().trim();

    if original.is_empty() || translated.is_empty() {
        return None;
    }

    Some(ImageTranslation {
        original_text: original.to_string(),
        translated_text: translated.to_string(),
        detected_language: String::new(),
        description: String::new(),
    })
}

/// Strategy 3: split on a literal `Translation:` heading; text before the
/// marker is the original, text after is the translation.
fn parse_section_marker(raw: &str) -> Option<ImageTranslation> {
    let (before, after) = raw.split_once(SECTION_MARKER)?;
    let original = before.trim();
    let translated = after.trim();

    if original.is_empty() || translated.is_empty() {
        return None;
    }

    Some(ImageTranslation {
        original_text: original.to_string(),
        translated_text: translated.to_string(),
        detected_language: String::new(),
        description: String::new(),
    })
}

/// Final fallback: classify by script. Non-Latin text is treated as the
/// original with no translation available; Latin text is treated as the
/// translation of text we could not recover.
fn script_fallback(raw: &str) -> ImageTranslation {
    let text = raw.trim();

    if contains_non_latin_script(text) {
        ImageTranslation {
            original_text: text.to_string(),
            translated_text: TRANSLATION_UNAVAILABLE.to_string(),
            detected_language: String::new(),
            description: String::new(),
        }
    } else {
        ImageTranslation {
            original_text: EXTRACTED_FROM_IMAGE.to_string(),
            translated_text: text.to_string(),
            detected_language: String::new(),
            description: String::new(),
        }
    }
}

fn first_json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in raw[start..].char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => depth += 1,
            '}' if !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(&raw[start..start + offset + ch.len_utf8()]);
                }
            }
            _ => {}
        }
    }

    None
}

fn contains_non_latin_script(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{0400}'..='\u{04FF}'   // Cyrillic
            | '\u{0590}'..='\u{05FF}' // Hebrew
            | '\u{0600}'..='\u{06FF}' // Arabic
            | '\u{0900}'..='\u{097F}' // Devanagari
            | '\u{0E00}'..='\u{0E7F}' // Thai
            | '\u{3040}'..='\u{30FF}' // Hiragana + Katakana
            | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
            | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        )
    })
}
