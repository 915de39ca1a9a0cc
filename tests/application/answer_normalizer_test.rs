use serde_json::json;

use wayfarer::application::services::{extract_answer, normalize_image_translation};

#[test]
fn given_answer_field_when_extracting_then_it_wins_over_text_and_response() {
    let raw = json!({"answer": "first", "text": "second", "response": "third"});

    assert_eq!(extract_answer(&raw), Some("first".to_string()));
}

#[test]
fn given_empty_answer_field_when_extracting_then_falls_through_to_text() {
    let raw = json!({"answer": "", "text": "fallback"});

    assert_eq!(extract_answer(&raw), Some("fallback".to_string()));
}

#[test]
fn given_no_known_fields_when_extracting_then_returns_none() {
    let raw = json!({"result": "something"});

    assert_eq!(extract_answer(&raw), None);
}

#[test]
fn given_json_embedded_in_prose_when_normalizing_then_fields_are_taken_verbatim() {
    let answer = r#"Here is what I found in the image:
{"originalText": "Sortie de secours", "translatedText": "Emergency exit", "detectedLanguage": "fr", "description": "A green sign"}
Let me know if you need anything else."#;

    let result = normalize_image_translation(answer, "auto");

    assert_eq!(result.original_text, "Sortie de secours");
    assert_eq!(result.translated_text, "Emergency exit");
    assert_eq!(result.detected_language, "fr");
    assert_eq!(result.description, "A green sign");
}

#[test]
fn given_labeled_lines_when_normalizing_then_both_labels_are_required_and_used() {
    let answer = "Original: Ausgang\nTranslated: Exit";

    let result = normalize_image_translation(answer, "de");

    assert_eq!(result.original_text, "Ausgang");
    assert_eq!(result.translated_text, "Exit");
    assert_eq!(result.detected_language, "de");
}

#[test]
fn given_translation_marker_when_normalizing_then_text_splits_at_the_marker() {
    let answer = "The sign says something in Italian. Translation: No parking here";

    let result = normalize_image_translation(answer, "it");

    assert_eq!(result.translated_text, "No parking here");
    assert!(result.original_text.contains("Italian"));
}

#[test]
fn given_non_latin_answer_with_no_structure_when_normalizing_then_placeholder_translation() {
    let result = normalize_image_translation("出口はこちらです", "auto");

    assert_eq!(result.original_text, "出口はこちらです");
    assert_eq!(result.translated_text, "Translation not available");
}

#[test]
fn given_latin_answer_with_no_structure_when_normalizing_then_answer_becomes_translation() {
    let result = normalize_image_translation("This way to the beach", "auto");

    assert_eq!(result.translated_text, "This way to the beach");
    assert_eq!(result.original_text, "Text extracted from image");
}

#[test]
fn given_empty_detected_language_when_normalizing_then_source_language_backfills() {
    let answer = r#"{"originalText": "Hola", "translatedText": "Hello"}"#;

    let result = normalize_image_translation(answer, "es");

    assert_eq!(result.detected_language, "es");
}
