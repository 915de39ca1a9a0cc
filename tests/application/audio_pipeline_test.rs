use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::json;

use wayfarer::application::ports::{
    ChatClient, ChatClientError, ChatOptions, ChatReply, RecognitionError, RecognitionOptions,
    SpeechRecognizer, SpeechSynthesizer, SynthesisError, SynthesisOptions,
};
use wayfarer::application::services::{AudioPipeline, AudioPipelineRequest, PipelineError};
use wayfarer::domain::{SynthesizedAudio, Transcription};

struct CountingRecognizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl SpeechRecognizer for CountingRecognizer {
    async fn transcribe(
        &self,
        _audio: &[u8],
        _options: &RecognitionOptions,
    ) -> Result<Transcription, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RecognitionError::EmptyTranscript);
        }
        Ok(Transcription::new(
            "where is the station",
            Some("en-US".to_string()),
            json!({}),
        ))
    }
}

struct CountingChatClient {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl ChatClient for CountingChatClient {
    async fn send_message(
        &self,
        message: &str,
        _flow_id: &str,
        _options: &ChatOptions,
    ) -> Result<ChatReply, ChatClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ChatClientError::Api {
                status: 503,
                message: "flow offline".to_string(),
            });
        }
        Ok(ChatReply {
            answer: format!("[fr] {}", message),
            raw: json!({}),
        })
    }

    async fn send_image(
        &self,
        _image: &[u8],
        _mime_type: &str,
        _flow_id: &str,
        _prompt: &str,
    ) -> Result<ChatReply, ChatClientError> {
        unreachable!("pipeline never sends images")
    }

    async fn list_flows(&self) -> Result<serde_json::Value, ChatClientError> {
        Ok(json!([]))
    }

    async fn ping(&self) -> Result<(), ChatClientError> {
        Ok(())
    }
}

struct CountingSynthesizer {
    calls: Arc<AtomicUsize>,
    fail: bool,
}

#[async_trait]
impl SpeechSynthesizer for CountingSynthesizer {
    async fn synthesize(
        &self,
        _text: &str,
        options: &SynthesisOptions,
    ) -> Result<SynthesizedAudio, SynthesisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SynthesisError::ServiceUnavailable);
        }
        Ok(SynthesizedAudio {
            audio: Bytes::from_static(b"audio"),
            format: options.audio_format,
            language_code: options.language_code.clone(),
            voice_name: "fr-FR-Wavenet-A".to_string(),
        })
    }
}

struct Harness {
    pipeline: AudioPipeline<CountingRecognizer, CountingChatClient, CountingSynthesizer>,
    recognizer_calls: Arc<AtomicUsize>,
    chat_calls: Arc<AtomicUsize>,
    synth_calls: Arc<AtomicUsize>,
}

fn harness(recognizer_fails: bool, chat_fails: bool, synth_fails: bool) -> Harness {
    let recognizer_calls = Arc::new(AtomicUsize::new(0));
    let chat_calls = Arc::new(AtomicUsize::new(0));
    let synth_calls = Arc::new(AtomicUsize::new(0));

    let pipeline = AudioPipeline::new(
        Arc::new(CountingRecognizer {
            calls: Arc::clone(&recognizer_calls),
            fail: recognizer_fails,
        }),
        Arc::new(CountingChatClient {
            calls: Arc::clone(&chat_calls),
            fail: chat_fails,
        }),
        Arc::new(CountingSynthesizer {
            calls: Arc::clone(&synth_calls),
            fail: synth_fails,
        }),
    );

    Harness {
        pipeline,
        recognizer_calls,
        chat_calls,
        synth_calls,
    }
}

fn request(synthesize_speech: bool) -> AudioPipelineRequest {
    AudioPipelineRequest {
        audio: b"fake audio".to_vec(),
        mime_type: Some("audio/webm".to_string()),
        flow_id: "flow-1".to_string(),
        source_language: Some("en".to_string()),
        target_language: Some("fr".to_string()),
        language_hints: None,
        synthesize_speech,
        synthesis: SynthesisOptions::for_language("fr-FR"),
    }
}

#[tokio::test]
async fn given_empty_audio_when_running_then_fails_before_any_provider_call() {
    let h = harness(false, false, false);
    let mut req = request(true);
    req.audio = Vec::new();

    let result = h.pipeline.run(req).await;

    assert!(matches!(result, Err(PipelineError::MissingInput(_))));
    assert_eq!(h.recognizer_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.chat_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_missing_flow_id_when_running_then_fails_with_input_error() {
    let h = harness(false, false, false);
    let mut req = request(true);
    req.flow_id = "  ".to_string();

    let result = h.pipeline.run(req).await;

    assert!(matches!(result, Err(PipelineError::MissingInput(_))));
    assert_eq!(h.recognizer_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_recognition_failure_when_running_then_translator_is_never_called() {
    let h = harness(true, false, false);

    let result = h.pipeline.run(request(true)).await;

    assert!(matches!(result, Err(PipelineError::Transcription(_))));
    assert_eq!(h.recognizer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.chat_calls.load(Ordering::SeqCst), 0);
    assert_eq!(h.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_translation_failure_when_running_then_synthesizer_is_never_called() {
    let h = harness(false, true, false);

    let result = h.pipeline.run(request(true)).await;

    match result {
        Err(PipelineError::Translation(e)) => assert_eq!(e.status_code(), 503),
        other => panic!("expected translation error, got {:?}", other.map(|_| ())),
    }
    assert_eq!(h.synth_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn given_synthesis_failure_when_running_then_outcome_degrades_with_warning() {
    let h = harness(false, false, true);

    let outcome = h.pipeline.run(request(true)).await.unwrap();

    assert!(outcome.is_degraded());
    assert!(outcome.audio.is_none());
    assert_eq!(outcome.translation.original_text, "where is the station");
    assert!(outcome.warnings[0].starts_with("Text-to-speech failed:"));
}

#[tokio::test]
async fn given_all_stages_succeed_when_running_then_audio_is_attached_without_warnings() {
    let h = harness(false, false, false);

    let outcome = h.pipeline.run(request(true)).await.unwrap();

    assert!(!outcome.is_degraded());
    let audio = outcome.audio.unwrap();
    assert_eq!(audio.voice_name, "fr-FR-Wavenet-A");
    assert_eq!(
        outcome.translation.translated_text,
        "[fr] where is the station"
    );
    assert_eq!(h.recognizer_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.chat_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.synth_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn given_synthesis_disabled_when_running_then_synthesizer_is_skipped() {
    let h = harness(false, false, false);

    let outcome = h.pipeline.run(request(false)).await.unwrap();

    assert!(outcome.audio.is_none());
    assert!(outcome.warnings.is_empty());
    assert_eq!(h.synth_calls.load(Ordering::SeqCst), 0);
}
