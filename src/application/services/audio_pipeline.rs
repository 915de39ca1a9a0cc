use std::sync::Arc;

use crate::application::ports::{
    ChatClient, ChatClientError, ChatOptions, RecognitionError, RecognitionOptions,
    SpeechRecognizer, SpeechSynthesizer, SynthesisOptions,
};
use crate::domain::{PipelineOutcome, Translation};

/// Inbound request for one pipeline run.
#[derive(Debug, Clone)]
pub struct AudioPipelineRequest {
    pub audio: Vec<u8>,
    pub mime_type: Option<String>,
    pub flow_id: String,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub language_hints: Option<Vec<String>>,
    pub synthesize_speech: bool,
    pub synthesis: SynthesisOptions,
}

/// Sequences recognition, translation and optional synthesis for one request.
///
/// Stages run strictly in order with exactly one external call each. A
/// recognition or translation failure aborts the run; a synthesis failure only
/// degrades the outcome to a warning.
pub struct AudioPipeline<R, C, S>
where
    R: SpeechRecognizer,
    C: ChatClient,
    S: SpeechSynthesizer,
{
    recognizer: Arc<R>,
    chat_client: Arc<C>,
    synthesizer: Arc<S>,
}

impl<R, C, S> AudioPipeline<R, C, S>
where
    R: SpeechRecognizer,
    C: ChatClient,
    S: SpeechSynthesizer,
{
    pub fn new(recognizer: Arc<R>, chat_client: Arc<C>, synthesizer: Arc<S>) -> Self {
        Self {
            recognizer,
            chat_client,
            synthesizer,
        }
    }

    pub async fn run(&self, request: AudioPipelineRequest) -> Result<PipelineOutcome, PipelineError> {
        if request.audio.is_empty() {
            return Err(PipelineError::MissingInput(
                "audio payload must not be empty".to_string(),
            ));
        }
        if request.flow_id.trim().is_empty() {
            return Err(PipelineError::MissingInput(
                "no translation flow id provided and no default configured".to_string(),
            ));
        }

        let recognition_options = RecognitionOptions {
            mime_type: request.mime_type.clone(),
            language_code: request.source_language.clone(),
            alternative_languages: request.language_hints.clone(),
        };

        tracing::debug!(bytes = request.audio.len(), "Pipeline: transcribing audio");
        let transcription = self
            .recognizer
            .transcribe(&request.audio, &recognition_options)
            .await
            .map_err(PipelineError::Transcription)?;

        let source = request.source_language.clone().unwrap_or_else(|| "auto".to_string());
        let target = request.target_language.clone().unwrap_or_else(|| "auto".to_string());

        tracing::debug!(chars = transcription.text.len(), "Pipeline: translating transcript");
        let chat_options = ChatOptions::translation(Some(source.clone()), Some(target.clone()));
        let reply = self
            .chat_client
            .send_message(&transcription.text, &request.flow_id, &chat_options)
            .await
            .map_err(PipelineError::Translation)?;

        let translation = Translation {
            original_text: transcription.text.clone(),
            translated_text: reply.answer,
            source_language: source,
            target_language: target.clone(),
        };

        if !request.synthesize_speech {
            return Ok(PipelineOutcome::completed(transcription, translation, None));
        }

        tracing::debug!(language = %request.synthesis.language_code, "Pipeline: synthesizing speech");
        match self
            .synthesizer
            .synthesize(&translation.translated_text, &request.synthesis)
            .await
        {
            Ok(audio) => {
                tracing::info!(
                    voice = %audio.voice_name,
                    bytes = audio.size(),
                    "Pipeline completed with audio"
                );
                Ok(PipelineOutcome::completed(transcription, translation, Some(audio)))
            }
            Err(e) => {
                tracing::warn!(error = %e, "Pipeline degraded: synthesis failed");
                Ok(PipelineOutcome::degraded(
                    transcription,
                    translation,
                    format!("Text-to-speech failed: {}", e),
                ))
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Caller input error, reported before any external call is made.
    #[error("missing input: {0}")]
    MissingInput(String),
    /// Upstream recognition failure; the translator is never invoked.
    #[error("transcription: {0}")]
    Transcription(RecognitionError),
    /// Upstream translation failure; the synthesizer is never invoked.
    #[error("translation: {0}")]
    Translation(ChatClientError),
}

impl PipelineError {
    /// HTTP status for the caller: 400 for input errors, 502 for upstream
    /// recognition failures, the adapter-reported status for translation.
    pub fn status_code(&self) -> u16 {
        match self {
            PipelineError::MissingInput(_) => 400,
            PipelineError::Transcription(_) => 502,
            PipelineError::Translation(e) => e.status_code(),
        }
    }
}
