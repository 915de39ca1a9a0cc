use super::{SynthesizedAudio, Transcription, Translation};

/// Aggregate result of the audio translation pipeline.
///
/// Invariant: an outcome exists only when every required stage (recognition,
/// translation) succeeded. Synthesis is the only stage allowed to degrade; its
/// failure leaves `audio` empty and appends a warning instead of aborting.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub transcription: Transcription,
    pub translation: Translation,
    pub audio: Option<SynthesizedAudio>,
    pub warnings: Vec<String>,
}

impl PipelineOutcome {
    pub fn completed(
        transcription: Transcription,
        translation: Translation,
        audio: Option<SynthesizedAudio>,
    ) -> Self {
        Self {
            transcription,
            translation,
            audio,
            warnings: Vec::new(),
        }
    }

    pub fn degraded(
        transcription: Transcription,
        translation: Translation,
        warning: impl Into<String>,
    ) -> Self {
        Self {
            transcription,
            translation,
            audio: None,
            warnings: vec![warning.into()],
        }
    }

    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}
