use std::fmt;

use bytes::Bytes;

use super::AudioFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SsmlGender {
    Neutral,
    Female,
    Male,
}

impl SsmlGender {
    pub fn as_str(&self) -> &'static str {
        match self {
            SsmlGender::Neutral => "NEUTRAL",
            SsmlGender::Female => "FEMALE",
            SsmlGender::Male => "MALE",
        }
    }
}

impl Default for SsmlGender {
    fn default() -> Self {
        SsmlGender::Neutral
    }
}

impl fmt::Display for SsmlGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SsmlGender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NEUTRAL" => Ok(SsmlGender::Neutral),
            "FEMALE" => Ok(SsmlGender::Female),
            "MALE" => Ok(SsmlGender::Male),
            other => Err(format!("Invalid SSML gender: {}", other)),
        }
    }
}

/// Synthesized speech audio.
///
/// `voice_name` is the voice the provider actually used. When the requested
/// voice was unsupported and a fallback was substituted, the substitution is
/// visible here rather than silently swallowed.
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    pub audio: Bytes,
    pub format: AudioFormat,
    pub language_code: String,
    pub voice_name: String,
}

impl SynthesizedAudio {
    pub fn size(&self) -> usize {
        self.audio.len()
    }
}
