mod audio_format;
mod chat_turn;
mod pipeline;
mod synthesis;
mod transcription;
mod translation;
mod travel_mode;

pub use audio_format::AudioFormat;
pub use chat_turn::{ChatRole, ChatTurn};
pub use pipeline::PipelineOutcome;
pub use synthesis::{SsmlGender, SynthesizedAudio};
pub use transcription::Transcription;
pub use translation::{ImageTranslation, Translation};
pub use travel_mode::TravelMode;
