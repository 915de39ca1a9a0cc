mod chat_client;
mod directions_provider;
mod speech_recognizer;
mod speech_synthesizer;

pub use chat_client::{ChatClient, ChatClientError, ChatOptions, ChatReply};
pub use directions_provider::{DirectionsError, DirectionsProvider, DirectionsSummary};
pub use speech_recognizer::{RecognitionError, RecognitionOptions, SpeechRecognizer};
pub use speech_synthesizer::{SpeechSynthesizer, SynthesisError, SynthesisOptions};
