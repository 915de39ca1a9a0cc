mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    AudioOutputSettings, FlowiseSettings, MapsSettings, ServerSettings, Settings, SpeechSettings,
    SynthesisSettings,
};
