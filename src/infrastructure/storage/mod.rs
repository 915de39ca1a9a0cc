mod audio_store;

pub use audio_store::{AudioStoreError, LocalAudioStore, SavedAudio};
