use std::path::PathBuf;

use uuid::Uuid;

use crate::domain::AudioFormat;

/// Saves synthesized audio under an output directory for debugging and
/// download links. Each write targets a uniquely named file, so concurrent
/// requests never contend.
pub struct LocalAudioStore {
    base_path: PathBuf,
}

impl LocalAudioStore {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub async fn save(
        &self,
        audio: &[u8],
        format: AudioFormat,
    ) -> Result<SavedAudio, AudioStoreError> {
        tokio::fs::create_dir_all(&self.base_path)
            .await
            .map_err(AudioStoreError::Io)?;

        let filename = format!("{}.{}", Uuid::new_v4(), format);
        let path = self.base_path.join(&filename);
        tokio::fs::write(&path, audio)
            .await
            .map_err(AudioStoreError::Io)?;

        tracing::debug!(path = %path.display(), bytes = audio.len(), "Saved audio file");

        Ok(SavedAudio {
            filename,
            path,
            size: audio.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct SavedAudio {
    pub filename: String,
    pub path: PathBuf,
    pub size: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum AudioStoreError {
    #[error("io error: {0}")]
    Io(std::io::Error),
}
