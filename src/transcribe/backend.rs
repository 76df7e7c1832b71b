use std::path::Path;

use crate::error::Error;

/// Transcription output for one audio file.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub duration_secs: f64,
    pub text: String,
}

/// Speech-to-text seam.
///
/// Implementations are `Send + Sync` because the dispatcher shares one
/// instance across all worker threads: the model is loaded once and used for
/// read-only inference only. A backend whose model cannot take concurrent
/// calls must do its own internal locking (or the caller runs one worker).
pub trait TranscriptionBackend: Send + Sync {
    fn name(&self) -> &str;
    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, Error>;
}
