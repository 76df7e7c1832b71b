use thiserror::Error;

/// Domain error kinds. Configuration and directory errors are fatal to the
/// whole run; transcription and I/O errors are isolated to the job that hit
/// them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("transcription failed: {0}")]
    Transcription(String),

    #[error("directory error: {path}: {message}")]
    Directory { path: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub(crate) fn transcription(message: impl Into<String>) -> Self {
        Self::Transcription(message.into())
    }

    pub(crate) fn directory(path: &std::path::Path, message: impl Into<String>) -> Self {
        Self::Directory {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}
