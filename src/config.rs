use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Error;

const DEFAULT_MAX_CONCURRENCY: usize = 3;

/// Settings loaded once at startup and immutable for the process lifetime.
///
/// `input_audio`, `output_transcriptions` and `log_file` are required;
/// a config file that omits any of them fails to parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory scanned (non-recursively) for audio files to transcribe.
    pub input_audio: PathBuf,
    /// Directory where per-file `.txt` transcripts are written.
    pub output_transcriptions: PathBuf,
    /// Append-only CSV timing log.
    pub log_file: PathBuf,
    /// Upper bound on simultaneously running transcription jobs.
    #[serde(default = "default_max_concurrency", alias = "max_threads")]
    pub max_concurrency: usize,
    /// Path to a ggml whisper model file.
    #[serde(default = "default_model")]
    pub model: PathBuf,
}

fn default_max_concurrency() -> usize {
    DEFAULT_MAX_CONCURRENCY
}

fn default_model() -> PathBuf {
    PathBuf::from("ggml-base.bin")
}

impl Config {
    /// Load config, resolving the file path in order: explicit path,
    /// `batchscribe.toml` beside the executable, then the platform config
    /// directory. Unlike optional-config tools, no file found is a fatal
    /// startup error.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        let resolved = match path {
            Some(p) => p.to_path_buf(),
            None => Self::find_default_path().ok_or_else(|| {
                Error::config(
                    "no config file found (looked beside the executable and in the \
                     platform config directory); pass one with --config",
                )
            })?,
        };

        let content = std::fs::read_to_string(&resolved).map_err(|e| {
            Error::config(format!(
                "failed to read config file {}: {}",
                resolved.display(),
                e
            ))
        })?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("{}: {}", resolved.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    fn find_default_path() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(beside_exe) = exe_path.parent().map(|p| p.join("batchscribe.toml")) {
                if beside_exe.exists() {
                    return Some(beside_exe);
                }
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let platform_config = config_dir.join("batchscribe").join("config.toml");
            if platform_config.exists() {
                return Some(platform_config);
            }
        }

        None
    }

    fn validate(&self) -> Result<(), Error> {
        if self.max_concurrency == 0 {
            return Err(Error::config("max_concurrency must be at least 1"));
        }
        Ok(())
    }

    /// Generate a default config file with all keys and inline documentation.
    pub fn generate_default_commented() -> String {
        format!(
            r#"# batchscribe configuration
# All paths may be absolute or relative to the working directory.

# Directory containing the audio files to transcribe (scanned non-recursively).
input_audio = "input_audio"

# Directory where transcripts are written, one <name>.txt per input file.
output_transcriptions = "output_transcriptions"

# CSV timing log. Appended to across runs; the header is written only once.
log_file = "transcription_log.csv"

# Maximum number of transcription jobs running at the same time.
# Transcription is compute-heavy; raise this only if you have the RAM for it.
max_concurrency = {DEFAULT_MAX_CONCURRENCY}

# Path to the ggml whisper model file used for inference.
model = "ggml-base.bin"
"#
        )
    }
}
