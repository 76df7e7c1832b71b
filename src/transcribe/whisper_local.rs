use std::path::Path;

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::error::Error;
use crate::transcribe::backend::{Transcript, TranscriptionBackend};

/// Local whisper.cpp backend.
///
/// The model context is loaded once here and shared across workers; each
/// `transcribe` call creates its own inference state, so concurrent calls
/// only read the shared weights.
pub struct WhisperLocal {
    ctx: WhisperContext,
}

impl WhisperLocal {
    pub fn new(model_path: &Path) -> Result<Self, Error> {
        let model = model_path.to_string_lossy();
        let ctx = WhisperContext::new_with_params(&model, WhisperContextParameters::default())
            .map_err(|e| {
                Error::transcription(format!(
                    "failed to load whisper model {}: {:?}",
                    model_path.display(),
                    e
                ))
            })?;
        Ok(Self { ctx })
    }
}

impl TranscriptionBackend for WhisperLocal {
    fn name(&self) -> &str {
        "whisper-local"
    }

    fn transcribe(&self, audio_path: &Path) -> Result<Transcript, Error> {
        // Read WAV file
        let mut reader = hound::WavReader::open(audio_path).map_err(|e| {
            Error::transcription(format!("cannot decode {}: {}", audio_path.display(), e))
        })?;
        let spec = reader.spec();
        let samples_i16: Vec<i16> = reader
            .samples::<i16>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                Error::transcription(format!("cannot decode {}: {}", audio_path.display(), e))
            })?;

        // Convert i16 to f32 normalized [-1.0, 1.0]
        let samples_f32: Vec<f32> = samples_i16.iter().map(|&s| s as f32 / 32768.0).collect();

        let duration_secs = samples_f32.len() as f64 / spec.sample_rate as f64;

        // Run whisper on a fresh per-call state.
        let mut state = self
            .ctx
            .create_state()
            .map_err(|e| Error::transcription(format!("failed to create state: {:?}", e)))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_n_threads(4);

        state
            .full(params, &samples_f32)
            .map_err(|e| Error::transcription(format!("inference failed: {:?}", e)))?;

        let mut text = String::new();
        let n_segments = state.full_n_segments();
        for i in 0..n_segments {
            if let Some(segment) = state.get_segment(i) {
                if let Ok(segment_text) = segment.to_str_lossy() {
                    text.push_str(&segment_text);
                    text.push(' ');
                }
            }
        }

        Ok(Transcript {
            duration_secs,
            text: text.trim().to_string(),
        })
    }
}
