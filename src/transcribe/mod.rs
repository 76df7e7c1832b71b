pub mod backend;
pub mod whisper_local;
