pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod format;
pub mod output;
pub mod runlog;
pub mod transcribe;
