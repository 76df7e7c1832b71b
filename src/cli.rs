use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "batchscribe",
    version,
    about = "Batch audio transcriber with a bounded worker pool and CSV run log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Transcribe all audio files in the input directory (default if no subcommand)
    Run {
        /// Override the configured worker count
        #[arg(long)]
        jobs: Option<usize>,
    },

    /// List the audio files waiting in the input directory
    List,

    /// Download audio from a URL into the input directory (requires yt-dlp)
    Fetch {
        /// Media page or stream URL
        url: String,
    },

    /// Write a commented default config file
    InitConfig {
        /// Where to write the file
        #[arg(default_value = "batchscribe.toml")]
        path: PathBuf,
    },
}
