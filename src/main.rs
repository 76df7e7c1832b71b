use std::sync::Arc;

use batchscribe::cli::{Cli, Commands};
use batchscribe::config::Config;
use batchscribe::transcribe::whisper_local::WhisperLocal;
use batchscribe::{commands, dispatch, fetch};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("batchscribe=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Run { jobs: None });

    // init-config must work before any config file exists.
    if let Commands::InitConfig { path } = &command {
        return commands::init_config(path);
    }

    let config = Config::load(cli.config.as_deref())?;

    match command {
        Commands::Run { jobs } => {
            let backend = Arc::new(WhisperLocal::new(&config.model)?);
            let summary = dispatch::run_batch(&config, backend, jobs)?;
            if summary.failed > 0 {
                tracing::warn!(
                    "{} of {} files failed; see log above",
                    summary.failed,
                    summary.submitted
                );
            }
            Ok(())
        }
        Commands::List => commands::list_input(&config.input_audio),
        Commands::Fetch { url } => fetch::fetch_audio(&url, &config.input_audio),
        Commands::InitConfig { .. } => unreachable!("handled before config load"),
    }
}
