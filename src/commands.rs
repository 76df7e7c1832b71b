use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::dispatch;

/// Print the files waiting in the input directory, one per line.
pub fn list_input(input_dir: &Path) -> Result<()> {
    let jobs = dispatch::list_jobs(input_dir)?;
    if jobs.is_empty() {
        println!("No audio files in {}", input_dir.display());
        return Ok(());
    }
    for job in &jobs {
        println!("{}", job.display_name);
    }
    Ok(())
}

/// Write a commented default config file at `path`.
pub fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("refusing to overwrite existing {}", path.display());
    }
    std::fs::write(path, Config::generate_default_commented())?;
    println!("Wrote {}", path.display());
    Ok(())
}
