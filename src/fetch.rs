use std::path::Path;

use anyhow::Result;

/// Download a URL's audio track into `input_dir` for later transcription.
///
/// Shells out to `yt-dlp`, extracting audio to mp3. A failed fetch surfaces
/// the tool's stderr; it never touches files already in the input directory.
pub fn fetch_audio(url: &str, input_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(input_dir)?;

    tracing::info!("Fetching audio from {}", url);
    let output = std::process::Command::new("yt-dlp")
        .args(["-f", "m4a/bestaudio/best", "-x", "--audio-format", "mp3", "-P"])
        .arg(input_dir)
        .arg(url)
        .output()
        .map_err(|e| anyhow::anyhow!("failed to run yt-dlp (is it installed?): {e}"))?;

    if !output.status.success() {
        let err = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("yt-dlp exited with {}: {}", output.status, err.trim());
    }

    tracing::info!("Fetched audio into {}", input_dir.display());
    Ok(())
}
