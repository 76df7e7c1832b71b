use std::path::{Path, PathBuf};

use crate::error::Error;

/// Write a transcript for `source_file_name` into `dir`.
///
/// The output file is named after the input minus its extension
/// (`lecture.m4a` -> `lecture.txt`) and is created or overwritten. The
/// directory must already exist. Content is UTF-8.
pub fn write_transcript(dir: &Path, source_file_name: &str, text: &str) -> Result<PathBuf, Error> {
    let stem = Path::new(source_file_name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source_file_name.to_string());

    let path = dir.join(format!("{stem}.txt"));
    std::fs::write(&path, text)?;
    Ok(path)
}
