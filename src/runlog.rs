// Run log: append-only CSV of (elapsed time, audio file) per completed job.
//
// The file is owned by a single writer. Under concurrent transcription the
// dispatcher runs `run_log_writer` on a dedicated thread fed by a channel,
// so rows never interleave.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::error::Error;

/// One row recording a completed job's processing duration and source file.
#[derive(Debug, Clone)]
pub struct LogRecord {
    pub elapsed: Duration,
    pub file_name: String,
}

impl LogRecord {
    /// Elapsed time as `MM:SS`.
    pub fn elapsed_mm_ss(&self) -> String {
        let total = self.elapsed.as_secs();
        format!("{:02}:{:02}", total / 60, total % 60)
    }
}

/// Handle on the append-only run log.
pub struct RunLog {
    file: File,
}

impl RunLog {
    /// Open (or create) the log at `path`. The header row is written only if
    /// the file does not exist yet or is empty, so re-running appends data
    /// rows under the original header.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let has_header = path
            .metadata()
            .map(|m| m.len() > 0)
            .unwrap_or(false);

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut log = Self { file };
        if !has_header {
            writeln!(log.file, "elapsed_time,audio_file")?;
        }
        Ok(log)
    }

    /// Append one row. Callers must serialize access; see `run_log_writer`.
    pub fn append(&mut self, record: &LogRecord) -> Result<(), Error> {
        writeln!(
            self.file,
            "{},{}",
            record.elapsed_mm_ss(),
            csv_field(&record.file_name)
        )?;
        Ok(())
    }
}

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Runs the log writer loop. Call on a dedicated thread.
///
/// Blocks until the channel is closed (all senders dropped). A failed append
/// loses that record only; remaining records are still written.
pub fn run_log_writer(receiver: Receiver<LogRecord>, mut log: RunLog) {
    for record in receiver {
        if let Err(e) = log.append(&record) {
            tracing::error!("Failed to write log row for '{}': {}", record.file_name, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use tempfile::TempDir;

    fn record(secs: u64, name: &str) -> LogRecord {
        LogRecord {
            elapsed: Duration::from_secs(secs),
            file_name: name.to_string(),
        }
    }

    #[test]
    fn test_header_written_once_on_fresh_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");

        let mut log = RunLog::open(&path).unwrap();
        log.append(&record(65, "a.mp3")).unwrap();
        log.append(&record(5, "b.mp3")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["elapsed_time,audio_file", "01:05,a.mp3", "00:05,b.mp3"]);
    }

    #[test]
    fn test_reopen_does_not_repeat_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");

        let mut log = RunLog::open(&path).unwrap();
        log.append(&record(10, "a.mp3")).unwrap();
        drop(log);

        let mut log = RunLog::open(&path).unwrap();
        log.append(&record(20, "b.mp3")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches("elapsed_time").count(), 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_empty_existing_file_gets_header() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");
        std::fs::write(&path, "").unwrap();

        let mut log = RunLog::open(&path).unwrap();
        log.append(&record(1, "a.wav")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("elapsed_time,audio_file\n"));
    }

    #[test]
    fn test_elapsed_formatting() {
        assert_eq!(record(0, "x").elapsed_mm_ss(), "00:00");
        assert_eq!(record(59, "x").elapsed_mm_ss(), "00:59");
        assert_eq!(record(60, "x").elapsed_mm_ss(), "01:00");
        assert_eq!(record(754, "x").elapsed_mm_ss(), "12:34");
    }

    #[test]
    fn test_field_with_comma_is_quoted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");

        let mut log = RunLog::open(&path).unwrap();
        log.append(&record(3, "a, b.mp3")).unwrap();
        drop(log);

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("00:03,\"a, b.mp3\""));
    }

    #[test]
    fn test_writer_survives_append_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");
        std::fs::write(&path, "elapsed_time,audio_file\n").unwrap();

        // Read-only handle: every append fails. A failed row must be
        // dropped without stopping the writer from draining the channel.
        let log = RunLog {
            file: File::open(&path).unwrap(),
        };

        let (sender, receiver) = mpsc::channel();
        let writer = std::thread::spawn(move || run_log_writer(receiver, log));

        for i in 0..5 {
            sender.send(record(i, &format!("file{i}.mp3"))).unwrap();
        }
        drop(sender);
        writer.join().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "elapsed_time,audio_file\n");
    }

    #[test]
    fn test_writer_thread_drains_all_records() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("log.csv");
        let log = RunLog::open(&path).unwrap();

        let (sender, receiver) = mpsc::channel();
        let writer = std::thread::spawn(move || run_log_writer(receiver, log));

        for i in 0..20 {
            sender.send(record(i, &format!("file{i}.mp3"))).unwrap();
        }
        drop(sender);
        writer.join().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        // Header + 20 data rows, exactly once each
        assert_eq!(content.lines().count(), 21);
        for i in 0..20 {
            assert_eq!(content.matches(&format!("file{i}.mp3")).count(), 1);
        }
    }
}
