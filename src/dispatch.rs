// Job dispatcher: fans independent transcription jobs out across a bounded
// worker pool and drives the transcript writer and run log per job.
//
// Workers pull jobs from a shared queue, so at most `max_concurrency` jobs
// run at once. Completed jobs send their timing record to a dedicated log
// writer thread; the dispatcher joins every worker and the log thread before
// returning, so the log file is complete when the process exits.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::Config;
use crate::error::Error;
use crate::format;
use crate::output;
use crate::runlog::{run_log_writer, LogRecord, RunLog};
use crate::transcribe::backend::TranscriptionBackend;

/// One unit of work: transcribing a single audio file.
#[derive(Debug, Clone)]
pub struct Job {
    pub source_path: PathBuf,
    pub display_name: String,
}

/// Terminal tally for one batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub submitted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Enumerate the input directory (non-recursive) into jobs.
///
/// Subdirectories are skipped; an unreadable entry is skipped with a warning
/// rather than failing the run. A missing input directory is fatal.
pub fn list_jobs(input_dir: &Path) -> Result<Vec<Job>, Error> {
    if !input_dir.is_dir() {
        return Err(Error::directory(
            input_dir,
            "input directory does not exist",
        ));
    }

    let mut jobs = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!("Skipping unreadable entry in {}: {}", input_dir.display(), e);
                continue;
            }
        };
        match entry.file_type() {
            Ok(ft) if ft.is_file() => {}
            Ok(_) => continue,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", entry.path().display(), e);
                continue;
            }
        }
        jobs.push(Job {
            source_path: entry.path(),
            display_name: entry.file_name().to_string_lossy().to_string(),
        });
    }

    jobs.sort_by(|a, b| a.source_path.cmp(&b.source_path)); // deterministic order
    Ok(jobs)
}

/// Transcribe every file in the input directory under a fixed-size worker
/// pool, writing one transcript per file and one log row per success.
///
/// A single job's failure is logged and counted but never cancels sibling
/// jobs; only configuration and directory-level problems abort the run.
pub fn run_batch(
    config: &Config,
    backend: Arc<dyn TranscriptionBackend>,
    jobs_override: Option<usize>,
) -> Result<DispatchSummary> {
    if jobs_override == Some(0) {
        return Err(Error::config("jobs override must be at least 1").into());
    }

    let jobs = list_jobs(&config.input_audio)?;
    if jobs.is_empty() {
        tracing::info!("No files to transcribe in {}", config.input_audio.display());
        return Ok(DispatchSummary::default());
    }

    std::fs::create_dir_all(&config.output_transcriptions)?;
    let run_log = RunLog::open(&config.log_file)?;

    let submitted = jobs.len();
    let pool_size = jobs_override
        .unwrap_or(config.max_concurrency)
        .min(submitted)
        .max(1);

    tracing::info!(
        "Transcribing {} files with {} workers ({})",
        submitted,
        pool_size,
        backend.name()
    );

    // --- Log writer thread: single owner of the log file ---
    let (log_tx, log_rx) = mpsc::channel::<LogRecord>();
    let log_handle = std::thread::Builder::new()
        .name("run-log".into())
        .spawn(move || run_log_writer(log_rx, run_log))?;

    // --- Fill the job queue up front, then let workers drain it ---
    let (job_tx, job_rx) = mpsc::channel::<Job>();
    for job in jobs {
        job_tx
            .send(job)
            .map_err(|e| anyhow::anyhow!("job queue closed unexpectedly: {e}"))?;
    }
    drop(job_tx);

    let job_rx = Arc::new(Mutex::new(job_rx));
    let mut workers = Vec::with_capacity(pool_size);
    let mut spawn_error = None;
    for i in 0..pool_size {
        let jobs = Arc::clone(&job_rx);
        let backend = Arc::clone(&backend);
        let output_dir = config.output_transcriptions.clone();
        let log_tx = log_tx.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("worker-{i}"))
            .spawn(move || worker_loop(jobs, backend, output_dir, log_tx));
        match spawned {
            Ok(handle) => workers.push(handle),
            Err(e) => {
                // Surface the error only after the threads that did start
                // are joined; the queue is already filled, so they drain it.
                spawn_error = Some(e);
                break;
            }
        }
    }

    // Drop our copy of the sender so the log writer's channel closes once
    // all workers finish.
    drop(log_tx);

    let mut summary = DispatchSummary {
        submitted,
        ..Default::default()
    };
    for handle in workers {
        match handle.join() {
            Ok((succeeded, failed)) => {
                summary.succeeded += succeeded;
                summary.failed += failed;
            }
            Err(_) => tracing::error!("Worker thread panicked"),
        }
    }

    if log_handle.join().is_err() {
        tracing::error!("Log writer thread panicked");
    }

    if let Some(e) = spawn_error {
        return Err(anyhow::Error::new(e).context("failed to spawn worker thread"));
    }

    tracing::info!(
        "Done: {} succeeded, {} failed of {} submitted",
        summary.succeeded,
        summary.failed,
        summary.submitted
    );
    Ok(summary)
}

/// Worker body: pull jobs until the queue closes. Returns (succeeded, failed).
fn worker_loop(
    jobs: Arc<Mutex<Receiver<Job>>>,
    backend: Arc<dyn TranscriptionBackend>,
    output_dir: PathBuf,
    log_tx: Sender<LogRecord>,
) -> (usize, usize) {
    let mut succeeded = 0;
    let mut failed = 0;

    loop {
        let job = {
            let Ok(guard) = jobs.lock() else { break };
            match guard.recv() {
                Ok(job) => job,
                Err(_) => break, // queue drained
            }
        };

        match process_job(&job, backend.as_ref(), &output_dir) {
            Ok(elapsed) => {
                succeeded += 1;
                let record = LogRecord {
                    elapsed,
                    file_name: job.display_name.clone(),
                };
                if log_tx.send(record).is_err() {
                    tracing::error!("Run log closed; dropping record for '{}'", job.display_name);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!("Failed to transcribe '{}': {:#}", job.display_name, e);
            }
        }
    }

    (succeeded, failed)
}

fn process_job(
    job: &Job,
    backend: &dyn TranscriptionBackend,
    output_dir: &Path,
) -> Result<Duration> {
    tracing::info!("Transcribing: {}", job.display_name);
    let started = Instant::now();

    let transcript = backend.transcribe(&job.source_path)?;
    let formatted = format::paragraphize(&transcript.text);
    output::write_transcript(output_dir, &job.display_name, &formatted)?;

    let elapsed = started.elapsed();
    tracing::info!(
        "Transcribed {} in {:.1}s ({:.1}s of audio)",
        job.display_name,
        elapsed.as_secs_f64(),
        transcript.duration_secs
    );
    Ok(elapsed)
}
