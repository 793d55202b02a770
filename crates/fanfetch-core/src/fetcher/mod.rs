//! Concurrent URL-to-file fetcher.
//!
//! Turns a list of URLs into download tasks, runs every task on its own
//! worker thread (or on a bounded pool when `max_concurrent` is set) and
//! returns only after every worker has finished. A failed download never
//! fails the batch; it is just a result with an error.

mod plan;
mod run;
mod single;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::FetchConfig;
use crate::error::{FetchError, TransportFailure};

pub use plan::plan_tasks;
pub use single::{retrieve_one, CHUNK_SIZE};

/// One URL and the local name its body is saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    /// Position in the input list.
    pub index: usize,
    pub source_locator: String,
    /// Never empty.
    pub destination_name: String,
}

impl DownloadTask {
    pub fn destination_in(&self, dir: &Path) -> PathBuf {
        dir.join(&self.destination_name)
    }
}

/// Outcome of one task. `Ok` carries the number of bytes written.
#[derive(Debug)]
pub struct DownloadResult {
    pub task: DownloadTask,
    pub outcome: Result<u64, TransportFailure>,
}

impl DownloadResult {
    pub fn succeeded(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error_detail(&self) -> Option<String> {
        self.outcome.as_ref().err().map(|e| e.to_string())
    }
}

/// Per-transfer settings shared (by clone) with every worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub output_dir: PathBuf,
    pub connect_timeout: Duration,
    /// Total transfer timeout; `None` = wait as long as the server keeps sending.
    pub timeout: Option<Duration>,
    pub keep_partial: bool,
}

impl Default for FetchOptions {
    fn default() -> Self {
        FetchConfig::default().fetch_options()
    }
}

/// Download every locator concurrently and wait for all of them.
///
/// `on_complete` is called on the calling thread once per task, in
/// completion order, as soon as that task's worker reports. The returned
/// results are in the same order.
///
/// Returns `FetchError::NoLocators` for an empty list without touching the
/// network.
pub fn retrieve_all<S, F>(
    locators: &[S],
    cfg: &FetchConfig,
    mut on_complete: F,
) -> Result<Vec<DownloadResult>, FetchError>
where
    S: AsRef<str>,
    F: FnMut(&DownloadResult),
{
    if locators.is_empty() {
        return Err(FetchError::NoLocators);
    }
    let tasks = plan_tasks(locators, cfg.dedupe_names);
    let opts = cfg.fetch_options();
    let count = tasks.len();
    let started = Instant::now();

    let results = match cfg.max_concurrent {
        Some(max) => {
            let workers = max.max(1).min(count);
            tracing::debug!(tasks = count, workers, "starting bounded worker pool");
            run::run_concurrent(tasks, workers, &opts, &mut on_complete)?
        }
        None => {
            tracing::debug!(tasks = count, "starting one worker per URL");
            run::run_unbounded(tasks, &opts, &mut on_complete)?
        }
    };

    log_batch("concurrent", &results, started.elapsed());
    Ok(results)
}

/// Download every locator one after another on the calling thread.
///
/// Same contract as [`retrieve_all`]; used as the baseline the concurrent
/// mode is measured against.
pub fn retrieve_sequential<S, F>(
    locators: &[S],
    cfg: &FetchConfig,
    mut on_complete: F,
) -> Result<Vec<DownloadResult>, FetchError>
where
    S: AsRef<str>,
    F: FnMut(&DownloadResult),
{
    if locators.is_empty() {
        return Err(FetchError::NoLocators);
    }
    let opts = cfg.fetch_options();
    let started = Instant::now();
    let results: Vec<DownloadResult> = plan_tasks(locators, cfg.dedupe_names)
        .iter()
        .map(|task| {
            let result = retrieve_one(task, &opts);
            on_complete(&result);
            result
        })
        .collect();
    log_batch("sequential", &results, started.elapsed());
    Ok(results)
}

fn log_batch(mode: &str, results: &[DownloadResult], elapsed: Duration) {
    let ok = results.iter().filter(|r| r.succeeded()).count();
    tracing::info!(
        mode,
        succeeded = ok,
        failed = results.len() - ok,
        elapsed_ms = elapsed.as_millis() as u64,
        "batch finished"
    );
}
