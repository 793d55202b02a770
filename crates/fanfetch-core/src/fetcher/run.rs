//! Worker threads for a batch: bounded pool and one-thread-per-task.
//!
//! Both variants report results over an mpsc channel and return only after
//! every worker thread has been joined.

use std::collections::VecDeque;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use super::single::retrieve_one;
use super::{DownloadResult, DownloadTask, FetchOptions};
use crate::error::FetchError;

mod unbounded;
pub(super) use unbounded::run_unbounded;

/// Run tasks on `workers` threads draining a shared queue.
pub(super) fn run_concurrent(
    tasks: Vec<DownloadTask>,
    workers: usize,
    opts: &FetchOptions,
    on_complete: &mut dyn FnMut(&DownloadResult),
) -> Result<Vec<DownloadResult>, FetchError> {
    let count = tasks.len();
    let work: Arc<Mutex<VecDeque<DownloadTask>>> = Arc::new(Mutex::new(tasks.into()));
    let (tx, rx) = mpsc::channel();
    let num_workers = workers.min(count);
    let mut handles = Vec::with_capacity(num_workers);
    let mut spawn_error = None;
    for worker in 0..num_workers {
        let work = Arc::clone(&work);
        let tx = tx.clone();
        let opts = opts.clone();
        let spawned = thread::Builder::new()
            .name(format!("fanfetch-worker-{}", worker))
            .spawn(move || {
                while let Some(task) = next_task(&work) {
                    if tx.send(retrieve_one(&task, &opts)).is_err() {
                        break;
                    }
                }
            });
        match spawned {
            Ok(h) => handles.push(h),
            Err(e) => {
                spawn_error = Some(e);
                break;
            }
        }
    }
    drop(tx);
    if handles.is_empty() {
        // Nobody would ever drain the queue.
        return Err(FetchError::Spawn(spawn_error.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "no worker started")
        })));
    }
    if let Some(e) = spawn_error {
        tracing::warn!(
            started = handles.len(),
            wanted = num_workers,
            "could not start every worker: {}",
            e
        );
    }
    collect_and_join(rx, handles, count, on_complete)
}

fn next_task(work: &Mutex<VecDeque<DownloadTask>>) -> Option<DownloadTask> {
    work.lock()
        .unwrap_or_else(PoisonError::into_inner)
        .pop_front()
}

/// Receive results until every sender is gone, then join all workers.
/// This is the join barrier: nothing returns while a worker is still alive.
pub(super) fn collect_and_join(
    rx: mpsc::Receiver<DownloadResult>,
    handles: Vec<JoinHandle<()>>,
    expected: usize,
    on_complete: &mut dyn FnMut(&DownloadResult),
) -> Result<Vec<DownloadResult>, FetchError> {
    let mut results = Vec::with_capacity(expected);
    for result in rx {
        on_complete(&result);
        results.push(result);
    }

    let mut panicked = 0usize;
    for h in handles {
        if h.join().is_err() {
            panicked += 1;
        }
    }
    if panicked > 0 {
        return Err(FetchError::WorkerPanicked(panicked));
    }
    if results.len() != expected {
        tracing::warn!(
            received = results.len(),
            expected,
            "fewer results than tasks"
        );
    }
    Ok(results)
}
