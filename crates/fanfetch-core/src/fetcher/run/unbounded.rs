use std::sync::mpsc;
use std::thread;

use crate::error::FetchError;
use crate::fetcher::single::retrieve_one;
use crate::fetcher::{DownloadResult, DownloadTask, FetchOptions};

use super::collect_and_join;

/// Run every task on its own thread (worker count == task count).
pub fn run_unbounded(
    tasks: Vec<DownloadTask>,
    opts: &FetchOptions,
    on_complete: &mut dyn FnMut(&DownloadResult),
) -> Result<Vec<DownloadResult>, FetchError> {
    let count = tasks.len();
    let (tx, rx) = mpsc::channel();
    let mut handles = Vec::with_capacity(count);
    let mut spawn_error = None;
    for task in tasks {
        let tx = tx.clone();
        let opts = opts.clone();
        let spawned = thread::Builder::new()
            .name(format!("fanfetch-worker-{}", task.index))
            .spawn(move || {
                let _ = tx.send(retrieve_one(&task, &opts));
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

    // Join whatever did start before reporting a spawn failure.
    let results = collect_and_join(rx, handles, count, on_complete)?;
    if let Some(e) = spawn_error {
        return Err(FetchError::Spawn(e));
    }
    Ok(results)
}
