//! Single-stream HTTP GET of one task into its destination file.

use std::io;

use super::{DownloadResult, DownloadTask, FetchOptions};
use crate::error::TransportFailure;
use crate::storage::StorageWriter;

/// Receive buffer size; every chunk curl hands us is at most this large and is
/// written straight through, which bounds peak memory per worker.
pub const CHUNK_SIZE: usize = 8192;

const MAX_REDIRECTS: u32 = 10;

/// Curl also speaks `file://`, `ftp://` and friends; those have no HTTP
/// status to check, so they are refused up front.
fn check_scheme(locator: &str) -> Result<(), TransportFailure> {
    match url::Url::parse(locator) {
        Ok(u) if !matches!(u.scheme(), "http" | "https") => {
            Err(TransportFailure::UnsupportedScheme(u.scheme().to_string()))
        }
        // Unparseable locators are left for curl to reject.
        _ => Ok(()),
    }
}

/// Downloads one task and reports the outcome. Never panics on network or
/// disk failures; they become a failed result.
pub fn retrieve_one(task: &DownloadTask, opts: &FetchOptions) -> DownloadResult {
    tracing::debug!(index = task.index, url = %task.source_locator, "download started");
    let outcome = download_to_file(task, opts);
    match &outcome {
        Ok(bytes) => tracing::info!(
            index = task.index,
            file = %task.destination_name,
            bytes,
            "download finished"
        ),
        Err(e) => tracing::warn!(
            index = task.index,
            url = %task.source_locator,
            "download failed: {}",
            e
        ),
    }
    DownloadResult {
        task: task.clone(),
        outcome,
    }
}

/// GET `task.source_locator` and stream the body into the task's destination.
/// The file is only created once the first body chunk arrives, so an error
/// status leaves nothing on disk.
fn download_to_file(task: &DownloadTask, opts: &FetchOptions) -> Result<u64, TransportFailure> {
    check_scheme(&task.source_locator)?;
    let destination = task.destination_in(&opts.output_dir);

    let mut easy = curl::easy::Easy::new();
    easy.url(&task.source_locator)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    // Error statuses abort before any body is delivered.
    easy.fail_on_error(true)?;
    easy.buffer_size(CHUNK_SIZE)?;
    easy.connect_timeout(opts.connect_timeout)?;
    if let Some(timeout) = opts.timeout {
        easy.timeout(timeout)?;
    }

    let mut sink: Option<StorageWriter> = None;
    let mut storage_error: Option<io::Error> = None;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if sink.is_none() {
                match StorageWriter::create(&destination, opts.keep_partial) {
                    Ok(w) => sink = Some(w),
                    Err(e) => {
                        storage_error = Some(e);
                        return Ok(0); // abort transfer
                    }
                }
            }
            let Some(writer) = sink.as_mut() else {
                return Ok(0);
            };
            match writer.write_chunk(data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    storage_error = Some(e);
                    Ok(0)
                }
            }
        })?;
        transfer.perform()
    };

    if let Err(e) = performed {
        if let Some(writer) = sink {
            writer.discard();
        }
        if e.is_write_error() {
            if let Some(io_err) = storage_error {
                return Err(TransportFailure::Storage(io_err));
            }
        }
        if e.is_http_returned_error() {
            if let Ok(code) = easy.response_code() {
                return Err(TransportFailure::Http(code));
            }
        }
        return Err(TransportFailure::Curl(e));
    }

    let redirected = easy.effective_url()?.map(check_scheme).transpose();
    let code = easy.response_code()?;
    if let Err(e) = redirected {
        if let Some(writer) = sink {
            writer.discard();
        }
        return Err(e);
    }
    if !(200..300).contains(&code) {
        if let Some(writer) = sink {
            writer.discard();
        }
        return Err(TransportFailure::Http(code));
    }

    // Empty body: no chunk ever arrived, but the file still has to exist.
    let writer = match sink {
        Some(w) => w,
        None => StorageWriter::create(&destination, opts.keep_partial)?,
    };
    Ok(writer.finalize()?)
}
