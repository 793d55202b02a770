//! Error types for a single transfer and for a whole batch.

use thiserror::Error;

/// Why a single download failed.
///
/// Every variant is reported the same way (one failure line carrying the
/// `Display` text); the variants only keep the underlying cause around.
#[derive(Debug, Error)]
pub enum TransportFailure {
    /// Curl reported an error (bad URL, DNS, connect, timeout, read, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The locator (or a redirect target) is not plain HTTP or HTTPS.
    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Writing the body to disk failed (disk full, permission denied, ...).
    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

/// Batch-level failure of `retrieve_all` / `retrieve_sequential`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Nothing to download; the caller should print usage.
    #[error("no URLs provided")]
    NoLocators,
    /// The OS refused to start a worker thread.
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),
    /// One or more workers panicked. All other workers were still joined.
    #[error("{0} worker thread(s) panicked")]
    WorkerPanicked(usize),
}
