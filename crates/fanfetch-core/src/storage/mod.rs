//! Disk I/O and file lifecycle.
//!
//! A download is written to `<destination>.part` and atomically renamed onto
//! the destination once the transfer succeeded. On failure the temp file is
//! removed. In keep-partial mode the body goes straight to the destination
//! and a failed transfer leaves whatever was written.

mod writer;

pub use writer::StorageWriter;

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `file.iso` → `file.iso.part`).
pub fn temp_path(final_path: &std::path::Path) -> std::path::PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    std::path::PathBuf::from(o)
}
