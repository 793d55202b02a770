//! Sequential writer for one download's output file.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::temp_path;

/// Owns the output file of exactly one download. Not shared between workers.
pub struct StorageWriter {
    file: File,
    write_path: PathBuf,
    final_path: PathBuf,
    bytes_written: u64,
}

impl StorageWriter {
    /// Create (or truncate) the file the body is written to.
    ///
    /// With `keep_partial` that is `final_path` itself; otherwise it is the
    /// `.part` temp path next to it.
    pub fn create(final_path: &Path, keep_partial: bool) -> io::Result<Self> {
        let write_path = if keep_partial {
            final_path.to_path_buf()
        } else {
            temp_path(final_path)
        };
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&write_path)?;
        Ok(StorageWriter {
            file,
            write_path,
            final_path: final_path.to_path_buf(),
            bytes_written: 0,
        })
    }

    /// Append one chunk of the response body.
    pub fn write_chunk(&mut self, data: &[u8]) -> io::Result<()> {
        self.file.write_all(data)?;
        self.bytes_written += data.len() as u64;
        Ok(())
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Path currently being written (temp path unless keep-partial).
    pub fn write_path(&self) -> &Path {
        &self.write_path
    }

    /// Sync and move the file into place. Returns the number of bytes written.
    /// If either step fails the temp file is removed.
    pub fn finalize(self) -> io::Result<u64> {
        let synced = self.file.sync_data();
        drop(self.file);
        let placed = synced.and_then(|()| {
            if self.write_path != self.final_path {
                std::fs::rename(&self.write_path, &self.final_path)?;
            }
            Ok(())
        });
        if let Err(e) = placed {
            if self.write_path != self.final_path {
                let _ = std::fs::remove_file(&self.write_path);
            }
            return Err(e);
        }
        Ok(self.bytes_written)
    }

    /// Abandon a failed download. Removes the temp file; a keep-partial
    /// destination is left as is.
    pub fn discard(self) {
        drop(self.file);
        if self.write_path == self.final_path {
            return;
        }
        if let Err(e) = std::fs::remove_file(&self.write_path) {
            tracing::warn!(
                "could not remove partial file {}: {}",
                self.write_path.display(),
                e
            );
        }
    }
}
