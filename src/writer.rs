use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::DownloadError;

#[cfg(unix)]
use std::os::unix::fs::FileExt;
#[cfg(windows)]
use std::os::windows::fs::FileExt;

/// Owns the destination file handle for one download.
///
/// Every chunk task writes through the same handle at its own offset.
/// Positional writes carry the offset with them, so disjoint ranges need
/// no locking; callers are responsible for keeping the ranges disjoint.
/// The handle is released when the last clone is dropped, on every exit
/// path.
#[derive(Debug, Clone)]
pub struct ChunkWriter {
    file: Arc<File>,
    path: PathBuf,
}

impl ChunkWriter {
    /// Open the destination for writing, creating it if absent.
    pub fn create(path: &Path) -> Result<Self, DownloadError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                DownloadError::file_write(
                    format!("failed to open {} for writing", path.display()),
                    e,
                )
            })?;

        Ok(Self {
            file: Arc::new(file),
            path: path.to_path_buf(),
        })
    }

    /// Size the file to exactly `total_size` bytes, zero-filling on growth
    /// and truncating on shrink. Negative sizes are a no-op.
    pub fn set_len(&self, total_size: i64) -> Result<(), DownloadError> {
        if total_size < 0 {
            return Ok(());
        }
        self.file.set_len(total_size as u64).map_err(|e| {
            DownloadError::file_write(
                format!(
                    "failed to size {} to {} bytes",
                    self.path.display(),
                    total_size
                ),
                e,
            )
        })
    }

    /// Write all of `data` starting at byte `start_byte`.
    ///
    /// The write runs off the async runtime; a positional write that makes
    /// no progress is reported as a failure (disk full or similar).
    pub async fn write_chunk(&self, start_byte: u64, data: Vec<u8>) -> Result<(), DownloadError> {
        let writer = self.clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || writer.write_all_at(start_byte, &data))
            .await
            .map_err(|e| DownloadError::FileWrite {
                context: format!("write task for {} did not complete: {e}", path.display()),
                source: None,
            })?
    }

    fn write_all_at(&self, start_byte: u64, mut data: &[u8]) -> Result<(), DownloadError> {
        let mut position = start_byte;
        while !data.is_empty() {
            match write_at(&self.file, data, position) {
                Ok(0) => {
                    return Err(DownloadError::FileWrite {
                        context: format!(
                            "wrote no bytes to {} at offset {} (disk full or other I/O issue)",
                            self.path.display(),
                            position
                        ),
                        source: None,
                    });
                }
                Ok(written) => {
                    data = &data[written..];
                    position += written as u64;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    return Err(DownloadError::file_write(
                        format!(
                            "failed to write to {} at offset {}",
                            self.path.display(),
                            position
                        ),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(unix)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    file.write_at(buf, offset)
}

#[cfg(windows)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    file.seek_write(buf, offset)
}
