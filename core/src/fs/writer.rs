// Chunked file writer

use core::fmt;

use dma_pool::SectorBuffer;

use super::{FileSystem, FsError};
use crate::console::Console;

/// Bytes staged per write call. A multiple of the sector size.
pub const FILE_CHUNK_SIZE: usize = 4096;

/// Staging buffer used for file writes.
pub type StagingBuffer = SectorBuffer<FILE_CHUNK_SIZE>;

/// Why the write loop stopped before the source was exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The driver failed a chunk write
    Fs(FsError),
    /// The driver accepted zero bytes without reporting an error
    NoProgress,
}

/// Result of writing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Sum of the per-chunk counts reported by the driver
    pub bytes_written: usize,
    /// Length of the source
    pub requested: usize,
    /// Set when the loop ended early
    pub stopped: Option<StopReason>,
    /// Set when close failed; does not change `bytes_written`
    pub close_error: Option<FsError>,
}

impl WriteOutcome {
    /// Everything was written and the file closed cleanly.
    pub fn is_complete(&self) -> bool {
        self.bytes_written == self.requested && self.stopped.is_none() && self.close_error.is_none()
    }
}

/// The file could not be opened; nothing was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteError {
    Open(FsError),
}

impl WriteError {
    /// Negative status code, the form used by the status line.
    pub fn status_code(&self) -> i32 {
        match self {
            Self::Open(e) => -(e.code() as i32),
        }
    }
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open(e) => write!(f, "open failed ({})", e),
        }
    }
}

/// Write `source` to `path` through a sector-aligned staging buffer.
///
/// The file is created (or truncated) first. A `None` or empty source leaves
/// an empty file. Otherwise the source is copied through `staging` at most
/// `N` bytes at a time; each pass advances by the count the driver reports,
/// so a short write is continued by the next chunk rather than retried. A
/// failed or zero-progress chunk stops the loop. The file is closed on every
/// path that opened it.
///
/// Progress and failures are written to `console`.
pub fn write_file<F, C, const N: usize>(
    fs: &mut F,
    console: &mut C,
    staging: &mut SectorBuffer<N>,
    path: &str,
    source: Option<&[u8]>,
) -> Result<WriteOutcome, WriteError>
where
    F: FileSystem,
    C: Console,
{
    let mut file = match fs.create(path) {
        Ok(file) => file,
        Err(e) => {
            let _ = write!(console, "\nError {} opening file {} for writing\n", e, path);
            return Err(WriteError::Open(e));
        }
    };

    let data = source.unwrap_or(&[]);
    let mut outcome = WriteOutcome {
        bytes_written: 0,
        requested: data.len(),
        stopped: None,
        close_error: None,
    };

    while outcome.bytes_written < data.len() {
        let offset = outcome.bytes_written;
        let chunk = staging.stage(&data[offset..]);
        let to_write = chunk.len();

        match fs.write(&mut file, chunk) {
            Err(e) => {
                let _ = write!(
                    console,
                    "\nError {} writing {} bytes at offset {} to file\n",
                    e, to_write, offset
                );
                outcome.stopped = Some(StopReason::Fs(e));
                break;
            }
            Ok(0) => {
                let _ = write!(console, "\nError: no bytes written at offset {}\n", offset);
                outcome.stopped = Some(StopReason::NoProgress);
                break;
            }
            Ok(written) => {
                let written = written.min(to_write);
                if written < to_write {
                    let _ = write!(
                        console,
                        "\nWarning: only {} out of {} bytes written at offset {}\n",
                        written, to_write, offset
                    );
                }
                outcome.bytes_written += written;
            }
        }
    }

    if let Err(e) = fs.close(file) {
        let _ = write!(console, "\nError {} closing file\n", e);
        outcome.close_error = Some(e);
    }

    let _ = write!(console, "{} bytes written.\n", outcome.bytes_written);
    Ok(outcome)
}
