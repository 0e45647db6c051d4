//! Filesystem contract and file writing.
//!
//! The FAT driver itself lives outside this workspace. [`FileSystem`] is the
//! narrow surface the dump routine needs from it: mount/unmount of one
//! volume, create-or-truncate, sector-aligned chunk writes and close.

mod writer;

use core::fmt;

use dma_pool::AlignedChunk;

pub use writer::{write_file, StagingBuffer, StopReason, WriteError, WriteOutcome, FILE_CHUNK_SIZE};

/// Filesystem driver error, numbered like FatFs `FRESULT` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    DiskError,
    InternalError,
    NotReady,
    NoFile,
    NoPath,
    InvalidName,
    Denied,
    Exists,
    InvalidObject,
    WriteProtected,
    InvalidDrive,
    NotEnabled,
    NoFilesystem,
    Timeout,
    Locked,
    NotEnoughCore,
    TooManyOpenFiles,
    InvalidParameter,
}

impl FsError {
    /// Numeric driver result code (never 0).
    pub fn code(&self) -> u8 {
        match self {
            Self::DiskError => 1,
            Self::InternalError => 2,
            Self::NotReady => 3,
            Self::NoFile => 4,
            Self::NoPath => 5,
            Self::InvalidName => 6,
            Self::Denied => 7,
            Self::Exists => 8,
            Self::InvalidObject => 9,
            Self::WriteProtected => 10,
            Self::InvalidDrive => 11,
            Self::NotEnabled => 12,
            Self::NoFilesystem => 13,
            Self::Timeout => 15,
            Self::Locked => 16,
            Self::NotEnoughCore => 17,
            Self::TooManyOpenFiles => 18,
            Self::InvalidParameter => 19,
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Operations the dump routine needs from the filesystem driver.
pub trait FileSystem {
    /// Open file handle.
    type File;

    /// Mount the filesystem on volume `volume` (mounted immediately, not lazily).
    fn mount(&mut self, volume: u8) -> Result<(), FsError>;

    /// Unmount the default volume. Unmounting an unmounted volume succeeds.
    fn unmount(&mut self) -> Result<(), FsError>;

    /// Open `path` for writing, creating it or truncating an existing file.
    fn create(&mut self, path: &str) -> Result<Self::File, FsError>;

    /// Write one chunk at the current position.
    ///
    /// Returns the number of bytes actually written, which may be less than
    /// `chunk.len()` (volume full).
    fn write(&mut self, file: &mut Self::File, chunk: AlignedChunk<'_>) -> Result<usize, FsError>;

    /// Flush and close.
    fn close(&mut self, file: Self::File) -> Result<(), FsError>;
}
