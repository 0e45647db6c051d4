//! Data shared between states, and the run summary built from it.

use alloc::vec::Vec;
use core::fmt;

use romdump_core::{ReportFrame, StatusLog, StorageError, UsbOutcome, WriteError, WriteOutcome};

use crate::acquire::{AcquireError, AcquisitionBuffer};
use crate::config::DumpConfig;

/// Data source or buffer a failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Fuse,
    Kfuse,
    Bootrom,
    UsbFrame,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fuse => write!(f, "fuse"),
            Self::Kfuse => write!(f, "kfuse"),
            Self::Bootrom => write!(f, "bootrom"),
            Self::UsbFrame => write!(f, "usb frame"),
        }
    }
}

/// Everything that went wrong during a run. None of these stop the
/// sequence; each only skips the steps that depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    /// Buffer request failed; the source is absent
    Allocation(Source),
    /// Source could not be read; the source is absent
    Read(Source, AcquireError),
    /// Storage unavailable; no files were written
    StorageInit(StorageError),
    /// A file was not fully written
    Write(&'static str),
    /// USB host not connected; nothing was sent
    UsbNotReady,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allocation(src) => write!(f, "{} buffer allocation failed", src),
            Self::Read(src, e) => write!(f, "{} read failed: {}", src, e),
            Self::StorageInit(e) => write!(f, "storage unavailable: {}", e),
            Self::Write(name) => write!(f, "{} incomplete", name),
            Self::UsbNotReady => write!(f, "usb not ready"),
        }
    }
}

/// Result of one file write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileRecord {
    pub name: &'static str,
    pub result: Result<WriteOutcome, WriteError>,
}

/// What a run did, in order.
#[derive(Debug)]
pub struct RunSummary {
    pub fuse_acquired: bool,
    pub kfuse_acquired: bool,
    pub storage_mounted: bool,
    /// Files attempted, in write order
    pub files: Vec<FileRecord>,
    /// `None` when the frame could not be allocated
    pub usb: Option<UsbOutcome>,
    /// Patch mask active before the boot ROM write, if it was written
    pub patch_mask: Option<u32>,
    pub devices_shut_down: usize,
    pub failures: Vec<Failure>,
    pub log: StatusLog,
}

impl RunSummary {
    pub fn file(&self, name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|record| record.name == name)
    }
}

/// Shared state of one run.
pub struct Context {
    pub config: DumpConfig,
    pub log: StatusLog,
    pub fuse: Option<AcquisitionBuffer>,
    pub kfuse: Option<AcquisitionBuffer>,
    pub frame: Option<ReportFrame>,
    pub fuse_acquired: bool,
    pub kfuse_acquired: bool,
    pub storage_mounted: bool,
    pub files: Vec<FileRecord>,
    pub usb: Option<UsbOutcome>,
    pub patch_mask: Option<u32>,
    pub devices_shut_down: usize,
    pub failures: Vec<Failure>,
}

impl Context {
    pub fn new(config: DumpConfig) -> Self {
        Self {
            config,
            log: StatusLog::new(),
            fuse: None,
            kfuse: None,
            frame: None,
            fuse_acquired: false,
            kfuse_acquired: false,
            storage_mounted: false,
            files: Vec::new(),
            usb: None,
            patch_mask: None,
            devices_shut_down: 0,
            failures: Vec::new(),
        }
    }

    /// Record a failure and log it.
    pub fn fail(&mut self, failure: Failure, message: &'static str) {
        self.failures.push(failure);
        self.log.log(message);
    }

    /// Record the result of one file write; anything short of a complete,
    /// cleanly closed file counts as a write failure.
    pub fn record_write(&mut self, name: &'static str, result: Result<WriteOutcome, WriteError>) {
        if !matches!(result, Ok(outcome) if outcome.is_complete()) {
            self.fail(Failure::Write(name), "file write incomplete");
        }
        self.files.push(FileRecord { name, result });
    }

    /// Drop the acquisition buffers and the frame.
    pub fn release_buffers(&mut self) {
        self.fuse = None;
        self.kfuse = None;
        self.frame = None;
    }

    pub fn into_summary(self) -> RunSummary {
        RunSummary {
            fuse_acquired: self.fuse_acquired,
            kfuse_acquired: self.kfuse_acquired,
            storage_mounted: self.storage_mounted,
            files: self.files,
            usb: self.usb,
            patch_mask: self.patch_mask,
            devices_shut_down: self.devices_shut_down,
            failures: self.failures,
            log: self.log,
        }
    }
}
