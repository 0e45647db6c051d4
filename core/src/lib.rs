//! Storage, file-write and reporting building blocks for the dump routine.
//!
//! # Architecture
//! - `logger` - owned status ring
//! - `console` - on-screen console sink
//! - `fs` - filesystem contract and the chunked, sector-aligned file writer
//! - `storage` - volume bring-up/teardown over SD device records
//! - `report` - hex rendering to the display and the USB report frame

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod console;
pub mod fs;
pub mod logger;
pub mod report;
pub mod storage;

pub use console::Console;
pub use fs::{write_file, FileSystem, FsError, StagingBuffer, StopReason, WriteError, WriteOutcome};
pub use logger::StatusLog;
pub use report::{render_to_display, transmit_frame, ReportFrame, Section, UsbDevice, UsbError, UsbOutcome};
pub use storage::{SdmmcConfig, StorageController, StorageDevice, StorageError, StorageLifecycle};
