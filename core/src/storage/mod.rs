//! Storage volumes.
//!
//! A volume is one SD controller record, one device record and the
//! filesystem mounted on it, addressed by index. The controller and device
//! drivers live outside this workspace; they are reached through
//! [`StorageController`] and [`StorageDevice`]. The device record doubles as a
//! `gpt_disk_io::BlockIo` so its geometry can be reported and its cache
//! flushed before power-down.
//!
//! ```text
//! ┌─────────────────────────┐
//! │    StorageLifecycle     │  init + mount as one unit, teardown of all
//! └───────┬─────────┬───────┘
//!         │         │
//!         ▼         ▼
//!   StorageDevice   FileSystem
//!   (BlockIo)       (mount/unmount)
//! ```

mod lifecycle;

use core::fmt;

use gpt_disk_io::BlockIo;

use crate::fs::FsError;

pub use lifecycle::{StorageLifecycle, VOLUME_COUNT};

/// SDMMC controller instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdmmcInstance {
    Sdmmc1,
    Sdmmc2,
    Sdmmc3,
    Sdmmc4,
}

/// Data bus width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusWidth {
    One,
    Four,
    Eight,
}

/// Bring-up parameters for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdmmcConfig {
    pub instance: SdmmcInstance,
    pub bus_width: BusWidth,
    /// Driver clock/timing profile
    pub clock_type: u32,
}

impl SdmmcConfig {
    /// Removable SD card slot.
    pub const SD_CARD: Self = Self {
        instance: SdmmcInstance::Sdmmc1,
        bus_width: BusWidth::Four,
        clock_type: 11,
    };
}

/// Storage bring-up/teardown failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// No controller or device record for this index
    NoSuchVolume(u8),
    /// Low-level device bring-up failed
    DeviceInit,
    /// Device came up but the filesystem did not mount
    Mount(FsError),
    /// Orderly shutdown failed
    Shutdown,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchVolume(idx) => write!(f, "no storage volume {}", idx),
            Self::DeviceInit => write!(f, "device init failed"),
            Self::Mount(e) => write!(f, "mount failed ({})", e),
            Self::Shutdown => write!(f, "device shutdown failed"),
        }
    }
}

/// SD host controller record.
pub trait StorageController {
    /// Return the record to its zeroed, never-initialized state.
    fn clear(&mut self);
}

/// SD/MMC device record.
pub trait StorageDevice: BlockIo {
    type Controller: StorageController;

    /// Whether the device is bound to a controller (brought up).
    fn is_initialized(&self) -> bool;

    /// Bring the device up on `controller`.
    ///
    /// May leave the device partially initialized on failure; callers check
    /// [`StorageDevice::is_initialized`] and shut it down.
    fn init(&mut self, controller: &mut Self::Controller, config: &SdmmcConfig) -> Result<(), StorageError>;

    /// Orderly shutdown, optionally cutting power to the card.
    fn end(&mut self, power_off: bool) -> Result<(), StorageError>;

    /// Return the record to its zeroed, never-initialized state.
    fn clear(&mut self);
}
