// Volume bring-up and teardown

use super::{SdmmcConfig, StorageController, StorageDevice, StorageError};
use crate::console::Console;
use crate::fs::FileSystem;

/// Number of volume indices known to the filesystem driver.
pub const VOLUME_COUNT: usize = 2;

struct DeviceRecord<D> {
    device: D,
    config: SdmmcConfig,
}

/// Controller/device records for every volume index.
///
/// Slots without records are simply absent. Bring-up of a slot is idempotent:
/// a device that is already bound to its controller is reported as ready
/// without touching hardware.
pub struct StorageLifecycle<D: StorageDevice> {
    controllers: [Option<D::Controller>; VOLUME_COUNT],
    devices: [Option<DeviceRecord<D>>; VOLUME_COUNT],
}

impl<D: StorageDevice> StorageLifecycle<D> {
    /// No records attached.
    pub fn new() -> Self {
        Self {
            controllers: core::array::from_fn(|_| None),
            devices: core::array::from_fn(|_| None),
        }
    }

    /// Attach the controller and device records for volume `index`.
    pub fn attach(
        &mut self,
        index: u8,
        controller: D::Controller,
        device: D,
        config: SdmmcConfig,
    ) -> Result<(), StorageError> {
        let i = index as usize;
        if i >= VOLUME_COUNT {
            return Err(StorageError::NoSuchVolume(index));
        }
        self.controllers[i] = Some(controller);
        self.devices[i] = Some(DeviceRecord { device, config });
        Ok(())
    }

    /// Device record of volume `index`, if attached.
    pub fn device(&self, index: u8) -> Option<&D> {
        self.devices
            .get(index as usize)
            .and_then(Option::as_ref)
            .map(|record| &record.device)
    }

    /// Controller record of volume `index`, if attached.
    pub fn controller(&self, index: u8) -> Option<&D::Controller> {
        self.controllers.get(index as usize).and_then(Option::as_ref)
    }

    /// Bring up volume `index` and mount its filesystem.
    ///
    /// Device bring-up and mount succeed or fail together. On failure a
    /// partially initialized device is shut down (power left on) and both
    /// records are cleared, so a later attempt starts from scratch.
    pub fn initialize_volume<F, C>(
        &mut self,
        fs: &mut F,
        console: &mut C,
        index: u8,
    ) -> Result<(), StorageError>
    where
        F: FileSystem,
        C: Console,
    {
        let i = index as usize;
        let controller = self.controllers.get_mut(i).and_then(Option::as_mut);
        let record = self.devices.get_mut(i).and_then(Option::as_mut);
        let (Some(controller), Some(record)) = (controller, record) else {
            return Err(StorageError::NoSuchVolume(index));
        };

        if record.device.is_initialized() {
            return Ok(()); // Already initialized
        }

        let result = record
            .device
            .init(controller, &record.config)
            .and_then(|()| fs.mount(index).map_err(StorageError::Mount));

        match result {
            Ok(()) => {
                report_geometry(&mut record.device, console, index);
                Ok(())
            }
            Err(e) => {
                if record.device.is_initialized() && record.device.end(false).is_err() {
                    let _ = write!(console, "Shutdown of storage idx {} FAILED!\n", index);
                }
                controller.clear();
                record.device.clear();
                Err(e)
            }
        }
    }

    /// Unmount and shut down every initialized device.
    ///
    /// Safe to call at any point, any number of times. A device whose
    /// shutdown fails is reported and cleared anyway. Returns how many
    /// devices were shut down.
    pub fn teardown_all<F, C>(&mut self, fs: &mut F, console: &mut C) -> usize
    where
        F: FileSystem,
        C: Console,
    {
        if let Err(e) = fs.unmount() {
            let _ = write!(console, "Unmount failed ({})\n", e);
        }

        let mut shut_down = 0;
        for (idx, slot) in self.devices.iter_mut().enumerate() {
            let Some(record) = slot.as_mut() else {
                continue;
            };
            if !record.device.is_initialized() {
                continue;
            }

            if let Err(e) = record.device.flush() {
                let _ = write!(console, "Flush of storage idx {} failed: {}\n", idx, e);
            }
            if record.device.end(true).is_err() {
                let _ = write!(console, "Shutdown of storage idx {} FAILED!\n", idx);
            }
            record.device.clear();
            shut_down += 1;
        }
        shut_down
    }
}

impl<D: StorageDevice> Default for StorageLifecycle<D> {
    fn default() -> Self {
        Self::new()
    }
}

fn report_geometry<D: StorageDevice, C: Console>(device: &mut D, console: &mut C, index: u8) {
    let block_size = device.block_size().to_u64();
    match device.num_blocks() {
        Ok(blocks) => {
            let _ = write!(
                console,
                "Storage {}: {} blocks of {} bytes ({} MiB)\n",
                index,
                blocks,
                block_size,
                blocks.saturating_mul(block_size) / (1024 * 1024)
            );
        }
        Err(e) => {
            let _ = write!(console, "Storage {}: size unknown ({})\n", index, e);
        }
    }
}
