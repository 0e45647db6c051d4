//! Storage delivery and live reporting.

use alloc::boxed::Box;
use core::fmt::Write as _;

use hwinit::{MemoryController, PatchEngineGuard};
use romdump_core::{render_to_display, transmit_frame, write_file, Section, StagingBuffer, UsbOutcome, WriteError, WriteOutcome};

use crate::acquire::{read_bootrom, AcquisitionBuffer};
use crate::board::{Board, Platform};
use crate::context::{Context, Failure, Source};
use crate::state::{State, StepResult};

use super::ReportedState;

/// Sources are read and the USB frame is packed.
///
/// The step tries to bring up the SD volume. When that works the fuse
/// banks and the boot ROM are written out; otherwise every file is skipped
/// and only the live channels carry the data.
pub struct DataAcquiredState;

impl<B: Board> State<B> for DataAcquiredState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        // SD DMA needs the AHB redirect
        platform.mc.enable_ahb_redirect();

        let volume = ctx.config.sd_volume;
        match platform.storage.initialize_volume(&mut platform.fs, &mut platform.display, volume) {
            Ok(()) => {
                ctx.storage_mounted = true;
                ctx.log.log("storage mounted");
                write_files(ctx, platform);
            }
            Err(e) => {
                let _ = write!(platform.display, "Failed to mount SD card! Only dumping to screen/USB...\n");
                ctx.fail(Failure::StorageInit(e), "storage init failed");
            }
        }

        (Box::new(StorageAttemptState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "DataAcquired"
    }
}

fn write_files<B: Board>(ctx: &mut Context, platform: &mut Platform<B>) {
    let config = ctx.config;
    let mut staging = StagingBuffer::new();

    // Absent sources have no file
    let fuse = ctx
        .fuse
        .as_ref()
        .map(|buffer| write_source(platform, &mut staging, "FUSE DATA", config.fuse_file, buffer));
    if let Some(result) = fuse {
        ctx.record_write(config.fuse_file, result);
    }

    let kfuse = ctx
        .kfuse
        .as_ref()
        .map(|buffer| write_source(platform, &mut staging, "KFUSE DATA", config.kfuse_file, buffer));
    if let Some(result) = kfuse {
        ctx.record_write(config.kfuse_file, result);
    }

    let _ = write!(platform.display, "Writing BOOTROM to {}...", config.bootrom_file);
    let len = config.bootrom_size.min(platform.bootrom.len());
    let mut image = match AcquisitionBuffer::try_for_bytes(len) {
        Ok(buffer) => buffer,
        Err(_) => {
            let _ = write!(platform.display, "\nOut of memory for BOOTROM copy\n");
            ctx.fail(Failure::Allocation(Source::Bootrom), "bootrom buffer allocation failed");
            return;
        }
    };

    // The window is copied only once patches are cleared; the bracket
    // covers the copy and the write
    let guard = PatchEngineGuard::save_and_clear(&mut platform.patches);
    ctx.patch_mask = Some(guard.saved_mask());
    read_bootrom(&platform.bootrom, &mut image);
    let result = write_file(
        &mut platform.fs,
        &mut platform.display,
        &mut staging,
        config.bootrom_file,
        Some(image.as_bytes()),
    );
    guard.restore();

    ctx.record_write(config.bootrom_file, result);
}

fn write_source<B: Board>(
    platform: &mut Platform<B>,
    staging: &mut StagingBuffer,
    what: &str,
    name: &'static str,
    buffer: &AcquisitionBuffer,
) -> Result<WriteOutcome, WriteError> {
    let _ = write!(platform.display, "Writing {} to {}...", what, name);
    write_file(&mut platform.fs, &mut platform.display, staging, name, Some(buffer.as_bytes()))
}

/// Storage was attempted, successfully or not.
///
/// The step renders both fuse banks on screen and sends the packed frame
/// over USB, then releases every buffer.
pub struct StorageAttemptState;

impl<B: Board> State<B> for StorageAttemptState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        let fuse = Section::fuse(ctx.fuse.as_ref().map(AcquisitionBuffer::as_bytes));
        let kfuse = Section::kfuse(ctx.kfuse.as_ref().map(AcquisitionBuffer::as_bytes));
        let _ = render_to_display(&mut platform.display, &fuse);
        let _ = render_to_display(&mut platform.display, &kfuse);

        if let Some(frame) = ctx.frame.as_ref() {
            let outcome = transmit_frame(&mut platform.usb, frame.as_bytes());
            match outcome {
                UsbOutcome::NotReady => ctx.fail(Failure::UsbNotReady, "usb not ready"),
                UsbOutcome::Failed(_) => ctx.log.log("usb transfer failed"),
                UsbOutcome::Sent(_) => ctx.log.log("usb frame sent"),
            }
            ctx.usb = Some(outcome);
        }

        ctx.release_buffers();
        (Box::new(ReportedState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "StorageAttempt"
    }
}
