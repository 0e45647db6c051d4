//! Buffer allocation and source acquisition.

use alloc::boxed::Box;
use core::fmt::Write as _;

use romdump_core::{ReportFrame, Section};

use crate::acquire::{read_fuse_bank, read_kfuse_bank, AcquireError, AcquisitionBuffer};
use crate::board::{Board, Platform};
use crate::context::{Context, Failure, Source};
use crate::state::{State, StepResult};

use super::DataAcquiredState;

/// Console is up.
///
/// The step allocates both source buffers and the USB frame. A failed
/// request leaves that slot empty; the sequence carries on.
pub struct DisplayReadyState;

impl<B: Board> State<B> for DisplayReadyState {
    fn step(self: Box<Self>, ctx: &mut Context, _platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        match AcquisitionBuffer::try_for_words(ctx.config.fuse_words) {
            Ok(buffer) => ctx.fuse = Some(buffer),
            Err(_) => ctx.fail(Failure::Allocation(Source::Fuse), "fuse buffer allocation failed"),
        }

        match AcquisitionBuffer::try_for_words(ctx.config.kfuse_words) {
            Ok(buffer) => ctx.kfuse = Some(buffer),
            Err(_) => ctx.fail(Failure::Allocation(Source::Kfuse), "kfuse buffer allocation failed"),
        }

        match ReportFrame::try_new() {
            Ok(frame) => ctx.frame = Some(frame),
            Err(_) => ctx.fail(Failure::Allocation(Source::UsbFrame), "usb frame allocation failed"),
        }

        (Box::new(BuffersAllocatedState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "DisplayReady"
    }
}

/// Buffers are allocated (or known to be missing).
///
/// The step reads both fuse banks into their buffers and packs them into
/// the USB frame. A source that cannot be read is dropped here and shows
/// up as its notice from then on.
pub struct BuffersAllocatedState;

impl<B: Board> State<B> for BuffersAllocatedState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        if let Some(buffer) = ctx.fuse.as_mut() {
            read_fuse_bank(&mut platform.fuses, buffer);
            ctx.fuse_acquired = true;
        }

        if let Some(buffer) = ctx.kfuse.as_mut() {
            match read_kfuse_bank(&mut platform.kfuse, buffer) {
                Ok(()) => ctx.kfuse_acquired = true,
                Err(e) => {
                    ctx.kfuse = None;
                    let _ = write!(platform.display, "ERROR READING KFUSE DATA\n");
                    let source = match e {
                        AcquireError::Allocation => Failure::Allocation(Source::Kfuse),
                        AcquireError::Kfuse(_) => Failure::Read(Source::Kfuse, e),
                    };
                    ctx.fail(source, "kfuse read failed");
                }
            }
        }

        if let Some(frame) = ctx.frame.as_mut() {
            frame.append_section(&Section::fuse(ctx.fuse.as_ref().map(AcquisitionBuffer::as_bytes)));
            frame.append_section(&Section::kfuse(ctx.kfuse.as_ref().map(AcquisitionBuffer::as_bytes)));
        }

        (Box::new(DataAcquiredState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "BuffersAllocated"
    }
}
