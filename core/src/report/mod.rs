//! Hex reporting of the fuse banks.
//!
//! Two sinks receive the same data: the on-screen console, line by line,
//! and a fixed-capacity text frame that goes out in one USB bulk transfer.
//! A section whose source could not be read is replaced by its notice in
//! both.

mod display;
mod frame;
mod hexdump;
mod usb;

pub use display::render_to_display;
pub use frame::{FrameAllocError, ReportFrame, USB_FRAME_SIZE};
pub use hexdump::{write_hex_rows, BYTES_PER_ROW};
pub use usb::{transmit_frame, UsbDevice, UsbError, UsbOutcome};

pub const FUSE_LABEL: &str = "FUSE DATA: ";
pub const FUSE_MISSING: &str = "ERROR READING FUSE DATA!";
pub const KFUSE_LABEL: &str = "KFUSE DATA: ";
pub const KFUSE_MISSING: &str = "ERROR READING KFUSE DATA!";

/// One labelled data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'a> {
    pub label: &'static str,
    /// `None` when the source was not acquired
    pub data: Option<&'a [u8]>,
    /// Printed in place of the data when it is absent
    pub missing: &'static str,
}

impl<'a> Section<'a> {
    /// Primary fuse bank.
    pub const fn fuse(data: Option<&'a [u8]>) -> Self {
        Self {
            label: FUSE_LABEL,
            data,
            missing: FUSE_MISSING,
        }
    }

    /// Secondary fuse bank.
    pub const fn kfuse(data: Option<&'a [u8]>) -> Self {
        Self {
            label: KFUSE_LABEL,
            data,
            missing: KFUSE_MISSING,
        }
    }
}
