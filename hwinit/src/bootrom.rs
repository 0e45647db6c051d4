//! Boot ROM window.
//!
//! The BPMP boot ROM is mapped read-only at `0x0010_0000` (IROM in the
//! T210 address map) and is 96 KiB long. Reads of this window pass through
//! the patch engine, see [`crate::ipatch`], so the same address can return
//! different bytes before and after a patch select write. All reads go
//! through [`BootromWindow::read`], which is volatile.

use core::ptr;

/// Physical base of the boot ROM (T210 TRM, "IROM" aperture).
pub const BOOTROM_BASE: usize = 0x0010_0000;

/// Boot ROM size in bytes.
pub const BOOTROM_SIZE: usize = 96 * 1024;

/// Read-only view of memory whose contents can change under the program.
#[derive(Debug, Clone, Copy)]
pub struct BootromWindow {
    base: *const u8,
    len: usize,
}

impl BootromWindow {
    /// Window over `len` bytes at `base`.
    ///
    /// # Safety
    /// `base..base + len` must stay mapped and readable for as long as the
    /// window is used.
    pub const unsafe fn new(base: *const u8, len: usize) -> Self {
        Self { base, len }
    }

    /// The boot ROM aperture.
    ///
    /// # Safety
    /// Must run on the target SoC, where the aperture is always mapped.
    pub const unsafe fn mapped() -> Self {
        Self::new(BOOTROM_BASE as *const u8, BOOTROM_SIZE)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Copy bytes starting at `offset` into `dst` and return how many were
    /// copied. Stops at the end of the window.
    pub fn read(&self, offset: usize, dst: &mut [u8]) -> usize {
        let count = self.len.saturating_sub(offset).min(dst.len());
        for (i, byte) in dst[..count].iter_mut().enumerate() {
            // SAFETY: offset + i < len, and the range is mapped per `new`
            *byte = unsafe { ptr::read_volatile(self.base.add(offset + i)) };
        }
        count
    }
}
