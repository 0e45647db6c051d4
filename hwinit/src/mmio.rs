//! MMIO (Memory-Mapped I/O) register access.
//!
//! # Safety
//! - Address must be a valid MMIO address (or ordinary memory in tests)
//! - Address must be 4-byte aligned
//! - Address must be mapped with device attributes on the target
//!
//! Construction is the only unsafe step. Once a [`Reg32`] exists, reads and
//! writes are plain volatile accesses.

use core::ptr;

/// A single 32-bit hardware register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg32 {
    addr: usize,
}

impl Reg32 {
    /// Bind a register at `addr`.
    ///
    /// # Safety
    /// `addr` must be a valid, 4-byte aligned register (or memory) address for
    /// as long as the returned value is used.
    #[inline]
    pub const unsafe fn new(addr: usize) -> Self {
        Self { addr }
    }

    /// Physical address of the register.
    #[inline]
    pub const fn addr(&self) -> usize {
        self.addr
    }

    /// Volatile read.
    #[inline]
    pub fn read(&self) -> u32 {
        unsafe { ptr::read_volatile(self.addr as *const u32) }
    }

    /// Volatile write.
    #[inline]
    pub fn write(&self, value: u32) {
        unsafe { ptr::write_volatile(self.addr as *mut u32, value) }
    }

    /// Read-modify-write.
    #[inline]
    pub fn modify<F: FnOnce(u32) -> u32>(&self, f: F) {
        self.write(f(self.read()));
    }
}

/// A block of registers addressed by byte offset from a base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterBlock {
    base: usize,
}

impl RegisterBlock {
    /// Bind a register block at `base`.
    ///
    /// # Safety
    /// Every offset later passed to [`RegisterBlock::reg`] must name a valid,
    /// aligned register inside the block.
    #[inline]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    #[inline]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Register at `offset` bytes from the base.
    #[inline]
    pub fn reg(&self, offset: usize) -> Reg32 {
        unsafe { Reg32::new(self.base + offset) }
    }
}
