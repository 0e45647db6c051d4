//! Secondary fuse bank (kfuse).
//!
//! The kfuse block loads its contents into a shadow array after reset and
//! checks them against an internal CRC. Words are only read out after the
//! load is `DONE` and the CRC passed; reads go through an auto-incrementing
//! key address.

use core::fmt;

use crate::mmio::RegisterBlock;

/// Number of 32-bit words in the secondary fuse bank.
pub const KFUSE_WORD_COUNT: usize = 144;

/// Kfuse block base address.
pub const KFUSE_BASE: usize = 0x7000_FC00;

pub const KFUSE_STATE: usize = 0x80;
pub const KFUSE_KEYADDR: usize = 0x88;
pub const KFUSE_KEYS: usize = 0x8C;

const KFUSE_STATE_DONE: u32 = 1 << 16;
const KFUSE_STATE_CRCPASS: u32 = 1 << 17;
const KFUSE_KEYADDR_AUTOINC: u32 = 1 << 16;

/// Kfuse read failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KfuseError {
    /// Shadow array failed its CRC check
    CrcFailed,
    /// Destination cannot hold the whole bank
    BufferTooSmall,
}

impl fmt::Display for KfuseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrcFailed => write!(f, "kfuse CRC check failed"),
            Self::BufferTooSmall => write!(f, "kfuse buffer too small"),
        }
    }
}

/// Read access to the secondary fuse bank.
pub trait KfuseReader {
    /// Fill `words` with the whole bank ([`KFUSE_WORD_COUNT`] words).
    fn read(&mut self, words: &mut [u32]) -> Result<(), KfuseError>;
}

/// Clock/reset control for the kfuse block, owned by the clock driver.
pub trait ClockGate {
    fn enable(&mut self);
    fn disable(&mut self);
}

/// Tegra kfuse block.
pub struct TegraKfuse<C: ClockGate> {
    regs: RegisterBlock,
    clock: C,
}

impl<C: ClockGate> TegraKfuse<C> {
    /// Kfuse block at its fixed address.
    ///
    /// # Safety
    /// Must run on the target SoC.
    pub unsafe fn new(clock: C) -> Self {
        Self::with_base(KFUSE_BASE, clock)
    }

    /// # Safety
    /// `base` must point at a kfuse register block.
    pub unsafe fn with_base(base: usize, clock: C) -> Self {
        Self {
            regs: RegisterBlock::new(base),
            clock,
        }
    }

    fn read_clocked(&mut self, words: &mut [u32]) -> Result<(), KfuseError> {
        let state = self.regs.reg(KFUSE_STATE);
        while state.read() & KFUSE_STATE_DONE == 0 {
            core::hint::spin_loop();
        }

        if state.read() & KFUSE_STATE_CRCPASS == 0 {
            return Err(KfuseError::CrcFailed);
        }

        self.regs.reg(KFUSE_KEYADDR).write(KFUSE_KEYADDR_AUTOINC);
        let keys = self.regs.reg(KFUSE_KEYS);
        for word in words[..KFUSE_WORD_COUNT].iter_mut() {
            *word = keys.read();
        }
        Ok(())
    }
}

impl<C: ClockGate> KfuseReader for TegraKfuse<C> {
    fn read(&mut self, words: &mut [u32]) -> Result<(), KfuseError> {
        if words.len() < KFUSE_WORD_COUNT {
            return Err(KfuseError::BufferTooSmall);
        }

        self.clock.enable();
        let result = self.read_clocked(words);
        self.clock.disable();
        result
    }
}
