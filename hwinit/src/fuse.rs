//! Primary fuse bank.
//!
//! Words are read one at a time through the fuse controller: latch the word
//! index in `ADDR`, issue a read command in `CTRL`, wait for the controller
//! state machine to return to idle, then collect `RDATA`.

use crate::mmio::RegisterBlock;

/// Number of 32-bit words in the primary fuse bank.
pub const FUSE_WORD_COUNT: usize = 0x100;

/// Fuse controller base address.
pub const FUSE_BASE: usize = 0x7000_F800;

pub const FUSE_CTRL: usize = 0x0;
pub const FUSE_ADDR: usize = 0x4;
pub const FUSE_RDATA: usize = 0x8;

const FUSE_CMD_MASK: u32 = 0x3;
const FUSE_CMD_READ: u32 = 0x1;
const FUSE_STATE_SHIFT: u32 = 16;
const FUSE_STATE_MASK: u32 = 0x1F;
const FUSE_STATE_IDLE: u32 = 0x4;

/// Read access to a bank of fuse words.
pub trait FuseReader {
    /// Read word `index` (0-based) of the bank.
    fn read_word(&mut self, index: u32) -> u32;
}

/// Tegra fuse controller.
pub struct TegraFuse {
    regs: RegisterBlock,
}

impl TegraFuse {
    /// Fuse controller at its fixed address.
    ///
    /// # Safety
    /// Must run on the target SoC with the fuse controller clocked.
    pub unsafe fn new() -> Self {
        Self::with_base(FUSE_BASE)
    }

    /// # Safety
    /// `base` must point at a fuse controller register block.
    pub unsafe fn with_base(base: usize) -> Self {
        Self {
            regs: RegisterBlock::new(base),
        }
    }

    fn wait_idle(&self) {
        let ctrl = self.regs.reg(FUSE_CTRL);
        while (ctrl.read() >> FUSE_STATE_SHIFT) & FUSE_STATE_MASK != FUSE_STATE_IDLE {
            core::hint::spin_loop();
        }
    }
}

impl FuseReader for TegraFuse {
    fn read_word(&mut self, index: u32) -> u32 {
        self.regs.reg(FUSE_ADDR).write(index);
        self.regs
            .reg(FUSE_CTRL)
            .modify(|ctrl| (ctrl & !FUSE_CMD_MASK) | FUSE_CMD_READ);
        self.wait_idle();
        self.regs.reg(FUSE_RDATA).read()
    }
}
