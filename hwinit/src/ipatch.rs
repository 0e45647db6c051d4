//! Instruction patch engine.
//!
//! The boot ROM ships with a small set of patch slots. Each active slot makes
//! the bus return a substitute halfword at one ROM address, so a plain read of
//! the ROM window returns patched content. Clearing the select mask for the
//! duration of a read yields the ROM as fused, and writing the saved mask back
//! puts the running system exactly where it was.
//!
//! # Register layout
//! ```text
//! 0x6001_DC00  SELECT   bit N set = slot N active
//! 0x6001_DC04  SLOT0    ((addr >> 1) & 0xFFFF) << 16 | (data & 0xFFFF)
//! 0x6001_DC08  SLOT1    ...
//! ```
//! Only `SELECT` is touched here; the mask is treated as opaque.

use crate::cpu::barrier;
use crate::mmio::{Reg32, RegisterBlock};

/// Patch engine base address.
pub const IPATCH_BASE: usize = 0x6001_DC00;

/// Offset of the active-slot select register.
pub const IPATCH_SELECT: usize = 0x0;

/// Access to the active-slot bitmask of a patch engine.
pub trait PatchEngine {
    /// Current active-slot mask.
    fn active_slots(&self) -> u32;

    /// Replace the active-slot mask verbatim.
    fn set_active_slots(&mut self, mask: u32);
}

/// MMIO-backed patch engine.
pub struct IpatchEngine {
    select: Reg32,
}

impl IpatchEngine {
    /// Patch engine at its fixed address.
    ///
    /// # Safety
    /// Must run on the target SoC with the patch engine mapped.
    pub unsafe fn new() -> Self {
        Self::with_base(IPATCH_BASE)
    }

    /// Patch engine at an arbitrary base.
    ///
    /// # Safety
    /// `base` must point at a patch engine register block (or memory of at
    /// least one word).
    pub unsafe fn with_base(base: usize) -> Self {
        let block = RegisterBlock::new(base);
        Self {
            select: block.reg(IPATCH_SELECT),
        }
    }
}

impl PatchEngine for IpatchEngine {
    fn active_slots(&self) -> u32 {
        self.select.read()
    }

    fn set_active_slots(&mut self, mask: u32) {
        self.select.write(mask);
        barrier::dsb();
    }
}

/// Save/clear/restore bracket around an unpatched ROM read.
///
/// Created by [`PatchEngineGuard::save_and_clear`], which records the active
/// mask and writes zero. The saved mask is written back exactly once: by
/// [`PatchEngineGuard::restore`], or on drop if that was never called. There
/// is no path out of the bracket that leaves the engine cleared.
pub struct PatchEngineGuard<'a, E: PatchEngine> {
    engine: &'a mut E,
    saved: u32,
    restored: bool,
}

impl<'a, E: PatchEngine> PatchEngineGuard<'a, E> {
    /// Read the active mask, then disable every slot.
    pub fn save_and_clear(engine: &'a mut E) -> Self {
        let saved = engine.active_slots();
        engine.set_active_slots(0);
        Self {
            engine,
            saved,
            restored: false,
        }
    }

    /// Mask that was active before the guard was taken.
    #[inline]
    pub fn saved_mask(&self) -> u32 {
        self.saved
    }

    /// Write the saved mask back.
    pub fn restore(mut self) {
        self.restore_once();
    }

    fn restore_once(&mut self) {
        if !self.restored {
            self.engine.set_active_slots(self.saved);
            self.restored = true;
        }
    }
}

impl<E: PatchEngine> Drop for PatchEngineGuard<'_, E> {
    fn drop(&mut self) {
        self.restore_once();
    }
}
