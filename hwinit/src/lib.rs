//! Hardware access for the dump routine.
//!
//! Everything that touches a physical address lives here. The rest of the
//! workspace sees traits ([`PatchEngine`], [`FuseReader`], [`KfuseReader`],
//! [`ButtonInput`], [`Delay`], [`PowerControl`], [`MemoryController`]) and the
//! one documented constant it is allowed to dereference, [`bootrom::BOOTROM_BASE`].
//!
//! # Modules
//! - `mmio` - typed 32-bit register accessor
//! - `cpu` - barriers
//! - `ipatch` - instruction patch engine and its save/clear/restore guard
//! - `fuse` / `kfuse` - primary and secondary fuse banks
//! - `bootrom` - boot ROM window
//! - `btn`, `timer`, `power`, `mc` - collaborator contracts

#![cfg_attr(not(test), no_std)]

pub mod bootrom;
pub mod btn;
pub mod cpu;
pub mod fuse;
pub mod ipatch;
pub mod kfuse;
pub mod mc;
pub mod mmio;
pub mod power;
pub mod timer;

pub use bootrom::BootromWindow;
pub use btn::{ButtonInput, Buttons};
pub use fuse::{FuseReader, TegraFuse, FUSE_WORD_COUNT};
pub use ipatch::{IpatchEngine, PatchEngine, PatchEngineGuard};
pub use kfuse::{ClockGate, KfuseError, KfuseReader, TegraKfuse, KFUSE_WORD_COUNT};
pub use mc::MemoryController;
pub use mmio::{Reg32, RegisterBlock};
pub use power::PowerControl;
pub use timer::Delay;
