//! Boot-time dump of the fuse banks and the boot ROM.
//!
//! Runs once per boot: reads both fuse banks, writes them and an unpatched
//! copy of the boot ROM to the SD card when one mounts, shows the fuse
//! banks on screen, sends them to the USB host, then waits for the power
//! button.
//!
//! # Architecture
//! - `config` - fixed build-time parameters
//! - `board` - driver type family and the `Platform` bundle
//! - `acquire` - fuse bank reads into owned buffers
//! - `context` - data shared between states, failures, run summary
//! - `state` / `states` - the dump sequence as a state machine
//! - `orchestrator` - drives the states
//! - `heap` - linked-list heap for firmware builds

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod acquire;
pub mod board;
pub mod config;
pub mod context;
pub mod heap;
pub mod orchestrator;
pub mod state;
pub mod states;

#[cfg(test)]
mod mock;

pub use acquire::{AcquireError, AcquisitionBuffer};
pub use board::{Board, DisplayPanel, Platform};
pub use config::DumpConfig;
pub use context::{Failure, FileRecord, RunSummary, Source};
pub use orchestrator::run;
pub use state::{State, StepResult};

/// Firmware entry: set up the heap, run the dump, and park once power-off
/// has been requested.
///
/// # Safety
/// Call once, with the heap region in `config` unused, before anything
/// allocates.
pub unsafe fn boot<B: Board>(mut platform: Platform<B>, config: DumpConfig) -> ! {
    heap::HEAP.init(config.heap_base, config.heap_size);

    let _ = run(&mut platform, config);

    // The PMIC cuts power shortly after the request
    loop {
        core::hint::spin_loop();
    }
}
