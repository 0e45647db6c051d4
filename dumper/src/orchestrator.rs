//! Dump sequence driver.
//!
//! # Entry Point Contract
//!
//! **SOLE ENTRY**: [`crate::boot`] on hardware, [`run`] everywhere else.
//!
//! **PRECONDITIONS** (caller must ensure):
//! 1. Clocks, pinmux and the heap are set up
//! 2. Every driver in the [`Platform`] is constructed; the SD volume is
//!    attached to `platform.storage` but not brought up
//!
//! **WHAT THIS MODULE DOES NOT DO**:
//! - Driver bring-up beyond the display panel
//! - Retry of anything that failed
//!
//! # State Machine Flow
//! ```text
//! Init → DisplayReady → BuffersAllocated → DataAcquired → StorageAttempt
//!      → Reported → TornDown → AwaitingShutdown → PoweredOff
//! ```

use alloc::boxed::Box;

use crate::board::{Board, Platform};
use crate::config::DumpConfig;
use crate::context::{Context, RunSummary};
use crate::state::{State, StepResult};
use crate::states::InitState;

/// Run the whole sequence once, up to and including the power-off request.
///
/// Never fails: every problem degrades into a skipped step and shows up in
/// the returned summary.
pub fn run<B: Board>(platform: &mut Platform<B>, config: DumpConfig) -> RunSummary {
    let mut ctx = Context::new(config);
    let start: Box<dyn State<B>> = Box::new(InitState::new());
    ctx.log.log(start.name());
    drive(platform, ctx, start)
}

/// Step from `current_state` until a terminal state reports `Done`.
fn drive<B: Board>(platform: &mut Platform<B>, mut ctx: Context, mut current_state: Box<dyn State<B>>) -> RunSummary {
    loop {
        let (next_state, result) = current_state.step(&mut ctx, platform);
        current_state = next_state;

        match result {
            StepResult::Continue => {}
            StepResult::Transition => ctx.log.log(current_state.name()),
            StepResult::Done => {
                debug_assert!(current_state.is_terminal());
                return ctx.into_summary();
            }
        }
    }
}
