//! State trait for the dump sequence.
//!
//! Each phase is its own type. A step consumes the boxed state and returns
//! the next one, so the sequence can only move forward.

use alloc::boxed::Box;

use crate::board::{Board, Platform};
use crate::context::Context;

/// Result of a single state machine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// Stay in the current state
    Continue,
    /// Moved to a new state
    Transition,
    /// Sequence finished
    Done,
}

pub trait State<B: Board> {
    /// Execute one step of this state.
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult);

    /// Name for the status log.
    fn name(&self) -> &'static str;

    fn is_terminal(&self) -> bool {
        false
    }
}
