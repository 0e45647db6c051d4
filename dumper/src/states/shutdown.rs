//! Teardown and operator-driven power-off.

use alloc::boxed::Box;
use core::fmt::Write as _;

use hwinit::{ButtonInput, Buttons, Delay, PowerControl};

use crate::board::{Board, Platform};
use crate::context::Context;
use crate::state::{State, StepResult};

/// Both live channels are done.
///
/// The step unmounts and powers down every storage device, whether or not
/// storage ever came up.
pub struct ReportedState;

impl<B: Board> State<B> for ReportedState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        ctx.devices_shut_down = platform.storage.teardown_all(&mut platform.fs, &mut platform.display);
        (Box::new(TornDownState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "Reported"
    }
}

/// Storage is released.
pub struct TornDownState;

impl<B: Board> State<B> for TornDownState {
    fn step(self: Box<Self>, _ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        let _ = write!(platform.display, "\nPress the POWER button to turn off the console.\n");
        (Box::new(AwaitingShutdownState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "TornDown"
    }
}

/// Waiting for the operator.
///
/// Samples the buttons once per step. Only the power button on its own
/// counts; anything else sleeps for the poll interval and stays here. There
/// is no timeout.
pub struct AwaitingShutdownState;

impl<B: Board> State<B> for AwaitingShutdownState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        if platform.buttons.read() != Buttons::POWER {
            platform.delay.sleep_us(ctx.config.poll_interval_us);
            return (self, StepResult::Continue);
        }

        // Tell the PMIC to turn everything off
        platform.power.power_off();
        (Box::new(PoweredOffState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "AwaitingShutdown"
    }
}

/// Power-off was requested. Terminal.
pub struct PoweredOffState;

impl<B: Board> State<B> for PoweredOffState {
    fn step(self: Box<Self>, _ctx: &mut Context, _platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        (self, StepResult::Done)
    }

    fn name(&self) -> &'static str {
        "PoweredOff"
    }

    fn is_terminal(&self) -> bool {
        true
    }
}
