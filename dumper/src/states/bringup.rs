//! Display bring-up.

use alloc::boxed::Box;
use core::fmt::Write as _;

use crate::board::{Board, DisplayPanel, Platform};
use crate::context::Context;
use crate::state::{State, StepResult};

use super::DisplayReadyState;

/// Nothing is up yet.
///
/// The step brings up the panel with the backlight off, prints the banner,
/// then turns the backlight on so the console never flickers.
pub struct InitState;

impl InitState {
    pub fn new() -> Self {
        Self
    }
}

impl<B: Board> State<B> for InitState {
    fn step(self: Box<Self>, ctx: &mut Context, platform: &mut Platform<B>) -> (Box<dyn State<B>>, StepResult) {
        let display = &mut platform.display;
        display.set_backlight(false);
        display.init();

        let _ = write!(
            display,
            "                                  romdump v{}\n\n",
            ctx.config.version
        );

        display.set_backlight(true);
        (Box::new(DisplayReadyState), StepResult::Transition)
    }

    fn name(&self) -> &'static str {
        "Init"
    }
}
