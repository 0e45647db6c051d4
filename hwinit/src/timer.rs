//! Busy-wait delays.

/// Blocking delay, provided by the timer driver.
pub trait Delay {
    fn sleep_us(&mut self, us: u32);
}
