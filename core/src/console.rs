//! On-screen console sink.
//!
//! The display driver owns the framebuffer console; the dump routine only
//! writes text to it and asks for line breaks.

use core::fmt;

/// Text console.
pub trait Console: fmt::Write {
    /// Move to the start of a fresh, cleared line.
    fn clear_line(&mut self);
}
