//! CPU-level helpers.

pub mod barrier;
