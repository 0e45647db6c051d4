//! Dump sequence states.
//!
//! Each state is named for what is already true when it is entered; its
//! step performs the next phase and hands over to the following state.
//!
//! ```text
//! Init → DisplayReady → BuffersAllocated → DataAcquired → StorageAttempt
//!      → Reported → TornDown → AwaitingShutdown → PoweredOff
//! ```

mod bringup;
mod buffers;
mod deliver;
mod shutdown;

pub use bringup::InitState;
pub use buffers::{BuffersAllocatedState, DisplayReadyState};
pub use deliver::{DataAcquiredState, StorageAttemptState};
pub use shutdown::{AwaitingShutdownState, PoweredOffState, ReportedState, TornDownState};
