//! Run supervision engine
//!
//! Provides the completion watchdog and the run orchestration around it.

mod runner;
mod watchdog;

pub use runner::{Supervisor, SupervisorError, DEFAULT_TIMEOUT_SECS};
pub use watchdog::{Watchdog, DEFAULT_TICK_PERIOD};
