//! Runguard - Test-Run Supervisor
//!
//! A small supervisor for test runs: it wraps an arbitrary async driver,
//! counts the check outcomes the driver reports, and decides when the run is
//! over - either because every expected check reported in, or because the
//! wall-clock timeout elapsed first.
//!
//! ## How a run works
//!
//! 1. Configuration is resolved (file, environment, CLI flags).
//! 2. A [`RunHandle`](models::RunHandle) is created from the expected check
//!    count and the timeout.
//! 3. The driver is spawned exactly once with a clone of the handle and the
//!    resolved configuration, and reports outcomes through
//!    [`RunHandle::pass`](models::RunHandle::pass) /
//!    [`RunHandle::fail`](models::RunHandle::fail).
//! 4. A watchdog ticks once per second and returns a
//!    [`Verdict`](models::Verdict) as soon as the run completed or timed out.
//!
//! The watchdog never terminates the process itself; it hands back a verdict
//! whose [`exit_code`](models::Verdict::exit_code) the binary maps to
//! `std::process::exit`. That keeps the completion logic awaitable in tests.
//!
//! ## Exit codes
//!
//! - `0` - all expected checks observed, zero failures
//! - `1..=254` - the run completed; the code is the failure count (clamped)
//! - `255` - the timeout elapsed before all checks reported in

pub mod cli;
pub mod config;
pub mod driver;
pub mod models;
pub mod output;
pub mod supervisor;
pub mod utils;

pub use config::AppConfig;
pub use driver::ScriptedDriver;
pub use models::{RunHandle, RunOutcome, Verdict};
pub use supervisor::{Supervisor, SupervisorError, Watchdog};
