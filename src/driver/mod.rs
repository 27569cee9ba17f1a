//! Test drivers
//!
//! A driver is the caller-supplied side of a run: any
//! `FnOnce(RunHandle, AppConfig) -> Future` closure handed to
//! [`Supervisor::run`](crate::supervisor::Supervisor::run). The supervisor
//! invokes it exactly once and makes no assumption about when or from which
//! tasks it reports outcomes.

mod script;

pub use script::{Outcome, ScriptError, ScriptEvent, ScriptedDriver};
