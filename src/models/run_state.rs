//! Run state for a supervised test run
//!
//! The single mutable record of a run: how many checks were expected, how
//! many passed or failed so far, and how many watchdog ticks have elapsed.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Mutable state of one supervised run.
///
/// The pass/fail counters are atomics because the driver may report outcomes
/// from any number of spawned tasks while the watchdog reads the aggregate
/// on its own task. Relaxed ordering is sufficient: the counters are
/// independent and the watchdog only needs a value that is current as of
/// some point within the tick window.
#[derive(Debug)]
pub struct RunState {
    expected_total: u64,
    timeout_secs: u64,
    ok: AtomicU64,
    fail: AtomicU64,
    elapsed_ticks: AtomicU64,
}

impl RunState {
    pub fn new(expected_total: u64, timeout_secs: u64) -> Self {
        Self {
            expected_total,
            timeout_secs,
            ok: AtomicU64::new(0),
            fail: AtomicU64::new(0),
            elapsed_ticks: AtomicU64::new(0),
        }
    }
}

/// Shared handle to a run's state.
///
/// Cheap to clone; one clone goes to the driver, one to the watchdog. The
/// driver side only ever increments, the watchdog side only ever reads the
/// counters and advances the tick count.
#[derive(Clone, Debug)]
pub struct RunHandle {
    state: Arc<RunState>,
}

impl RunHandle {
    /// Create the state for a run expecting `expected_total` check outcomes
    /// within `timeout_secs` seconds.
    pub fn new(expected_total: u64, timeout_secs: u64) -> Self {
        Self {
            state: Arc::new(RunState::new(expected_total, timeout_secs)),
        }
    }

    /// Record one passing check.
    pub fn pass(&self) {
        self.state.ok.fetch_add(1, Ordering::Relaxed);
    }

    /// Record one failing check.
    pub fn fail(&self) {
        self.state.fail.fetch_add(1, Ordering::Relaxed);
    }

    /// Number of passing checks observed so far.
    pub fn ok_count(&self) -> u64 {
        self.state.ok.load(Ordering::Relaxed)
    }

    /// Number of failing checks observed so far.
    pub fn fail_count(&self) -> u64 {
        self.state.fail.load(Ordering::Relaxed)
    }

    /// Total outcomes observed so far (pass + fail).
    pub fn observed(&self) -> u64 {
        self.ok_count() + self.fail_count()
    }

    /// Number of outcomes the run must observe before it can succeed.
    pub fn expected_total(&self) -> u64 {
        self.state.expected_total
    }

    /// Maximum number of one-second ticks before forced termination.
    pub fn timeout_secs(&self) -> u64 {
        self.state.timeout_secs
    }

    /// Ticks evaluated so far.
    pub fn elapsed_ticks(&self) -> u64 {
        self.state.elapsed_ticks.load(Ordering::Relaxed)
    }

    /// Advance the tick counter by one and return the new value.
    ///
    /// Called only by the watchdog, exactly once per tick.
    pub fn advance_tick(&self) -> u64 {
        self.state.elapsed_ticks.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Whether every expected outcome has reported in.
    pub fn is_complete(&self) -> bool {
        self.observed() >= self.expected_total()
    }

    /// Expected outcomes that have not reported in yet.
    pub fn missing(&self) -> u64 {
        self.expected_total().saturating_sub(self.observed())
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} observed (ok: {}, fail: {}), tick {}/{}",
            self.observed(),
            self.expected_total(),
            self.ok_count(),
            self.fail_count(),
            self.elapsed_ticks(),
            self.timeout_secs()
        )
    }
}
