//! Run verdicts
//!
//! The terminal result of a supervised run and its exit-status mapping.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RunHandle;

/// Exit code reported when the run timed out.
pub const TIMEOUT_EXIT_CODE: u8 = 255;

/// Highest exit code available for a failure count; 255 is reserved for
/// timeouts, so a completed run with more failures than this is clamped.
pub const MAX_FAILURE_EXIT_CODE: u8 = 254;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every expected check reported in before the timeout.
    Completed,
    /// The timeout elapsed with results still missing.
    TimedOut,
}

impl RunOutcome {
    pub fn is_timeout(&self) -> bool {
        matches!(self, RunOutcome::TimedOut)
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Completed => write!(f, "completed"),
            RunOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

/// Terminal verdict of one run, produced exactly once by the watchdog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Verdict {
    pub outcome: RunOutcome,
    pub ok: u64,
    pub fail: u64,
    pub observed: u64,
    pub expected: u64,
    pub missing: u64,
    pub elapsed_ticks: u64,
    pub timeout_secs: u64,
}

impl Verdict {
    /// Snapshot the run state into a verdict.
    pub fn from_run(run: &RunHandle, outcome: RunOutcome) -> Self {
        // Load each counter once so the snapshot is self-consistent even if
        // a straggling driver task increments after the watchdog decided.
        let ok = run.ok_count();
        let fail = run.fail_count();
        let expected = run.expected_total();
        Self {
            outcome,
            ok,
            fail,
            observed: ok + fail,
            expected,
            missing: expected.saturating_sub(ok + fail),
            elapsed_ticks: run.elapsed_ticks(),
            timeout_secs: run.timeout_secs(),
        }
    }

    /// Process exit status for this verdict.
    ///
    /// Timeout takes precedence over any partial tally: a run that never
    /// finished cannot be trusted to have an accurate failure count.
    /// Otherwise the code is the literal failure count, clamped to the
    /// 1..=254 band, or 0 for a clean run.
    pub fn exit_code(&self) -> u8 {
        if self.outcome.is_timeout() {
            TIMEOUT_EXIT_CODE
        } else if self.fail > 0 {
            self.fail.min(u64::from(MAX_FAILURE_EXIT_CODE)) as u8
        } else {
            0
        }
    }

    /// Whether the run completed with zero failures.
    pub fn is_success(&self) -> bool {
        self.outcome == RunOutcome::Completed && self.fail == 0
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test result")?;
        writeln!(f, "OK: {}", self.ok)?;
        writeln!(f, "FAIL: {}", self.fail)?;
        write!(f, "Total: {}", self.observed)?;

        if self.outcome.is_timeout() {
            write!(
                f,
                "\nExecution time ({} sec) expired. Missing {} test results",
                self.timeout_secs, self.missing
            )?;
        }

        Ok(())
    }
}
