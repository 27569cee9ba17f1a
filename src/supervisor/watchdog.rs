//! Completion watchdog
//!
//! The sole owner of the decision of when a run ends and what exit status to
//! report. The watchdog polls the run state at a coarse, fixed interval
//! instead of hooking individual outcome events - it only needs the
//! aggregate counters, so the driver is free to report synchronously, from
//! deferred callbacks, or from any number of spawned tasks.

use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::models::{RunHandle, RunOutcome, Verdict};
use crate::utils::Timer;

/// Default tick period; one evaluation per second.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

/// Periodic watchdog over one run's state.
///
/// `watch` is an ordinary awaitable future that resolves to the run's
/// [`Verdict`]; it never terminates the process. Mapping the verdict to an
/// exit status is the caller's job.
pub struct Watchdog {
    run: RunHandle,
    tick_period: Duration,
}

impl Watchdog {
    /// Create a watchdog over `run`, ticking once per second.
    pub fn new(run: RunHandle) -> Self {
        Self {
            run,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    /// Override the tick period. Tests use short periods so the timeout
    /// paths can be exercised without waiting wall-clock seconds.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Tick until the run completes or times out, then return the verdict.
    ///
    /// Each tick advances the tick counter by exactly one; ticks never
    /// overlap because each evaluation completes synchronously before the
    /// next interval fires.
    pub async fn watch(self) -> Verdict {
        let timer = Timer::start("run");

        let mut ticker = time::interval(self.tick_period);
        // A delayed tick must not be followed by a burst of catch-up ticks.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first interval tick fires immediately; consume it so the first
        // evaluated tick lands one full period after the run started.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let elapsed = self.run.advance_tick();
            let timed_out = elapsed >= self.run.timeout_secs();
            let completed = self.run.is_complete();

            if !timed_out && !completed {
                debug!("tick {}: {}", elapsed, self.run);
                continue;
            }

            let outcome = if timed_out {
                RunOutcome::TimedOut
            } else {
                RunOutcome::Completed
            };

            let verdict = Verdict::from_run(&self.run, outcome);
            info!(
                "run {} after {} tick(s) in {}ms - ok: {}, fail: {}, missing: {}",
                verdict.outcome,
                verdict.elapsed_ticks,
                timer.elapsed_ms(),
                verdict.ok,
                verdict.fail,
                verdict.missing
            );

            return verdict;
        }
    }
}
