//! Run orchestration
//!
//! Wires a driver and a watchdog to one run's state and awaits the verdict.

use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, trace};

use crate::config::AppConfig;
use crate::models::{RunHandle, Verdict};
use crate::supervisor::watchdog::{Watchdog, DEFAULT_TICK_PERIOD};

/// Default run timeout when the caller does not supply one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Errors raised before a run starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SupervisorError {
    /// A zero timeout would expire on the very first tick regardless of what
    /// the driver reported, so it is treated as a configuration error.
    #[error("run timeout must be at least 1 second")]
    ZeroTimeout,
}

/// Supervisor for one test run.
///
/// Holds the run parameters, invokes the driver exactly once with a shared
/// [`RunHandle`], and awaits the watchdog's verdict. An expected total of
/// zero is legal: the run completes on the first tick with zero observed
/// outcomes.
pub struct Supervisor {
    expected_total: u64,
    timeout_secs: u64,
    tick_period: Duration,
}

impl Supervisor {
    /// Create a supervisor expecting `expected_total` check outcomes, with
    /// the default timeout.
    pub fn new(expected_total: u64) -> Self {
        Self {
            expected_total,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            tick_period: DEFAULT_TICK_PERIOD,
        }
    }

    /// Set the run timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the watchdog tick period.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Run `driver` under supervision and return the verdict.
    ///
    /// The driver receives a clone of the run handle and the resolved
    /// configuration, and is free to report outcomes synchronously or from
    /// tasks it spawns; the watchdog only ever looks at the aggregate
    /// counters.
    pub async fn run<F, Fut>(
        self,
        driver: F,
        config: AppConfig,
    ) -> Result<Verdict, SupervisorError>
    where
        F: FnOnce(RunHandle, AppConfig) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        if self.timeout_secs == 0 {
            return Err(SupervisorError::ZeroTimeout);
        }

        let run = RunHandle::new(self.expected_total, self.timeout_secs);

        info!(
            "TEST: Expecting {} tests (timeout: {} secs)",
            self.expected_total, self.timeout_secs
        );

        // Echoed for diagnostics; visible only when trace logging is on.
        trace!(?config, "resolved configuration");

        tokio::spawn(driver(run.clone(), config));

        let verdict = Watchdog::new(run)
            .with_tick_period(self.tick_period)
            .watch()
            .await;

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RunOutcome;

    const TICK: Duration = Duration::from_millis(10);

    #[tokio::test]
    async fn test_synchronous_driver_completes() {
        let verdict = Supervisor::new(3)
            .with_tick_period(TICK)
            .run(
                |run, _cfg| async move {
                    run.pass();
                    run.pass();
                    run.pass();
                },
                AppConfig::default(),
            )
            .await
            .unwrap();

        assert_eq!(verdict.outcome, RunOutcome::Completed);
        assert_eq!(verdict.exit_code(), 0);
    }

    #[tokio::test]
    async fn test_driver_failures_reach_the_verdict() {
        let verdict = Supervisor::new(3)
            .with_tick_period(TICK)
            .run(
                |run, _cfg| async move {
                    run.pass();
                    run.fail();
                    run.pass();
                },
                AppConfig::default(),
            )
            .await
            .unwrap();

        assert_eq!(verdict.exit_code(), 1);
    }

    #[tokio::test]
    async fn test_deferred_driver_reports_from_spawned_tasks() {
        let verdict = Supervisor::new(2)
            .with_timeout(10)
            .with_tick_period(TICK)
            .run(
                |run, _cfg| async move {
                    for _ in 0..2 {
                        let run = run.clone();
                        tokio::spawn(async move {
                            tokio::time::sleep(TICK * 2).await;
                            run.pass();
                        });
                    }
                },
                AppConfig::default(),
            )
            .await
            .unwrap();

        assert_eq!(verdict.outcome, RunOutcome::Completed);
        assert_eq!(verdict.ok, 2);
    }

    #[tokio::test]
    async fn test_silent_driver_times_out() {
        let verdict = Supervisor::new(4)
            .with_timeout(2)
            .with_tick_period(TICK)
            .run(|_run, _cfg| async {}, AppConfig::default())
            .await
            .unwrap();

        assert_eq!(verdict.outcome, RunOutcome::TimedOut);
        assert_eq!(verdict.exit_code(), 255);
        assert_eq!(verdict.missing, 4);
    }

    #[tokio::test]
    async fn test_zero_timeout_is_rejected() {
        let err = Supervisor::new(1)
            .with_timeout(0)
            .run(|_run, _cfg| async {}, AppConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err, SupervisorError::ZeroTimeout);
    }

    #[tokio::test]
    async fn test_default_timeout_is_five_seconds() {
        let supervisor = Supervisor::new(1);
        assert_eq!(supervisor.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(DEFAULT_TIMEOUT_SECS, 5);
    }
}
