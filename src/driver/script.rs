//! Scripted test driver
//!
//! Replays a scripted sequence of check outcomes against a run handle. The
//! CLI uses this to exercise the supervisor end to end - exit-code wiring,
//! timeout behavior - without a real test suite behind it.
//!
//! Script syntax: comma-separated events, each `ok` or `fail` with an
//! optional `@<delay>` suffix, e.g. `ok,fail@250ms,ok@2s`.

use futures::future::join_all;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::AppConfig;
use crate::models::RunHandle;

/// Errors from parsing an event script.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScriptError {
    #[error("empty event at position {0}")]
    EmptyEvent(usize),

    #[error("unknown outcome '{0}' (expected 'ok' or 'fail')")]
    UnknownOutcome(String),

    #[error("invalid delay '{0}' (use e.g. '250ms' or '2s')")]
    InvalidDelay(String),
}

/// A single scripted check outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Fail,
}

/// One scripted event: an outcome reported after an optional delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScriptEvent {
    pub outcome: Outcome,
    pub delay: Duration,
}

/// Driver that replays scripted events against the run handle.
///
/// Every event runs on its own spawned task, so delayed events land
/// concurrently rather than serially - a `fail@2s` does not hold up an
/// `ok@100ms` scheduled after it.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDriver {
    events: Vec<ScriptEvent>,
}

impl ScriptedDriver {
    /// Parse a script such as `ok,fail@250ms,ok@2s`.
    ///
    /// An empty script is legal and produces a driver that reports nothing;
    /// paired with `--expect 0` it exercises the immediate-completion path.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        if script.trim().is_empty() {
            return Ok(Self::default());
        }

        let events = script
            .split(',')
            .enumerate()
            .map(|(i, raw)| parse_event(i, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { events })
    }

    /// Number of events in the script.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the script has no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replay all events against `run`, returning once every event has
    /// reported.
    pub async fn drive(self, run: RunHandle, _config: AppConfig) {
        debug!("scripted driver: replaying {} event(s)", self.events.len());

        let tasks: Vec<_> = self
            .events
            .into_iter()
            .map(|event| {
                let run = run.clone();
                tokio::spawn(async move {
                    if !event.delay.is_zero() {
                        tokio::time::sleep(event.delay).await;
                    }
                    match event.outcome {
                        Outcome::Ok => run.pass(),
                        Outcome::Fail => run.fail(),
                    }
                })
            })
            .collect();

        join_all(tasks).await;
    }
}

impl FromStr for ScriptedDriver {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_event(position: usize, raw: &str) -> Result<ScriptEvent, ScriptError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ScriptError::EmptyEvent(position));
    }

    let (outcome, delay) = match raw.split_once('@') {
        Some((outcome, delay)) => (outcome.trim(), parse_delay(delay.trim())?),
        None => (raw, Duration::ZERO),
    };

    let outcome = match outcome.to_lowercase().as_str() {
        "ok" | "pass" => Outcome::Ok,
        "fail" => Outcome::Fail,
        other => return Err(ScriptError::UnknownOutcome(other.to_string())),
    };

    Ok(ScriptEvent { outcome, delay })
}

fn parse_delay(raw: &str) -> Result<Duration, ScriptError> {
    let invalid = || ScriptError::InvalidDelay(raw.to_string());

    if let Some(ms) = raw.strip_suffix("ms") {
        let ms: u64 = ms.parse().map_err(|_| invalid())?;
        Ok(Duration::from_millis(ms))
    } else if let Some(secs) = raw.strip_suffix('s') {
        let secs: u64 = secs.parse().map_err(|_| invalid())?;
        Ok(Duration::from_secs(secs))
    } else {
        Err(invalid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_events() {
        let driver = ScriptedDriver::parse("ok,fail,ok").unwrap();
        assert_eq!(driver.len(), 3);
        assert_eq!(driver.events[0].outcome, Outcome::Ok);
        assert_eq!(driver.events[1].outcome, Outcome::Fail);
        assert_eq!(driver.events[0].delay, Duration::ZERO);
    }

    #[test]
    fn test_parse_delays() {
        let driver = ScriptedDriver::parse("ok@250ms, fail@2s").unwrap();
        assert_eq!(driver.events[0].delay, Duration::from_millis(250));
        assert_eq!(driver.events[1].delay, Duration::from_secs(2));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        let driver = ScriptedDriver::parse("OK,Fail").unwrap();
        assert_eq!(driver.events[0].outcome, Outcome::Ok);
        assert_eq!(driver.events[1].outcome, Outcome::Fail);
    }

    #[test]
    fn test_empty_script_has_no_events() {
        assert!(ScriptedDriver::parse("").unwrap().is_empty());
        assert!(ScriptedDriver::parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_unknown_outcome_is_rejected() {
        let err = ScriptedDriver::parse("ok,skip").unwrap_err();
        assert_eq!(err, ScriptError::UnknownOutcome("skip".to_string()));
    }

    #[test]
    fn test_empty_event_is_rejected() {
        let err = ScriptedDriver::parse("ok,,fail").unwrap_err();
        assert_eq!(err, ScriptError::EmptyEvent(1));
    }

    #[test]
    fn test_bad_delay_is_rejected() {
        assert_eq!(
            ScriptedDriver::parse("ok@later").unwrap_err(),
            ScriptError::InvalidDelay("later".to_string())
        );
        assert_eq!(
            ScriptedDriver::parse("ok@5m").unwrap_err(),
            ScriptError::InvalidDelay("5m".to_string())
        );
    }

    #[test]
    fn test_from_str_round_trip() {
        let driver: ScriptedDriver = "ok,fail@10ms".parse().unwrap();
        assert_eq!(driver.len(), 2);
    }

    #[test]
    fn test_drive_increments_counters() {
        let run = RunHandle::new(3, 5);
        let driver = ScriptedDriver::parse("ok,fail@5ms,ok").unwrap();

        tokio_test::block_on(driver.drive(run.clone(), AppConfig::default()));

        assert_eq!(run.ok_count(), 2);
        assert_eq!(run.fail_count(), 1);
        assert!(run.is_complete());
    }
}
