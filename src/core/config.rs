//! # Orchestrator configuration.
//!
//! Provides [`Config`] centralized settings for one orchestrator.
//!
//! ## Sentinel values
//! - `timeout = 0s` → shutdown phase gets no grace period; the completion race
//!   resolves to `Forced` unless every shutdown call has already finished.
//!
//! ## Timeout rendering
//! The "shutdown signal received" line carries `timeout` as the [`Duration`] `Debug`
//! text: `1s`, `750ms`, `90s`, `0ns`. Units are never combined, so 90 seconds is
//! `90s` (not `1m30s`) and zero is `0ns` (not `0s`). Log consumers that parse the
//! value should accept any `Debug` unit suffix (`ns`, `µs`, `ms`, `s`).

use std::time::Duration;

/// Configuration for the orchestrator runtime.
///
/// ## Field semantics
/// - `timeout`: Maximum wait for all `shutdown` calls to finish after the run phase ends
/// - `stop_when_idle`: Also end the run phase once every `run` call returned on its own
#[derive(Clone, Debug)]
pub struct Config {
    /// Deadline of the shutdown phase, measured from the moment the run phase ends.
    ///
    /// When a shutdown trigger is observed:
    /// - every service's `shutdown` is launched with a context expiring after `timeout`
    /// - the orchestrator waits for all of them, or for the deadline, whichever is first
    /// - a deadline win is logged as a forced shutdown; it is not an error
    pub timeout: Duration,

    /// End the run phase when every service's `run` has returned, without waiting
    /// for a signal.
    ///
    /// - `false` (default) = only SIGINT/SIGTERM or parent cancellation end the run phase
    /// - `true` = additionally, a fully idle run phase triggers shutdown
    pub stop_when_idle: bool,
}

impl Config {
    /// Returns the config with a different shutdown timeout.
    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the config with `stop_when_idle` set.
    #[inline]
    pub fn with_stop_when_idle(mut self, stop_when_idle: bool) -> Self {
        self.stop_when_idle = stop_when_idle;
        self
    }

}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `timeout = 30s`
    /// - `stop_when_idle = false`
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            stop_when_idle: false,
        }
    }
}
