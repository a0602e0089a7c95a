//! Error types used by the servisor runtime.
//!
//! A shutdown that outlives its timeout is **not** an error: it is reported as
//! [`ShutdownOutcome::Forced`](crate::ShutdownOutcome::Forced). The only runtime
//! error is failing to arm the OS signal listeners, which happens before any
//! service is started.

use thiserror::Error;

/// # Errors produced by the servisor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Registering the SIGINT/SIGTERM listeners (or the switch that restores their
    /// default action afterwards) failed; no service was started.
    #[error("failed to arm termination signal listeners: {source}")]
    SignalSetup {
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use servisor::RuntimeError;
    ///
    /// let err = RuntimeError::SignalSetup { source: std::io::Error::other("no signals") };
    /// assert_eq!(err.as_label(), "runtime_signal_setup");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::SignalSetup { .. } => "runtime_signal_setup",
        }
    }
}
