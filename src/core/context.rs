//! # Deadline-bound shutdown context.
//!
//! [`ShutdownContext`] is handed to every service's `shutdown` call. It carries a
//! fixed deadline and a [`CancellationToken`] that is cancelled once the deadline
//! passes (or when the orchestrator releases it on return).
//!
//! ```text
//! with_timeout(t)
//!   ├─► deadline = now + t            (saturating)
//!   └─► timer task: select! {
//!           sleep_until(deadline) => token.cancel(),
//!           token.cancelled()     => {}   (released early)
//!       }
//! ```

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Roughly 30 years; used when `now + timeout` does not fit into an [`Instant`].
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Cancellation context with a deadline, shared by all shutdown calls of one run.
///
/// Cloning is cheap and every clone observes the same token and deadline.
#[derive(Clone, Debug)]
pub struct ShutdownContext {
    token: CancellationToken,
    deadline: Instant,
}

impl ShutdownContext {
    /// Creates a context whose token is cancelled `timeout` from now.
    ///
    /// Must be called from within a tokio runtime (spawns the deadline timer).
    pub fn with_timeout(timeout: Duration) -> Self {
        let now = Instant::now();
        let deadline = now
            .checked_add(timeout)
            .or_else(|| now.checked_add(FAR_FUTURE))
            .unwrap_or(now);

        let token = CancellationToken::new();
        let timer = token.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => timer.cancel(),
                _ = timer.cancelled() => {}
            }
        });

        Self { token, deadline }
    }

    /// The instant at which the context is cancelled.
    pub fn deadline(&self) -> Instant {
        self.deadline
    }

    /// Time left until the deadline (zero once it has passed).
    pub fn remaining(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    /// Returns `true` once the deadline passed or the context was released.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves when the context is cancelled.
    pub fn cancelled(&self) -> WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }

    /// Underlying token, e.g. for deriving child tokens.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancels the context ahead of its deadline and stops the timer.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}
