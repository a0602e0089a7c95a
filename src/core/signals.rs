//! # Scoped OS termination-signal listener.
//!
//! [`SignalScope::arm`] registers the listeners **synchronously**, so a signal that
//! arrives right after arming (even before any service starts) is not lost. The
//! scope's token is a child of the caller's parent token and is cancelled by:
//!
//! **Unix platforms:**
//! - `SIGINT` (Ctrl-C in terminal)
//! - `SIGTERM` (default kill signal, used by systemd/Kubernetes)
//!
//! **Other platforms:**
//! - `Ctrl-C` via [`tokio::signal::ctrl_c`]
//!
//! or by cancellation of the parent token. Dropping the scope stops the listener.
//!
//! ## Restoring the default action (unix)
//! tokio never uninstalls a process-level handler once registered. Without help,
//! SIGINT/SIGTERM would be swallowed for the rest of the process after the scope is
//! gone. A process-wide [`signal_hook::flag::register_conditional_default`] switch sits
//! next to tokio's handler:
//!
//! ```text
//! arm()  ─► active += 1, restore = false   (signal only cancels the scope token)
//! drop() ─► active -= 1; active == 0 ─► restore = true
//!                                        (signal terminates the process as before arming)
//! ```
//!
//! The switch is registered once per process and shared by every scope, so nested or
//! concurrent scopes keep signals handled until the last one is dropped.

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle owning an armed signal listener.
#[derive(Debug)]
pub(crate) struct SignalScope {
    token: CancellationToken,
    listener: JoinHandle<()>,
}

impl SignalScope {
    /// Arms the listener. The returned token fires on SIGINT/SIGTERM or parent cancellation.
    #[cfg(unix)]
    pub(crate) fn arm(parent: &CancellationToken) -> std::io::Result<Self> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigint = signal(SignalKind::interrupt())?;
        let mut sigterm = signal(SignalKind::terminate())?;
        fallback::enter()?;

        let token = parent.child_token();
        let fire = token.clone();
        let listener = tokio::spawn(async move {
            tokio::select! {
                _ = sigint.recv() => fire.cancel(),
                _ = sigterm.recv() => fire.cancel(),
                _ = fire.cancelled() => {}
            }
        });

        Ok(Self { token, listener })
    }

    /// Arms the listener. The returned token fires on Ctrl-C or parent cancellation.
    #[cfg(not(unix))]
    pub(crate) fn arm(parent: &CancellationToken) -> std::io::Result<Self> {
        let token = parent.child_token();
        let fire = token.clone();
        let listener = tokio::spawn(async move {
            tokio::select! {
                res = tokio::signal::ctrl_c() => {
                    if res.is_ok() {
                        fire.cancel();
                    }
                }
                _ = fire.cancelled() => {}
            }
        });

        Ok(Self { token, listener })
    }

    /// Run-context token tied to this scope.
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for SignalScope {
    fn drop(&mut self) {
        self.listener.abort();
        #[cfg(unix)]
        fallback::leave();
    }
}

#[cfg(unix)]
mod fallback {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex, PoisonError};

    use signal_hook::consts::{SIGINT, SIGTERM};

    /// Counts armed scopes and drives the "run the default action" flag.
    #[derive(Debug)]
    pub(super) struct Fallback {
        restore: Arc<AtomicBool>,
        active: usize,
    }

    impl Fallback {
        pub(super) fn new(restore: Arc<AtomicBool>) -> Self {
            Self { restore, active: 0 }
        }

        pub(super) fn enter(&mut self) {
            self.active += 1;
            self.restore.store(false, Ordering::SeqCst);
        }

        pub(super) fn leave(&mut self) {
            self.active = self.active.saturating_sub(1);
            if self.active == 0 {
                self.restore.store(true, Ordering::SeqCst);
            }
        }
    }

    static FALLBACK: Mutex<Option<Fallback>> = Mutex::new(None);

    /// Marks one more scope as armed, registering the switch on first use.
    pub(super) fn enter() -> io::Result<()> {
        let mut slot = FALLBACK.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            let restore = Arc::new(AtomicBool::new(false));
            for sig in [SIGINT, SIGTERM] {
                signal_hook::flag::register_conditional_default(sig, Arc::clone(&restore))?;
            }
            *slot = Some(Fallback::new(restore));
        }
        if let Some(fallback) = slot.as_mut() {
            fallback.enter();
        }
        Ok(())
    }

    /// Marks one scope as gone; the last one hands the signals back.
    pub(super) fn leave() {
        let mut slot = FALLBACK.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(fallback) = slot.as_mut() {
            fallback.leave();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_parent_cancellation_propagates() {
        let parent = CancellationToken::new();
        let scope = SignalScope::arm(&parent).expect("arm");
        assert!(!scope.token().is_cancelled());

        parent.cancel();
        tokio::time::timeout(Duration::from_millis(100), scope.token().cancelled())
            .await
            .expect("child token follows parent");
    }

    #[cfg(unix)]
    #[test]
    fn test_default_action_restored_only_after_last_scope() {
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};

        let restore = Arc::new(AtomicBool::new(false));
        let mut fallback = fallback::Fallback::new(Arc::clone(&restore));

        fallback.enter();
        fallback.enter();
        fallback.leave();
        assert!(!restore.load(Ordering::SeqCst), "one scope still armed");

        fallback.leave();
        assert!(restore.load(Ordering::SeqCst));

        fallback.enter();
        assert!(!restore.load(Ordering::SeqCst), "re-arming takes the signals back");
    }

    #[tokio::test]
    async fn test_drop_does_not_cancel_parent() {
        let parent = CancellationToken::new();
        let scope = SignalScope::arm(&parent).expect("arm");
        drop(scope);
        assert!(!parent.is_cancelled());
    }
}
