//! # Task group: fire-and-forget launch with a join-all barrier.
//!
//! [`TaskGroup`] spawns units of work onto the tokio runtime and lets a caller wait
//! until every launched unit has finished.
//!
//! ## Architecture
//! ```text
//! launch(fut)
//!   ├─► Pending::add()              (synchronous, before the spawn)
//!   └─► tokio::spawn(async {
//!           let _guard = PendingGuard; (decrements on drop: return, panic or abort)
//!           AssertUnwindSafe(fut).catch_unwind().await
//!               └─ Err(payload) ─► Pending::record_fault (first payload kept,
//!                                  recorded before the decrement)
//!       })
//!
//! join_all()
//!   └─► loop { arm Notify ─► count == 0 ? return : wait }
//!
//! faulted() ─► resolves once any unit panicked; take_panic() hands out the payload
//! ```
//!
//! ## Rules
//! - The increment happens-before the spawn, so a waiter can never observe zero
//!   while a launched unit is still pending.
//! - Every launch is paired with exactly one decrement.
//! - One group per phase, never reused across phases.
//! - A panicking unit is never silently counted as a normal completion: its payload
//!   is kept until the owner takes it.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;
use tokio::sync::Notify;
use tokio_util::sync::{CancellationToken, WaitForCancellationFuture};

/// Payload of a panic caught inside a launched unit.
pub type PanicPayload = Box<dyn Any + Send + 'static>;

/// Pending-unit counter with a "wait for zero" operation.
#[derive(Debug, Default)]
pub(crate) struct Pending {
    count: AtomicUsize,
    zero: Notify,
    fault: Mutex<Option<PanicPayload>>,
    faulted: CancellationToken,
}

impl Pending {
    fn add(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    fn done(&self) {
        if self.count.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.zero.notify_waiters();
        }
    }

    fn load(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    async fn wait_zero(&self) {
        loop {
            // Register interest before checking, otherwise a decrement landing
            // between the check and the await would be missed.
            let notified = self.zero.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if self.load() == 0 {
                return;
            }
            notified.await;
        }
    }

    fn record_fault(&self, payload: PanicPayload) {
        let mut fault = self.fault.lock().unwrap_or_else(PoisonError::into_inner);
        if fault.is_none() {
            *fault = Some(payload);
        }
        drop(fault);
        self.faulted.cancel();
    }

    fn take_fault(&self) -> Option<PanicPayload> {
        self.fault
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Decrements its counter exactly once, when dropped.
struct PendingGuard(Arc<Pending>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.done();
    }
}

/// Registers one pending unit on `pending` and runs `fut` on its own tokio task.
///
/// The unit is released when `fut` completes, panics, or is dropped by the runtime.
/// A panic payload is recorded on `pending` before the release.
pub(crate) fn track<F>(pending: &Arc<Pending>, fut: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    pending.add();
    let guard = PendingGuard(Arc::clone(pending));
    tokio::spawn(async move {
        let guard = guard;
        if let Err(payload) = AssertUnwindSafe(fut).catch_unwind().await {
            guard.0.record_fault(payload);
        }
    });
}

/// Launches concurrent units of work and waits for all of them to finish.
///
/// Cloning a group shares its counter.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use servisor::TaskGroup;
///
/// # #[tokio::main]
/// # async fn main() {
/// let group = TaskGroup::new();
/// let flag = Arc::new(AtomicBool::new(false));
///
/// let f = Arc::clone(&flag);
/// group.launch(async move { f.store(true, Ordering::Relaxed) });
///
/// group.join_all().await;
/// assert!(flag.load(Ordering::Relaxed));
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct TaskGroup {
    pending: Arc<Pending>,
}

impl TaskGroup {
    /// Creates an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawns `fut` and counts it as pending until it finishes.
    ///
    /// Must be called from within a tokio runtime.
    pub fn launch<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        track(&self.pending, fut);
    }

    /// Resolves once every launched unit has finished.
    ///
    /// Returns immediately for a group with nothing pending. Cancel-safe.
    pub async fn join_all(&self) {
        self.pending.wait_zero().await;
    }

    /// Number of launched units that have not finished yet.
    pub fn pending(&self) -> usize {
        self.pending.load()
    }

    /// Resolves once any launched unit has panicked.
    pub fn faulted(&self) -> WaitForCancellationFuture<'_> {
        self.pending.faulted.cancelled()
    }

    /// Takes the payload of the first unit that panicked, if any.
    ///
    /// Re-raise it with [`std::panic::resume_unwind`] to propagate the fault.
    pub fn take_panic(&self) -> Option<PanicPayload> {
        self.pending.take_fault()
    }
}
