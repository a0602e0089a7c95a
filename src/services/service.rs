//! # Long-running service abstraction.
//!
//! A [`Service`] has two phases driven by the orchestrator:
//! - [`run`](Service::run) receives the run token and performs the primary work;
//! - [`shutdown`](Service::shutdown) receives a deadline-bound [`ShutdownContext`]
//!   and performs best-effort cleanup.
//!
//! Both phases are cooperative: the orchestrator never aborts a service, it only
//! stops waiting for it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::ShutdownContext;

/// # Long-running unit with a graceful shutdown hook.
///
/// Implementors own their state; nothing is shared with sibling services.
/// Faults are the implementor's responsibility: a panic inside `run` or `shutdown`
/// is not recovered. The orchestrator resumes it on the task that awaited it.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use tokio_util::sync::CancellationToken;
/// use servisor::{Service, ShutdownContext};
///
/// struct Ticker;
///
/// #[async_trait]
/// impl Service for Ticker {
///     async fn run(&self, ctx: CancellationToken) {
///         loop {
///             tokio::select! {
///                 _ = ctx.cancelled() => return,
///                 _ = tokio::time::sleep(std::time::Duration::from_secs(1)) => {}
///             }
///         }
///     }
///
///     async fn shutdown(&self, ctx: ShutdownContext) {
///         tokio::select! {
///             _ = ctx.cancelled() => {}
///             _ = async { /* flush buffers */ } => {}
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Service: Send + Sync + 'static {
    /// Performs the service's work until it completes or `ctx` is cancelled.
    ///
    /// Implementations should select on `ctx.cancelled()` and return promptly.
    async fn run(&self, ctx: CancellationToken);

    /// Cleans up after the run phase; should return by `ctx.deadline()`.
    ///
    /// Called at most once per orchestrator run.
    async fn shutdown(&self, ctx: ShutdownContext);
}

/// Shared handle to a service.
pub type ServiceRef = Arc<dyn Service>;
