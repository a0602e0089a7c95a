//! # Orchestrator: runs services side by side and drives a time-bounded shutdown.
//!
//! The [`Orchestrator`] owns the signal listener, one [`TaskGroup`] per phase and the
//! completion race that bounds the shutdown phase.
//!
//! ## Protocol
//! ```text
//! run_until(parent, services)
//!   1. arm:      SignalScope::arm(parent) ─► run token (SIGINT/SIGTERM/parent cancel)
//!   2. run:      for svc in services: run_group.launch(svc.run(run token))
//!                wait: run token cancelled
//!                      (or run_group idle, if cfg.stop_when_idle)
//!   3. shutdown: log "shutdown signal received" timeout=<cfg.timeout>
//!                ctx = ShutdownContext::with_timeout(cfg.timeout)
//!                for svc in services: shutdown_group.launch(svc.shutdown(ctx))
//!   4. race:     select! {
//!                    shutdown_group.faulted()  ─► resume the unit's panic
//!                    shutdown_group.join_all() ─► Graceful  "graceful shutdown completed"
//!                    ctx.cancelled()           ─► Forced    "forced shutdown: timeout reached"
//!                }
//!                ctx.cancel(); signal listener released
//! ```
//!
//! ## Rules
//! - Signals are armed before the first service starts.
//! - Launch order follows input order; completion order is unspecified.
//! - No `shutdown` is launched before the run phase has ended.
//! - Each phase has its own [`TaskGroup`]; a late `run` never counts as a shutdown unit.
//! - Exactly one outcome line is logged per run.
//! - Services still running when the race resolves are left alone; they are not aborted.
//! - Log calls receive a fresh, non-cancelled token as context.
//! - A panic in `run` or `shutdown` is fatal: it is resumed on the caller's task with
//!   the original payload, and no outcome line is logged.

use std::panic;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{
    builder::OrchestratorBuilder, config::Config, context::ShutdownContext,
    signals::SignalScope,
    tracker::{PanicPayload, TaskGroup},
};
use crate::error::RuntimeError;
use crate::logging::{Field, Logger};
use crate::services::ServiceRef;

/// Message logged once the run phase ends.
pub const MSG_SHUTDOWN_RECEIVED: &str = "shutdown signal received";
/// Message logged when every shutdown call finished before the deadline.
pub const MSG_GRACEFUL: &str = "graceful shutdown completed";
/// Message logged when the deadline elapsed first.
pub const MSG_FORCED: &str = "forced shutdown: timeout reached";

/// Result of the completion race.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// All shutdown calls returned before the deadline.
    Graceful,
    /// The deadline elapsed while at least one shutdown call was still running.
    Forced,
}

impl ShutdownOutcome {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ShutdownOutcome::Graceful => "shutdown_graceful",
            ShutdownOutcome::Forced => "shutdown_forced",
        }
    }

    /// The exact message logged for this outcome.
    pub fn message(&self) -> &'static str {
        match self {
            ShutdownOutcome::Graceful => MSG_GRACEFUL,
            ShutdownOutcome::Forced => MSG_FORCED,
        }
    }

    /// Returns `true` for [`ShutdownOutcome::Graceful`].
    pub fn is_graceful(&self) -> bool {
        matches!(self, ShutdownOutcome::Graceful)
    }
}

/// Coordinates the run and shutdown phases of a set of services.
pub struct Orchestrator {
    cfg: Config,
    logger: Arc<dyn Logger>,
}

impl Orchestrator {
    /// Starts building an orchestrator.
    pub fn builder(cfg: Config) -> OrchestratorBuilder {
        OrchestratorBuilder::new(cfg)
    }

    pub(super) fn new_internal(cfg: Config, logger: Arc<dyn Logger>) -> Self {
        Self { cfg, logger }
    }

    /// Runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Runs `services` until SIGINT/SIGTERM, then shuts them down within `cfg.timeout`.
    pub async fn run<I>(&self, services: I) -> Result<ShutdownOutcome, RuntimeError>
    where
        I: IntoIterator<Item = ServiceRef>,
    {
        self.run_until(CancellationToken::new(), services).await
    }

    /// Same as [`Orchestrator::run`], but cancelling `parent` also ends the run phase.
    pub async fn run_until<I>(
        &self,
        parent: CancellationToken,
        services: I,
    ) -> Result<ShutdownOutcome, RuntimeError>
    where
        I: IntoIterator<Item = ServiceRef>,
    {
        let services: Vec<ServiceRef> = services.into_iter().collect();

        let signals =
            SignalScope::arm(&parent).map_err(|source| RuntimeError::SignalSetup { source })?;
        let run_ctx = signals.token().clone();

        let run_group = TaskGroup::new();
        spawn_run_phase(&run_group, &run_ctx, &services);
        if let Err(payload) = self.wait_for_trigger(&run_group, &run_ctx).await {
            panic::resume_unwind(payload);
        }

        let timeout = self.cfg.timeout;
        self.log(MSG_SHUTDOWN_RECEIVED, &[("timeout", format!("{timeout:?}"))]);

        let shutdown_ctx = ShutdownContext::with_timeout(timeout);
        let shutdown_group = TaskGroup::new();
        spawn_shutdown_phase(&shutdown_group, &shutdown_ctx, &services);

        let outcome = race(&shutdown_group, &shutdown_ctx).await;
        shutdown_ctx.cancel();
        // A late `run` may have panicked while the shutdown phase was in flight.
        let outcome = match (outcome, run_group.take_panic()) {
            (Ok(outcome), None) => outcome,
            (Err(payload), _) | (Ok(_), Some(payload)) => panic::resume_unwind(payload),
        };
        self.log(outcome.message(), &[]);

        drop(signals);
        Ok(outcome)
    }

    /// Blocks until the run phase is over, or hands back the first `run` panic.
    async fn wait_for_trigger(
        &self,
        run_group: &TaskGroup,
        run_ctx: &CancellationToken,
    ) -> Result<(), PanicPayload> {
        let idle = self.cfg.stop_when_idle;
        tokio::select! {
            biased;
            _ = run_group.faulted() => {}
            _ = run_ctx.cancelled() => {}
            _ = run_group.join_all(), if idle => run_ctx.cancel(),
        }
        match run_group.take_panic() {
            Some(payload) => Err(payload),
            None => Ok(()),
        }
    }

    fn log(&self, msg: &str, fields: &[Field]) {
        self.logger.debug(&CancellationToken::new(), msg, fields);
    }
}

/// Launches every service's `run` against the shared run token.
fn spawn_run_phase(group: &TaskGroup, ctx: &CancellationToken, services: &[ServiceRef]) {
    for svc in services {
        let svc = Arc::clone(svc);
        let ctx = ctx.clone();
        group.launch(async move { svc.run(ctx).await });
    }
}

/// Launches every service's `shutdown` against the shared shutdown context.
fn spawn_shutdown_phase(group: &TaskGroup, ctx: &ShutdownContext, services: &[ServiceRef]) {
    for svc in services {
        let svc = Arc::clone(svc);
        let ctx = ctx.clone();
        group.launch(async move { svc.shutdown(ctx).await });
    }
}

/// Waits for the first of: every shutdown unit finished, or the deadline elapsed.
///
/// Completion is checked before the deadline so an already-drained group wins a tie.
/// A unit that panicked never counts as completed: its payload is returned instead.
async fn race(
    group: &TaskGroup,
    ctx: &ShutdownContext,
) -> Result<ShutdownOutcome, PanicPayload> {
    let outcome = tokio::select! {
        biased;
        _ = group.faulted() => ShutdownOutcome::Forced,
        _ = group.join_all() => ShutdownOutcome::Graceful,
        _ = ctx.cancelled() => ShutdownOutcome::Forced,
    };
    match group.take_panic() {
        Some(payload) => Err(payload),
        None => Ok(outcome),
    }
}

/// Runs `services` until SIGINT/SIGTERM and then shuts them down within `timeout`.
///
/// Shorthand for a default-configured [`Orchestrator`] with the given logger and timeout.
///
/// # Example
/// ```no_run
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
/// use servisor::{ServiceFn, ServiceRef, ShutdownContext, TracingLogger, run_with_shutdown};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api: ServiceRef = ServiceFn::arc(
///         |ctx: CancellationToken| async move { ctx.cancelled().await },
///         |_ctx: ShutdownContext| async move {},
///     );
///
///     let outcome = run_with_shutdown(TracingLogger::new(), Duration::from_secs(5), [api]).await?;
///     println!("{}", outcome.message());
///     Ok(())
/// }
/// ```
pub async fn run_with_shutdown<L, I>(
    logger: L,
    timeout: Duration,
    services: I,
) -> Result<ShutdownOutcome, RuntimeError>
where
    L: Logger + 'static,
    I: IntoIterator<Item = ServiceRef>,
{
    Orchestrator::builder(Config::default().with_timeout(timeout))
        .with_logger(Arc::new(logger))
        .build()
        .run(services)
        .await
}
