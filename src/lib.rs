//! # servisor
//!
//! **Servisor** runs a set of long-lived async services inside one process, listens
//! for termination signals and drives a coordinated, time-bounded shutdown across
//! all of them.
//!
//! It is a single-process, in-memory supervisor: no dependency ordering between
//! services, no restarts, no persisted state.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//!     │   Service    │   │   Service    │   │   Service    │
//!     │  (user #1)   │   │  (user #2)   │   │  (user #3)   │
//!     └──────┬───────┘   └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼                  ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Orchestrator                                                     │
//! │  - SignalScope (SIGINT/SIGTERM ─► run token)                      │
//! │  - TaskGroup #1 (run phase)                                       │
//! │  - TaskGroup #2 (shutdown phase)                                  │
//! │  - ShutdownContext (deadline = trigger + timeout)                 │
//! │  - Logger (lifecycle messages)                                    │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! arm signals ──► launch run(token) × N ──► token cancelled
//!                                                │
//!            "shutdown signal received" ◄────────┘
//!                        │
//!            launch shutdown(ctx) × N
//!                        │
//!        ┌───────────────┴────────────────┐
//!   all returned                     deadline elapsed
//!  "graceful shutdown completed"   "forced shutdown: timeout reached"
//! ```
//!
//! A panic inside any `run` or `shutdown` is resumed on the caller's task; it is never
//! reported as a graceful shutdown. Once the call returns, SIGINT/SIGTERM get their
//! default action back (unix).
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                        |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------|
//! | **Services**      | Long-running units with run and shutdown phases.             | [`Service`], [`ServiceFn`], [`ServiceRef`]|
//! | **Orchestration** | Signal handling, two-phase protocol, completion race.         | [`Orchestrator`], [`run_with_shutdown`]   |
//! | **Task groups**   | Fire-and-forget launch with a join-all barrier.               | [`TaskGroup`]                             |
//! | **Logging**       | Pluggable leveled logger, `tracing` backend, subscriber setup.| [`Logger`], [`TracingLogger`], [`logging`]|
//! | **Errors**        | Typed runtime errors.                                         | [`RuntimeError`]                          |
//! | **Configuration** | Shutdown timeout and run-phase policy.                        | [`Config`]                                |
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use servisor::{Config, Orchestrator, ServiceFn, ServiceRef, ShutdownContext};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let worker: ServiceRef = ServiceFn::arc(
//!         |ctx: CancellationToken| async move {
//!             while !ctx.is_cancelled() {
//!                 tokio::time::sleep(Duration::from_millis(10)).await;
//!             }
//!         },
//!         |_ctx: ShutdownContext| async move {},
//!     );
//!
//!     let orch = Orchestrator::builder(Config::default().with_timeout(Duration::from_secs(5)))
//!         .build();
//!
//!     // Cancel the parent instead of sending SIGTERM.
//!     let parent = CancellationToken::new();
//!     parent.cancel();
//!
//!     let outcome = orch.run_until(parent, [worker]).await?;
//!     assert!(outcome.is_graceful());
//!     Ok(())
//! }
//! ```

mod core;
mod error;
mod services;

pub mod logging;

// ---- Public re-exports ----

pub use crate::core::{
    Config, MSG_FORCED, MSG_GRACEFUL, MSG_SHUTDOWN_RECEIVED, Orchestrator, OrchestratorBuilder,
    PanicPayload, ShutdownContext, ShutdownOutcome, TaskGroup, run_with_shutdown,
};
pub use error::RuntimeError;
pub use logging::{Field, Level, Logger, TracingLogger};
pub use services::{Service, ServiceFn, ServiceRef};
