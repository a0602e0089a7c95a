//! Runtime core: orchestration and lifecycle.
//!
//! The public API from this module is [`Orchestrator`] (with its builder and
//! [`run_with_shutdown`] shorthand), [`TaskGroup`] and [`ShutdownContext`].
//!
//! Internal modules:
//! - [`orchestrator`]: four-phase run/shutdown protocol and the completion race;
//! - [`tracker`]: task group with a pending counter and join-all barrier;
//! - [`context`]: deadline-bound shutdown context;
//! - [`signals`]: scoped SIGINT/SIGTERM listener;
//! - [`builder`]: orchestrator construction;
//! - [`config`]: runtime settings.

mod builder;
mod config;
mod context;
mod orchestrator;
mod signals;
mod tracker;

pub use builder::OrchestratorBuilder;
pub use config::Config;
pub use context::ShutdownContext;
pub use orchestrator::{
    MSG_FORCED, MSG_GRACEFUL, MSG_SHUTDOWN_RECEIVED, Orchestrator, ShutdownOutcome,
    run_with_shutdown,
};
pub use tracker::{PanicPayload, TaskGroup};
