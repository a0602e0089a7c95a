//! # Logger trait.
//!
//! Provides [`Logger`], the extension point through which the orchestrator reports
//! lifecycle transitions. Every call carries a [`CancellationToken`] as its context;
//! the orchestrator always passes a fresh, non-cancelled one.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

pub use tracing::Level;

/// Key/value pair attached to a log call.
pub type Field = (&'static str, String);

/// Leveled, contextual logging capability.
///
/// ### Implementation requirements
/// - Must not block for long; calls are made on the orchestrator's own task.
/// - Must not panic.
pub trait Logger: Send + Sync {
    /// Records `msg` at `level` with the given fields.
    fn log(&self, ctx: &CancellationToken, level: Level, msg: &str, fields: &[Field]);

    /// Shorthand for [`Logger::log`] at [`Level::DEBUG`].
    fn debug(&self, ctx: &CancellationToken, msg: &str, fields: &[Field]) {
        self.log(ctx, Level::DEBUG, msg, fields);
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn log(&self, ctx: &CancellationToken, level: Level, msg: &str, fields: &[Field]) {
        (**self).log(ctx, level, msg, fields);
    }
}

impl<L: Logger + ?Sized> Logger for &L {
    fn log(&self, ctx: &CancellationToken, level: Level, msg: &str, fields: &[Field]) {
        (**self).log(ctx, level, msg, fields);
    }
}
