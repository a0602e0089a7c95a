//! # Logging capability consumed by the orchestrator.
//!
//! - [`Logger`] - leveled, contextual logging with key/value fields
//! - [`TracingLogger`] - default implementation forwarding to [`tracing`]
//! - [`init`] - installs a global `tracing-subscriber` (text or JSON)
//!
//! ## Architecture
//! ```text
//! Orchestrator ──► Logger::debug(ctx, msg, fields)
//!                        │
//!                        ├──► TracingLogger ──► tracing::event! ──► fmt subscriber (init)
//!                        └──► custom impls (tests, adapters to other backends)
//! ```

mod init;
mod logger;
mod tracing_logger;

pub use init::{LogFormat, LoggingError, init, parse_level};
pub use logger::{Field, Level, Logger};
pub use tracing_logger::TracingLogger;
