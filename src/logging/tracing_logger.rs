//! # `tracing`-backed logger.
//!
//! [`TracingLogger`] forwards every call to the [`tracing`] macros at the matching
//! level. `timeout`, the field the orchestrator attaches, becomes a real event field,
//! so structured subscribers can query it. Any other pairs are rendered as
//! `key=value` text under a single `extra` value.
//!
//! ## Output format (fmt subscriber)
//! ```text
//! text: DEBUG servisor: shutdown signal received timeout=1s
//! json: {"level":"DEBUG","fields":{"message":"shutdown signal received","timeout":"1s"},"target":"servisor"}
//! ```

use tokio_util::sync::CancellationToken;

use super::logger::{Field, Level, Logger};

/// Logger that emits `tracing` events under the `servisor` target.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Creates a new logger.
    pub fn new() -> Self {
        Self
    }
}

/// Fields split into the named ones and the rendered remainder.
#[derive(Debug, Default, PartialEq)]
struct Split<'a> {
    timeout: Option<&'a str>,
    rest: Option<String>,
}

fn split(fields: &[Field]) -> Split<'_> {
    let mut out = Split::default();
    let mut rest = Vec::new();
    for (key, value) in fields {
        match *key {
            "timeout" if out.timeout.is_none() => out.timeout = Some(value.as_str()),
            _ => rest.push(format!("{key}={value}")),
        }
    }
    if !rest.is_empty() {
        out.rest = Some(rest.join(" "));
    }
    out
}

// `None` values are not recorded, so absent fields do not show up in the output.
macro_rules! emit {
    ($lvl:expr, $msg:expr, $split:expr, $cancelled:expr) => {
        tracing::event!(
            target: "servisor",
            $lvl,
            timeout = $split.timeout.map(tracing::field::display),
            extra = $split.rest.as_deref().map(tracing::field::display),
            ctx_cancelled = $cancelled,
            "{}",
            $msg
        )
    };
}

impl Logger for TracingLogger {
    fn log(&self, ctx: &CancellationToken, level: Level, msg: &str, fields: &[Field]) {
        let split = split(fields);
        let cancelled = ctx.is_cancelled().then_some(true);
        // `tracing::event!` needs a constant level.
        match level {
            Level::TRACE => emit!(Level::TRACE, msg, split, cancelled),
            Level::DEBUG => emit!(Level::DEBUG, msg, split, cancelled),
            Level::INFO => emit!(Level::INFO, msg, split, cancelled),
            Level::WARN => emit!(Level::WARN, msg, split, cancelled),
            _ => emit!(Level::ERROR, msg, split, cancelled),
        }
    }
}
