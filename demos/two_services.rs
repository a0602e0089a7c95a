//! # Example: two_services
//!
//! Runs two services until Ctrl-C / SIGTERM, then shuts them down within 2 seconds.
//!
//! Shows how to:
//! - Implement [`Service`] by hand and with [`ServiceFn`]
//! - Install the `tracing` subscriber with [`servisor::logging::init`]
//! - Observe both outcomes: the `flusher` finishes in time, the `stuck` service does not
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► logging::init(Text, "debug")
//!   └─► Orchestrator::run([ticker, flusher, stuck])
//!         ├─► ticker: prints every 500ms until the run token is cancelled
//!         ├─► flusher: idle until cancelled, then "flushes" for 300ms on shutdown
//!         ├─► stuck (only with STUCK=1): ignores its shutdown deadline
//!         └─► Ctrl-C ─► "shutdown signal received" ─► graceful | forced
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example two_services
//! STUCK=1 cargo run --example two_services
//! ```

use std::time::Duration;

use async_trait::async_trait;
use servisor::logging::{self, LogFormat};
use servisor::{Config, Orchestrator, Service, ServiceFn, ServiceRef, ShutdownContext};
use tokio_util::sync::CancellationToken;

struct Flusher;

#[async_trait]
impl Service for Flusher {
    async fn run(&self, ctx: CancellationToken) {
        ctx.cancelled().await;
        tracing::info!("flusher: run phase over");
    }

    async fn shutdown(&self, ctx: ShutdownContext) {
        tracing::info!(remaining = ?ctx.remaining(), "flusher: flushing");
        tokio::select! {
            _ = tokio::time::sleep(Duration::from_millis(300)) => tracing::info!("flusher: done"),
            _ = ctx.cancelled() => tracing::warn!("flusher: deadline hit"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init(LogFormat::Text, "debug")?;

    let ticker: ServiceRef = ServiceFn::arc(
        |ctx: CancellationToken| async move {
            let mut n = 0u64;
            loop {
                tokio::select! {
                    _ = ctx.cancelled() => return,
                    _ = tokio::time::sleep(Duration::from_millis(500)) => {
                        n += 1;
                        tracing::info!(n, "ticker: tick");
                    }
                }
            }
        },
        |_ctx: ShutdownContext| async move {
            tracing::info!("ticker: nothing to clean up");
        },
    );

    let mut services: Vec<ServiceRef> = vec![ticker, std::sync::Arc::new(Flusher)];
    if std::env::var("STUCK").is_ok_and(|v| v == "1") {
        services.push(ServiceFn::arc(
            |ctx: CancellationToken| async move { ctx.cancelled().await },
            |_ctx: ShutdownContext| std::future::pending::<()>(),
        ));
    }

    let orch = Orchestrator::builder(Config::default().with_timeout(Duration::from_secs(2))).build();

    tracing::info!("press Ctrl-C to stop");
    let outcome = orch.run(services).await.inspect_err(|err| {
        tracing::error!(error = err.as_label(), "{err}");
    })?;
    tracing::info!(outcome = outcome.as_label(), "exiting");
    Ok(())
}
