//! # Closure-backed service (`ServiceFn`)
//!
//! [`ServiceFn`] wraps two closures, one per phase. Each call produces a fresh
//! future, so no hidden state is shared between calls; capture an `Arc<...>`
//! explicitly when the phases need common state.
//!
//! ## Example
//! ```rust
//! use tokio_util::sync::CancellationToken;
//! use servisor::{ServiceFn, ServiceRef, ShutdownContext};
//!
//! let svc: ServiceRef = ServiceFn::arc(
//!     |ctx: CancellationToken| async move { ctx.cancelled().await },
//!     |_ctx: ShutdownContext| async move {},
//! );
//! # let _ = svc;
//! ```

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::core::ShutdownContext;
use crate::services::service::Service;

/// Function-backed service implementation.
#[derive(Debug)]
pub struct ServiceFn<R, S> {
    run: R,
    shutdown: S,
}

impl<R, S> ServiceFn<R, S> {
    /// Creates a new function-backed service.
    ///
    /// Prefer [`ServiceFn::arc`] when you immediately need a [`ServiceRef`](crate::ServiceRef).
    pub fn new(run: R, shutdown: S) -> Self {
        Self { run, shutdown }
    }

    /// Creates the service and returns it as a shared handle.
    pub fn arc(run: R, shutdown: S) -> Arc<Self> {
        Arc::new(Self::new(run, shutdown))
    }
}

#[async_trait]
impl<R, RFut, S, SFut> Service for ServiceFn<R, S>
where
    R: Fn(CancellationToken) -> RFut + Send + Sync + 'static,
    RFut: Future<Output = ()> + Send + 'static,
    S: Fn(ShutdownContext) -> SFut + Send + Sync + 'static,
    SFut: Future<Output = ()> + Send + 'static,
{
    async fn run(&self, ctx: CancellationToken) {
        (self.run)(ctx).await
    }

    async fn shutdown(&self, ctx: ShutdownContext) {
        (self.shutdown)(ctx).await
    }
}
