use std::sync::Arc;

use super::{config::Config, orchestrator::Orchestrator};
use crate::logging::{Logger, TracingLogger};

/// Builder for constructing an [`Orchestrator`] with optional collaborators.
pub struct OrchestratorBuilder {
    cfg: Config,
    logger: Option<Arc<dyn Logger>>,
}

impl OrchestratorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self { cfg, logger: None }
    }

    /// Sets the logger that receives lifecycle messages.
    ///
    /// Defaults to [`TracingLogger`].
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Builds the orchestrator.
    pub fn build(self) -> Orchestrator {
        let logger = self
            .logger
            .unwrap_or_else(|| Arc::new(TracingLogger::new()));
        Orchestrator::new_internal(self.cfg, logger)
    }
}
