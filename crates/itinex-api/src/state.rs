use std::sync::Arc;

use itinex_core::{backend_from_env, AiBackend, AiExtractor, ItinexConfig, Orchestrator};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ItinexConfig>,
    pub backend: Arc<dyn AiBackend>,
}

impl AppState {
    pub fn new(config: ItinexConfig) -> Self {
        let backend = backend_from_env(&config.ai);
        Self {
            config: Arc::new(config),
            backend,
        }
    }

    /// Build the per-request orchestrator. Requests share no mutable
    /// state; each one gets its own pipeline over the shared backend.
    pub fn orchestrator(&self) -> Orchestrator {
        let config = (*self.config).clone();
        let ai = AiExtractor::new(self.backend.clone(), config.clone());
        Orchestrator::new(config, ai)
    }
}
