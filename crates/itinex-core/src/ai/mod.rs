//! AI-assisted structured extraction.

mod backend;
pub mod prompt;

pub use backend::{backend_from_env, AiBackend, DisabledBackend, OpenAiBackend};

use std::sync::Arc;
use tracing::debug;

use crate::models::config::ItinexConfig;
use crate::models::plan::ExtractedPlan;
use crate::plan::normalize::normalize;

/// Schema-constrained extraction through a pluggable backend.
///
/// A safe optional enhancement: `extract` returns `None` (never errors)
/// when the backend is unconfigured or anything goes wrong, and every
/// successful response passes through the normalization layer before it
/// reaches the orchestrator.
pub struct AiExtractor {
    backend: Arc<dyn AiBackend>,
    config: ItinexConfig,
}

impl AiExtractor {
    pub fn new(backend: Arc<dyn AiBackend>, config: ItinexConfig) -> Self {
        Self { backend, config }
    }

    pub fn is_configured(&self) -> bool {
        self.config.ai.enabled && self.backend.is_configured()
    }

    /// Extract a plan from raw document text, or `None` on any failure.
    pub async fn extract(&self, text: &str) -> Option<ExtractedPlan> {
        if !self.is_configured() {
            return None;
        }

        let system = prompt::build_system_prompt(&self.config.limits);
        let user = prompt::bounded_text(text, self.config.ai.prompt_budget_chars);

        let candidate = self.backend.complete(&system, &user).await?;
        debug!("normalizing AI plan candidate");
        Some(normalize(&candidate, &self.config.limits))
    }
}
