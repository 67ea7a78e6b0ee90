//! Pluggable structured-completion backends.
//!
//! The AI service is a capability, not a dependency: when no credentials
//! are present a no-op backend is injected and the pipeline runs on the
//! heuristic path alone.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::models::config::AiConfig;

/// A structured-completion backend. Implementations never panic and never
/// error: any failure surfaces as `None`.
#[async_trait]
pub trait AiBackend: Send + Sync {
    /// Whether this backend can actually serve requests.
    fn is_configured(&self) -> bool;

    /// Send the instruction pair and return the decoded JSON object, or
    /// `None` on any failure (transport, status, malformed payload).
    async fn complete(&self, system: &str, user: &str) -> Option<Value>;
}

/// Backend for an OpenAI-compatible chat-completions endpoint.
pub struct OpenAiBackend {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiBackend {
    pub fn new(config: &AiConfig, api_key: String) -> Option<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build();

        match client {
            Ok(client) => Some(Self {
                client,
                api_key,
                base_url: config.base_url.trim_end_matches('/').to_string(),
                model: config.model.clone(),
            }),
            Err(e) => {
                warn!("could not build HTTP client for AI backend: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl AiBackend for OpenAiBackend {
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, system: &str, user: &str) -> Option<Value> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "response_format": { "type": "json_object" },
            "temperature": 0.2,
        });

        let response = match self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("AI request failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        let payload: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("AI response decode failed: {}", e);
                return None;
            }
        };

        if !status.is_success() {
            warn!("AI service returned status {}: {}", status, payload);
            return None;
        }

        let content = payload
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|t| t.as_str())?;

        match serde_json::from_str::<Value>(content) {
            Ok(value) if value.is_object() => {
                debug!("AI returned a structured plan candidate");
                Some(value)
            }
            Ok(_) => {
                warn!("AI returned JSON that is not an object");
                None
            }
            Err(e) => {
                warn!("AI returned malformed JSON: {}", e);
                None
            }
        }
    }
}

/// No-op backend injected when the AI path is unconfigured.
pub struct DisabledBackend;

#[async_trait]
impl AiBackend for DisabledBackend {
    fn is_configured(&self) -> bool {
        false
    }

    async fn complete(&self, _system: &str, _user: &str) -> Option<Value> {
        None
    }
}

/// Build the backend from the environment: a real client when the key
/// variable named in the config is set, the no-op backend otherwise.
pub fn backend_from_env(config: &AiConfig) -> Arc<dyn AiBackend> {
    if !config.enabled {
        debug!("AI path disabled by configuration");
        return Arc::new(DisabledBackend);
    }

    match std::env::var(&config.api_key_env) {
        Ok(key) if !key.trim().is_empty() => match OpenAiBackend::new(config, key) {
            Some(backend) => Arc::new(backend),
            None => Arc::new(DisabledBackend),
        },
        _ => {
            debug!("{} not set, AI path unavailable", config.api_key_env);
            Arc::new(DisabledBackend)
        }
    }
}
