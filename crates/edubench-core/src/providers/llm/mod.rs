mod fake;
mod openai;

pub use fake::FakeClient;
pub use openai::OpenAiClient;

use crate::config::RoleConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Message role on the chat wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a model query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One generated message, with provenance.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// The model-query boundary shared by all four roles (teacher, student,
/// grader, moderator): an ordered list of role-tagged messages in, one
/// generated message out.
///
/// Clients are stateless from the caller's perspective and safe to share
/// across concurrently generated conversations. No retries happen at this
/// layer; errors propagate to the caller.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// `max_tokens` bounds the response length; only the moderator passes it
    /// (a one-word decision is expected).
    async fn complete(
        &self,
        messages: &[ChatMessage],
        max_tokens: Option<u32>,
    ) -> anyhow::Result<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}

/// Instantiate the client a role config asks for.
pub fn build_client(cfg: &RoleConfig) -> anyhow::Result<Arc<dyn ChatClient>> {
    match cfg.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiClient::new(
            cfg.model.clone(),
            cfg.api_key.clone(),
            cfg.base_url.clone(),
        ))),
        "fake" => Ok(Arc::new(FakeClient::new(cfg.model.clone()))),
        other => anyhow::bail!("unknown provider '{}' (expected \"openai\" or \"fake\")", other),
    }
}
