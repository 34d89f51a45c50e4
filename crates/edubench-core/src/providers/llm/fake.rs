use super::{ChatClient, ChatMessage, LlmResponse};
use async_trait::async_trait;
use std::sync::Mutex;

/// Deterministic in-process client for tests and offline runs. Scripted
/// responses are popped front-first; once the script is exhausted the
/// fallback text is returned forever.
pub struct FakeClient {
    model: String,
    responses: Mutex<Vec<String>>,
    fallback: String,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            responses: Mutex::new(Vec::new()),
            fallback: "CONTINUE".to_string(),
        }
    }

    /// Queue responses to return in order.
    pub fn with_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = Mutex::new(responses);
        self
    }

    /// Text returned once the scripted responses run out.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

#[async_trait]
impl ChatClient for FakeClient {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _max_tokens: Option<u32>,
    ) -> anyhow::Result<LlmResponse> {
        let mut scripted = self.responses.lock().unwrap();
        let text = if scripted.is_empty() {
            self.fallback.clone()
        } else {
            scripted.remove(0)
        };

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
