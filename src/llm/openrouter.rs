//! OpenAI-compatible chat completions via OpenRouter.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{ChatMessage, LlmClient};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Non-streaming chat completion client.
pub struct OpenRouterClient {
    http: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::with_base_url(api_key, model, OPENROUTER_BASE_URL.to_string())
    }

    /// Point at a different OpenAI-compatible endpoint.
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }
}

#[async_trait]
impl LlmClient for OpenRouterClient {
    async fn complete(&self, conversation: &[ChatMessage]) -> anyhow::Result<String> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": conversation,
            "stream": false,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("chat completion request failed")?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("chat completion error: {}: {}", status.as_u16(), text);
        }

        let data: Value = response
            .json()
            .await
            .context("failed to parse chat completion response")?;

        let content = data["choices"]
            .get(0)
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| anyhow::anyhow!("no completion choice returned"))?;

        Ok(content.trim().to_string())
    }
}
