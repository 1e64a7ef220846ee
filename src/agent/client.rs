//! HTTP transport between the agent loop and the request listener.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// The agent loop's view of the listener. Tests swap in a recording fake.
#[async_trait]
pub trait ToolTransport: Send + Sync {
    /// GET a listener path such as `/ping` or `/state`.
    async fn get(&self, path: &str) -> anyhow::Result<Value>;

    /// POST an internal tool name and its args to `/tool`.
    async fn post_tool(&self, tool: &str, args: &Value) -> anyhow::Result<Value>;
}

/// Real transport speaking to a running bridge over loopback HTTP.
pub struct HttpBridgeClient {
    http: Client,
    base_url: String,
    token: String,
}

impl HttpBridgeClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> anyhow::Result<Self> {
        // Some host operations take a while; the bridge's own 30s bound is
        // what actually limits a single task.
        let http = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .context("failed to build http client")?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    async fn into_json(response: reqwest::Response) -> anyhow::Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("bridge request failed: {}: {}", status.as_u16(), text);
        }
        response
            .json()
            .await
            .context("bridge returned invalid json")
    }
}

#[async_trait]
impl ToolTransport for HttpBridgeClient {
    async fn get(&self, path: &str) -> anyhow::Result<Value> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .header("X-Token", &self.token)
            .send()
            .await
            .with_context(|| format!("GET {} failed", path))?;
        Self::into_json(response).await
    }

    async fn post_tool(&self, tool: &str, args: &Value) -> anyhow::Result<Value> {
        let response = self
            .http
            .post(format!("{}/tool", self.base_url))
            .header("X-Token", &self.token)
            .json(&serde_json::json!({"tool": tool, "args": args}))
            .send()
            .await
            .with_context(|| format!("POST /tool ({}) failed", tool))?;
        Self::into_json(response).await
    }
}
