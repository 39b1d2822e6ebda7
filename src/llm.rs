use crate::config::LlmConfig;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::error;

/// Single-turn client for an OpenAI-compatible chat-completions endpoint.
/// No history, no system prompt, no streaming.
#[derive(Debug, Clone)]
pub struct LlmClient {
    http: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(http: Client, config: LlmConfig) -> Self {
        Self { http, config }
    }

    /// Asks the completion service for a reply to a single prompt. Every
    /// failure mode (transport, non-2xx status, malformed body) collapses to
    /// `None` after logging, so callers treat it as "no answer".
    pub async fn complete(&self, prompt: &str) -> Option<String> {
        match self.try_complete(prompt).await {
            Ok(answer) => Some(answer),
            Err(err) => {
                error!("[ERROR] LLM: {err:#}");
                None
            }
        }
    }

    async fn try_complete(&self, prompt: &str) -> anyhow::Result<String> {
        let url = format!("{}/chat/completions", self.config.api_url.trim_end_matches('/'));
        let payload = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}]
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("completion request failed: {status} {body}"));
        }

        let value: Value = resp.json().await?;
        let content = value
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("message"))
            .and_then(|v| v.get("content"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| anyhow::anyhow!("completion response missing content"))?;

        Ok(content.to_string())
    }
}
