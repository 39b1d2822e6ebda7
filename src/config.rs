use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

pub const DEFAULT_WS_URI: &str = "wss://ws-api.oneme.ru/websocket";
pub const DEFAULT_WS_ORIGIN: &str = "https://web.max.ru";
pub const DEFAULT_RECONNECT_DELAY_SECONDS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("set MAX_TOKEN in the environment or .env")]
    MissingToken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub token: String,
    pub ws_uri: String,
    pub ws_origin: String,
    pub reconnect_delay_seconds: u64,
    pub llm: LlmConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8317/v1".to_string(),
            api_key: "my-secret-key".to_string(),
            model: "gemini-3-flash-preview".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token: String::new(),
            ws_uri: DEFAULT_WS_URI.to_string(),
            ws_origin: DEFAULT_WS_ORIGIN.to_string(),
            reconnect_delay_seconds: DEFAULT_RECONNECT_DELAY_SECONDS,
            llm: LlmConfig::default(),
        }
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Builds the runtime configuration from the process environment.
/// The bearer token is the only required value; everything else has a
/// working default.
pub fn load_config() -> Result<Config, ConfigError> {
    let mut cfg = Config::default();

    cfg.token = env_nonempty("MAX_TOKEN").ok_or(ConfigError::MissingToken)?;

    if let Some(uri) = env_nonempty("MAX_WS_URI") {
        cfg.ws_uri = uri;
    }

    if let Some(origin) = env_nonempty("MAX_WS_ORIGIN") {
        cfg.ws_origin = origin;
    }

    if let Some(delay) = env_nonempty("MAX_RECONNECT_DELAY") {
        if let Ok(seconds) = delay.parse::<u64>() {
            cfg.reconnect_delay_seconds = seconds;
        }
    }

    if let Some(url) = env_nonempty("LLM_API_URL") {
        cfg.llm.api_url = url;
    }

    if let Some(key) = env_nonempty("LLM_API_KEY") {
        cfg.llm.api_key = key;
    }

    if let Some(model) = env_nonempty("LLM_MODEL") {
        cfg.llm.model = model;
    }

    Ok(cfg)
}
