pub mod bridge;
pub mod config;
pub mod dispatch;
pub mod llm;
pub mod proto;
pub mod send;
pub mod types;

pub use config::{load_config, Config, ConfigError};
pub use llm::LlmClient;
