use max_bridge::{bridge, load_config, LlmClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    let llm = LlmClient::new(reqwest::Client::new(), config.llm.clone());

    tokio::select! {
        _ = bridge::run(config, llm) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("stop");
        }
    }

    Ok(())
}
