use crate::config::Config;
use crate::dispatch;
use crate::llm::LlmClient;
use crate::proto::{self, Sequence, OPCODE_CHANNEL_MESSAGE, OPCODE_MESSAGE};
use crate::send::Outbound;
use futures::StreamExt;
use serde_json::Value;
use tokio::time::{sleep, Duration};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN, USER_AGENT};
use tokio_tungstenite::tungstenite::Message;
use tracing::{error, info};

const USER_AGENT_VALUE: &str = "Mozilla/5.0";

/// Root loop of the bridge: connect, handshake, read until the session dies,
/// then wait the fixed delay and start over. Runs for the life of the
/// process; no failure in here is fatal.
pub async fn run(config: Config, llm: LlmClient) {
    let seq = Sequence::new();
    let delay = Duration::from_secs(config.reconnect_delay_seconds);

    loop {
        info!("connecting to {}...", config.ws_uri);
        match run_session(&config, &llm, &seq).await {
            Ok(()) => info!(
                "connection closed. retry in {}s...",
                config.reconnect_delay_seconds
            ),
            Err(err) => error!(
                "[ERROR] {err:#}. retry in {}s...",
                config.reconnect_delay_seconds
            ),
        }
        sleep(delay).await;
    }
}

/// One connection's lifetime: transport connect, the two handshake frames,
/// then the read loop. `Ok` means the server closed the session; `Err` means
/// a transport or handshake failure. Either way the caller reconnects.
async fn run_session(config: &Config, llm: &LlmClient, seq: &Sequence) -> anyhow::Result<()> {
    let mut request = config.ws_uri.as_str().into_client_request()?;
    let headers = request.headers_mut();
    headers.insert(ORIGIN, HeaderValue::from_str(&config.ws_origin)?);
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    let (socket, _) = connect_async(request).await?;
    let (sink, mut stream) = socket.split();
    let outbound = Outbound::new(sink, seq.clone());

    outbound.send_frame(&proto::hello_frame(seq.next())).await?;

    // The first server frame is discarded without validation; the original
    // client proceeds unconditionally and so do we.
    match stream.next().await {
        Some(Ok(_)) => {}
        Some(Err(err)) => return Err(err.into()),
        None => return Ok(()),
    }

    outbound
        .send_frame(&proto::auth_frame(seq.next(), &config.token))
        .await?;

    info!("started");

    while let Some(frame) = stream.next().await {
        match frame? {
            Message::Text(text) => {
                let Ok(data) = serde_json::from_str::<Value>(&text) else {
                    continue;
                };
                if !data.is_object() {
                    continue;
                }
                let opcode = data.get("opcode").and_then(|v| v.as_i64());
                if matches!(opcode, Some(OPCODE_MESSAGE) | Some(OPCODE_CHANNEL_MESSAGE)) {
                    // Fire-and-forget: the read loop never waits on a handler.
                    tokio::spawn(dispatch::handle_frame(
                        outbound.clone(),
                        llm.clone(),
                        data,
                    ));
                }
            }
            Message::Ping(payload) => outbound.pong(payload).await?,
            Message::Close(_) => return Ok(()),
            _ => {}
        }
    }

    Ok(())
}
