use crate::proto::{self, Sequence};
use futures::stream::SplitSink;
use futures::SinkExt;
use serde_json::Value;
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{error, info};

pub type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Write half of the session, shared by the handshake and every dispatch
/// task. The mutex serializes frame writes; the sequence counter rides along
/// so every sender stamps frames from the same series.
#[derive(Clone)]
pub struct Outbound {
    sink: Arc<Mutex<WsSink>>,
    seq: Sequence,
}

impl Outbound {
    pub fn new(sink: WsSink, seq: Sequence) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            seq,
        }
    }

    pub fn next_seq(&self) -> i64 {
        self.seq.next()
    }

    /// Transmits one raw frame. Used for the handshake, where a failure must
    /// tear the session down and trigger a reconnect.
    pub async fn send_frame(&self, frame: &Value) -> anyhow::Result<()> {
        let text = frame.to_string();
        let mut sink = self.sink.lock().await;
        sink.send(Message::Text(text)).await?;
        Ok(())
    }

    /// Sends a chat reply. Fire-and-forget: a transmission failure is logged
    /// and swallowed, never retried, never surfaced to the caller.
    pub async fn send_text(&self, chat_id: i64, text: &str) {
        let frame = proto::reply_frame(self.seq.next(), chat_id, text);
        match self.send_frame(&frame).await {
            Ok(()) => info!("[SEND] Chat {chat_id}: {text}"),
            Err(err) => error!("[ERROR] message failed: {err:#}"),
        }
    }

    pub async fn pong(&self, payload: Vec<u8>) -> anyhow::Result<()> {
        let mut sink = self.sink.lock().await;
        sink.send(Message::Pong(payload)).await?;
        Ok(())
    }
}
