use crate::llm::LlmClient;
use crate::proto::{OPCODE_CHANNEL_MESSAGE, OPCODE_MESSAGE};
use crate::send::Outbound;
use crate::types::{
    Attachment, ChatMessage, DEFAULT_ATTACHMENT_NAME, DEFAULT_FILE_ID, UNNAMED_SENTINEL,
};
use serde_json::Value;
use tracing::{error, info};

const ECHO_PREFIX: &str = "!echo ";

/// What the dispatcher decided to do with a message's text. Variants are
/// checked in this order and are mutually exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ping,
    Echo(String),
    Prompt(String),
}

/// Resolves the command for a message. Matching is case-insensitive against
/// the trimmed text, but echo and prompt payloads keep the original casing.
pub fn resolve_command(text: &str) -> Option<Command> {
    let clean = text.trim().to_lowercase();

    if clean == "!ping" {
        return Some(Command::Ping);
    }
    if clean.starts_with(ECHO_PREFIX) {
        let echoed = text.get(ECHO_PREFIX.len()..).unwrap_or("");
        return Some(Command::Echo(echoed.to_string()));
    }
    if !text.is_empty() {
        return Some(Command::Prompt(text.to_string()));
    }
    None
}

fn parse_attachment(value: &Value) -> Attachment {
    let kind = value
        .get("_type")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let name = match value.get("name").and_then(|v| v.as_str()) {
        Some(name) if !name.is_empty() && name != UNNAMED_SENTINEL => name.to_string(),
        _ => DEFAULT_ATTACHMENT_NAME.to_string(),
    };

    let file_id = match value.get("fileId") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => DEFAULT_FILE_ID.to_string(),
    };

    Attachment { kind, name, file_id }
}

/// Extracts a `ChatMessage` from a decoded frame. Direct messages (opcode 64)
/// carry the chat id at `payload.message.sender`; channel messages (opcode
/// 128) carry it at `payload.chatId`. Returns `None` for any other opcode,
/// for a missing or zero chat id, and for a message with no text and no
/// attachments.
pub fn parse_frame(data: &Value) -> Option<ChatMessage> {
    let opcode = data.get("opcode")?.as_i64()?;
    let payload = data.get("payload")?;
    let message = payload.get("message")?;

    let chat_id = match opcode {
        OPCODE_MESSAGE => message.get("sender").and_then(|v| v.as_i64()),
        OPCODE_CHANNEL_MESSAGE => payload.get("chatId").and_then(|v| v.as_i64()),
        _ => return None,
    };
    let chat_id = chat_id.filter(|id| *id != 0)?;

    let text = message
        .get("text")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let attachments = message
        .get("attaches")
        .and_then(|v| v.as_array())
        .map(|items| items.iter().map(parse_attachment).collect())
        .unwrap_or_default();

    let msg = ChatMessage {
        chat_id,
        text,
        attachments,
    };
    if msg.is_empty() {
        return None;
    }
    Some(msg)
}

fn log_photos(msg: &ChatMessage) {
    for att in msg.attachments.iter().filter(|a| a.is_photo()) {
        info!("[IMAGE] {}: {} (ID: {})", msg.chat_id, att.name, att.file_id);
    }
}

/// Handles one inbound frame end to end. Runs as its own spawned task; any
/// failure is logged here and never reaches the read loop or sibling tasks.
pub async fn handle_frame(outbound: Outbound, llm: LlmClient, data: Value) {
    if let Err(err) = handle_inner(&outbound, &llm, &data).await {
        error!("[ERROR] message failed: {err:#}");
    }
}

async fn handle_inner(outbound: &Outbound, llm: &LlmClient, data: &Value) -> anyhow::Result<()> {
    let Some(msg) = parse_frame(data) else {
        return Ok(());
    };

    if !msg.text.is_empty() {
        info!("[RECV] Chat {}: {}", msg.chat_id, msg.text);
    }
    log_photos(&msg);

    match resolve_command(&msg.text) {
        Some(Command::Ping) => outbound.send_text(msg.chat_id, "pong").await,
        Some(Command::Echo(echoed)) => outbound.send_text(msg.chat_id, &echoed).await,
        Some(Command::Prompt(prompt)) => {
            let preview: String = prompt.chars().take(50).collect();
            info!("[LLM] Requesting response for: {preview}...");
            if let Some(answer) = llm.complete(&prompt).await {
                outbound.send_text(msg.chat_id, &answer).await;
            }
        }
        None => {}
    }

    Ok(())
}
