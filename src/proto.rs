use chrono::Utc;
use rand::Rng;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

pub const PROTOCOL_VER: i64 = 11;
pub const CMD_REQUEST: i64 = 0;

pub const OPCODE_HELLO: i64 = 6;
pub const OPCODE_AUTH: i64 = 19;
pub const OPCODE_MESSAGE: i64 = 64;
pub const OPCODE_CHANNEL_MESSAGE: i64 = 128;

pub const SEQ_BASE: i64 = 100;

pub const DEVICE_ID: &str = "selfbot_client";

/// Process-wide request sequence. Handshake frames and reply frames all draw
/// from the same counter; the atomic keeps values unique when dispatch tasks
/// run on parallel worker threads.
#[derive(Debug, Clone)]
pub struct Sequence(Arc<AtomicI64>);

impl Sequence {
    pub fn new() -> Self {
        Self(Arc::new(AtomicI64::new(SEQ_BASE)))
    }

    pub fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed) + 1
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

/// Client-generated correlation id for an outbound message: current unix
/// millis negated, with a random offset subtracted. Unique enough within one
/// session, which is all the server needs it for.
pub fn next_cid() -> i64 {
    let millis = Utc::now().timestamp_millis();
    let offset = rand::thread_rng().gen_range(100..=999);
    -millis - offset
}

/// First handshake frame: identifies this client as a web session.
pub fn hello_frame(seq: i64) -> Value {
    json!({
        "ver": PROTOCOL_VER,
        "cmd": CMD_REQUEST,
        "seq": seq,
        "opcode": OPCODE_HELLO,
        "payload": {
            "userAgent": {
                "deviceType": "WEB",
                "locale": "ru",
                "osVersion": "Linux",
                "deviceName": "Firefox",
                "appVersion": "25.7.11"
            },
            "deviceId": DEVICE_ID
        }
    })
}

/// Second handshake frame: authenticates the session with the bearer token.
/// Sync cursors are zeroed; the bridge never catches up on history.
pub fn auth_frame(seq: i64, token: &str) -> Value {
    json!({
        "ver": PROTOCOL_VER,
        "cmd": CMD_REQUEST,
        "seq": seq,
        "opcode": OPCODE_AUTH,
        "payload": {
            "token": token,
            "chatsSync": 0,
            "contactsSync": 0
        }
    })
}

/// Outbound chat reply.
pub fn reply_frame(seq: i64, chat_id: i64, text: &str) -> Value {
    json!({
        "ver": PROTOCOL_VER,
        "cmd": CMD_REQUEST,
        "seq": seq,
        "opcode": OPCODE_MESSAGE,
        "payload": {
            "chatId": chat_id,
            "message": {
                "text": text,
                "cid": next_cid(),
                "elements": [],
                "attaches": []
            },
            "notify": true
        }
    })
}
