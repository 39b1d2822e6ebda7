use serde::{Deserialize, Serialize};

pub const PHOTO_ATTACHMENT: &str = "PHOTO";
pub const UNNAMED_SENTINEL: &str = "unnamed";
pub const DEFAULT_ATTACHMENT_NAME: &str = "picture";
pub const DEFAULT_FILE_ID: &str = "no-id";

/// One attachment from an inbound message. Defaults are applied when the
/// descriptor is parsed, so downstream code never deals with missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: String,
    pub name: String,
    pub file_id: String,
}

impl Attachment {
    pub fn is_photo(&self) -> bool {
        self.kind == PHOTO_ATTACHMENT
    }
}

/// The view of an inbound frame the dispatcher works with. Lives only for
/// the duration of one dispatch task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub chat_id: i64,
    pub text: String,
    pub attachments: Vec<Attachment>,
}

impl ChatMessage {
    /// A message with nothing in it is dropped rather than dispatched.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.attachments.is_empty()
    }
}
