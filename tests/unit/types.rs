use max_bridge::types::{Attachment, ChatMessage};

#[test]
fn test_photo_detection() {
    let photo = Attachment {
        kind: "PHOTO".to_string(),
        name: "picture".to_string(),
        file_id: "no-id".to_string(),
    };
    let video = Attachment {
        kind: "VIDEO".to_string(),
        name: "clip".to_string(),
        file_id: "v1".to_string(),
    };
    assert!(photo.is_photo());
    assert!(!video.is_photo());
}

#[test]
fn test_empty_message() {
    let msg = ChatMessage {
        chat_id: 7,
        text: String::new(),
        attachments: vec![],
    };
    assert!(msg.is_empty());
}

#[test]
fn test_text_only_message() {
    let msg = ChatMessage {
        chat_id: 7,
        text: "hello".to_string(),
        attachments: vec![],
    };
    assert!(!msg.is_empty());
}

#[test]
fn test_attachment_serde() {
    let att = Attachment {
        kind: "PHOTO".to_string(),
        name: "sunset.jpg".to_string(),
        file_id: "f123".to_string(),
    };
    let json = serde_json::to_string(&att).unwrap();
    let parsed: Attachment = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, att);
}
