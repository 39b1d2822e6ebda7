use max_bridge::dispatch::{parse_frame, resolve_command, Command};
use serde_json::json;

#[test]
fn test_ping_exact() {
    assert_eq!(resolve_command("!ping"), Some(Command::Ping));
}

#[test]
fn test_ping_any_case_with_whitespace() {
    for text in ["!PING", " !ping ", "\t!Ping\n", "!pInG"] {
        assert_eq!(resolve_command(text), Some(Command::Ping), "text: {text:?}");
    }
}

#[test]
fn test_echo_strips_six_char_prefix() {
    assert_eq!(
        resolve_command("!echo hello world"),
        Some(Command::Echo("hello world".to_string()))
    );
}

#[test]
fn test_echo_original_case_preserved() {
    assert_eq!(
        resolve_command("!ECHO Mixed Case"),
        Some(Command::Echo("Mixed Case".to_string()))
    );
}

#[test]
fn test_echo_without_space_is_prompt() {
    assert_eq!(
        resolve_command("!echoing"),
        Some(Command::Prompt("!echoing".to_string()))
    );
}

#[test]
fn test_plain_text_is_prompt() {
    assert_eq!(
        resolve_command("tell me a joke"),
        Some(Command::Prompt("tell me a joke".to_string()))
    );
}

#[test]
fn test_unknown_bang_command_is_prompt() {
    assert_eq!(
        resolve_command("!weather"),
        Some(Command::Prompt("!weather".to_string()))
    );
}

#[test]
fn test_empty_text_no_command() {
    assert_eq!(resolve_command(""), None);
}

#[test]
fn test_direct_message_chat_id_from_sender() {
    let data = json!({
        "opcode": 64,
        "payload": {"message": {"text": "!ping", "sender": 123}}
    });
    let msg = parse_frame(&data).unwrap();
    assert_eq!(msg.chat_id, 123);
    assert_eq!(msg.text, "!ping");
}

#[test]
fn test_channel_message_chat_id_from_payload() {
    let data = json!({
        "opcode": 128,
        "payload": {"chatId": 55, "message": {"text": "!echo hello world", "sender": 999}}
    });
    let msg = parse_frame(&data).unwrap();
    // Channel frames take the chat id from the payload, not the sender.
    assert_eq!(msg.chat_id, 55);
}

#[test]
fn test_direct_message_ignores_payload_chat_id() {
    let data = json!({
        "opcode": 64,
        "payload": {"chatId": 55, "message": {"text": "hi", "sender": 123}}
    });
    let msg = parse_frame(&data).unwrap();
    assert_eq!(msg.chat_id, 123);
}

#[test]
fn test_unrecognized_opcode_dropped() {
    let data = json!({
        "opcode": 19,
        "payload": {"message": {"text": "hi", "sender": 1}}
    });
    assert!(parse_frame(&data).is_none());
}

#[test]
fn test_empty_text_and_attachments_dropped() {
    let data = json!({
        "opcode": 64,
        "payload": {"message": {"text": "", "sender": 1, "attaches": []}}
    });
    assert!(parse_frame(&data).is_none());
}

#[test]
fn test_missing_chat_id_dropped() {
    let data = json!({
        "opcode": 128,
        "payload": {"message": {"text": "hi"}}
    });
    assert!(parse_frame(&data).is_none());
}

#[test]
fn test_attachment_name_defaults() {
    let frame = |attach: serde_json::Value| {
        json!({
            "opcode": 64,
            "payload": {"message": {"text": "", "sender": 5, "attaches": [attach]}}
        })
    };

    let unnamed = parse_frame(&frame(json!({"_type": "PHOTO", "name": "unnamed"}))).unwrap();
    assert_eq!(unnamed.attachments[0].name, "picture");
    assert_eq!(unnamed.attachments[0].file_id, "no-id");

    let missing = parse_frame(&frame(json!({"_type": "PHOTO"}))).unwrap();
    assert_eq!(missing.attachments[0].name, "picture");

    let named = parse_frame(&frame(json!({"_type": "PHOTO", "name": "cat.png", "fileId": "abc"})))
        .unwrap();
    assert_eq!(named.attachments[0].name, "cat.png");
    assert_eq!(named.attachments[0].file_id, "abc");
}

#[test]
fn test_non_photo_attachment_kept_in_message() {
    let data = json!({
        "opcode": 64,
        "payload": {"message": {
            "text": "",
            "sender": 5,
            "attaches": [{"_type": "STICKER", "name": "wave"}]
        }}
    });
    let msg = parse_frame(&data).unwrap();
    assert_eq!(msg.attachments.len(), 1);
    assert!(!msg.attachments[0].is_photo());
}
