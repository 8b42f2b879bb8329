//! Raw update payloads → [`Update`].
//!
//! Group chat ids start with `g`; everything else is treated as a private
//! chat. A `new_message` carrying `aux_data.button_id` is a button press,
//! not a text message, and maps to a callback query.

use flyzex_core::{CallbackQuery, Chat, ChatKind, Message, Update, User};

use crate::wire::{RawInlineMessage, RawMessage, RawUpdate};

fn chat_kind(chat_id: &str) -> ChatKind {
    if chat_id.starts_with('g') {
        ChatKind::Group
    } else {
        ChatKind::Private
    }
}

fn chat_for(chat_id: String) -> Chat {
    let kind = chat_kind(&chat_id);
    Chat {
        id: chat_id,
        kind,
        title: None,
    }
}

fn sender(sender_id: Option<String>) -> Option<User> {
    sender_id.map(|id| User {
        id,
        ..User::default()
    })
}

fn from_inline(inline: &RawInlineMessage) -> Option<Update> {
    let chat_id = inline.chat_id.clone()?;
    let message_id = inline.message_id.clone()?;
    let user = sender(inline.sender_id.clone());
    let message = Message {
        id: message_id.clone(),
        chat: chat_for(chat_id),
        from: user.clone(),
        text: inline.text.clone(),
        caption: None,
        reply_to: None,
    };
    let data = inline
        .aux_data
        .as_ref()
        .and_then(|aux| aux.button_id.clone())
        .unwrap_or_default();
    Some(Update::CallbackQuery(CallbackQuery {
        id: message_id,
        from: user,
        data,
        message: Some(message),
    }))
}

fn from_new_message(chat_id: String, raw: &RawMessage) -> Option<Update> {
    let message_id = raw.message_id.clone()?;
    let user = sender(raw.sender_id.clone());
    let message = Message {
        id: message_id.clone(),
        chat: chat_for(chat_id),
        from: user.clone(),
        text: raw.text.clone(),
        caption: None,
        reply_to: None,
    };
    let button_id = raw.aux_data.as_ref().and_then(|aux| aux.button_id.clone());
    if let Some(data) = button_id {
        return Some(Update::CallbackQuery(CallbackQuery {
            id: message_id,
            from: user,
            data,
            message: Some(message),
        }));
    }
    Some(Update::Message(message))
}

/// Parses one raw `getUpdates` entry. Returns `None` for payloads the bot
/// does not consume (service notifications, removed messages, …).
pub fn parse_update(raw: &RawUpdate) -> Option<Update> {
    if let Some(inline) = &raw.inline_message {
        return from_inline(inline);
    }
    let body = raw.update.as_deref().unwrap_or(raw);
    let chat_id = body.chat_id.clone().or_else(|| raw.chat_id.clone())?;
    let new_message = body.new_message.as_ref()?;
    from_new_message(chat_id, new_message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(value: serde_json::Value) -> Option<Update> {
        let raw: RawUpdate = serde_json::from_value(value).unwrap();
        parse_update(&raw)
    }

    #[test]
    fn new_message_in_group_chat() {
        let update = parse(serde_json::json!({
            "type": "NewMessage",
            "chat_id": "g0AAAB",
            "new_message": {"message_id": "55", "sender_id": "u77", "text": "hello"}
        }))
        .unwrap();
        let message = update.message().unwrap();
        assert!(message.chat.is_group());
        assert_eq!(message.text.as_deref(), Some("hello"));
        assert_eq!(message.from.as_ref().unwrap().id, "u77");
    }

    #[test]
    fn button_press_becomes_callback_query() {
        let update = parse(serde_json::json!({
            "chat_id": "u77",
            "new_message": {
                "message_id": "56",
                "sender_id": "u77",
                "aux_data": {"button_id": "apply_for_guild"}
            }
        }))
        .unwrap();
        let query = update.callback_query().unwrap();
        assert_eq!(query.data, "apply_for_guild");
        assert!(query.message.as_ref().unwrap().chat.is_private());
    }

    #[test]
    fn nested_update_body_is_unwrapped() {
        let update = parse(serde_json::json!({
            "update": {
                "chat_id": "u9",
                "new_message": {"message_id": "1", "sender_id": "u9", "text": "hi"}
            }
        }))
        .unwrap();
        assert_eq!(update.effective_chat().unwrap().id, "u9");
    }

    #[test]
    fn inline_message_maps_to_callback() {
        let update = parse(serde_json::json!({
            "inline_message": {
                "chat_id": "u4",
                "message_id": "m3",
                "sender_id": "u4",
                "aux_data": {"button_id": "language_menu"}
            }
        }))
        .unwrap();
        assert_eq!(update.callback_query().unwrap().data, "language_menu");
    }

    #[test]
    fn unconsumed_payload_is_skipped() {
        assert!(parse(serde_json::json!({"type": "RemovedMessage", "chat_id": "u4"})).is_none());
    }
}
