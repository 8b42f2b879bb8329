//! Wire types for the Rubika Bot API: inline keypads and raw update payloads.

use flyzex_core::{ButtonAction, InlineKeyboard};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Inline keypad as the Bot API expects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keypad {
    pub rows: Vec<KeypadRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadRow {
    pub buttons: Vec<KeypadButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeypadButton {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub button_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&InlineKeyboard> for Keypad {
    fn from(keyboard: &InlineKeyboard) -> Self {
        let rows = keyboard
            .rows
            .iter()
            .map(|row| KeypadRow {
                buttons: row
                    .iter()
                    .map(|button| match &button.action {
                        ButtonAction::Callback(data) => KeypadButton {
                            id: data.clone(),
                            kind: "Simple".to_string(),
                            button_text: button.text.clone(),
                            url: None,
                        },
                        ButtonAction::Url(url) => KeypadButton {
                            id: button.text.clone(),
                            kind: "Url".to_string(),
                            button_text: button.text.clone(),
                            url: Some(url.clone()),
                        },
                    })
                    .collect(),
            })
            .collect();
        Keypad { rows }
    }
}

/// Ids arrive as either strings or numbers; normalize to strings.
fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }))
}

/// Auxiliary payload attached to button presses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuxData {
    pub button_id: Option<String>,
}

/// `new_message` body inside an update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default, deserialize_with = "de_id")]
    pub message_id: Option<String>,
    #[serde(default, deserialize_with = "de_id")]
    pub sender_id: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub aux_data: Option<AuxData>,
}

/// Inline-message payload (button pressed on an inline keypad).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawInlineMessage {
    #[serde(default, deserialize_with = "de_id")]
    pub chat_id: Option<String>,
    #[serde(default, deserialize_with = "de_id")]
    pub message_id: Option<String>,
    #[serde(default, deserialize_with = "de_id")]
    pub sender_id: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub aux_data: Option<AuxData>,
}

/// A single entry from `getUpdates`. Some deployments nest the body under
/// `update`, others inline it; both shapes are accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawUpdate {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "de_id")]
    pub chat_id: Option<String>,
    pub new_message: Option<RawMessage>,
    pub inline_message: Option<RawInlineMessage>,
    pub update: Option<Box<RawUpdate>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyzex_core::Button;

    #[test]
    fn keypad_from_keyboard_maps_button_kinds() {
        let keyboard = InlineKeyboard::default()
            .row(vec![Button::callback("Apply", "apply_for_guild")])
            .row(vec![Button::url("Open", "https://example.com/panel")]);

        let keypad = Keypad::from(&keyboard);
        let json = serde_json::to_value(&keypad).unwrap();

        assert_eq!(json["rows"][0]["buttons"][0]["type"], "Simple");
        assert_eq!(json["rows"][0]["buttons"][0]["id"], "apply_for_guild");
        assert_eq!(json["rows"][1]["buttons"][0]["type"], "Url");
        assert_eq!(json["rows"][1]["buttons"][0]["url"], "https://example.com/panel");
        assert!(json["rows"][0]["buttons"][0].get("url").is_none());
    }

    #[test]
    fn raw_update_accepts_numeric_ids() {
        let raw: RawUpdate = serde_json::from_value(serde_json::json!({
            "type": "NewMessage",
            "chat_id": 1234,
            "new_message": {"message_id": 9, "sender_id": "u1", "text": "hi"}
        }))
        .unwrap();
        assert_eq!(raw.chat_id.as_deref(), Some("1234"));
        assert_eq!(
            raw.new_message.unwrap().message_id.as_deref(),
            Some("9")
        );
    }
}
