//! Minimal async client for the Rubika Bot API.
//!
//! Requests are serialized through a mutex: the Bot API misbehaves under
//! concurrent calls on a single token, and the original service had the same
//! single-flight constraint.

use std::time::Duration;

use async_trait::async_trait;
use flyzex_core::{BotApi, CoreError, InlineKeyboard};
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::error::{Result, RubikaError};
use crate::wire::{Keypad, RawUpdate};

const BASE_URL: &str = "https://botapi.rubika.ir/v3";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

pub struct RubikaApi {
    base_url: String,
    http: reqwest::Client,
    lock: Mutex<()>,
}

impl RubikaApi {
    pub fn new(token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: format!("{BASE_URL}/{token}"),
            http,
            lock: Mutex::new(()),
        })
    }

    /// Client with a custom base URL (tests point this at a local server).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            http,
            lock: Mutex::new(()),
        })
    }

    async fn request(&self, method: &str, payload: Value) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, method);
        let response = {
            let _guard = self.lock.lock().await;
            self.http.post(&url).json(&payload).send().await?
        };
        let response = response.error_for_status()?;
        let data: Value = response.json().await?;
        if !data.is_object() {
            return Err(RubikaError::UnexpectedPayload {
                method: method.to_string(),
            });
        }
        debug!(method, "rubika request ok");
        Ok(data)
    }

    pub async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        inline_keypad: Option<&Keypad>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Option<String>> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": text,
            "disable_notification": false,
        });
        if let Some(keypad) = inline_keypad {
            payload["inline_keypad"] = serde_json::to_value(keypad).unwrap_or(Value::Null);
        }
        if let Some(reply_to) = reply_to_message_id {
            payload["reply_to_message_id"] = json!(reply_to);
        }
        let data = self.request("sendMessage", payload).await?;
        Ok(id_field(&data, "message_id"))
    }

    pub async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
        inline_keypad: Option<&Keypad>,
    ) -> Result<()> {
        let mut payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
            "text": text,
        });
        if let Some(keypad) = inline_keypad {
            payload["inline_keypad"] = serde_json::to_value(keypad).unwrap_or(Value::Null);
        }
        self.request("editMessageText", payload).await?;
        Ok(())
    }

    pub async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<()> {
        let payload = json!({
            "chat_id": chat_id,
            "message_id": message_id,
        });
        self.request("deleteMessage", payload).await?;
        Ok(())
    }

    /// Fetches pending updates; returns them with the next poll offset.
    pub async fn get_updates(
        &self,
        offset_id: Option<&str>,
        limit: u32,
    ) -> Result<(Vec<RawUpdate>, Option<String>)> {
        let mut payload = json!({ "limit": limit });
        if let Some(offset) = offset_id {
            payload["offset_id"] = json!(offset);
        }
        let data = self.request("getUpdates", payload).await?;
        let updates = match data.get("updates") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect(),
            _ => Vec::new(),
        };
        let next_offset = id_field(&data, "next_offset_id");
        Ok((updates, next_offset))
    }
}

fn id_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

#[async_trait]
impl BotApi for RubikaApi {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
        reply_to_message_id: Option<&str>,
    ) -> flyzex_core::Result<Option<String>> {
        let keypad = keyboard.as_ref().map(Keypad::from);
        RubikaApi::send_message(self, chat_id, text, keypad.as_ref(), reply_to_message_id)
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> flyzex_core::Result<()> {
        let keypad = keyboard.as_ref().map(Keypad::from);
        RubikaApi::edit_message_text(self, chat_id, message_id, text, keypad.as_ref())
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> flyzex_core::Result<()> {
        RubikaApi::delete_message(self, chat_id, message_id)
            .await
            .map_err(|e| CoreError::Transport(e.to_string()))
    }

    async fn ban_chat_member(&self, _chat_id: &str, user_id: &str) -> flyzex_core::Result<()> {
        warn!(%user_id, "ban_chat_member not supported by the Rubika Bot API; ignoring");
        Ok(())
    }

    async fn restrict_chat_member(&self, _chat_id: &str, user_id: &str) -> flyzex_core::Result<()> {
        warn!(%user_id, "restrict_chat_member not supported by the Rubika Bot API; ignoring");
        Ok(())
    }
}
