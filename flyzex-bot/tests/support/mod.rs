//! Shared test doubles: a recording [`BotApi`] and update builders.
//! Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use flyzex_core::{
    BotApi, CallbackQuery, Chat, InlineKeyboard, Message, Update, User,
};

#[derive(Debug, Clone)]
pub struct Sent {
    pub chat_id: String,
    pub text: String,
    pub keyboard: Option<InlineKeyboard>,
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Edited {
    pub chat_id: String,
    pub message_id: String,
    pub text: String,
}

/// Records every outbound call instead of talking to a transport.
#[derive(Default)]
pub struct RecordingApi {
    pub sent: Mutex<Vec<Sent>>,
    pub edited: Mutex<Vec<Edited>>,
    pub deleted: Mutex<Vec<(String, String)>>,
    next_id: AtomicU64,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|s| s.text.clone()).collect()
    }

    pub fn sent_to(&self, chat_id: &str) -> Vec<Sent> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.chat_id == chat_id)
            .cloned()
            .collect()
    }

    pub fn edited_texts(&self) -> Vec<String> {
        self.edited.lock().unwrap().iter().map(|e| e.text.clone()).collect()
    }
}

#[async_trait]
impl BotApi for RecordingApi {
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
        reply_to_message_id: Option<&str>,
    ) -> flyzex_core::Result<Option<String>> {
        self.sent.lock().unwrap().push(Sent {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            keyboard,
            reply_to: reply_to_message_id.map(str::to_string),
        });
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        Ok(Some(format!("m{id}")))
    }

    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
        _keyboard: Option<InlineKeyboard>,
    ) -> flyzex_core::Result<()> {
        self.edited.lock().unwrap().push(Edited {
            chat_id: chat_id.to_string(),
            message_id: message_id.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: &str, message_id: &str) -> flyzex_core::Result<()> {
        self.deleted
            .lock()
            .unwrap()
            .push((chat_id.to_string(), message_id.to_string()));
        Ok(())
    }

    async fn ban_chat_member(&self, _chat_id: &str, _user_id: &str) -> flyzex_core::Result<()> {
        Ok(())
    }

    async fn restrict_chat_member(&self, _chat_id: &str, _user_id: &str) -> flyzex_core::Result<()> {
        Ok(())
    }
}

pub fn user(id: &str, language: &str) -> User {
    User {
        id: id.to_string(),
        username: None,
        full_name: Some(format!("User {id}")),
        language_code: Some(language.to_string()),
        is_bot: false,
    }
}

pub fn named_user(id: &str, full_name: &str, username: Option<&str>, language: &str) -> User {
    User {
        id: id.to_string(),
        username: username.map(str::to_string),
        full_name: Some(full_name.to_string()),
        language_code: Some(language.to_string()),
        is_bot: false,
    }
}

pub fn private_text(from: &User, text: &str) -> Update {
    Update::Message(Message {
        id: "in1".to_string(),
        chat: Chat::private(from.id.clone()),
        from: Some(from.clone()),
        text: Some(text.to_string()),
        caption: None,
        reply_to: None,
    })
}

pub fn group_text(chat_id: &str, from: &User, text: &str) -> Update {
    Update::Message(Message {
        id: "in1".to_string(),
        chat: Chat::group(chat_id),
        from: Some(from.clone()),
        text: Some(text.to_string()),
        caption: None,
        reply_to: None,
    })
}

pub fn group_reply(chat_id: &str, from: &User, text: &str, reply_target: &User) -> Update {
    let replied = Message {
        id: "orig".to_string(),
        chat: Chat::group(chat_id),
        from: Some(reply_target.clone()),
        text: Some("earlier".to_string()),
        caption: None,
        reply_to: None,
    };
    Update::Message(Message {
        id: "in2".to_string(),
        chat: Chat::group(chat_id),
        from: Some(from.clone()),
        text: Some(text.to_string()),
        caption: None,
        reply_to: Some(Box::new(replied)),
    })
}

pub fn private_callback(from: &User, data: &str) -> Update {
    let message = Message {
        id: "panel1".to_string(),
        chat: Chat::private(from.id.clone()),
        from: Some(from.clone()),
        text: Some("panel".to_string()),
        caption: None,
        reply_to: None,
    };
    Update::CallbackQuery(CallbackQuery {
        id: "cb1".to_string(),
        from: Some(from.clone()),
        data: data.to_string(),
        message: Some(message),
    })
}

pub fn group_callback(chat_id: &str, from: &User, data: &str) -> Update {
    let message = Message {
        id: "panel1".to_string(),
        chat: Chat::group(chat_id),
        from: Some(from.clone()),
        text: Some("panel".to_string()),
        caption: None,
        reply_to: None,
    };
    Update::CallbackQuery(CallbackQuery {
        id: "cb1".to_string(),
        from: Some(from.clone()),
        data: data.to_string(),
        message: Some(message),
    })
}
