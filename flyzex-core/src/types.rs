//! Core update model: user, chat, message, callback query.
//!
//! Rubika identifiers are opaque strings (group chat ids start with `g`), so
//! every id here is a `String`. The `effective_*` accessors on [`Update`]
//! mirror how handlers look at an update regardless of its variant.

use serde::{Deserialize, Serialize};

/// User identity as reported by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub language_code: Option<String>,
    pub is_bot: bool,
}

impl User {
    /// Best display label: full name, then username, then the raw id.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.username.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or(&self.id)
    }
}

/// Kind of chat an update arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatKind {
    Private,
    Group,
}

/// Chat identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chat {
    pub id: String,
    pub kind: ChatKind,
    pub title: Option<String>,
}

impl Chat {
    pub fn private(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ChatKind::Private,
            title: None,
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: ChatKind::Group,
            title: None,
        }
    }

    pub fn is_private(&self) -> bool {
        self.kind == ChatKind::Private
    }

    pub fn is_group(&self) -> bool {
        self.kind == ChatKind::Group
    }
}

/// A single incoming message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
    pub caption: Option<String>,
    pub reply_to: Option<Box<Message>>,
}

impl Message {
    /// Text or caption, whichever is present.
    pub fn content(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    /// Parses `/command arg1 arg2` from the message text.
    /// Returns the lowercased command name (without `/`) and its arguments.
    pub fn command(&self) -> Option<(String, Vec<String>)> {
        let text = self.text.as_deref()?;
        let rest = text.strip_prefix('/')?;
        let mut parts = rest.split_whitespace();
        let name = parts.next()?.to_lowercase();
        let args = parts.map(str::to_string).collect();
        Some((name, args))
    }
}

/// An inline-button press, carrying the button id as `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: Option<User>,
    pub data: String,
    pub message: Option<Message>,
}

/// A parsed update from the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Update {
    Message(Message),
    CallbackQuery(CallbackQuery),
}

impl Update {
    pub fn effective_message(&self) -> Option<&Message> {
        match self {
            Update::Message(message) => Some(message),
            Update::CallbackQuery(query) => query.message.as_ref(),
        }
    }

    pub fn effective_chat(&self) -> Option<&Chat> {
        self.effective_message().map(|message| &message.chat)
    }

    pub fn effective_user(&self) -> Option<&User> {
        match self {
            Update::Message(message) => message.from.as_ref(),
            Update::CallbackQuery(query) => query.from.as_ref(),
        }
    }

    pub fn callback_query(&self) -> Option<&CallbackQuery> {
        match self {
            Update::CallbackQuery(query) => Some(query),
            Update::Message(_) => None,
        }
    }

    pub fn message(&self) -> Option<&Message> {
        match self {
            Update::Message(message) => Some(message),
            Update::CallbackQuery(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_message(text: &str) -> Message {
        Message {
            id: "m1".into(),
            chat: Chat::private("u100"),
            from: Some(User {
                id: "u100".into(),
                ..User::default()
            }),
            text: Some(text.into()),
            caption: None,
            reply_to: None,
        }
    }

    #[test]
    fn command_parses_name_and_args() {
        let (name, args) = text_message("/Promote u42 extra").command().unwrap();
        assert_eq!(name, "promote");
        assert_eq!(args, vec!["u42".to_string(), "extra".to_string()]);
    }

    #[test]
    fn command_none_for_plain_text() {
        assert!(text_message("hello").command().is_none());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let user = User {
            id: "u7".into(),
            username: Some(String::new()),
            ..User::default()
        };
        assert_eq!(user.display_name(), "u7");
    }
}
