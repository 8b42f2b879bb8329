//! Bot abstraction for sending and editing messages.
//!
//! [`BotApi`] is transport-agnostic; the Rubika client implements it, and
//! handler tests substitute a recording double.

use async_trait::async_trait;

use crate::error::Result;
use crate::keyboard::InlineKeyboard;

/// Abstraction over the messaging transport used by handlers.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// Sends a text message; returns the platform message id when reported.
    async fn send_message(
        &self,
        chat_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
        reply_to_message_id: Option<&str>,
    ) -> Result<Option<String>>;

    /// Edits an already-sent message in place.
    async fn edit_message_text(
        &self,
        chat_id: &str,
        message_id: &str,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> Result<()>;

    /// Deletes a message (used for self-expiring panels).
    async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<()>;

    /// Removes a member from a group chat.
    async fn ban_chat_member(&self, chat_id: &str, user_id: &str) -> Result<()>;

    /// Revokes a member's permission to send messages.
    async fn restrict_chat_member(&self, chat_id: &str, user_id: &str) -> Result<()>;
}

/// Convenience wrappers shared by handlers.
#[async_trait]
pub trait BotApiExt: BotApi {
    /// Sends plain text with no keyboard or reply target.
    async fn send_text(&self, chat_id: &str, text: &str) -> Result<Option<String>> {
        self.send_message(chat_id, text, None, None).await
    }

    /// Replies to a specific message with plain text.
    async fn reply_text(
        &self,
        chat_id: &str,
        reply_to_message_id: &str,
        text: &str,
    ) -> Result<Option<String>> {
        self.send_message(chat_id, text, None, Some(reply_to_message_id))
            .await
    }
}

#[async_trait]
impl<T: BotApi + ?Sized> BotApiExt for T {}
