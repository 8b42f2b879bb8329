//! # flyzex-core
//!
//! Platform-neutral building blocks for the FlyzexBot dispatcher: the update
//! model (user, chat, message, callback query), the [`BotApi`] transport
//! trait, the [`UpdateHandler`] trait, and tracing setup.

pub mod bot;
pub mod error;
pub mod handler;
pub mod keyboard;
pub mod logger;
pub mod types;

pub use bot::{BotApi, BotApiExt};
pub use error::{CoreError, HandlerError, Result};
pub use handler::{HandlerFlow, UpdateHandler};
pub use keyboard::{Button, ButtonAction, InlineKeyboard};
pub use logger::init_tracing;
pub use types::{CallbackQuery, Chat, ChatKind, Message, Update, User};
