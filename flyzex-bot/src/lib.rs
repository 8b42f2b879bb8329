//! # FlyzexBot application
//!
//! Wires the Rubika dispatcher, guild store, localization, and admin
//! dashboard into one process. DM handlers run the guild application
//! workflow; group handlers track XP, cups, and moderation panels.

pub mod cli;
pub mod forms;
pub mod handlers;
pub mod localization;
pub mod services;
pub mod settings;
pub mod ui;

pub use cli::{Cli, Commands};
pub use handlers::{DmHandlers, GroupHandlers};
pub use localization::{
    default_text_pack, fill, normalize_language_code, text_pack, TextPack,
    AVAILABLE_LANGUAGE_CODES, DEFAULT_LANGUAGE_CODE, ENGLISH_TEXTS, PERSIAN_TEXTS,
};
pub use settings::Settings;
