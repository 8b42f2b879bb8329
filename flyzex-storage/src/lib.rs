//! # flyzex-storage
//!
//! Durable guild state for FlyzexBot: membership applications with decision
//! history, admin roster, per-chat XP ledgers and trophy cups, and editable
//! per-language application forms. State is held behind an async RwLock and
//! persisted as a JSON snapshot with an optional backup copy.

pub mod error;
pub mod form;
pub mod models;
pub mod store;
pub mod time;
pub mod xp;

pub use error::StorageError;
pub use form::{select_next_question, QuestionDefinition, QuestionKind, QuestionOption};
pub use models::{
    AdminRecord, Application, ApplicationHistoryEntry, ApplicationResponse, ApplicationStatistics,
    ApplicationStatus, Cup, GroupSnapshot, RecentUpdate, TopMember, XpProfile,
};
pub use store::GuildStore;
pub use time::{configure_timezone, format_timestamp, now_timestamp};
pub use xp::{level_progress, LevelProgress};
