//! Storage entities: applications, history, admins, XP, cups, statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One answered question inside an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationResponse {
    pub question_id: String,
    pub question: String,
    pub answer: String,
}

/// A pending guild application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub user_id: String,
    pub full_name: String,
    pub username: Option<String>,
    /// Collapsed text of all responses, kept for single-answer renderings.
    pub answer: String,
    pub language_code: Option<String>,
    #[serde(default)]
    pub responses: Vec<ApplicationResponse>,
    pub created_at: String,
}

/// Lifecycle state of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Denied,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Denied => "denied",
            ApplicationStatus::Withdrawn => "withdrawn",
        }
    }
}

/// The latest decision recorded for an applicant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationHistoryEntry {
    pub status: ApplicationStatus,
    pub note: Option<String>,
    pub language_code: Option<String>,
    pub updated_at: String,
}

/// A guild admin with display details when known.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminRecord {
    pub user_id: String,
    pub username: Option<String>,
    pub full_name: Option<String>,
}

/// Per-chat XP ledger entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct XpEntry {
    pub xp: i64,
    pub full_name: Option<String>,
    pub username: Option<String>,
}

/// Display details for a member resolved across chats.
#[derive(Debug, Clone)]
pub struct XpProfile {
    pub full_name: Option<String>,
    pub username: Option<String>,
}

/// A trophy cup awarded in a chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cup {
    pub title: String,
    pub description: String,
    pub podium: Vec<String>,
    pub created_at: String,
}

/// The strongest member of a chat, for the admin panel overview.
#[derive(Debug, Clone)]
pub struct TopMember {
    pub display: String,
    pub xp: i64,
    pub level: u32,
}

/// Aggregated chat metrics for the group admin panel.
#[derive(Debug, Clone, Default)]
pub struct GroupSnapshot {
    pub members_tracked: usize,
    pub total_xp: i64,
    pub top_member: Option<TopMember>,
    pub cup_count: usize,
    pub admins_tracked: usize,
    pub recent_cup: Option<Cup>,
    pub last_activity: Option<String>,
}

/// One row of the recent-decisions block in the insights view.
#[derive(Debug, Clone, Serialize)]
pub struct RecentUpdate {
    pub user_id: String,
    pub status: ApplicationStatus,
    pub updated_at: String,
}

/// Application pipeline statistics for admins and the dashboard.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplicationStatistics {
    pub pending: usize,
    pub total: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub languages: BTreeMap<String, usize>,
    pub average_pending_answer_length: f64,
    pub recent_updates: Vec<RecentUpdate>,
}
