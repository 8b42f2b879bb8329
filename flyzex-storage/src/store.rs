//! The guild store: async state behind a RwLock, persisted as a JSON
//! snapshot. Every mutation persists before returning; `save` is also called
//! on shutdown so an unchanged store is never rewritten.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::Result;
use crate::form::QuestionDefinition;
use crate::models::{
    AdminRecord, Application, ApplicationHistoryEntry, ApplicationResponse, ApplicationStatistics,
    ApplicationStatus, Cup, GroupSnapshot, RecentUpdate, TopMember, XpEntry, XpProfile,
};
use crate::time::now_timestamp;
use crate::xp::level_progress;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    admins: Vec<AdminRecord>,
    /// Pending applications in submission order.
    #[serde(default)]
    applications: Vec<Application>,
    /// Latest decision per applicant.
    #[serde(default)]
    history: HashMap<String, ApplicationHistoryEntry>,
    /// chat_id → user_id → ledger entry.
    #[serde(default)]
    xp: HashMap<String, HashMap<String, XpEntry>>,
    /// chat_id → last XP-awarding activity timestamp.
    #[serde(default)]
    last_activity: HashMap<String, String>,
    /// chat_id → cups, newest first.
    #[serde(default)]
    cups: HashMap<String, Vec<Cup>>,
    /// language_code → admin-edited form override.
    #[serde(default)]
    forms: HashMap<String, Vec<QuestionDefinition>>,
}

pub struct GuildStore {
    path: PathBuf,
    backup_path: Option<PathBuf>,
    state: RwLock<StoreState>,
    dirty: AtomicBool,
}

impl GuildStore {
    pub fn new(path: impl Into<PathBuf>, backup_path: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_path,
            state: RwLock::new(StoreState::default()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Loads the snapshot. A missing file yields a fresh store; a corrupt
    /// primary falls back to the backup when one is configured.
    pub async fn load(&self) -> Result<()> {
        let state = match read_snapshot(&self.path).await {
            Ok(Some(state)) => state,
            Ok(None) => StoreState::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "primary snapshot unreadable");
                match &self.backup_path {
                    Some(backup) => read_snapshot(backup).await?.unwrap_or_default(),
                    None => return Err(e),
                }
            }
        };
        *self.state.write().await = state;
        info!(path = %self.path.display(), "guild store loaded");
        Ok(())
    }

    /// Persists the snapshot when anything changed since the last save.
    pub async fn save(&self) -> Result<()> {
        if !self.dirty.swap(false, Ordering::SeqCst) {
            return Ok(());
        }
        let serialized = {
            let state = self.state.read().await;
            serde_json::to_vec_pretty(&*state)?
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        if let Some(backup) = &self.backup_path {
            if tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
                if let Some(parent) = backup.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
                tokio::fs::copy(&self.path, backup).await?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &serialized).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<()> {
        self.dirty.store(true, Ordering::SeqCst);
        self.save().await
    }

    // ---- admins -----------------------------------------------------------

    /// Adds an admin; returns false when already present. Display details are
    /// refreshed either way.
    pub async fn add_admin(
        &self,
        user_id: &str,
        username: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<bool> {
        let added = {
            let mut state = self.state.write().await;
            match state.admins.iter_mut().find(|a| a.user_id == user_id) {
                Some(existing) => {
                    if username.is_some() {
                        existing.username = username.map(str::to_string);
                    }
                    if full_name.is_some() {
                        existing.full_name = full_name.map(str::to_string);
                    }
                    false
                }
                None => {
                    state.admins.push(AdminRecord {
                        user_id: user_id.to_string(),
                        username: username.map(str::to_string),
                        full_name: full_name.map(str::to_string),
                    });
                    true
                }
            }
        };
        self.commit().await?;
        Ok(added)
    }

    /// Removes an admin; returns false when absent.
    pub async fn remove_admin(&self, user_id: &str) -> Result<bool> {
        let removed = {
            let mut state = self.state.write().await;
            let before = state.admins.len();
            state.admins.retain(|a| a.user_id != user_id);
            state.admins.len() != before
        };
        if removed {
            self.commit().await?;
        }
        Ok(removed)
    }

    pub async fn is_admin(&self, user_id: &str) -> bool {
        self.state
            .read()
            .await
            .admins
            .iter()
            .any(|a| a.user_id == user_id)
    }

    pub async fn list_admins(&self) -> Vec<String> {
        self.state
            .read()
            .await
            .admins
            .iter()
            .map(|a| a.user_id.clone())
            .collect()
    }

    pub async fn admin_details(&self) -> Vec<AdminRecord> {
        self.state.read().await.admins.clone()
    }

    // ---- applications -----------------------------------------------------

    /// Stores a new pending application. Returns false when the user already
    /// has a pending application or is an approved member.
    #[allow(clippy::too_many_arguments)]
    pub async fn add_application(
        &self,
        user_id: &str,
        full_name: &str,
        username: Option<&str>,
        answer: &str,
        language_code: Option<&str>,
        responses: Vec<ApplicationResponse>,
    ) -> Result<bool> {
        let stored = {
            let mut state = self.state.write().await;
            let duplicate = state.applications.iter().any(|a| a.user_id == user_id);
            let approved = state
                .history
                .get(user_id)
                .is_some_and(|entry| entry.status == ApplicationStatus::Approved);
            if duplicate || approved {
                false
            } else {
                let now = now_timestamp();
                state.applications.push(Application {
                    user_id: user_id.to_string(),
                    full_name: full_name.to_string(),
                    username: username.map(str::to_string),
                    answer: answer.to_string(),
                    language_code: language_code.map(str::to_string),
                    responses,
                    created_at: now.clone(),
                });
                state.history.insert(
                    user_id.to_string(),
                    ApplicationHistoryEntry {
                        status: ApplicationStatus::Pending,
                        note: None,
                        language_code: language_code.map(str::to_string),
                        updated_at: now,
                    },
                );
                true
            }
        };
        if stored {
            self.commit().await?;
        }
        Ok(stored)
    }

    pub async fn has_application(&self, user_id: &str) -> bool {
        self.state
            .read()
            .await
            .applications
            .iter()
            .any(|a| a.user_id == user_id)
    }

    pub async fn get_application(&self, user_id: &str) -> Option<Application> {
        self.state
            .read()
            .await
            .applications
            .iter()
            .find(|a| a.user_id == user_id)
            .cloned()
    }

    /// Pending applications in submission order.
    pub async fn pending_applications(&self) -> Vec<Application> {
        self.state.read().await.applications.clone()
    }

    /// Removes and returns a pending application.
    pub async fn pop_application(&self, user_id: &str) -> Result<Option<Application>> {
        let popped = {
            let mut state = self.state.write().await;
            let index = state.applications.iter().position(|a| a.user_id == user_id);
            index.map(|i| state.applications.remove(i))
        };
        if popped.is_some() {
            self.commit().await?;
        }
        Ok(popped)
    }

    /// Records a decision in the history.
    pub async fn set_application_status(
        &self,
        user_id: &str,
        status: ApplicationStatus,
        note: Option<&str>,
        language_code: Option<&str>,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            let language_code = language_code
                .map(str::to_string)
                .or_else(|| state.history.get(user_id).and_then(|e| e.language_code.clone()));
            state.history.insert(
                user_id.to_string(),
                ApplicationHistoryEntry {
                    status,
                    note: note.map(str::to_string),
                    language_code,
                    updated_at: now_timestamp(),
                },
            );
        }
        self.commit().await
    }

    pub async fn application_status(&self, user_id: &str) -> Option<ApplicationHistoryEntry> {
        self.state.read().await.history.get(user_id).cloned()
    }

    /// Withdraws a pending application; returns false when none exists.
    pub async fn withdraw_application(&self, user_id: &str) -> Result<bool> {
        let withdrawn = {
            let mut state = self.state.write().await;
            let index = state.applications.iter().position(|a| a.user_id == user_id);
            match index {
                None => false,
                Some(i) => {
                    let application = state.applications.remove(i);
                    state.history.insert(
                        user_id.to_string(),
                        ApplicationHistoryEntry {
                            status: ApplicationStatus::Withdrawn,
                            note: None,
                            language_code: application.language_code,
                            updated_at: now_timestamp(),
                        },
                    );
                    true
                }
            }
        };
        if withdrawn {
            self.commit().await?;
        }
        Ok(withdrawn)
    }

    /// History entries with the given status, most recently updated first.
    pub async fn applicants_by_status(
        &self,
        status: ApplicationStatus,
    ) -> Vec<(String, ApplicationHistoryEntry)> {
        let state = self.state.read().await;
        let mut entries: Vec<_> = state
            .history
            .iter()
            .filter(|(_, entry)| entry.status == status)
            .map(|(user_id, entry)| (user_id.clone(), entry.clone()))
            .collect();
        entries.sort_by(|a, b| b.1.updated_at.cmp(&a.1.updated_at).then(a.0.cmp(&b.0)));
        entries
    }

    pub async fn application_statistics(&self) -> ApplicationStatistics {
        let state = self.state.read().await;
        let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut languages: BTreeMap<String, usize> = BTreeMap::new();
        for entry in state.history.values() {
            *status_counts
                .entry(entry.status.as_str().to_string())
                .or_default() += 1;
            if let Some(language) = &entry.language_code {
                *languages.entry(language.clone()).or_default() += 1;
            }
        }
        let pending = state.applications.len();
        let total = state.history.len();
        let average_pending_answer_length = if pending == 0 {
            0.0
        } else {
            let sum: usize = state
                .applications
                .iter()
                .map(|a| a.answer.chars().count())
                .sum();
            sum as f64 / pending as f64
        };
        let mut recent: Vec<_> = state
            .history
            .iter()
            .map(|(user_id, entry)| RecentUpdate {
                user_id: user_id.clone(),
                status: entry.status,
                updated_at: entry.updated_at.clone(),
            })
            .collect();
        recent.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then(a.user_id.cmp(&b.user_id)));
        recent.truncate(5);
        ApplicationStatistics {
            pending,
            total,
            status_counts,
            languages,
            average_pending_answer_length,
            recent_updates: recent,
        }
    }

    // ---- xp ---------------------------------------------------------------

    /// Adds XP (negative amounts deduct, floored at zero) and returns the new
    /// total. Display fields and the chat's last-activity stamp are refreshed.
    pub async fn add_xp(
        &self,
        chat_id: &str,
        user_id: &str,
        amount: i64,
        full_name: Option<&str>,
        username: Option<&str>,
    ) -> Result<i64> {
        let total = {
            let mut state = self.state.write().await;
            let entry = state
                .xp
                .entry(chat_id.to_string())
                .or_default()
                .entry(user_id.to_string())
                .or_default();
            entry.xp = (entry.xp + amount).max(0);
            if full_name.is_some() {
                entry.full_name = full_name.map(str::to_string);
            }
            if username.is_some() {
                entry.username = username.map(str::to_string);
            }
            let total = entry.xp;
            state
                .last_activity
                .insert(chat_id.to_string(), now_timestamp());
            total
        };
        self.commit().await?;
        Ok(total)
    }

    pub async fn user_xp(&self, chat_id: &str, user_id: &str) -> Option<i64> {
        self.state
            .read()
            .await
            .xp
            .get(chat_id)
            .and_then(|ledger| ledger.get(user_id))
            .map(|entry| entry.xp)
    }

    /// Top members by XP, ties broken by user id for a stable ordering.
    pub async fn xp_leaderboard(&self, chat_id: &str, limit: usize) -> Vec<(String, i64)> {
        let state = self.state.read().await;
        let Some(ledger) = state.xp.get(chat_id) else {
            return Vec::new();
        };
        let mut rows: Vec<_> = ledger
            .iter()
            .map(|(user_id, entry)| (user_id.clone(), entry.xp))
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        rows.truncate(limit.max(1));
        rows
    }

    /// 1-based rank of a member plus the ledger size; `None` when untracked.
    pub async fn user_xp_rank(&self, chat_id: &str, user_id: &str) -> Option<(usize, usize)> {
        let state = self.state.read().await;
        let ledger = state.xp.get(chat_id)?;
        ledger.get(user_id)?;
        let mut rows: Vec<_> = ledger.iter().collect();
        rows.sort_by(|a, b| b.1.xp.cmp(&a.1.xp).then(a.0.cmp(b.0)));
        let rank = rows.iter().position(|(id, _)| id.as_str() == user_id)? + 1;
        Some((rank, rows.len()))
    }

    /// Display details for a member, searching every chat ledger.
    pub async fn xp_profile(&self, user_id: &str) -> Option<XpProfile> {
        let state = self.state.read().await;
        state.xp.values().find_map(|ledger| {
            ledger.get(user_id).and_then(|entry| {
                if entry.full_name.is_none() && entry.username.is_none() {
                    None
                } else {
                    Some(XpProfile {
                        full_name: entry.full_name.clone(),
                        username: entry.username.clone(),
                    })
                }
            })
        })
    }

    /// Aggregated metrics for the group admin panel.
    pub async fn group_snapshot(&self, chat_id: &str) -> GroupSnapshot {
        let state = self.state.read().await;
        let ledger = state.xp.get(chat_id);
        let members_tracked = ledger.map_or(0, HashMap::len);
        let total_xp = ledger.map_or(0, |l| l.values().map(|e| e.xp).sum());
        let top_member = ledger.and_then(|l| {
            l.iter()
                .max_by(|a, b| a.1.xp.cmp(&b.1.xp).then(b.0.cmp(a.0)))
                .map(|(user_id, entry)| TopMember {
                    display: entry
                        .full_name
                        .clone()
                        .or_else(|| entry.username.clone())
                        .unwrap_or_else(|| user_id.clone()),
                    xp: entry.xp,
                    level: level_progress(entry.xp).level,
                })
        });
        let cups = state.cups.get(chat_id);
        GroupSnapshot {
            members_tracked,
            total_xp,
            top_member,
            cup_count: cups.map_or(0, Vec::len),
            admins_tracked: state.admins.len(),
            recent_cup: cups.and_then(|c| c.first().cloned()),
            last_activity: state.last_activity.get(chat_id).cloned(),
        }
    }

    // ---- cups -------------------------------------------------------------

    pub async fn add_cup(
        &self,
        chat_id: &str,
        title: &str,
        description: &str,
        podium: Vec<String>,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.cups.entry(chat_id.to_string()).or_default().insert(
                0,
                Cup {
                    title: title.to_string(),
                    description: description.to_string(),
                    podium,
                    created_at: now_timestamp(),
                },
            );
        }
        self.commit().await
    }

    /// Cups for a chat, newest first.
    pub async fn cups(&self, chat_id: &str, limit: usize) -> Vec<Cup> {
        let state = self.state.read().await;
        state
            .cups
            .get(chat_id)
            .map(|cups| cups.iter().take(limit.max(1)).cloned().collect())
            .unwrap_or_default()
    }

    // ---- application forms ------------------------------------------------

    /// The admin-edited form override for a language, when one exists.
    pub async fn application_form(&self, language_code: &str) -> Option<Vec<QuestionDefinition>> {
        self.state.read().await.forms.get(language_code).cloned()
    }

    /// Replaces the stored form for a language, kept sorted by `order`.
    pub async fn import_form(
        &self,
        language_code: &str,
        mut definitions: Vec<QuestionDefinition>,
    ) -> Result<()> {
        definitions.sort_by_key(|d| d.order);
        {
            let mut state = self.state.write().await;
            state.forms.insert(language_code.to_string(), definitions);
        }
        self.commit().await
    }

    /// Inserts or replaces one question inside a language's stored form.
    pub async fn upsert_question(
        &self,
        language_code: &str,
        definition: QuestionDefinition,
    ) -> Result<()> {
        {
            let mut state = self.state.write().await;
            let form = state.forms.entry(language_code.to_string()).or_default();
            form.retain(|d| d.question_id != definition.question_id);
            form.push(definition);
            form.sort_by_key(|d| d.order);
        }
        self.commit().await
    }

    /// Deletes one question; returns false when the id is unknown.
    pub async fn delete_question(&self, language_code: &str, question_id: &str) -> Result<bool> {
        let deleted = {
            let mut state = self.state.write().await;
            match state.forms.get_mut(language_code) {
                None => false,
                Some(form) => {
                    let before = form.len();
                    form.retain(|d| d.question_id != question_id);
                    form.len() != before
                }
            }
        };
        if deleted {
            self.commit().await?;
        }
        Ok(deleted)
    }

    /// Drops a language's override so the built-in default applies again.
    pub async fn reset_form(&self, language_code: &str) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.forms.remove(language_code);
        }
        self.commit().await
    }
}

async fn read_snapshot(path: &Path) -> Result<Option<StoreState>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}
