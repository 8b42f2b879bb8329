//! Integration tests for [`flyzex_storage::GuildStore`].
//!
//! Covers the application lifecycle (submit, duplicate, decide, withdraw),
//! admin roster semantics, XP accumulation and ordering, cups, form
//! overrides, and snapshot persistence with backup fallback.

use flyzex_storage::{
    ApplicationStatus, GuildStore, QuestionDefinition, QuestionKind,
};
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> GuildStore {
    let path = dir.path().join("storage.json");
    let backup = dir.path().join("storage.backup.json");
    GuildStore::new(path, Some(backup))
}

fn question(id: &str, order: u32) -> QuestionDefinition {
    QuestionDefinition {
        question_id: id.to_string(),
        title: None,
        prompt: format!("prompt {id}"),
        kind: QuestionKind::Text,
        order,
        required: true,
        options: Vec::new(),
        depends_on: None,
        depends_value: None,
    }
}

/// **Test: Application lifecycle from submission to approval.**
///
/// **Setup:** Fresh store.
/// **Action:** Add an application, add it again, pop it, record approval.
/// **Expected:** First add succeeds, second is rejected as duplicate, pop
/// returns the entry, history reports `approved`, and a re-application from
/// an approved member is rejected.
#[tokio::test]
async fn application_lifecycle() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store
        .add_application("u42", "Eve", Some("eve"), "I love & support", Some("en"), Vec::new())
        .await
        .unwrap());
    assert!(!store
        .add_application("u42", "Eve", Some("eve"), "again", Some("en"), Vec::new())
        .await
        .unwrap());
    assert!(store.has_application("u42").await);

    let status = store.application_status("u42").await.unwrap();
    assert_eq!(status.status, ApplicationStatus::Pending);

    let application = store.pop_application("u42").await.unwrap().unwrap();
    assert_eq!(application.full_name, "Eve");
    assert!(store.pop_application("u42").await.unwrap().is_none());

    store
        .set_application_status("u42", ApplicationStatus::Approved, Some("welcome"), Some("en"))
        .await
        .unwrap();
    let status = store.application_status("u42").await.unwrap();
    assert_eq!(status.status, ApplicationStatus::Approved);
    assert_eq!(status.note.as_deref(), Some("welcome"));

    assert!(!store
        .add_application("u42", "Eve", Some("eve"), "back again", Some("en"), Vec::new())
        .await
        .unwrap());
}

/// **Test: Withdrawing removes the pending entry and records history.**
///
/// **Setup:** Store with one pending application.
/// **Action:** `withdraw_application` twice.
/// **Expected:** First returns true and history becomes `withdrawn`; second
/// returns false.
#[tokio::test]
async fn withdraw_application() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store
        .add_application("u1", "A", None, "answer", None, Vec::new())
        .await
        .unwrap();

    assert!(store.withdraw_application("u1").await.unwrap());
    assert!(!store.has_application("u1").await);
    assert_eq!(
        store.application_status("u1").await.unwrap().status,
        ApplicationStatus::Withdrawn
    );
    assert!(!store.withdraw_application("u1").await.unwrap());
}

/// **Test: Admin roster add/remove semantics.**
///
/// **Setup:** Fresh store.
/// **Action:** Add an admin twice, remove twice.
/// **Expected:** Add is true then false; removal is true then false;
/// `is_admin` tracks membership; details keep the refreshed username.
#[tokio::test]
async fn admin_roster() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.add_admin("owner", None, Some("Owner")).await.unwrap());
    assert!(!store.add_admin("owner", Some("boss"), None).await.unwrap());
    assert!(store.is_admin("owner").await);

    let details = store.admin_details().await;
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].username.as_deref(), Some("boss"));

    assert!(store.remove_admin("owner").await.unwrap());
    assert!(!store.remove_admin("owner").await.unwrap());
    assert!(!store.is_admin("owner").await);
}

/// **Test: XP accumulates, floors at zero, and orders the leaderboard.**
///
/// **Setup:** Fresh store, one chat.
/// **Action:** Grant XP to three members, deduct below zero for one.
/// **Expected:** Totals accumulate; deduction floors at 0; leaderboard is
/// sorted descending; rank reports the 1-based position and ledger size.
#[tokio::test]
async fn xp_ledger_and_leaderboard() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.add_xp("g1", "a", 50, Some("Alice"), None).await.unwrap(), 50);
    assert_eq!(store.add_xp("g1", "a", 30, None, None).await.unwrap(), 80);
    store.add_xp("g1", "b", 120, Some("Bob"), None).await.unwrap();
    store.add_xp("g1", "c", 10, None, None).await.unwrap();
    assert_eq!(store.add_xp("g1", "c", -999, None, None).await.unwrap(), 0);

    let board = store.xp_leaderboard("g1", 10).await;
    assert_eq!(
        board,
        vec![("b".to_string(), 120), ("a".to_string(), 80), ("c".to_string(), 0)]
    );

    assert_eq!(store.user_xp("g1", "a").await, Some(80));
    assert_eq!(store.user_xp("g1", "missing").await, None);
    assert_eq!(store.user_xp_rank("g1", "a").await, Some((2, 3)));
    assert_eq!(store.user_xp_rank("g1", "missing").await, None);

    let profile = store.xp_profile("a").await.unwrap();
    assert_eq!(profile.full_name.as_deref(), Some("Alice"));

    let snapshot = store.group_snapshot("g1").await;
    assert_eq!(snapshot.members_tracked, 3);
    assert_eq!(snapshot.total_xp, 200);
    assert_eq!(snapshot.top_member.unwrap().display, "Bob");
    assert!(snapshot.last_activity.is_some());
}

/// **Test: Cups are returned newest first and limited.**
///
/// **Setup:** Fresh store.
/// **Action:** Add two cups, fetch with limit 1.
/// **Expected:** Only the most recently added cup comes back.
#[tokio::test]
async fn cups_newest_first() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .add_cup("g1", "Spring Cup", "First season", vec!["Alice".into()])
        .await
        .unwrap();
    store
        .add_cup("g1", "Summer Cup", "Second season", vec!["Bob".into()])
        .await
        .unwrap();

    let cups = store.cups("g1", 1).await;
    assert_eq!(cups.len(), 1);
    assert_eq!(cups[0].title, "Summer Cup");
}

/// **Test: Form overrides upsert, delete, and reset per language.**
///
/// **Setup:** Fresh store with no stored form.
/// **Action:** Import a form, upsert a replacement question, delete one,
/// reset the language.
/// **Expected:** Stored form follows each edit; after reset the override is
/// gone.
#[tokio::test]
async fn form_overrides() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert!(store.application_form("en").await.is_none());
    store
        .import_form("en", vec![question("b", 2), question("a", 1)])
        .await
        .unwrap();
    let form = store.application_form("en").await.unwrap();
    assert_eq!(form[0].question_id, "a");

    let mut replacement = question("a", 3);
    replacement.prompt = "updated".into();
    store.upsert_question("en", replacement).await.unwrap();
    let form = store.application_form("en").await.unwrap();
    assert_eq!(form.last().unwrap().prompt, "updated");

    assert!(store.delete_question("en", "b").await.unwrap());
    assert!(!store.delete_question("en", "b").await.unwrap());

    store.reset_form("en").await.unwrap();
    assert!(store.application_form("en").await.is_none());
}

/// **Test: Statistics summarize the pipeline.**
///
/// **Setup:** Two pending applications (en, fa), one denied history entry.
/// **Action:** `application_statistics`.
/// **Expected:** pending=2, total=3, status counts and language counts match,
/// average answer length is the mean of pending answers.
#[tokio::test]
async fn statistics_summarize_pipeline() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    store
        .add_application("u1", "A", None, "abcd", Some("en"), Vec::new())
        .await
        .unwrap();
    store
        .add_application("u2", "B", None, "ab", Some("fa"), Vec::new())
        .await
        .unwrap();
    store
        .add_application("u3", "C", None, "xyz", Some("en"), Vec::new())
        .await
        .unwrap();
    store.pop_application("u3").await.unwrap();
    store
        .set_application_status("u3", ApplicationStatus::Denied, None, None)
        .await
        .unwrap();

    let stats = store.application_statistics().await;
    assert_eq!(stats.pending, 2);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.status_counts.get("pending"), Some(&2));
    assert_eq!(stats.status_counts.get("denied"), Some(&1));
    assert_eq!(stats.languages.get("en"), Some(&2));
    assert_eq!(stats.languages.get("fa"), Some(&1));
    assert!((stats.average_pending_answer_length - 3.0).abs() < f64::EPSILON);
    assert!(!stats.recent_updates.is_empty());
}

/// **Test: A saved snapshot reloads, and a corrupt primary falls back to the backup.**
///
/// **Setup:** Store with data, saved twice so the backup exists.
/// **Action:** Reload into a new store; then corrupt the primary and reload.
/// **Expected:** Fresh store sees the data; after corruption the backup copy
/// still restores the first-generation state.
#[tokio::test]
async fn snapshot_persistence_and_backup_fallback() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let backup = dir.path().join("storage.backup.json");

    {
        let store = GuildStore::new(&path, Some(backup.clone()));
        store.add_admin("owner", None, None).await.unwrap();
        // Second mutation copies the first snapshot into the backup.
        store.add_xp("g1", "a", 10, None, None).await.unwrap();
    }

    let reloaded = GuildStore::new(&path, Some(backup.clone()));
    reloaded.load().await.unwrap();
    assert!(reloaded.is_admin("owner").await);
    assert_eq!(reloaded.user_xp("g1", "a").await, Some(10));

    tokio::fs::write(&path, b"{ not json").await.unwrap();
    let fallback = GuildStore::new(&path, Some(backup));
    fallback.load().await.unwrap();
    assert!(fallback.is_admin("owner").await);
}
