//! Integration tests for [`flyzex_bot::DmHandlers`].
//!
//! Covers the application flow (branching, choice validation, submission and
//! review-chat notification), duplicates, withdrawal, admin gating, owner
//! promote/demote, the review-with-note flow, and language switching.

mod support;

use std::sync::Arc;

use flyzex_bot::services::{NullAnalytics, RateLimitGuard};
use flyzex_bot::DmHandlers;
use flyzex_core::{BotApi, ButtonAction, HandlerFlow, UpdateHandler};
use flyzex_storage::{ApplicationStatus, GuildStore};
use tempfile::TempDir;

use support::*;

fn build(
    dir: &TempDir,
    owner: &str,
    review_chat: Option<&str>,
) -> (Arc<RecordingApi>, Arc<GuildStore>, DmHandlers) {
    let api = Arc::new(RecordingApi::new());
    let store = Arc::new(GuildStore::new(dir.path().join("storage.json"), None));
    let handlers = DmHandlers::new(
        Arc::clone(&api) as Arc<dyn BotApi>,
        Arc::clone(&store),
        Arc::new(NullAnalytics),
        Arc::new(RateLimitGuard::new(10.0, 16)),
        owner.to_string(),
        review_chat.map(str::to_string),
        None,
    );
    (api, store, handlers)
}

/// **Test: The full application flow with a branching choice question.**
///
/// **Setup:** Fresh store, English applicant, review chat configured.
/// **Action:** Press apply, answer with an invalid choice, then walk the
/// default form to the end.
/// **Expected:** Invalid choice re-prompts; the role branch asks the warrior
/// follow-up; the finished application is stored pending and a review card
/// with approve/reject buttons lands in the review chat.
#[tokio::test]
async fn application_flow_completes_and_notifies_review_chat() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", Some("gREVIEW"));
    let applicant = named_user("u42", "Eve", Some("eve"), "en");

    let flow = handlers
        .handle(&private_callback(&applicant, "apply_for_guild"))
        .await
        .unwrap();
    assert_eq!(flow, HandlerFlow::Handled);
    assert!(api
        .edited_texts()
        .iter()
        .any(|text| text.contains("membership form has started")));
    let prompts = api.sent_to("u42");
    assert!(prompts
        .last()
        .unwrap()
        .text
        .contains("Which role fits you best"));

    // An answer outside the options re-prompts with the option list.
    handlers
        .handle(&private_text(&applicant, "dragon"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u42")
        .last()
        .unwrap()
        .text
        .contains("pick one of these options"));

    handlers
        .handle(&private_text(&applicant, "warrior"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u42")
        .last()
        .unwrap()
        .text
        .contains("battle you are proud of"));

    handlers
        .handle(&private_text(&applicant, "Held the west gate alone"))
        .await
        .unwrap();
    handlers
        .handle(&private_text(&applicant, "Glory and good company"))
        .await
        .unwrap();
    handlers
        .handle(&private_text(&applicant, "Evenings and weekends"))
        .await
        .unwrap();

    let texts = api.sent_to("u42");
    assert!(texts.iter().any(|s| s.text.contains("Summary of your answers")));
    assert!(texts
        .iter()
        .any(|s| s.text.contains("application was submitted")));

    assert!(store.has_application("u42").await);
    let status = store.application_status("u42").await.unwrap();
    assert_eq!(status.status, ApplicationStatus::Pending);

    let review = api.sent_to("gREVIEW");
    assert_eq!(review.len(), 1);
    assert!(review[0].text.contains("<code>u42</code>"));
    let keyboard = review[0].keyboard.as_ref().unwrap();
    assert!(keyboard.rows.iter().flatten().any(|button| {
        button.action == ButtonAction::Callback("application:u42:approve".into())
    }));
}

/// **Test: A second apply press is rejected as a duplicate.**
///
/// **Setup:** Store already holding a pending application for the user.
/// **Action:** Press apply again.
/// **Expected:** The panel is edited to the duplicate message and no flow
/// starts.
#[tokio::test]
async fn duplicate_application_is_rejected() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", None);
    store
        .add_application("u42", "Eve", None, "answer", Some("en"), Vec::new())
        .await
        .unwrap();
    let applicant = user("u42", "en");

    handlers
        .handle(&private_callback(&applicant, "apply_for_guild"))
        .await
        .unwrap();
    assert!(api
        .edited_texts()
        .iter()
        .any(|text| text.contains("already queued for review")));
}

/// **Test: Withdrawing via the panel removes the pending application.**
///
/// **Setup:** Pending application for the user.
/// **Action:** Press withdraw twice.
/// **Expected:** First reports success and history says withdrawn; second
/// reports nothing to withdraw.
#[tokio::test]
async fn withdraw_callback_round_trip() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", None);
    store
        .add_application("u42", "Eve", None, "answer", Some("en"), Vec::new())
        .await
        .unwrap();
    let applicant = user("u42", "en");

    handlers
        .handle(&private_callback(&applicant, "application_withdraw"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u42")
        .iter()
        .any(|s| s.text.contains("was withdrawn")));
    assert!(!store.has_application("u42").await);
    assert_eq!(
        store.application_status("u42").await.unwrap().status,
        ApplicationStatus::Withdrawn
    );

    handlers
        .handle(&private_callback(&applicant, "application_withdraw"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u42")
        .iter()
        .any(|s| s.text.contains("No pending application")));
}

/// **Test: /pending is admin-only.**
///
/// **Setup:** One plain user, one admin.
/// **Action:** Both send /pending.
/// **Expected:** The plain user gets the admin-only text; the admin gets the
/// empty-queue text.
#[tokio::test]
async fn pending_command_requires_admin() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", None);
    let outsider = user("u1", "en");
    let admin = user("a1", "en");
    store.add_admin("a1", None, None).await.unwrap();

    handlers
        .handle(&private_text(&outsider, "/pending"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u1")
        .iter()
        .any(|s| s.text.contains("for guild admins")));

    handlers.handle(&private_text(&admin, "/pending")).await.unwrap();
    assert!(api
        .sent_to("a1")
        .iter()
        .any(|s| s.text.contains("no pending applications")));
}

/// **Test: Only the owner can promote and demote admins.**
///
/// **Setup:** Owner `owner1` and an outsider.
/// **Action:** /promote from the outsider, then /promote and /demote from the
/// owner.
/// **Expected:** Outsider is refused; the owner's target is added then
/// removed, with the matching confirmations.
#[tokio::test]
async fn promote_demote_are_owner_only() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", None);
    let outsider = user("u1", "en");
    let owner = user("owner1", "en");

    handlers
        .handle(&private_text(&outsider, "/promote u5"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u1")
        .iter()
        .any(|s| s.text.contains("Only the guild owner")));

    handlers
        .handle(&private_text(&owner, "/promote u5"))
        .await
        .unwrap();
    assert!(store.is_admin("u5").await);
    assert!(api
        .sent_to("owner1")
        .iter()
        .any(|s| s.text.contains("is now an admin")));

    handlers
        .handle(&private_text(&owner, "/demote u5"))
        .await
        .unwrap();
    assert!(!store.is_admin("u5").await);
}

/// **Test: Approving with a note records, notifies, and edits the card.**
///
/// **Setup:** Pending English application; the reviewer is an admin.
/// **Action:** Press approve on the review card, then send a note.
/// **Expected:** History becomes approved with the note; the applicant gets
/// the approval plus the note in their language; the review card is edited to
/// the confirmation.
#[tokio::test]
async fn review_approve_with_note() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir, "owner1", None);
    store
        .add_application("u42", "Eve", Some("eve"), "answer", Some("en"), Vec::new())
        .await
        .unwrap();
    store.add_admin("a1", None, None).await.unwrap();
    let admin = user("a1", "en");

    handlers
        .handle(&private_callback(&admin, "application:u42:approve"))
        .await
        .unwrap();
    assert!(api
        .edited_texts()
        .iter()
        .any(|text| text.contains("add a note for approving")));

    handlers
        .handle(&private_text(&admin, "welcome aboard"))
        .await
        .unwrap();

    let status = store.application_status("u42").await.unwrap();
    assert_eq!(status.status, ApplicationStatus::Approved);
    assert_eq!(status.note.as_deref(), Some("welcome aboard"));
    assert!(!store.has_application("u42").await);

    let applicant_messages = api.sent_to("u42");
    assert!(applicant_messages
        .iter()
        .any(|s| s.text.contains("was approved") && s.text.contains("welcome aboard")));

    assert!(api
        .edited_texts()
        .iter()
        .any(|text| text.contains("(<code>u42</code>) was approved")));
}

/// **Test: Skipping the note still approves.**
///
/// **Setup:** Pending application, admin reviewer.
/// **Action:** Press approve, then send the skip keyword.
/// **Expected:** Approved with no note stored.
#[tokio::test]
async fn review_note_skip_keyword() {
    let dir = TempDir::new().unwrap();
    let (_api, store, handlers) = build(&dir, "owner1", None);
    store
        .add_application("u42", "Eve", None, "answer", Some("en"), Vec::new())
        .await
        .unwrap();
    store.add_admin("a1", None, None).await.unwrap();
    let admin = user("a1", "en");

    handlers
        .handle(&private_callback(&admin, "application:u42:approve"))
        .await
        .unwrap();
    handlers.handle(&private_text(&admin, "skip")).await.unwrap();

    let status = store.application_status("u42").await.unwrap();
    assert_eq!(status.status, ApplicationStatus::Approved);
    assert!(status.note.is_none());
}

/// **Test: Switching language changes subsequent replies.**
///
/// **Setup:** User whose platform hint is Persian.
/// **Action:** Pick English in the language menu, then send /status.
/// **Expected:** The status reply uses the English pack.
#[tokio::test]
async fn language_switch_changes_replies() {
    let dir = TempDir::new().unwrap();
    let (api, _store, handlers) = build(&dir, "owner1", None);
    let person = user("u7", "fa");

    handlers
        .handle(&private_callback(&person, "set_language:en"))
        .await
        .unwrap();
    assert!(api
        .sent_to("u7")
        .iter()
        .any(|s| s.text.contains("language was updated")));

    handlers.handle(&private_text(&person, "/status")).await.unwrap();
    assert!(api
        .sent_to("u7")
        .iter()
        .any(|s| s.text.contains("not submitted an application")));
}
