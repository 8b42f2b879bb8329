//! Integration tests for [`flyzex_bot::GroupHandlers`].
//!
//! Covers passive XP tracking with milestone announcements, /myxp, manual
//! XP grants via reply, cup recording validation, the admin panel and its
//! pending reply-driven actions, and the keyword-triggered personal panel.

mod support;

use std::sync::Arc;

use flyzex_bot::services::NullAnalytics;
use flyzex_bot::settings::{CupsSettings, XpSettings};
use flyzex_bot::GroupHandlers;
use flyzex_core::{BotApi, HandlerFlow, UpdateHandler};
use flyzex_storage::GuildStore;
use tempfile::TempDir;

use support::*;

fn xp_settings() -> XpSettings {
    XpSettings {
        message_character_reward: 1.0,
        message_reward_limit: 20,
        message_reward_cooldown: 0.0,
        milestone_interval: 5,
        leaderboard_size: 10,
    }
}

fn build(dir: &TempDir) -> (Arc<RecordingApi>, Arc<GuildStore>, GroupHandlers) {
    let api = Arc::new(RecordingApi::new());
    let store = Arc::new(GuildStore::new(dir.path().join("storage.json"), None));
    let handlers = GroupHandlers::new(
        Arc::clone(&api) as Arc<dyn BotApi>,
        Arc::clone(&store),
        Arc::new(NullAnalytics),
        &xp_settings(),
        &CupsSettings::default(),
    );
    (api, store, handlers)
}

/// **Test: Plain messages earn capped XP and the milestone is announced.**
///
/// **Setup:** 1 XP per character capped at 20, milestone every 5 rewards.
/// **Action:** Five long messages from the same member.
/// **Expected:** Total is 100, and exactly the fifth message triggers the
/// milestone announcement carrying the new total.
#[tokio::test]
async fn activity_awards_capped_xp_and_announces_milestone() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let member = user("m1", "en");
    let long_line = "x".repeat(64);

    for _ in 0..4 {
        let flow = handlers
            .handle(&group_text("g1", &member, &long_line))
            .await
            .unwrap();
        assert_eq!(flow, HandlerFlow::Handled);
    }
    assert_eq!(store.user_xp("g1", "m1").await, Some(80));
    assert!(api.sent_to("g1").is_empty(), "no milestone before 100 XP");

    handlers
        .handle(&group_text("g1", &member, &long_line))
        .await
        .unwrap();
    assert_eq!(store.user_xp("g1", "m1").await, Some(100));
    let announcements = api.sent_to("g1");
    assert_eq!(announcements.len(), 1);
    assert!(announcements[0].text.contains("100"));
}

/// **Test: Commands never earn XP.**
///
/// **Setup:** Fresh ledger.
/// **Action:** /help from a member.
/// **Expected:** The ledger stays empty.
#[tokio::test]
async fn commands_do_not_earn_xp() {
    let dir = TempDir::new().unwrap();
    let (_api, store, handlers) = build(&dir);
    let member = user("m1", "en");

    handlers
        .handle(&group_text("g1", &member, "/help"))
        .await
        .unwrap();
    assert_eq!(store.user_xp("g1", "m1").await, None);
}

/// **Test: /myxp reports level progress once XP exists.**
///
/// **Setup:** Member with 250 XP (level 1, 150 to go).
/// **Action:** /myxp.
/// **Expected:** Reply carries the XP, the level, and the distance to the
/// next threshold.
#[tokio::test]
async fn myxp_reports_level_progress() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let member = user("m1", "en");

    handlers
        .handle(&group_text("g1", &member, "/myxp"))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .last()
        .unwrap()
        .text
        .contains("No XP recorded"));

    store.add_xp("g1", "m1", 250, None, None).await.unwrap();
    handlers
        .handle(&group_text("g1", &member, "/myxp"))
        .await
        .unwrap();
    let reply = api.sent_to("g1").last().unwrap().text.clone();
    assert!(reply.contains("XP: 250"));
    assert!(reply.contains("level 1"));
    assert!(reply.contains("150 XP to the next level"));
}

/// **Test: /addxp grants XP to the replied-to member, admins only.**
///
/// **Setup:** Admin and a target member.
/// **Action:** /addxp 40 from a non-admin, then from the admin as a reply.
/// **Expected:** Non-admin is refused; the admin's grant lands on the target.
#[tokio::test]
async fn addxp_grants_via_reply() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let admin = user("a1", "en");
    let target = named_user("m2", "Target", None, "en");
    store.add_admin("a1", None, None).await.unwrap();

    let outsider = user("m3", "en");
    handlers
        .handle(&group_reply("g1", &outsider, "/addxp 40", &target))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .last()
        .unwrap()
        .text
        .contains("for guild admins"));

    handlers
        .handle(&group_reply("g1", &admin, "/addxp 40", &target))
        .await
        .unwrap();
    assert_eq!(store.user_xp("g1", "m2").await, Some(40));
}

/// **Test: /add_cup validates its three-part format.**
///
/// **Setup:** Admin sender.
/// **Action:** A malformed /add_cup, then a valid one.
/// **Expected:** Format error first; then the cup is stored with its podium.
#[tokio::test]
async fn add_cup_validates_format() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let admin = user("a1", "en");
    store.add_admin("a1", None, None).await.unwrap();

    handlers
        .handle(&group_text("g1", &admin, "/add_cup only-a-title"))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .last()
        .unwrap()
        .text
        .contains("format is not right"));

    handlers
        .handle(&group_text(
            "g1",
            &admin,
            "/add_cup Spring Cup | First season | Alice, Bob, Carol",
        ))
        .await
        .unwrap();
    let cups = store.cups("g1", 5).await;
    assert_eq!(cups.len(), 1);
    assert_eq!(cups[0].title, "Spring Cup");
    assert_eq!(cups[0].podium, vec!["Alice", "Bob", "Carol"]);
}

/// **Test: The admin panel opens for admins and runs reply-driven XP edits.**
///
/// **Setup:** Admin, a target member with a message to reply to.
/// **Action:** /panel, open the XP submenu, press deduct, reply with 30.
/// **Expected:** Panel renders metrics; the submenu edit happens; the reply
/// deducts 30 XP from the target.
#[tokio::test]
async fn panel_deducts_xp_via_pending_reply() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let admin = user("a1", "en");
    let target = named_user("m2", "Target", None, "en");
    store.add_admin("a1", None, None).await.unwrap();
    store.add_xp("g1", "m2", 100, Some("Target"), None).await.unwrap();

    handlers
        .handle(&group_text("g1", &admin, "/panel"))
        .await
        .unwrap();
    let panel = api.sent_to("g1").last().unwrap().clone();
    assert!(panel.text.contains("Group overview"));
    assert!(panel.keyboard.is_some());

    handlers
        .handle(&group_callback("g1", &admin, "group_panel:menu:xp"))
        .await
        .unwrap();
    assert!(api
        .edited_texts()
        .iter()
        .any(|text| text.contains("XP management")));

    handlers
        .handle(&group_callback("g1", &admin, "group_panel:action:remove_xp"))
        .await
        .unwrap();
    handlers
        .handle(&group_reply("g1", &admin, "30", &target))
        .await
        .unwrap();
    assert_eq!(store.user_xp("g1", "m2").await, Some(70));
}

/// **Test: The cancel keyword clears a pending panel action.**
///
/// **Setup:** Admin with a pending ban action.
/// **Action:** Send "cancel".
/// **Expected:** The action is cancelled; a later reply does not ban.
#[tokio::test]
async fn panel_pending_action_cancels() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let admin = user("a1", "en");
    store.add_admin("a1", None, None).await.unwrap();

    handlers
        .handle(&group_callback("g1", &admin, "group_panel:action:ban"))
        .await
        .unwrap();
    handlers
        .handle(&group_text("g1", &admin, "cancel"))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .iter()
        .any(|s| s.text.contains("Action cancelled")));
}

/// **Test: The xp keyword sends the personal panel and then cools down.**
///
/// **Setup:** Member with recorded XP.
/// **Action:** Send "xp" twice in a row.
/// **Expected:** First send delivers the panel plus a summary; the second is
/// answered with the recently-sent notice.
#[tokio::test]
async fn keyword_opens_personal_panel_with_cooldown() {
    let dir = TempDir::new().unwrap();
    let (api, store, handlers) = build(&dir);
    let member = named_user("m1", "Hero", None, "en");
    store.add_xp("g1", "m1", 150, Some("Hero"), None).await.unwrap();

    handlers
        .handle(&group_text("g1", &member, "xp"))
        .await
        .unwrap();
    let texts = api.sent_to("g1");
    assert!(texts.iter().any(|s| s.text.contains("Personal panel")));
    assert!(texts.iter().any(|s| s.text.contains("rank #1")));

    handlers
        .handle(&group_text("g1", &member, "xp"))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .iter()
        .any(|s| s.text.contains("only moments ago")));
}

/// **Test: Near-miss keywords get the fallback hint.**
///
/// **Setup:** Fresh handlers.
/// **Action:** Send "xp please".
/// **Expected:** The fallback hint is sent instead of a panel.
#[tokio::test]
async fn near_miss_keyword_gets_fallback() {
    let dir = TempDir::new().unwrap();
    let (api, _store, handlers) = build(&dir);
    let member = user("m1", "en");

    handlers
        .handle(&group_text("g1", &member, "xp please"))
        .await
        .unwrap();
    assert!(api
        .sent_to("g1")
        .iter()
        .any(|s| s.text.contains("Send “profile” or “xp”")));
}
