//! HTML-escaping tests ported from the original suite: user-generated
//! content must arrive escaped in application cards and leaderboards, in both
//! languages.

mod support;

use std::sync::Arc;

use flyzex_bot::services::{NullAnalytics, RateLimitGuard};
use flyzex_bot::settings::{CupsSettings, XpSettings};
use flyzex_bot::{DmHandlers, GroupHandlers};
use flyzex_core::{BotApi, UpdateHandler};
use flyzex_storage::GuildStore;
use tempfile::TempDir;

use support::*;

fn group_handlers(api: Arc<RecordingApi>, store: Arc<GuildStore>) -> GroupHandlers {
    GroupHandlers::new(
        api as Arc<dyn BotApi>,
        store,
        Arc::new(NullAnalytics),
        &XpSettings::default(),
        &CupsSettings::default(),
    )
}

/// **Test: Application cards escape names, usernames, and answers.**
///
/// **Setup:** Pending application with markup in every user-supplied field;
/// the reader is an admin.
/// **Action:** /pending.
/// **Expected:** The card contains the escaped variants only.
#[tokio::test]
async fn dm_application_rendering_escapes_html() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(RecordingApi::new());
    let store = Arc::new(GuildStore::new(dir.path().join("storage.json"), None));
    store
        .add_application(
            "42",
            "Eve <Leader>",
            Some("eve<leader>"),
            "I love & support",
            Some("en"),
            Vec::new(),
        )
        .await
        .unwrap();
    store.add_admin("a1", None, None).await.unwrap();

    let handlers = DmHandlers::new(
        Arc::clone(&api) as Arc<dyn BotApi>,
        Arc::clone(&store),
        Arc::new(NullAnalytics),
        Arc::new(RateLimitGuard::new(10.0, 5)),
        "owner1".to_string(),
        None,
        None,
    );
    let admin = user("a1", "en");
    handlers.handle(&private_text(&admin, "/pending")).await.unwrap();

    let sent = api.sent_to("a1");
    assert!(!sent.is_empty(), "expected at least one message to be sent");
    let card = &sent[0].text;
    assert!(card.contains("Eve &lt;Leader&gt;"));
    assert!(card.contains("@eve&lt;leader&gt;"));
    assert!(card.contains("I love &amp; support"));
    assert!(!card.contains("Eve <Leader>"));
}

/// **Test: Leaderboards escape member and cup content, per language.**
///
/// **Setup:** XP entry with a markup name; a cup whose title, description,
/// and podium carry markup.
/// **Action:** /xp and /cups as a Persian then an English member.
/// **Expected:** Titles match each language pack, all content is escaped,
/// and the Persian cup podium uses the Persian separator.
#[tokio::test]
async fn group_leaderboards_escape_user_generated_content() {
    let dir = TempDir::new().unwrap();
    let api = Arc::new(RecordingApi::new());
    let store = Arc::new(GuildStore::new(dir.path().join("storage.json"), None));
    store
        .add_xp("g100", "h1", 256, Some("Hero <One>"), None)
        .await
        .unwrap();
    store
        .add_cup(
            "g100",
            "Champions <Cup>",
            "Best & Bold",
            vec!["Alice <A>".into(), "Bob & Co".into()],
        )
        .await
        .unwrap();
    let handlers = group_handlers(Arc::clone(&api), store);

    for (language, expected_xp_title, expected_cup_title, expected_separator) in [
        ("fa", "🏆 جدول امتیاز اعضای فعال", "🥇 جدول افتخارات گیلد", "، "),
        ("en", "🏆 XP board for active members", "🥇 Guild trophy board", ", "),
    ] {
        api.sent.lock().unwrap().clear();
        let member = user("h1", language);

        handlers
            .handle(&group_text("g100", &member, "/xp"))
            .await
            .unwrap();
        let xp_text = api.sent_to("g100")[0].text.clone();
        assert_eq!(xp_text.lines().next().unwrap(), expected_xp_title);
        assert!(xp_text.contains("Hero &lt;One&gt;"));

        api.sent.lock().unwrap().clear();
        handlers
            .handle(&group_text("g100", &member, "/cups"))
            .await
            .unwrap();
        let cup_text = api.sent_to("g100")[0].text.clone();
        assert_eq!(cup_text.lines().next().unwrap(), expected_cup_title);
        assert!(cup_text.contains("Champions &lt;Cup&gt;"));
        assert!(cup_text.contains("Best &amp; Bold"));
        assert!(cup_text.contains("Alice &lt;A&gt;"));
        assert!(cup_text.contains("Bob &amp; Co"));
        assert!(cup_text.contains(expected_separator));
    }
}
