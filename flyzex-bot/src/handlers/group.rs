//! Group-chat flows: passive XP tracking with milestones, leaderboards,
//! trophy cups, the admin moderation panel, and the keyword-triggered
//! personal panel.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use flyzex_core::{
    BotApi, BotApiExt, CallbackQuery, HandlerFlow, InlineKeyboard, Message, Update, UpdateHandler,
    User,
};
use flyzex_storage::{level_progress, GuildStore};
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::handlers::escape_html;
use crate::localization::{fill, normalize_language_code, text_pack, TextPack, DEFAULT_LANGUAGE_CODE};
use crate::services::Analytics;
use crate::settings::{CupsSettings, XpSettings};
use crate::ui::keyboards::{
    group_admin_panel_keyboard, leaderboard_refresh_keyboard, personal_panel_keyboard,
};

const PERSONAL_PANEL_COOLDOWN: Duration = Duration::from_secs(30);
const PERSONAL_PANEL_TTL: Duration = Duration::from_secs(60);
const XP_NOTIFICATION_COOLDOWN: Duration = Duration::from_secs(180);

#[derive(Clone, Copy, PartialEq, Eq)]
enum PanelAction {
    Ban,
    Mute,
    AddXp,
    RemoveXp,
}

#[derive(Clone, Copy, PartialEq, Eq, Default)]
enum PanelView {
    #[default]
    Profile,
    Leaderboard,
}

impl PanelView {
    fn as_str(self) -> &'static str {
        match self {
            PanelView::Profile => "profile",
            PanelView::Leaderboard => "leaderboard",
        }
    }

    fn parse(raw: &str) -> Self {
        if raw == "leaderboard" {
            PanelView::Leaderboard
        } else {
            PanelView::Profile
        }
    }
}

#[derive(Default)]
struct PersonalState {
    last_sent: Option<Instant>,
    last_view: PanelView,
    chat_titles: HashMap<String, String>,
}

#[derive(Default)]
struct GroupState {
    message_cooldowns: HashMap<(String, String), Instant>,
    xp_notifications: HashMap<(String, String), Instant>,
    panel_menu: HashMap<String, String>,
    panel_pending: HashMap<(String, String), PanelAction>,
    personal: HashMap<String, PersonalState>,
}

pub struct GroupHandlers {
    api: Arc<dyn BotApi>,
    store: Arc<GuildStore>,
    analytics: Arc<dyn Analytics>,
    xp_per_character: f64,
    xp_message_limit: i64,
    xp_message_cooldown: Duration,
    milestone_interval: i64,
    xp_limit: usize,
    cups_limit: usize,
    state: Mutex<GroupState>,
}

impl GroupHandlers {
    pub fn new(
        api: Arc<dyn BotApi>,
        store: Arc<GuildStore>,
        analytics: Arc<dyn Analytics>,
        xp: &XpSettings,
        cups: &CupsSettings,
    ) -> Self {
        Self {
            api,
            store,
            analytics,
            xp_per_character: xp.message_character_reward.max(0.0),
            xp_message_limit: xp.message_reward_limit.max(0),
            xp_message_cooldown: Duration::from_secs_f64(xp.message_reward_cooldown.max(0.0)),
            milestone_interval: xp.milestone_interval,
            xp_limit: xp.leaderboard_size,
            cups_limit: cups.leaderboard_size,
            state: Mutex::new(GroupState::default()),
        }
    }

    fn texts_for(&self, user: Option<&User>) -> &'static TextPack {
        let code = user
            .and_then(|user| user.language_code.as_deref())
            .and_then(normalize_language_code)
            .unwrap_or(DEFAULT_LANGUAGE_CODE);
        text_pack(code)
    }

    async fn is_admin(&self, user_id: &str) -> bool {
        self.store.is_admin(user_id).await
    }

    // ---- activity tracking -------------------------------------------------

    async fn track_activity(&self, message: &Message) -> flyzex_core::Result<()> {
        let (Some(user), chat) = (message.from.as_ref(), &message.chat) else {
            return Ok(());
        };
        if user.is_bot {
            return Ok(());
        }
        if self.maybe_handle_panel_response(message, user).await? {
            return Ok(());
        }
        if message.text.as_deref().is_some_and(|text| text.starts_with('/')) {
            return Ok(());
        }
        if self.xp_per_character <= 0.0 || self.xp_message_limit <= 0 {
            return Ok(());
        }

        let content = message.content().unwrap_or("");
        let char_count = content.chars().count() as i64;
        if char_count <= 0 {
            return Ok(());
        }
        let mut xp_amount = (char_count as f64 * self.xp_per_character) as i64;
        if xp_amount <= 0 {
            return Ok(());
        }
        xp_amount = xp_amount.min(self.xp_message_limit);

        let key = (chat.id.clone(), user.id.clone());
        if !self.xp_message_cooldown.is_zero() {
            let state = self.state.lock().await;
            if let Some(last) = state.message_cooldowns.get(&key) {
                if last.elapsed() < self.xp_message_cooldown {
                    self.analytics.record("group.activity_skipped_cooldown").await;
                    return Ok(());
                }
            }
        }

        let texts = self.texts_for(Some(user));
        let started = Instant::now();
        let new_score = match self
            .store
            .add_xp(
                &chat.id,
                &user.id,
                xp_amount,
                user.full_name.as_deref(),
                user.username.as_deref(),
            )
            .await
        {
            Ok(score) => score,
            Err(e) => {
                error!(user_id = %user.id, error = %e, "failed to update XP");
                self.analytics.record("group.activity_error").await;
                return Ok(());
            }
        };
        self.analytics
            .record_duration("group.track_activity", started.elapsed())
            .await;

        if !self.xp_message_cooldown.is_zero() {
            self.state
                .lock()
                .await
                .message_cooldowns
                .insert(key.clone(), Instant::now());
        }

        if self.milestone_interval > 0 {
            let milestone_base = if self.xp_message_limit > 0 {
                self.xp_message_limit
            } else {
                xp_amount
            };
            let milestone_score = milestone_base * self.milestone_interval;
            if milestone_score > 0 && new_score % milestone_score == 0 {
                let should_notify = {
                    let mut state = self.state.lock().await;
                    match state.xp_notifications.get(&key) {
                        Some(last) if last.elapsed() < XP_NOTIFICATION_COOLDOWN => false,
                        _ => {
                            state.xp_notifications.insert(key.clone(), Instant::now());
                            true
                        }
                    }
                };
                if should_notify {
                    self.api
                        .reply_text(
                            &chat.id,
                            &message.id,
                            &fill(
                                texts.group_xp_updated,
                                &[
                                    ("full_name", user.display_name()),
                                    ("xp", &new_score.to_string()),
                                ],
                            ),
                        )
                        .await?;
                }
            }
        }

        self.maybe_handle_keyword_interaction(message, user, Some(new_score))
            .await?;
        self.analytics.record("group.activity_tracked").await;
        Ok(())
    }

    // ---- commands ----------------------------------------------------------

    async fn cmd_help(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user));
        let include_admin = self.is_admin(&user.id).await;
        self.api
            .reply_text(&message.chat.id, &message.id, &build_help_text(texts, include_admin))
            .await?;
        self.analytics.record("group.help_requested").await;
        Ok(())
    }

    async fn cmd_my_xp(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user));
        let Some(xp) = self.store.user_xp(&message.chat.id, &user.id).await else {
            self.api
                .reply_text(&message.chat.id, &message.id, texts.group_myxp_no_data)
                .await?;
            self.analytics.record("group.my_xp_requested").await;
            return Ok(());
        };
        let progress = level_progress(xp);
        let response = fill(
            texts.group_myxp_response,
            &[
                ("full_name", &escape_html(user.display_name())),
                ("xp", &xp.to_string()),
                ("level", &progress.level.to_string()),
                ("xp_to_next", &progress.xp_to_next.to_string()),
            ],
        );
        self.api
            .reply_text(&message.chat.id, &message.id, &response)
            .await?;
        self.analytics.record("group.my_xp_requested").await;
        Ok(())
    }

    async fn cmd_xp_leaderboard(&self, message: &Message) -> flyzex_core::Result<()> {
        let texts = self.texts_for(message.from.as_ref());
        self.analytics.record("group.xp_leaderboard_requested").await;
        let (text, markup) = self.compose_xp_leaderboard(&message.chat.id, texts).await;
        self.api
            .send_message(&message.chat.id, &text, markup, None)
            .await?;
        Ok(())
    }

    async fn cmd_cup_leaderboard(&self, message: &Message) -> flyzex_core::Result<()> {
        let texts = self.texts_for(message.from.as_ref());
        self.analytics.record("group.cup_leaderboard_requested").await;
        let (text, markup) = self.compose_cup_leaderboard(&message.chat.id, texts).await;
        self.api
            .send_message(&message.chat.id, &text, markup, None)
            .await?;
        Ok(())
    }

    async fn cmd_add_cup(&self, message: &Message, args: &[String]) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user));
        let chat_id = &message.chat.id;
        if !self.is_admin(&user.id).await {
            self.api.send_text(chat_id, texts.dm_admin_only).await?;
            return Ok(());
        }
        if args.is_empty() {
            self.api.send_text(chat_id, texts.group_add_cup_usage).await?;
            return Ok(());
        }

        let raw = args.join(" ");
        let parts: Vec<&str> = raw.splitn(3, '|').map(str::trim).collect();
        if parts.len() != 3 {
            self.api
                .send_text(chat_id, texts.group_add_cup_invalid_format)
                .await?;
            return Ok(());
        }
        let (title, description, podium_raw) = (parts[0], parts[1], parts[2]);
        if title.is_empty()
            || description.is_empty()
            || title.chars().count() > 100
            || description.chars().count() > 300
        {
            self.api
                .send_text(chat_id, texts.group_add_cup_invalid_format)
                .await?;
            return Ok(());
        }
        let podium: Vec<String> = podium_raw
            .split(',')
            .map(str::trim)
            .filter(|slot| !slot.is_empty())
            .map(str::to_string)
            .collect();
        if podium.len() > 10 || podium.iter().any(|entry| entry.chars().count() > 100) {
            self.api
                .send_text(chat_id, texts.group_add_cup_invalid_format)
                .await?;
            return Ok(());
        }

        if let Err(e) = self.store.add_cup(chat_id, title, description, podium).await {
            error!(chat_id = %chat_id, error = %e, "failed to add cup");
            self.api.send_text(chat_id, texts.group_no_data).await?;
            self.analytics.record("group.cup_add_error").await;
            return Ok(());
        }
        self.api
            .send_text(chat_id, &fill(texts.group_cup_added, &[("title", title)]))
            .await?;
        self.analytics.record("group.cup_added").await;
        Ok(())
    }

    async fn cmd_add_xp(&self, message: &Message, args: &[String]) -> flyzex_core::Result<()> {
        let Some(actor) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(actor));
        let chat_id = &message.chat.id;
        if !self.is_admin(&actor.id).await {
            self.api
                .reply_text(chat_id, &message.id, texts.dm_admin_only)
                .await?;
            return Ok(());
        }

        let amount = args.last().and_then(|raw| raw.parse::<i64>().ok());
        let reply_target = message
            .reply_to
            .as_deref()
            .and_then(|reply| reply.from.clone());
        let explicit_target = if args.len() >= 2 {
            let candidate = args[0].trim_start_matches('@');
            (!candidate.is_empty()).then(|| User {
                id: candidate.to_string(),
                ..User::default()
            })
        } else {
            None
        };
        let target = reply_target.or(explicit_target);

        let (Some(target), Some(amount)) = (target, amount) else {
            self.api
                .reply_text(chat_id, &message.id, texts.group_add_xp_usage)
                .await?;
            return Ok(());
        };

        let total = match self
            .store
            .add_xp(
                chat_id,
                &target.id,
                amount,
                target.full_name.as_deref(),
                target.username.as_deref(),
            )
            .await
        {
            Ok(total) => total,
            Err(e) => {
                error!(error = %e, "failed to grant XP manually");
                self.api
                    .reply_text(chat_id, &message.id, texts.error_generic)
                    .await?;
                return Ok(());
            }
        };

        self.api
            .reply_text(
                chat_id,
                &message.id,
                &fill(
                    texts.group_add_xp_success,
                    &[
                        ("full_name", target.display_name()),
                        ("xp", &total.to_string()),
                    ],
                ),
            )
            .await?;
        Ok(())
    }

    async fn cmd_panel(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user));
        if !self.is_admin(&user.id).await {
            self.api
                .reply_text(&message.chat.id, &message.id, texts.dm_admin_only)
                .await?;
            return Ok(());
        }
        self.state
            .lock()
            .await
            .panel_menu
            .insert(message.chat.id.clone(), "root".to_string());
        let (text, markup) = self.compose_group_panel(&message.chat, texts, "root").await;
        self.api
            .send_message(&message.chat.id, &text, Some(markup), Some(&message.id))
            .await?;
        self.analytics.record("group.panel_opened").await;
        Ok(())
    }

    // ---- panel callbacks ---------------------------------------------------

    async fn cb_panel_action(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        let chat = &message.chat;
        if !self.is_admin(&user.id).await {
            return Ok(());
        }
        let texts = self.texts_for(Some(user));
        let parts: Vec<&str> = query.data.splitn(3, ':').collect();
        if parts.len() < 2 {
            return Ok(());
        }
        let scope = parts[1];
        let argument = parts.get(2).copied();

        match scope {
            "close" => {
                self.edit_or_reply(message, texts.group_panel_closed, None).await?;
                self.state.lock().await.panel_menu.remove(&chat.id);
            }
            "refresh" => {
                let menu = self
                    .state
                    .lock()
                    .await
                    .panel_menu
                    .get(&chat.id)
                    .cloned()
                    .unwrap_or_else(|| "root".to_string());
                let (text, markup) = self.compose_group_panel(chat, texts, &menu).await;
                self.edit_or_reply(message, &text, Some(markup)).await?;
                self.analytics.record("group.panel_refreshed").await;
            }
            "help" => {
                self.api
                    .reply_text(&chat.id, &message.id, &build_help_text(texts, true))
                    .await?;
                self.analytics.record("group.help_requested").await;
            }
            "menu" => {
                let target_menu = argument.unwrap_or("root");
                self.state
                    .lock()
                    .await
                    .panel_menu
                    .insert(chat.id.clone(), target_menu.to_string());
                let (text, markup) = self.compose_group_panel(chat, texts, target_menu).await;
                self.edit_or_reply(message, &text, Some(markup)).await?;
            }
            "action" => {
                self.panel_action(message, user, argument.unwrap_or(""), texts)
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn panel_action(
        &self,
        message: &Message,
        user: &User,
        action: &str,
        texts: &'static TextPack,
    ) -> flyzex_core::Result<()> {
        let chat_id = &message.chat.id;
        let pending = match action {
            "ban" => Some((PanelAction::Ban, texts.group_panel_ban_prompt)),
            "mute" => Some((PanelAction::Mute, texts.group_panel_mute_prompt)),
            "add_xp" => Some((PanelAction::AddXp, texts.group_panel_add_xp_prompt)),
            "remove_xp" => Some((PanelAction::RemoveXp, texts.group_panel_remove_xp_prompt)),
            _ => None,
        };
        if let Some((panel_action, prompt)) = pending {
            self.state
                .lock()
                .await
                .panel_pending
                .insert((chat_id.clone(), user.id.clone()), panel_action);
            self.api.reply_text(chat_id, &message.id, prompt).await?;
            return Ok(());
        }

        match action {
            "ban_help" => {
                self.api
                    .reply_text(chat_id, &message.id, texts.group_panel_ban_prompt)
                    .await?;
            }
            "mute_help" => {
                self.api
                    .reply_text(chat_id, &message.id, texts.group_panel_mute_prompt)
                    .await?;
            }
            "xp_members" => {
                self.send_xp_members_overview(chat_id, &message.id, texts)
                    .await?;
            }
            "cups_latest" => {
                let (text, markup) = self.compose_cup_leaderboard(chat_id, texts).await;
                self.api
                    .send_message(chat_id, &text, markup, Some(&message.id))
                    .await?;
            }
            "cups_help" => {
                self.api
                    .reply_text(chat_id, &message.id, texts.group_panel_cups_hint)
                    .await?;
            }
            "admins_list" => {
                let listing = self.render_admins_list(texts).await;
                self.api.reply_text(chat_id, &message.id, &listing).await?;
            }
            "admins_help" => {
                self.api
                    .reply_text(chat_id, &message.id, texts.group_panel_admins_hint)
                    .await?;
            }
            "settings_tools" | "settings_help" => {
                self.api
                    .reply_text(chat_id, &message.id, texts.group_panel_settings_hint)
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn maybe_handle_panel_response(
        &self,
        message: &Message,
        actor: &User,
    ) -> flyzex_core::Result<bool> {
        let chat_id = &message.chat.id;
        let key = (chat_id.clone(), actor.id.clone());
        let action = {
            let state = self.state.lock().await;
            state.panel_pending.get(&key).copied()
        };
        let Some(action) = action else {
            return Ok(false);
        };

        let texts = self.texts_for(Some(actor));
        if message
            .text
            .as_deref()
            .is_some_and(|text| text.trim().to_lowercase() == texts.group_panel_cancel_keyword)
        {
            self.state.lock().await.panel_pending.remove(&key);
            self.api
                .reply_text(chat_id, &message.id, texts.group_panel_cancelled)
                .await?;
            return Ok(true);
        }

        let target = message
            .reply_to
            .as_deref()
            .and_then(|reply| reply.from.clone());

        match action {
            PanelAction::Ban | PanelAction::Mute => {
                let Some(target) = target else {
                    self.api
                        .reply_text(chat_id, &message.id, texts.group_panel_invalid_target)
                        .await?;
                    return Ok(true);
                };
                let result = match action {
                    PanelAction::Ban => self.api.ban_chat_member(chat_id, &target.id).await,
                    _ => self.api.restrict_chat_member(chat_id, &target.id).await,
                };
                if let Err(e) = result {
                    error!(target = %target.id, error = %e, "panel moderation action failed");
                    self.api
                        .reply_text(chat_id, &message.id, texts.group_panel_action_error)
                        .await?;
                    return Ok(true);
                }
                self.state.lock().await.panel_pending.remove(&key);
                let template = match action {
                    PanelAction::Ban => texts.group_panel_ban_success,
                    _ => texts.group_panel_mute_success,
                };
                self.api
                    .reply_text(
                        chat_id,
                        &message.id,
                        &fill(template, &[("full_name", target.display_name())]),
                    )
                    .await?;
            }
            PanelAction::AddXp | PanelAction::RemoveXp => {
                let Some(target) = target else {
                    self.api
                        .reply_text(chat_id, &message.id, texts.group_panel_invalid_target)
                        .await?;
                    return Ok(true);
                };
                let amount = message
                    .text
                    .as_deref()
                    .and_then(|text| text.trim().parse::<i64>().ok());
                let Some(amount) = amount.filter(|amount| *amount != 0) else {
                    self.api
                        .reply_text(chat_id, &message.id, texts.group_add_xp_usage)
                        .await?;
                    return Ok(true);
                };
                let signed = match action {
                    PanelAction::AddXp => amount.abs(),
                    _ => -amount.abs(),
                };
                let total = match self
                    .store
                    .add_xp(
                        chat_id,
                        &target.id,
                        signed,
                        target.full_name.as_deref(),
                        target.username.as_deref(),
                    )
                    .await
                {
                    Ok(total) => total,
                    Err(e) => {
                        error!(error = %e, "failed to grant XP via panel");
                        self.api
                            .reply_text(chat_id, &message.id, texts.error_generic)
                            .await?;
                        return Ok(true);
                    }
                };
                self.state.lock().await.panel_pending.remove(&key);
                let template = match action {
                    PanelAction::AddXp => texts.group_add_xp_success,
                    _ => texts.group_remove_xp_success,
                };
                self.api
                    .reply_text(
                        chat_id,
                        &message.id,
                        &fill(
                            template,
                            &[
                                ("full_name", target.display_name()),
                                ("xp", &total.to_string()),
                            ],
                        ),
                    )
                    .await?;
            }
        }
        Ok(true)
    }

    // ---- keyword interaction & personal panel ------------------------------

    async fn maybe_handle_keyword_interaction(
        &self,
        message: &Message,
        actor: &User,
        current_total: Option<i64>,
    ) -> flyzex_core::Result<bool> {
        let Some(text) = message.text.as_deref() else {
            return Ok(false);
        };
        let texts = self.texts_for(Some(actor));
        let keyword = normalize_keyword(text);
        if keyword.is_empty() {
            return Ok(false);
        }

        let Some(action) = keyword_action(&keyword) else {
            if keyword_near_miss(&keyword) {
                self.api
                    .reply_text(&message.chat.id, &message.id, texts.group_keyword_fallback)
                    .await?;
                self.analytics.record("group.keyword_fallback").await;
                return Ok(true);
            }
            return Ok(false);
        };

        if action == KeywordAction::AdminPanel {
            self.cmd_panel(message).await?;
            return Ok(true);
        }

        let chat = &message.chat;
        let recently_sent = {
            let state = self.state.lock().await;
            state
                .personal
                .get(&actor.id)
                .and_then(|personal| personal.last_sent)
                .is_some_and(|last| last.elapsed() < PERSONAL_PANEL_COOLDOWN)
        };
        if recently_sent {
            self.api
                .reply_text(&chat.id, &message.id, texts.group_personal_panel_recently_sent)
                .await?;
            if action == KeywordAction::Leaderboard {
                self.cmd_xp_leaderboard(message).await?;
            }
            return Ok(true);
        }

        let xp_total = match current_total {
            Some(total) => Some(total),
            None => self.store.user_xp(&chat.id, &actor.id).await,
        };
        let rank = self.store.user_xp_rank(&chat.id, &actor.id).await;
        let trophies = self.collect_user_trophies(&chat.id, actor).await;
        let view = if action == KeywordAction::Leaderboard {
            PanelView::Leaderboard
        } else {
            self.state
                .lock()
                .await
                .personal
                .get(&actor.id)
                .map(|personal| personal.last_view)
                .unwrap_or_default()
        };

        let chat_title = chat
            .title
            .clone()
            .unwrap_or_else(|| texts.group_panel_unknown_chat.to_string());
        let (panel_text, markup) = self
            .compose_personal_panel(&chat.id, actor, texts, &chat_title, view, xp_total)
            .await;
        let sent = self
            .api
            .send_message(&chat.id, &panel_text, Some(markup), None)
            .await;
        let message_id = match sent {
            Ok(message_id) => message_id,
            Err(e) => {
                error!(chat_id = %chat.id, error = %e, "failed to deliver personal panel");
                self.api
                    .reply_text(&chat.id, &message.id, texts.group_personal_panel_dm_error)
                    .await?;
                return Ok(true);
            }
        };
        if let Some(message_id) = message_id {
            self.schedule_temporary_message(chat.id.clone(), message_id);
        }

        {
            let mut state = self.state.lock().await;
            let personal = state.personal.entry(actor.id.clone()).or_default();
            personal.last_sent = Some(Instant::now());
            personal.last_view = view;
            personal.chat_titles.insert(chat.id.clone(), chat_title);
        }

        match xp_total {
            Some(total) => {
                let progress = level_progress(total);
                let rank_display = rank
                    .map(|(position, _)| format!("#{position}"))
                    .unwrap_or_else(|| "—".to_string());
                let summary = fill(
                    texts.group_personal_panel_dm_prompt,
                    &[
                        ("xp", &total.to_string()),
                        ("level", &progress.level.to_string()),
                        ("rank", &rank_display),
                        ("trophies", &trophies.len().to_string()),
                    ],
                );
                self.api.reply_text(&chat.id, &message.id, &summary).await?;
            }
            None => {
                self.api
                    .reply_text(
                        &chat.id,
                        &message.id,
                        texts.group_personal_panel_dm_prompt_no_data,
                    )
                    .await?;
            }
        }

        if action == KeywordAction::Leaderboard {
            self.cmd_xp_leaderboard(message).await?;
        } else if keyword == "trophies" || keyword == "cups" {
            if trophies.is_empty() {
                self.api
                    .reply_text(&chat.id, &message.id, texts.group_personal_panel_trophies_empty)
                    .await?;
            } else {
                let mut lines = vec![texts.group_personal_panel_trophies_heading.to_string()];
                for trophy in &trophies {
                    lines.push(format!("• {trophy}"));
                }
                self.api
                    .reply_text(&chat.id, &message.id, &lines.join("\n"))
                    .await?;
            }
        }

        self.analytics.record("group.personal_panel_requested").await;
        Ok(true)
    }

    async fn cb_personal_panel(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        let parts: Vec<&str> = query.data.splitn(4, ':').collect();
        if parts.len() < 3 {
            return Ok(());
        }
        let (action, chat_id) = (parts[1], parts[2]);
        let texts = self.texts_for(Some(user));

        let view = {
            let state = self.state.lock().await;
            let last_view = state
                .personal
                .get(&user.id)
                .map(|personal| personal.last_view)
                .unwrap_or_default();
            match action {
                "refresh" => parts
                    .get(3)
                    .map(|raw| PanelView::parse(raw))
                    .unwrap_or(last_view),
                "view" => parts
                    .get(3)
                    .map(|raw| PanelView::parse(raw))
                    .unwrap_or(PanelView::Profile),
                _ => return Ok(()),
            }
        };

        let chat_title = {
            let state = self.state.lock().await;
            state
                .personal
                .get(&user.id)
                .and_then(|personal| personal.chat_titles.get(chat_id).cloned())
                .unwrap_or_else(|| chat_id.to_string())
        };

        let (panel_text, markup) = self
            .compose_personal_panel(chat_id, user, texts, &chat_title, view, None)
            .await;
        self.state
            .lock()
            .await
            .personal
            .entry(user.id.clone())
            .or_default()
            .last_view = view;
        self.edit_or_reply(message, &panel_text, Some(markup)).await?;
        Ok(())
    }

    async fn cb_leaderboard_refresh(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        let parts: Vec<&str> = query.data.split(':').collect();
        if parts.len() != 4 {
            return Ok(());
        }
        let (board, chat_id) = (parts[1], parts[2]);
        let texts = self.texts_for(query.from.as_ref());
        let (text, markup) = if board == "xp" {
            self.analytics.record("group.xp_leaderboard_refreshed").await;
            self.compose_xp_leaderboard(chat_id, texts).await
        } else {
            self.analytics.record("group.cup_leaderboard_refreshed").await;
            self.compose_cup_leaderboard(chat_id, texts).await
        };
        self.api
            .edit_message_text(&message.chat.id, &message.id, &text, markup)
            .await?;
        Ok(())
    }

    // ---- composition helpers -----------------------------------------------

    async fn resolve_display_name(&self, user_id: &str) -> String {
        match self.store.xp_profile(user_id).await {
            Some(profile) => profile
                .full_name
                .or(profile.username)
                .unwrap_or_else(|| user_id.to_string()),
            None => user_id.to_string(),
        }
    }

    async fn compose_xp_leaderboard(
        &self,
        chat_id: &str,
        texts: &TextPack,
    ) -> (String, Option<InlineKeyboard>) {
        let leaderboard = self.store.xp_leaderboard(chat_id, self.xp_limit).await;
        if leaderboard.is_empty() {
            return (texts.group_no_data.to_string(), None);
        }
        let mut lines = vec![texts.group_xp_leaderboard_title.to_string()];
        for (index, (user_id, xp)) in leaderboard.iter().enumerate() {
            let display = escape_html(&self.resolve_display_name(user_id).await);
            let progress = level_progress(*xp);
            lines.push(format!(
                "{}. <b>{display}</b> — <code>{xp}</code> XP · Lv.{}",
                index + 1,
                progress.level
            ));
        }
        (
            lines.join("\n"),
            Some(leaderboard_refresh_keyboard("xp", chat_id, texts)),
        )
    }

    async fn compose_cup_leaderboard(
        &self,
        chat_id: &str,
        texts: &TextPack,
    ) -> (String, Option<InlineKeyboard>) {
        let cups = self.store.cups(chat_id, self.cups_limit).await;
        if cups.is_empty() {
            return (texts.group_no_data.to_string(), None);
        }
        let mut blocks = vec![texts.group_cup_leaderboard_title.to_string()];
        for cup in &cups {
            let podium: Vec<String> = cup
                .podium
                .iter()
                .filter(|slot| !slot.is_empty())
                .map(|slot| escape_html(slot))
                .collect();
            let podium_line = if podium.is_empty() {
                "—".to_string()
            } else {
                podium.join(texts.list_separator())
            };
            blocks.push(format!(
                "<b>{}</b> — {}\n🥇 {podium_line}",
                escape_html(&cup.title),
                escape_html(&cup.description)
            ));
        }
        (
            blocks.join("\n\n"),
            Some(leaderboard_refresh_keyboard("cups", chat_id, texts)),
        )
    }

    async fn compose_group_panel(
        &self,
        chat: &flyzex_core::Chat,
        texts: &TextPack,
        menu: &str,
    ) -> (String, InlineKeyboard) {
        let snapshot = self.store.group_snapshot(&chat.id).await;
        let chat_title = escape_html(
            chat.title
                .as_deref()
                .unwrap_or(texts.group_panel_unknown_chat),
        );

        let mut metrics = vec![
            fill(
                texts.group_panel_metric_tracked,
                &[("members", &snapshot.members_tracked.to_string())],
            ),
            fill(
                texts.group_panel_metric_total_xp,
                &[("total_xp", &snapshot.total_xp.to_string())],
            ),
        ];
        match &snapshot.top_member {
            Some(top) => metrics.push(fill(
                texts.group_panel_metric_top_member,
                &[
                    ("name", &escape_html(&top.display)),
                    ("xp", &top.xp.to_string()),
                    ("level", &top.level.to_string()),
                ],
            )),
            None => metrics.push(texts.group_panel_metric_top_member_empty.to_string()),
        }
        metrics.push(fill(
            texts.group_panel_metric_cups,
            &[("count", &snapshot.cup_count.to_string())],
        ));
        metrics.push(fill(
            texts.group_panel_metric_admins,
            &[("count", &snapshot.admins_tracked.to_string())],
        ));
        if let Some(cup) = &snapshot.recent_cup {
            metrics.push(fill(
                texts.group_panel_recent_cup,
                &[
                    ("title", &escape_html(&cup.title)),
                    ("created_at", &cup.created_at),
                ],
            ));
        }
        if let Some(last_activity) = &snapshot.last_activity {
            metrics.push(fill(
                texts.group_panel_last_activity,
                &[("timestamp", last_activity)],
            ));
        }

        let mut lines = vec![
            fill(texts.group_panel_intro, &[("chat_title", &chat_title)]),
            String::new(),
            texts.group_panel_overview_title.to_string(),
            metrics.join("\n"),
            String::new(),
            texts.group_panel_actions_hint.to_string(),
        ];
        if let Some((title, description)) = menu_block(menu, texts) {
            lines.push(String::new());
            lines.push(title.to_string());
            lines.push(description.to_string());
        }
        lines.push(String::new());
        lines.push(texts.group_panel_help_hint.to_string());

        (
            lines.join("\n").trim().to_string(),
            group_admin_panel_keyboard(texts, menu),
        )
    }

    async fn compose_personal_panel(
        &self,
        chat_id: &str,
        user: &User,
        texts: &TextPack,
        chat_title: &str,
        view: PanelView,
        current_total: Option<i64>,
    ) -> (String, InlineKeyboard) {
        let xp_total = match current_total {
            Some(total) => Some(total),
            None => self.store.user_xp(chat_id, &user.id).await,
        };
        let display_total = xp_total.unwrap_or(0);
        let progress = level_progress(display_total);
        let span = (progress.next_threshold - progress.current_threshold).max(1);
        let rank = self.store.user_xp_rank(chat_id, &user.id).await;
        let trophies = self.collect_user_trophies(chat_id, user).await;

        let leaderboard_limit = match view {
            PanelView::Leaderboard => self.xp_limit.max(1),
            PanelView::Profile => self.xp_limit.min(5).max(1),
        };
        let leaderboard = self.store.xp_leaderboard(chat_id, leaderboard_limit).await;

        let mut lines = vec![fill(
            texts.group_personal_panel_title,
            &[("chat_title", &escape_html(chat_title))],
        )];
        lines.push(String::new());
        lines.push(texts.group_personal_panel_profile_heading.to_string());
        match xp_total {
            None => lines.push(texts.group_personal_panel_no_data.to_string()),
            Some(_) => {
                lines.push(fill(
                    texts.group_personal_panel_profile_line,
                    &[
                        ("xp", &display_total.to_string()),
                        ("level", &progress.level.to_string()),
                    ],
                ));
                let (rank_display, total_members) = match rank {
                    Some((position, total)) => (format!("#{position}"), total.max(1)),
                    None => ("—".to_string(), 1),
                };
                lines.push(fill(
                    texts.group_personal_panel_rank_line,
                    &[("rank", &rank_display), ("total", &total_members.to_string())],
                ));
                lines.push(fill(
                    texts.group_personal_panel_progress_label,
                    &[
                        ("current", &progress.xp_into_level.to_string()),
                        ("target", &span.to_string()),
                    ],
                ));
                lines.push(render_progress_bar(progress.xp_into_level, span, 10));
            }
        }

        lines.push(String::new());
        lines.push(texts.group_personal_panel_trophies_heading.to_string());
        if trophies.is_empty() {
            lines.push(texts.group_personal_panel_trophies_empty.to_string());
        } else {
            for trophy in trophies.iter().take(5) {
                lines.push(format!("• {}", escape_html(trophy)));
            }
        }

        lines.push(String::new());
        lines.push(texts.group_personal_panel_leaderboard_heading.to_string());
        if leaderboard.is_empty() {
            lines.push(texts.group_no_data.to_string());
        } else {
            for (index, (member_id, xp)) in leaderboard.iter().enumerate() {
                let display = escape_html(&self.resolve_display_name(member_id).await);
                let member_progress = level_progress(*xp);
                let marker = if member_id == &user.id { "⭐️ " } else { "" };
                lines.push(fill(
                    texts.group_personal_panel_leaderboard_entry,
                    &[
                        ("marker", marker),
                        ("index", &(index + 1).to_string()),
                        ("name", &display),
                        ("xp", &xp.to_string()),
                        ("level", &member_progress.level.to_string()),
                    ],
                ));
            }
        }

        (
            lines.join("\n"),
            personal_panel_keyboard(chat_id, view.as_str(), texts),
        )
    }

    async fn send_xp_members_overview(
        &self,
        chat_id: &str,
        reply_to: &str,
        texts: &TextPack,
    ) -> flyzex_core::Result<()> {
        let limit = if self.xp_limit == 0 {
            10
        } else {
            self.xp_limit.min(10)
        };
        let leaderboard = self.store.xp_leaderboard(chat_id, limit.max(1)).await;
        if leaderboard.is_empty() {
            self.api
                .reply_text(chat_id, reply_to, texts.group_panel_menu_xp_members_empty)
                .await?;
            return Ok(());
        }
        let mut entries = Vec::new();
        for (index, (user_id, xp)) in leaderboard.iter().enumerate() {
            let display = escape_html(&self.resolve_display_name(user_id).await);
            let progress = level_progress(*xp);
            entries.push(fill(
                texts.group_panel_menu_xp_members_entry,
                &[
                    ("index", &(index + 1).to_string()),
                    ("name", &display),
                    ("xp", &xp.to_string()),
                    ("level", &progress.level.to_string()),
                ],
            ));
        }
        let text = fill(
            texts.group_panel_menu_xp_members_header,
            &[
                ("count", &leaderboard.len().to_string()),
                ("members", &entries.join("\n")),
            ],
        );
        self.api.reply_text(chat_id, reply_to, &text).await?;
        Ok(())
    }

    async fn render_admins_list(&self, texts: &TextPack) -> String {
        let details = self.store.admin_details().await;
        if details.is_empty() {
            return texts.group_panel_menu_admins_list_empty.to_string();
        }
        let entries: Vec<String> = details
            .iter()
            .map(|admin| {
                let mut parts: Vec<String> = Vec::new();
                if let Some(full_name) = admin.full_name.as_deref().filter(|s| !s.is_empty()) {
                    parts.push(escape_html(full_name));
                }
                if let Some(username) = admin.username.as_deref() {
                    let normalized = username.trim_start_matches('@');
                    if !normalized.is_empty() {
                        parts.push(format!("@{}", escape_html(normalized)));
                    }
                }
                if parts.is_empty() {
                    parts.push(texts.group_panel_menu_admins_list_unknown.to_string());
                }
                fill(
                    texts.group_panel_menu_admins_list_entry,
                    &[
                        ("display", &parts.join(" / ")),
                        ("user_id", &escape_html(&admin.user_id)),
                    ],
                )
            })
            .collect();
        fill(
            texts.group_panel_menu_admins_list_header,
            &[
                ("count", &entries.len().to_string()),
                ("admins", &entries.join("\n")),
            ],
        )
    }

    async fn collect_user_trophies(&self, chat_id: &str, user: &User) -> Vec<String> {
        let cups = self.store.cups(chat_id, self.cups_limit).await;
        if cups.is_empty() {
            return Vec::new();
        }
        let mut identifiers = vec![user.id.to_lowercase()];
        if let Some(username) = user.username.as_deref() {
            identifiers.push(username.trim_start_matches('@').to_lowercase());
        }
        if let Some(full_name) = user.full_name.as_deref() {
            identifiers.push(full_name.to_lowercase());
        }

        let mut trophies = Vec::new();
        for cup in &cups {
            for entry in &cup.podium {
                let normalized = entry.trim().trim_start_matches('@').to_lowercase();
                if identifiers.iter().any(|id| *id == normalized) {
                    if cup.title.is_empty() {
                        trophies.push(entry.trim().to_string());
                    } else {
                        trophies.push(format!("{} — {}", cup.title, entry.trim()));
                    }
                    break;
                }
            }
        }
        trophies
    }

    fn schedule_temporary_message(&self, chat_id: String, message_id: String) {
        let api = Arc::clone(&self.api);
        tokio::spawn(async move {
            tokio::time::sleep(PERSONAL_PANEL_TTL).await;
            if let Err(e) = api.delete_message(&chat_id, &message_id).await {
                debug!(%chat_id, %message_id, error = %e, "failed to delete temporary panel");
            }
        });
    }

    async fn edit_or_reply(
        &self,
        message: &Message,
        text: &str,
        keyboard: Option<InlineKeyboard>,
    ) -> flyzex_core::Result<()> {
        if self
            .api
            .edit_message_text(&message.chat.id, &message.id, text, keyboard.clone())
            .await
            .is_err()
        {
            self.api
                .send_message(&message.chat.id, text, keyboard, Some(&message.id))
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UpdateHandler for GroupHandlers {
    async fn handle(&self, update: &Update) -> flyzex_core::Result<HandlerFlow> {
        match update {
            Update::Message(message) => {
                if !message.chat.is_group() {
                    return Ok(HandlerFlow::Pass);
                }
                if let Some((command, args)) = message.command() {
                    match command.as_str() {
                        "help" => self.cmd_help(message).await?,
                        "myxp" => self.cmd_my_xp(message).await?,
                        "xp" => self.cmd_xp_leaderboard(message).await?,
                        "cups" => self.cmd_cup_leaderboard(message).await?,
                        "add_cup" => self.cmd_add_cup(message, &args).await?,
                        "addxp" => self.cmd_add_xp(message, &args).await?,
                        "panel" => self.cmd_panel(message).await?,
                        _ => return Ok(HandlerFlow::Pass),
                    }
                    return Ok(HandlerFlow::Handled);
                }
                self.track_activity(message).await?;
                Ok(HandlerFlow::Handled)
            }
            Update::CallbackQuery(query) => {
                let data = query.data.as_str();
                if data.starts_with("leaderboard:") {
                    self.cb_leaderboard_refresh(query).await?;
                } else if data.starts_with("group_panel:") {
                    self.cb_panel_action(query).await?;
                } else if data.starts_with("personal_panel:") {
                    self.cb_personal_panel(query).await?;
                } else {
                    return Ok(HandlerFlow::Pass);
                }
                Ok(HandlerFlow::Handled)
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum KeywordAction {
    Profile,
    Leaderboard,
    AdminPanel,
}

fn normalize_keyword(raw: &str) -> String {
    let lowered = raw.to_lowercase().replace('’', "'");
    let condensed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
    condensed
        .trim_matches(|c: char| "!?.,:; ".contains(c))
        .to_string()
}

fn keyword_action(keyword: &str) -> Option<KeywordAction> {
    let action = match keyword {
        "xp" | "my xp" | "current xp" | "level" | "lvl" | "my level" | "profile"
        | "my profile" | "rank" | "my rank" | "trophies" | "cups" => KeywordAction::Profile,
        "leaderboard" => KeywordAction::Leaderboard,
        "moderation panel" | "admin panel" => KeywordAction::AdminPanel,
        "ایکس پی" | "ایکس‌پی" | "ایکس پی من" | "ایکس‌پی من" | "سطح" | "سطح من" | "رتبه"
        | "رتبه من" | "نمایه" | "نمایه من" | "پروفایل" | "پروفایل من" | "جام" | "جام ها"
        | "جام‌ها" | "افتخارات" => KeywordAction::Profile,
        "لیدربورد" => KeywordAction::Leaderboard,
        "پنل ادمین" | "پنل مدیریت" | "کنترل پنل" => KeywordAction::AdminPanel,
        _ => return None,
    };
    Some(action)
}

fn keyword_near_miss(keyword: &str) -> bool {
    const PREFIXES: &[&str] = &[
        "xp",
        "level",
        "rank",
        "profile",
        "leaderboard",
        "trophies",
        "cups",
        "moderation panel",
        "admin panel",
        "ایکس پی",
        "ایکس‌پی",
        "سطح",
        "رتبه",
        "نمایه",
        "پروفایل",
        "جام",
        "لیدربورد",
        "پنل",
    ];
    PREFIXES.iter().any(|prefix| keyword.starts_with(prefix))
}

fn menu_block(menu: &str, texts: &TextPack) -> Option<(&'static str, &'static str)> {
    let block = match menu {
        "ban" => (
            texts.group_panel_menu_ban_title,
            texts.group_panel_menu_ban_description,
        ),
        "mute" => (
            texts.group_panel_menu_mute_title,
            texts.group_panel_menu_mute_description,
        ),
        "xp" => (
            texts.group_panel_menu_xp_title,
            texts.group_panel_menu_xp_description,
        ),
        "cups" => (
            texts.group_panel_menu_cups_title,
            texts.group_panel_menu_cups_description,
        ),
        "admins" => (
            texts.group_panel_menu_admins_title,
            texts.group_panel_menu_admins_description,
        ),
        "settings" => (
            texts.group_panel_menu_settings_title,
            texts.group_panel_menu_settings_description,
        ),
        _ => return None,
    };
    Some(block)
}

fn render_progress_bar(into_level: i64, span: i64, width: usize) -> String {
    let ratio = if span > 0 {
        (into_level as f64 / span as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("{}{}", "▰".repeat(filled), "▱".repeat(width - filled))
}

fn build_help_text(texts: &TextPack, include_admin: bool) -> String {
    let mut lines = vec![
        texts.group_help_intro.to_string(),
        String::new(),
        texts.group_help_member_title.to_string(),
    ];
    let member_commands = [
        ("/help", texts.group_help_cmd_help),
        ("/myxp", texts.group_help_cmd_myxp),
        ("/xp", texts.group_help_cmd_xp),
        ("/cups", texts.group_help_cmd_cups),
    ];
    for (command, description) in member_commands {
        lines.push(format!("<b>{command}</b> — {description}"));
    }
    if include_admin {
        lines.push(String::new());
        lines.push(texts.group_help_admin_title.to_string());
        lines.push(texts.group_help_admin_hint.to_string());
        let admin_commands = [
            ("/panel", texts.group_help_cmd_panel),
            ("/add_cup", texts.group_help_cmd_add_cup),
            ("/addxp", texts.group_help_cmd_addxp),
        ];
        for (command, description) in admin_commands {
            lines.push(format!("<b>{command}</b> — {description}"));
        }
    }
    lines.push(String::new());
    lines.push(texts.group_help_footer.to_string());
    lines.join("\n").trim().to_string()
}
