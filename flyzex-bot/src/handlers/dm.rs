//! Private-chat flows: the guild application form, status and withdrawal,
//! language preferences, and the admin panel (application review, admin
//! roster, question editing, insights).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use flyzex_core::{
    BotApi, BotApiExt, CallbackQuery, HandlerFlow, Message, Update, UpdateHandler, User,
};
use flyzex_storage::{
    select_next_question, Application, ApplicationHistoryEntry, ApplicationResponse,
    ApplicationStatistics, ApplicationStatus, GuildStore, QuestionDefinition, QuestionKind,
};
use tokio::sync::Mutex;
use tracing::{error, warn};

use crate::forms::default_application_form;
use crate::handlers::escape_html;
use crate::localization::{
    default_text_pack, fill, normalize_language_code, text_pack, TextPack, DEFAULT_LANGUAGE_CODE,
};
use crate::services::{Analytics, RateLimitGuard};
use crate::ui::keyboards::{
    admin_management_keyboard, admin_panel_keyboard, admin_questions_keyboard,
    application_review_keyboard, glass_dm_welcome_keyboard, language_options_keyboard,
};

/// What the bot is waiting for from a particular DM user.
#[derive(Default)]
enum DmPending {
    #[default]
    Idle,
    ApplicationFlow(FlowState),
    ReviewNote(ReviewNoteState),
    AdminAction(AdminAction),
    QuestionEdit(QuestionEditState),
}

struct FlowState {
    language: &'static str,
    form: Vec<QuestionDefinition>,
    answers: Vec<ApplicationResponse>,
    answered: HashMap<String, String>,
    pending_question_id: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ReviewAction {
    Approve,
    Deny,
}

struct ReviewNoteState {
    action: ReviewAction,
    target_id: String,
    applicant_language: Option<String>,
    chat_id: String,
    message_id: String,
    application_text: String,
    full_name: String,
}

#[derive(Clone, Copy)]
enum AdminAction {
    Promote,
    Demote,
}

enum QuestionEditKind {
    Add,
    Edit { original_id: String },
    Import,
    Delete { question_id: String },
    Reset,
}

struct QuestionEditState {
    kind: QuestionEditKind,
    language: &'static str,
}

#[derive(Default)]
struct DmSession {
    preferred_language: Option<&'static str>,
    pending: DmPending,
}

pub struct DmHandlers {
    api: Arc<dyn BotApi>,
    store: Arc<GuildStore>,
    analytics: Arc<dyn Analytics>,
    rate_limiter: Arc<RateLimitGuard>,
    owner_id: String,
    review_chat_id: Option<String>,
    webapp_url: Option<String>,
    sessions: Mutex<HashMap<String, DmSession>>,
}

impl DmHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        api: Arc<dyn BotApi>,
        store: Arc<GuildStore>,
        analytics: Arc<dyn Analytics>,
        rate_limiter: Arc<RateLimitGuard>,
        owner_id: String,
        review_chat_id: Option<String>,
        webapp_url: Option<String>,
    ) -> Self {
        Self {
            api,
            store,
            analytics,
            rate_limiter,
            owner_id,
            review_chat_id,
            webapp_url,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    // ---- language & session helpers ---------------------------------------

    async fn stored_language(&self, user_id: &str) -> Option<&'static str> {
        self.sessions
            .lock()
            .await
            .get(user_id)
            .and_then(|session| session.preferred_language)
    }

    async fn texts_for(&self, user: Option<&User>) -> &'static TextPack {
        text_pack(self.active_language(user).await)
    }

    async fn active_language(&self, user: Option<&User>) -> &'static str {
        if let Some(user) = user {
            if let Some(stored) = self.stored_language(&user.id).await {
                return stored;
            }
            if let Some(hint) = user
                .language_code
                .as_deref()
                .and_then(normalize_language_code)
            {
                return hint;
            }
        }
        DEFAULT_LANGUAGE_CODE
    }

    async fn set_pending(&self, user_id: &str, pending: DmPending) {
        self.sessions
            .lock()
            .await
            .entry(user_id.to_string())
            .or_default()
            .pending = pending;
    }

    async fn take_pending(&self, user_id: &str) -> DmPending {
        self.sessions
            .lock()
            .await
            .get_mut(user_id)
            .map(|session| std::mem::take(&mut session.pending))
            .unwrap_or(DmPending::Idle)
    }

    // ---- commands ----------------------------------------------------------

    async fn cmd_start(&self, message: &Message) -> flyzex_core::Result<()> {
        let user = message.from.as_ref();
        let texts = self.texts_for(user).await;
        let is_admin = match user {
            Some(user) => self.store.is_admin(&user.id).await,
            None => false,
        };
        self.analytics.record("dm.start").await;
        self.api
            .send_message(
                &message.chat.id,
                &build_welcome_text(texts),
                Some(glass_dm_welcome_keyboard(
                    texts,
                    self.webapp_url.as_deref(),
                    is_admin,
                )),
                None,
            )
            .await?;
        Ok(())
    }

    async fn cmd_cancel(&self, message: &Message) -> flyzex_core::Result<()> {
        let user = message.from.as_ref();
        if let Some(user) = user {
            self.set_pending(&user.id, DmPending::Idle).await;
        }
        let texts = self.texts_for(user).await;
        self.api
            .reply_text(&message.chat.id, &message.id, texts.dm_cancelled)
            .await?;
        self.analytics.record("dm.cancelled").await;
        Ok(())
    }

    async fn cmd_status(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        let status = self.store.application_status(&user.id).await;
        self.api
            .send_text(&message.chat.id, &render_status_text(status.as_ref(), texts))
            .await?;
        self.analytics.record("dm.status_requested").await;
        Ok(())
    }

    async fn cmd_withdraw(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        self.withdraw(&message.chat.id, user).await
    }

    async fn withdraw(&self, chat_id: &str, user: &User) -> flyzex_core::Result<()> {
        let texts = self.texts_for(Some(user)).await;
        let withdrawn = self
            .store
            .withdraw_application(&user.id)
            .await
            .map_err(storage_error)?;
        self.set_pending(&user.id, DmPending::Idle).await;
        if withdrawn {
            self.api.send_text(chat_id, texts.dm_withdraw_success).await?;
            self.analytics.record("dm.withdraw_completed").await;
        } else {
            self.api
                .send_text(chat_id, texts.dm_withdraw_not_found)
                .await?;
            self.analytics.record("dm.withdraw_missing").await;
        }
        Ok(())
    }

    async fn cmd_pending(&self, message: &Message) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        if !self.store.is_admin(&user.id).await {
            self.api.send_text(&message.chat.id, texts.dm_admin_only).await?;
            return Ok(());
        }
        self.send_pending_applications(&message.chat.id, texts).await
    }

    async fn cmd_admins(&self, message: &Message) -> flyzex_core::Result<()> {
        let texts = self.texts_for(message.from.as_ref()).await;
        let rendered = self.render_admins_list(texts).await;
        if rendered == texts.dm_admin_manage_list_empty {
            self.api.send_text(&message.chat.id, texts.dm_no_admins).await?;
        } else {
            self.api.send_text(&message.chat.id, &rendered).await?;
        }
        Ok(())
    }

    async fn cmd_toggle_admin(
        &self,
        message: &Message,
        args: &[String],
        action: AdminAction,
    ) -> flyzex_core::Result<()> {
        let Some(user) = message.from.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        if user.id != self.owner_id {
            self.api.send_text(&message.chat.id, texts.dm_not_owner).await?;
            return Ok(());
        }
        let Some(target_id) = args.first().map(|raw| raw.trim_start_matches('@')) else {
            self.api
                .send_text(&message.chat.id, texts.dm_admin_enter_user_id)
                .await?;
            return Ok(());
        };
        if target_id.is_empty() {
            self.api
                .send_text(&message.chat.id, texts.dm_admin_invalid_user_id)
                .await?;
            return Ok(());
        }
        self.apply_admin_toggle(&message.chat.id, target_id, action, texts)
            .await
    }

    async fn apply_admin_toggle(
        &self,
        chat_id: &str,
        target_id: &str,
        action: AdminAction,
        texts: &TextPack,
    ) -> flyzex_core::Result<()> {
        let args = [("user_id", target_id)];
        match action {
            AdminAction::Promote => {
                let added = self
                    .store
                    .add_admin(target_id, None, None)
                    .await
                    .map_err(storage_error)?;
                let template = if added {
                    texts.dm_admin_added
                } else {
                    texts.dm_already_admin
                };
                self.api.send_text(chat_id, &fill(template, &args)).await?;
            }
            AdminAction::Demote => {
                let removed = self
                    .store
                    .remove_admin(target_id)
                    .await
                    .map_err(storage_error)?;
                let template = if removed {
                    texts.dm_admin_removed
                } else {
                    texts.dm_not_admin
                };
                self.api.send_text(chat_id, &fill(template, &args)).await?;
            }
        }
        Ok(())
    }

    // ---- application flow --------------------------------------------------

    async fn cb_apply(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let Some(user) = query.from.as_ref() else {
            return Ok(());
        };
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        self.analytics.record("dm.apply_requested").await;

        let status = self.store.application_status(&user.id).await;
        if status.is_some_and(|entry| entry.status == ApplicationStatus::Approved) {
            self.edit_or_send(message, texts.dm_application_already_member, None)
                .await?;
            return Ok(());
        }
        if self.store.has_application(&user.id).await {
            self.edit_or_send(message, texts.dm_application_duplicate, None)
                .await?;
            return Ok(());
        }

        let language = self.active_language(Some(user)).await;
        let form = self.effective_form(language).await;
        let Some(first) = select_next_question(&form, &HashMap::new()) else {
            self.edit_or_send(message, texts.dm_application_no_questions, None)
                .await?;
            return Ok(());
        };
        let first_prompt = first.prompt.clone();
        let pending_id = first.question_id.clone();
        self.set_pending(
            &user.id,
            DmPending::ApplicationFlow(FlowState {
                language,
                form,
                answers: Vec::new(),
                answered: HashMap::new(),
                pending_question_id: Some(pending_id),
            }),
        )
        .await;
        self.edit_or_send(message, texts.dm_application_started, None)
            .await?;
        self.api.send_text(&message.chat.id, &first_prompt).await?;
        Ok(())
    }

    /// One answer inside the application flow. Returns the state back unless
    /// the flow finished.
    async fn flow_step(
        &self,
        message: &Message,
        user: &User,
        mut state: FlowState,
    ) -> flyzex_core::Result<()> {
        let texts = text_pack(state.language);
        let answer = message.text.as_deref().unwrap_or("").trim().to_string();

        let current = match state
            .pending_question_id
            .clone()
            .and_then(|id| state.form.iter().find(|q| q.question_id == id).cloned())
        {
            Some(question) => question,
            None => match select_next_question(&state.form, &state.answered) {
                Some(question) => {
                    let question = question.clone();
                    state.pending_question_id = Some(question.question_id.clone());
                    self.api
                        .reply_text(&message.chat.id, &message.id, &question.prompt)
                        .await?;
                    self.set_pending(&user.id, DmPending::ApplicationFlow(state))
                        .await;
                    return Ok(());
                }
                None => {
                    self.api
                        .reply_text(&message.chat.id, &message.id, texts.dm_application_no_questions)
                        .await?;
                    return Ok(());
                }
            },
        };

        let (canonical, display) = match current.kind {
            QuestionKind::Choice => {
                match current.options.iter().find(|option| option.matches(&answer)) {
                    Some(option) => (
                        option.value.clone(),
                        option.display_label().to_string(),
                    ),
                    None => {
                        let options = current
                            .options
                            .iter()
                            .map(|option| option.display_label())
                            .collect::<Vec<_>>()
                            .join(", ");
                        self.api
                            .reply_text(
                                &message.chat.id,
                                &message.id,
                                &fill(texts.dm_application_invalid_choice, &[("options", &options)]),
                            )
                            .await?;
                        self.set_pending(&user.id, DmPending::ApplicationFlow(state))
                            .await;
                        return Ok(());
                    }
                }
            }
            QuestionKind::Text => {
                if current.required && answer.is_empty() {
                    self.api
                        .reply_text(&message.chat.id, &message.id, texts.dm_application_required)
                        .await?;
                    self.set_pending(&user.id, DmPending::ApplicationFlow(state))
                        .await;
                    return Ok(());
                }
                (answer.clone(), answer.clone())
            }
        };

        state.answers.push(ApplicationResponse {
            question_id: current.question_id.clone(),
            question: current.prompt.clone(),
            answer: display,
        });
        state
            .answered
            .insert(current.question_id.clone(), canonical);

        if let Some(next) = select_next_question(&state.form, &state.answered) {
            state.pending_question_id = Some(next.question_id.clone());
            let prompt = next.prompt.clone();
            self.api
                .reply_text(&message.chat.id, &message.id, &prompt)
                .await?;
            self.set_pending(&user.id, DmPending::ApplicationFlow(state))
                .await;
            return Ok(());
        }

        // Flow complete: persist and notify.
        let aggregated = collapse_responses(&state.answers);
        let summary = format_application_summary(&state.answers, texts);
        let started = Instant::now();
        let stored = self
            .store
            .add_application(
                &user.id,
                user.display_name(),
                user.username.as_deref(),
                &aggregated,
                Some(state.language),
                state.answers.clone(),
            )
            .await;
        self.analytics
            .record_duration("dm.application_store", started.elapsed())
            .await;

        match stored {
            Err(e) => {
                error!(user_id = %user.id, error = %e, "failed to persist application");
                self.analytics.record("dm.application_error").await;
                self.api
                    .reply_text(&message.chat.id, &message.id, texts.error_generic)
                    .await?;
                return Ok(());
            }
            Ok(false) => {
                warn!(user_id = %user.id, "duplicate application prevented");
                self.api
                    .reply_text(&message.chat.id, &message.id, texts.dm_application_duplicate)
                    .await?;
                return Ok(());
            }
            Ok(true) => {}
        }

        self.api
            .reply_text(&message.chat.id, &message.id, &summary)
            .await?;
        self.api
            .reply_text(&message.chat.id, &message.id, texts.dm_application_received)
            .await?;
        self.analytics.record("dm.application_submitted").await;

        if let Some(review_chat) = &self.review_chat_id {
            if let Some(application) = self.store.get_application(&user.id).await {
                let review_texts = default_text_pack();
                self.api
                    .send_message(
                        review_chat,
                        &format_application_entry(&application, review_texts),
                        Some(application_review_keyboard(&user.id, review_texts)),
                        None,
                    )
                    .await?;
            }
        }
        Ok(())
    }

    // ---- status / withdraw / language callbacks ----------------------------

    async fn cb_status(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        let status = self.store.application_status(&user.id).await;
        self.api
            .send_text(&message.chat.id, &render_status_text(status.as_ref(), texts))
            .await?;
        self.analytics.record("dm.status_requested").await;
        Ok(())
    }

    async fn cb_withdraw(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        self.withdraw(&message.chat.id, user).await
    }

    async fn cb_language_menu(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        let user = query.from.as_ref();
        let texts = self.texts_for(user).await;
        let active = match user {
            Some(user) => self.stored_language(&user.id).await,
            None => None,
        };
        self.edit_or_send(
            message,
            texts.dm_language_menu_title,
            Some(language_options_keyboard(active, texts)),
        )
        .await?;
        self.analytics.record("dm.language_menu_opened").await;
        Ok(())
    }

    async fn cb_close_language_menu(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        let user = query.from.as_ref();
        let texts = self.texts_for(user).await;
        let is_admin = match user {
            Some(user) => self.store.is_admin(&user.id).await,
            None => false,
        };
        self.edit_or_send(
            message,
            &build_welcome_text(texts),
            Some(glass_dm_welcome_keyboard(
                texts,
                self.webapp_url.as_deref(),
                is_admin,
            )),
        )
        .await?;
        self.analytics.record("dm.language_menu_closed").await;
        Ok(())
    }

    async fn cb_set_language(&self, query: &CallbackQuery, code: &str) -> flyzex_core::Result<()> {
        let Some(user) = query.from.as_ref() else {
            return Ok(());
        };
        let normalized = normalize_language_code(code).unwrap_or(DEFAULT_LANGUAGE_CODE);
        self.sessions
            .lock()
            .await
            .entry(user.id.clone())
            .or_default()
            .preferred_language = Some(normalized);
        let texts = text_pack(normalized);
        self.analytics.record("dm.language_updated").await;
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        self.api
            .send_text(&message.chat.id, texts.dm_language_updated)
            .await?;
        let is_admin = self.store.is_admin(&user.id).await;
        self.edit_or_send(
            message,
            &build_welcome_text(texts),
            Some(glass_dm_welcome_keyboard(
                texts,
                self.webapp_url.as_deref(),
                is_admin,
            )),
        )
        .await?;
        Ok(())
    }

    // ---- admin panel -------------------------------------------------------

    async fn cb_admin_panel(&self, query: &CallbackQuery) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        if !self.store.is_admin(&user.id).await {
            self.api.send_text(&message.chat.id, texts.dm_admin_only).await?;
            return Ok(());
        }
        self.edit_or_send(
            message,
            &build_admin_panel_text(texts),
            Some(admin_panel_keyboard(texts, self.webapp_url.as_deref())),
        )
        .await?;
        self.analytics.record("dm.admin_panel_opened").await;
        Ok(())
    }

    async fn cb_admin_panel_action(
        &self,
        query: &CallbackQuery,
        action: &str,
    ) -> flyzex_core::Result<()> {
        let (Some(user), Some(message)) = (query.from.as_ref(), query.message.as_ref()) else {
            return Ok(());
        };
        let texts = self.texts_for(Some(user)).await;
        if !self.store.is_admin(&user.id).await {
            self.api.send_text(&message.chat.id, texts.dm_admin_only).await?;
            return Ok(());
        }
        let chat_id = message.chat.id.clone();

        match action {
            "view_applications" => {
                self.send_pending_applications(&chat_id, texts).await?;
                self.analytics.record("dm.admin_panel_view_applications").await;
            }
            "view_members" => {
                let members = self
                    .store
                    .applicants_by_status(ApplicationStatus::Approved)
                    .await;
                self.api
                    .send_text(&chat_id, &render_members_list(&members, texts))
                    .await?;
                self.analytics.record("dm.admin_panel_view_members").await;
            }
            "insights" => {
                let stats = self.store.application_statistics().await;
                self.api
                    .send_text(&chat_id, &render_insights(&stats, texts))
                    .await?;
                self.analytics.record("dm.admin_panel_insights").await;
            }
            "more_tools" => {
                match &self.webapp_url {
                    Some(url) => {
                        self.api
                            .send_text(
                                &chat_id,
                                &fill(texts.dm_admin_panel_more_tools_text, &[("webapp_url", url)]),
                            )
                            .await?
                    }
                    None => {
                        self.api
                            .send_text(&chat_id, texts.dm_admin_panel_more_tools_no_webapp)
                            .await?
                    }
                };
                self.analytics.record("dm.admin_panel_more_tools").await;
            }
            "back" => {
                self.edit_or_send(
                    message,
                    &build_welcome_text(texts),
                    Some(glass_dm_welcome_keyboard(
                        texts,
                        self.webapp_url.as_deref(),
                        true,
                    )),
                )
                .await?;
                self.analytics.record("dm.admin_panel_back").await;
            }
            "back_to_panel" => {
                self.edit_or_send(
                    message,
                    &build_admin_panel_text(texts),
                    Some(admin_panel_keyboard(texts, self.webapp_url.as_deref())),
                )
                .await?;
            }
            action if action.starts_with("manage_admins") => {
                self.admin_panel_manage_admins(message, user, action, texts)
                    .await?;
            }
            action if action.starts_with("manage_questions") => {
                self.admin_panel_manage_questions(message, user, action, texts)
                    .await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn admin_panel_manage_admins(
        &self,
        message: &Message,
        user: &User,
        action: &str,
        texts: &'static TextPack,
    ) -> flyzex_core::Result<()> {
        if user.id != self.owner_id {
            self.api.send_text(&message.chat.id, texts.dm_not_owner).await?;
            return Ok(());
        }
        let sub_action = action
            .strip_prefix("manage_admins")
            .map(|rest| rest.trim_start_matches(':'))
            .unwrap_or("");
        match sub_action {
            "" => {
                let listing = self.render_admins_list(texts).await;
                let management_text = [
                    texts.dm_admin_manage_title,
                    texts.dm_admin_manage_intro,
                    listing.as_str(),
                ]
                .join("\n\n");
                self.edit_or_send(message, &management_text, Some(admin_management_keyboard(texts)))
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_admins_opened")
                    .await;
            }
            "add" => {
                self.set_pending(&user.id, DmPending::AdminAction(AdminAction::Promote))
                    .await;
                self.api
                    .send_text(&message.chat.id, texts.dm_admin_panel_add_admin_prompt)
                    .await?;
            }
            "remove" => {
                self.set_pending(&user.id, DmPending::AdminAction(AdminAction::Demote))
                    .await;
                self.api
                    .send_text(&message.chat.id, texts.dm_admin_enter_user_id)
                    .await?;
            }
            "list" => {
                let listing = self.render_admins_list(texts).await;
                self.api.send_text(&message.chat.id, &listing).await?;
            }
            _ => {}
        }
        Ok(())
    }

    async fn admin_panel_manage_questions(
        &self,
        message: &Message,
        user: &User,
        action: &str,
        texts: &'static TextPack,
    ) -> flyzex_core::Result<()> {
        let sub_action = action
            .strip_prefix("manage_questions")
            .map(|rest| rest.trim_start_matches(':'))
            .unwrap_or("");
        let language = self.active_language(Some(user)).await;
        let form = self.effective_form(language).await;
        let chat_id = message.chat.id.clone();

        match sub_action {
            "" | "menu" => {
                let menu_text = render_questions_menu(&form, language, texts);
                self.edit_or_send(message, &menu_text, Some(admin_questions_keyboard(texts, &form)))
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_opened")
                    .await;
            }
            "back" => {
                self.edit_or_send(
                    message,
                    &build_admin_panel_text(texts),
                    Some(admin_panel_keyboard(texts, self.webapp_url.as_deref())),
                )
                .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_back")
                    .await;
            }
            "add" => {
                let template = serde_json::to_string_pretty(&question_template(texts))
                    .unwrap_or_default();
                let prompt = fill(
                    texts.dm_admin_questions_add_prompt,
                    &[
                        ("template", &escape_html(&template)),
                        ("cancel_keyword", texts.dm_admin_questions_cancel_keyword),
                    ],
                );
                self.api.send_text(&chat_id, &prompt).await?;
                self.set_pending(
                    &user.id,
                    DmPending::QuestionEdit(QuestionEditState {
                        kind: QuestionEditKind::Add,
                        language,
                    }),
                )
                .await;
                self.analytics
                    .record("dm.admin_panel_manage_questions_prompt")
                    .await;
            }
            "import" => {
                let sample = serde_json::to_string_pretty(&vec![question_template(texts)])
                    .unwrap_or_default();
                let prompt = fill(
                    texts.dm_admin_questions_import_prompt,
                    &[
                        ("template", &escape_html(&sample)),
                        ("cancel_keyword", texts.dm_admin_questions_cancel_keyword),
                    ],
                );
                self.api.send_text(&chat_id, &prompt).await?;
                self.set_pending(
                    &user.id,
                    DmPending::QuestionEdit(QuestionEditState {
                        kind: QuestionEditKind::Import,
                        language,
                    }),
                )
                .await;
                self.analytics
                    .record("dm.admin_panel_manage_questions_prompt")
                    .await;
            }
            "export" => {
                let export = serde_json::to_string_pretty(&form).unwrap_or_default();
                let text = format!(
                    "{}\n\n<pre>{}</pre>",
                    texts.dm_admin_questions_export_success,
                    escape_html(&export)
                );
                self.api.send_text(&chat_id, &text).await?;
            }
            "reset" => {
                let prompt = fill(
                    texts.dm_admin_questions_reset_prompt,
                    &[
                        ("reset_keyword", texts.dm_admin_questions_reset_keyword),
                        ("cancel_keyword", texts.dm_admin_questions_cancel_keyword),
                    ],
                );
                self.api.send_text(&chat_id, &prompt).await?;
                self.set_pending(
                    &user.id,
                    DmPending::QuestionEdit(QuestionEditState {
                        kind: QuestionEditKind::Reset,
                        language,
                    }),
                )
                .await;
                self.analytics
                    .record("dm.admin_panel_manage_questions_prompt")
                    .await;
            }
            sub if sub.starts_with("edit_index:") || sub.starts_with("edit:") => {
                let definition = resolve_question(&form, sub);
                let Some(definition) = definition else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_not_found)
                        .await?;
                    return Ok(());
                };
                let payload = serde_json::to_string_pretty(definition).unwrap_or_default();
                let prompt = fill(
                    texts.dm_admin_questions_edit_prompt,
                    &[
                        ("template", &escape_html(&payload)),
                        ("cancel_keyword", texts.dm_admin_questions_cancel_keyword),
                    ],
                );
                self.api.send_text(&chat_id, &prompt).await?;
                self.set_pending(
                    &user.id,
                    DmPending::QuestionEdit(QuestionEditState {
                        kind: QuestionEditKind::Edit {
                            original_id: definition.question_id.clone(),
                        },
                        language,
                    }),
                )
                .await;
                self.analytics
                    .record("dm.admin_panel_manage_questions_prompt")
                    .await;
            }
            sub if sub.starts_with("delete_index:") || sub.starts_with("delete:") => {
                let definition = resolve_question(&form, sub);
                let Some(definition) = definition else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_not_found)
                        .await?;
                    return Ok(());
                };
                let prompt = fill(
                    texts.dm_admin_questions_delete_prompt,
                    &[
                        ("title", &escape_html(definition.display_title())),
                        ("question_id", &escape_html(&definition.question_id)),
                        ("confirm_keyword", texts.dm_admin_questions_delete_keyword),
                        ("cancel_keyword", texts.dm_admin_questions_cancel_keyword),
                    ],
                );
                self.api.send_text(&chat_id, &prompt).await?;
                self.set_pending(
                    &user.id,
                    DmPending::QuestionEdit(QuestionEditState {
                        kind: QuestionEditKind::Delete {
                            question_id: definition.question_id.clone(),
                        },
                        language,
                    }),
                )
                .await;
                self.analytics
                    .record("dm.admin_panel_manage_questions_prompt")
                    .await;
            }
            _ => {
                self.api
                    .send_text(&chat_id, texts.dm_admin_questions_not_found)
                    .await?;
            }
        }
        Ok(())
    }

    // ---- application review ------------------------------------------------

    async fn cb_application_action(
        &self,
        query: &CallbackQuery,
        payload: &str,
    ) -> flyzex_core::Result<()> {
        let Some(user) = query.from.as_ref() else {
            return Ok(());
        };
        let admin_texts = self.texts_for(Some(user)).await;
        let Some(message) = query.message.as_ref() else {
            return Ok(());
        };
        if !self.store.is_admin(&user.id).await {
            self.edit_or_send(message, admin_texts.dm_admin_only, None).await?;
            return Ok(());
        }

        if payload == "skip" {
            let frozen = message.text.clone().unwrap_or_default();
            self.api
                .edit_message_text(&message.chat.id, &message.id, &frozen, None)
                .await
                .ok();
            self.analytics.record("dm.admin_skip_application").await;
            return Ok(());
        }

        let Some((target_id, action_raw)) = payload.rsplit_once(':') else {
            return Ok(());
        };
        let action = match action_raw {
            "approve" => ReviewAction::Approve,
            "reject" | "deny" => ReviewAction::Deny,
            _ => return Ok(()),
        };

        let application = self
            .store
            .pop_application(target_id)
            .await
            .map_err(storage_error)?;
        let Some(application) = application else {
            self.edit_or_send(message, admin_texts.dm_no_pending, None).await?;
            return Ok(());
        };

        let application_text = format_application_entry(&application, admin_texts);
        let prompt_template = match action {
            ReviewAction::Approve => admin_texts.dm_application_note_prompt_approve,
            ReviewAction::Deny => admin_texts.dm_application_note_prompt_deny,
        };
        let prompt = fill(
            prompt_template,
            &[
                ("full_name", &escape_html(&application.full_name)),
                ("user_id", target_id),
            ],
        );

        self.set_pending(
            &user.id,
            DmPending::ReviewNote(ReviewNoteState {
                action,
                target_id: target_id.to_string(),
                applicant_language: application.language_code.clone(),
                chat_id: message.chat.id.clone(),
                message_id: message.id.clone(),
                application_text: application_text.clone(),
                full_name: application.full_name.clone(),
            }),
        )
        .await;

        let text = format!(
            "{application_text}\n\n{prompt}\n{}",
            admin_texts.dm_application_note_skip_hint
        );
        self.api
            .edit_message_text(&message.chat.id, &message.id, &text, None)
            .await?;
        Ok(())
    }

    async fn process_review_note(
        &self,
        message: &Message,
        user: &User,
        state: ReviewNoteState,
    ) -> flyzex_core::Result<()> {
        let admin_texts = self.texts_for(Some(user)).await;
        let applicant_texts = state
            .applicant_language
            .as_deref()
            .map(text_pack)
            .unwrap_or_else(default_text_pack);

        let note_raw = message.text.as_deref().unwrap_or("").trim();
        let is_skip = note_raw.is_empty()
            || note_raw.to_lowercase() == admin_texts.dm_application_note_skip_keyword.to_lowercase();
        let note = if is_skip { None } else { Some(note_raw) };

        let status = match state.action {
            ReviewAction::Approve => ApplicationStatus::Approved,
            ReviewAction::Deny => ApplicationStatus::Denied,
        };
        self.store
            .set_application_status(&state.target_id, status, note, state.applicant_language.as_deref())
            .await
            .map_err(storage_error)?;

        let mut applicant_message = match state.action {
            ReviewAction::Approve => applicant_texts.dm_application_approved_user.to_string(),
            ReviewAction::Deny => applicant_texts.dm_application_denied_user.to_string(),
        };
        if let Some(note) = note {
            applicant_message = format!(
                "{applicant_message}\n\n📝 {}: {note}",
                applicant_texts.dm_application_note_label
            );
        }
        if let Err(e) = self.api.send_text(&state.target_id, &applicant_message).await {
            error!(user_id = %state.target_id, error = %e, "failed to notify applicant");
        }

        let confirmation_template = match state.action {
            ReviewAction::Approve => admin_texts.dm_application_note_confirm_approve,
            ReviewAction::Deny => admin_texts.dm_application_note_confirm_deny,
        };
        let confirmation = fill(
            confirmation_template,
            &[
                ("full_name", &escape_html(&state.full_name)),
                ("user_id", &state.target_id),
            ],
        );
        let mut final_text = format!("{}\n\n{confirmation}", state.application_text);
        if let Some(note) = note {
            final_text = format!(
                "{final_text}\n📝 {}: {}",
                admin_texts.dm_application_note_label,
                escape_html(note)
            );
        }
        if let Err(e) = self
            .api
            .edit_message_text(&state.chat_id, &state.message_id, &final_text, None)
            .await
        {
            error!(user_id = %state.target_id, error = %e, "failed to edit review card");
        }

        let event = match state.action {
            ReviewAction::Approve => "dm.admin_application_approved",
            ReviewAction::Deny => "dm.admin_application_denied",
        };
        self.analytics.record(event).await;
        Ok(())
    }

    // ---- pending-text dispatch --------------------------------------------

    async fn process_admin_action(
        &self,
        message: &Message,
        user: &User,
        action: AdminAction,
    ) -> flyzex_core::Result<()> {
        if user.id != self.owner_id {
            return Ok(());
        }
        let texts = self.texts_for(Some(user)).await;
        let payload = message.text.as_deref().unwrap_or("").trim();
        let target = payload.trim_start_matches('@');
        if target.is_empty() || target.contains(char::is_whitespace) {
            self.api
                .reply_text(&message.chat.id, &message.id, texts.dm_admin_invalid_user_id)
                .await?;
            return Ok(());
        }
        self.apply_admin_toggle(&message.chat.id, target, action, texts)
            .await?;
        let event = match action {
            AdminAction::Promote => "dm.admin_panel_promote_completed",
            AdminAction::Demote => "dm.admin_panel_demote_completed",
        };
        self.analytics.record(event).await;
        Ok(())
    }

    async fn process_question_edit(
        &self,
        message: &Message,
        user: &User,
        state: QuestionEditState,
    ) -> flyzex_core::Result<()> {
        let texts = self.texts_for(Some(user)).await;
        let payload = message.text.as_deref().unwrap_or("").trim().to_string();
        let cancel = texts.dm_admin_questions_cancel_keyword.to_lowercase();
        let chat_id = message.chat.id.clone();

        if payload.is_empty() || payload.to_lowercase() == cancel {
            self.api
                .send_text(&chat_id, texts.dm_admin_questions_cancelled)
                .await?;
            return Ok(());
        }

        match state.kind {
            QuestionEditKind::Add => {
                let Some(definition) = parse_question_payload(&payload) else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_invalid_payload)
                        .await?;
                    return Ok(());
                };
                self.seed_form_if_missing(state.language).await?;
                let label = definition.display_title().to_string();
                self.store
                    .upsert_question(state.language, definition)
                    .await
                    .map_err(storage_error)?;
                self.api
                    .send_text(&chat_id, &fill(texts.dm_admin_questions_saved, &[("label", &label)]))
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_saved")
                    .await;
            }
            QuestionEditKind::Edit { original_id } => {
                let Some(definition) = parse_question_payload(&payload) else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_invalid_payload)
                        .await?;
                    return Ok(());
                };
                self.seed_form_if_missing(state.language).await?;
                if !original_id.is_empty() && definition.question_id != original_id {
                    self.store
                        .delete_question(state.language, &original_id)
                        .await
                        .map_err(storage_error)?;
                }
                let label = definition.display_title().to_string();
                self.store
                    .upsert_question(state.language, definition)
                    .await
                    .map_err(storage_error)?;
                self.api
                    .send_text(&chat_id, &fill(texts.dm_admin_questions_saved, &[("label", &label)]))
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_saved")
                    .await;
            }
            QuestionEditKind::Import => {
                let Ok(definitions) = serde_json::from_str::<Vec<QuestionDefinition>>(&payload)
                else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_invalid_payload)
                        .await?;
                    return Ok(());
                };
                if definitions.iter().any(|d| d.question_id.is_empty()) {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_invalid_payload)
                        .await?;
                    return Ok(());
                }
                let count = definitions.len().to_string();
                self.store
                    .import_form(state.language, definitions)
                    .await
                    .map_err(storage_error)?;
                self.api
                    .send_text(
                        &chat_id,
                        &fill(texts.dm_admin_questions_import_success, &[("count", &count)]),
                    )
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_saved")
                    .await;
            }
            QuestionEditKind::Delete { question_id } => {
                let confirm = texts.dm_admin_questions_delete_keyword.to_lowercase();
                if payload.to_lowercase() != confirm {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_cancelled)
                        .await?;
                    return Ok(());
                }
                self.seed_form_if_missing(state.language).await?;
                let deleted = self
                    .store
                    .delete_question(state.language, &question_id)
                    .await
                    .map_err(storage_error)?;
                if deleted {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_deleted)
                        .await?;
                    self.analytics
                        .record("dm.admin_panel_manage_questions_saved")
                        .await;
                } else {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_cancelled)
                        .await?;
                }
            }
            QuestionEditKind::Reset => {
                let reset = texts.dm_admin_questions_reset_keyword.to_lowercase();
                if payload.to_lowercase() != reset {
                    self.api
                        .send_text(&chat_id, texts.dm_admin_questions_cancelled)
                        .await?;
                    return Ok(());
                }
                self.store
                    .reset_form(state.language)
                    .await
                    .map_err(storage_error)?;
                self.api
                    .send_text(&chat_id, texts.dm_admin_questions_reset_language_success)
                    .await?;
                self.analytics
                    .record("dm.admin_panel_manage_questions_saved")
                    .await;
            }
        }
        Ok(())
    }

    async fn handle_text(&self, message: &Message) -> flyzex_core::Result<HandlerFlow> {
        let Some(user) = message.from.as_ref().cloned() else {
            return Ok(HandlerFlow::Handled);
        };
        match self.take_pending(&user.id).await {
            DmPending::ReviewNote(state) => {
                self.process_review_note(message, &user, state).await?;
            }
            DmPending::QuestionEdit(state) => {
                self.process_question_edit(message, &user, state).await?;
            }
            DmPending::AdminAction(action) => {
                self.process_admin_action(message, &user, action).await?;
            }
            DmPending::ApplicationFlow(state) => {
                let texts = self.texts_for(Some(&user)).await;
                let status = self.store.application_status(&user.id).await;
                if status.is_some_and(|entry| entry.status == ApplicationStatus::Approved) {
                    self.api
                        .reply_text(&message.chat.id, &message.id, texts.dm_application_already_member)
                        .await?;
                    return Ok(HandlerFlow::Handled);
                }
                if !self.rate_limiter.is_allowed(&user.id).await {
                    self.analytics.record("dm.rate_limited").await;
                    self.api
                        .reply_text(&message.chat.id, &message.id, texts.dm_rate_limited)
                        .await?;
                    // Flow state survives a throttled message.
                    self.set_pending(&user.id, DmPending::ApplicationFlow(state))
                        .await;
                    return Ok(HandlerFlow::Handled);
                }
                self.flow_step(message, &user, state).await?;
            }
            DmPending::Idle => {}
        }
        Ok(HandlerFlow::Handled)
    }

    // ---- rendering helpers -------------------------------------------------

    async fn effective_form(&self, language: &str) -> Vec<QuestionDefinition> {
        match self.store.application_form(language).await {
            Some(form) if !form.is_empty() => form,
            _ => default_application_form(text_pack(language)),
        }
    }

    /// Before the first stored edit, materialize the built-in default so the
    /// admin edits what they see.
    async fn seed_form_if_missing(&self, language: &'static str) -> flyzex_core::Result<()> {
        if self.store.application_form(language).await.is_none() {
            self.store
                .import_form(language, default_application_form(text_pack(language)))
                .await
                .map_err(storage_error)?;
        }
        Ok(())
    }

    async fn send_pending_applications(
        &self,
        chat_id: &str,
        texts: &TextPack,
    ) -> flyzex_core::Result<()> {
        let pending = self.store.pending_applications().await;
        if pending.is_empty() {
            self.api.send_text(chat_id, texts.dm_no_pending).await?;
            return Ok(());
        }
        self.analytics.record("dm.admin_pending_list").await;
        for application in pending.iter().take(5) {
            self.api
                .send_message(
                    chat_id,
                    &format_application_entry(application, texts),
                    Some(application_review_keyboard(&application.user_id, texts)),
                    None,
                )
                .await?;
        }
        Ok(())
    }

    async fn render_admins_list(&self, texts: &TextPack) -> String {
        let details = self.store.admin_details().await;
        if details.is_empty() {
            return texts.dm_admin_manage_list_empty.to_string();
        }
        let mut lines = vec![texts.dm_admin_manage_list_header.to_string()];
        for admin in &details {
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
                parts.push(texts.dm_admin_manage_list_unknown.to_string());
            }
            lines.push(fill(
                texts.dm_admin_manage_list_entry,
                &[
                    ("display", &parts.join(" / ")),
                    ("user_id", &escape_html(&admin.user_id)),
                ],
            ));
        }
        lines.join("\n")
    }

    async fn edit_or_send(
        &self,
        message: &Message,
        text: &str,
        keyboard: Option<flyzex_core::InlineKeyboard>,
    ) -> flyzex_core::Result<()> {
        if self
            .api
            .edit_message_text(&message.chat.id, &message.id, text, keyboard.clone())
            .await
            .is_err()
        {
            self.api
                .send_message(&message.chat.id, text, keyboard, None)
                .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UpdateHandler for DmHandlers {
    async fn handle(&self, update: &Update) -> flyzex_core::Result<HandlerFlow> {
        match update {
            Update::Message(message) => {
                if !message.chat.is_private() {
                    return Ok(HandlerFlow::Pass);
                }
                if let Some((command, args)) = message.command() {
                    match command.as_str() {
                        "start" => self.cmd_start(message).await?,
                        "cancel" => self.cmd_cancel(message).await?,
                        "status" => self.cmd_status(message).await?,
                        "withdraw" => self.cmd_withdraw(message).await?,
                        "pending" => self.cmd_pending(message).await?,
                        "admins" => self.cmd_admins(message).await?,
                        "promote" => {
                            self.cmd_toggle_admin(message, &args, AdminAction::Promote)
                                .await?
                        }
                        "demote" => {
                            self.cmd_toggle_admin(message, &args, AdminAction::Demote)
                                .await?
                        }
                        _ => return Ok(HandlerFlow::Pass),
                    }
                    return Ok(HandlerFlow::Handled);
                }
                if message.text.is_some() {
                    return self.handle_text(message).await;
                }
                Ok(HandlerFlow::Pass)
            }
            Update::CallbackQuery(query) => {
                let data = query.data.as_str();
                match data {
                    "apply_for_guild" => self.cb_apply(query).await?,
                    "application_status" => self.cb_status(query).await?,
                    "application_withdraw" => self.cb_withdraw(query).await?,
                    "language_menu" => self.cb_language_menu(query).await?,
                    "close_language_menu" => self.cb_close_language_menu(query).await?,
                    "admin_panel" => self.cb_admin_panel(query).await?,
                    _ => {
                        if let Some(code) = data.strip_prefix("set_language:") {
                            self.cb_set_language(query, code).await?;
                        } else if let Some(action) = data.strip_prefix("admin_panel:") {
                            self.cb_admin_panel_action(query, action).await?;
                        } else if let Some(payload) = data.strip_prefix("application:") {
                            self.cb_application_action(query, payload).await?;
                        } else {
                            return Ok(HandlerFlow::Pass);
                        }
                    }
                }
                Ok(HandlerFlow::Handled)
            }
        }
    }
}

fn storage_error(e: flyzex_storage::StorageError) -> flyzex_core::CoreError {
    flyzex_core::CoreError::Storage(e.to_string())
}

fn build_welcome_text(texts: &TextPack) -> String {
    format!("{}\n\n{}", texts.dm_welcome, texts.glass_panel_caption)
}

fn build_admin_panel_text(texts: &TextPack) -> String {
    format!("{}\n\n{}", texts.dm_admin_panel_intro, texts.glass_panel_caption)
}

fn question_template(texts: &TextPack) -> QuestionDefinition {
    QuestionDefinition {
        question_id: "new_question_id".to_string(),
        title: Some(texts.dm_admin_questions_new_title.to_string()),
        prompt: texts.dm_admin_questions_new_prompt.to_string(),
        kind: QuestionKind::Text,
        order: 1,
        required: true,
        options: Vec::new(),
        depends_on: None,
        depends_value: None,
    }
}

fn parse_question_payload(payload: &str) -> Option<QuestionDefinition> {
    let definition: QuestionDefinition = serde_json::from_str(payload).ok()?;
    if definition.question_id.is_empty() {
        return None;
    }
    Some(definition)
}

fn resolve_question<'a>(
    form: &'a [QuestionDefinition],
    sub_action: &str,
) -> Option<&'a QuestionDefinition> {
    if let Some(raw_index) = sub_action
        .strip_prefix("edit_index:")
        .or_else(|| sub_action.strip_prefix("delete_index:"))
    {
        let index: usize = raw_index.parse().ok()?;
        return form.get(index);
    }
    let question_id = sub_action
        .strip_prefix("edit:")
        .or_else(|| sub_action.strip_prefix("delete:"))?;
    form.iter().find(|d| d.question_id == question_id)
}

fn render_questions_menu(
    form: &[QuestionDefinition],
    language: &str,
    texts: &TextPack,
) -> String {
    let title = fill(
        texts.dm_admin_questions_menu_title,
        &[("language", &escape_html(texts.language_label(language)))],
    );
    let intro = fill(
        texts.dm_admin_questions_menu_intro,
        &[("reset_keyword", &escape_html(texts.dm_admin_questions_reset_keyword))],
    );
    let listing = if form.is_empty() {
        texts.dm_admin_questions_empty.to_string()
    } else {
        form.iter()
            .map(|definition| {
                fill(
                    texts.dm_admin_questions_list_item,
                    &[
                        ("order", &definition.order.to_string()),
                        ("title", &escape_html(definition.display_title())),
                        ("question_id", &escape_html(&definition.question_id)),
                        (
                            "kind",
                            match definition.kind {
                                QuestionKind::Text => "text",
                                QuestionKind::Choice => "choice",
                            },
                        ),
                    ],
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    [title, intro, listing].join("\n\n")
}

/// Renders one application card with every answer escaped.
pub fn format_application_entry(application: &Application, texts: &TextPack) -> String {
    let username_display = match application
        .username
        .as_deref()
        .map(|u| u.trim_start_matches('@'))
        .filter(|u| !u.is_empty())
    {
        Some(username) => format!("@{username}"),
        None => "—".to_string(),
    };
    let answers = if application.responses.is_empty() {
        if application.answer.is_empty() {
            "—".to_string()
        } else {
            escape_html(&application.answer)
        }
    } else {
        application
            .responses
            .iter()
            .map(|response| {
                fill(
                    texts.dm_application_summary_item,
                    &[
                        ("question", &escape_html(&response.question)),
                        (
                            "answer",
                            &if response.answer.is_empty() {
                                "—".to_string()
                            } else {
                                escape_html(&response.answer)
                            },
                        ),
                    ],
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };
    fill(
        texts.dm_application_item,
        &[
            ("full_name", &escape_html(&application.full_name)),
            ("username", &escape_html(&username_display)),
            ("user_id", &application.user_id),
            ("answers", &answers),
            ("created_at", &escape_html(&application.created_at)),
        ],
    )
}

/// Renders the /status text for an optional history entry.
pub fn render_status_text(status: Option<&ApplicationHistoryEntry>, texts: &TextPack) -> String {
    let Some(status) = status else {
        return texts.dm_status_none.to_string();
    };
    let label = match status.status {
        ApplicationStatus::Pending => texts.dm_status_pending.to_string(),
        ApplicationStatus::Approved => texts.dm_status_approved.to_string(),
        ApplicationStatus::Denied => texts.dm_status_denied.to_string(),
        ApplicationStatus::Withdrawn => texts.dm_status_withdrawn.to_string(),
    };
    let updated_at = escape_html(&status.updated_at);
    match status.note.as_deref() {
        Some(note) => fill(
            texts.dm_status_template_with_note,
            &[
                ("status", &label),
                ("updated_at", &updated_at),
                ("note", &escape_html(note)),
                ("last_updated_label", texts.dm_status_last_updated_label),
            ],
        ),
        None => fill(
            texts.dm_status_template,
            &[
                ("status", &label),
                ("updated_at", &updated_at),
                ("last_updated_label", texts.dm_status_last_updated_label),
            ],
        ),
    }
}

fn render_members_list(entries: &[(String, ApplicationHistoryEntry)], texts: &TextPack) -> String {
    if entries.is_empty() {
        return texts.dm_admin_panel_members_empty.to_string();
    }
    let members = entries
        .iter()
        .take(10)
        .map(|(user_id, history)| {
            format!(
                "• <code>{}</code> – {}",
                escape_html(user_id),
                escape_html(&history.updated_at)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    fill(
        texts.dm_admin_panel_members_header,
        &[("count", &entries.len().to_string()), ("members", &members)],
    )
}

fn render_insights(stats: &ApplicationStatistics, texts: &TextPack) -> String {
    let count_of = |status: &str| {
        stats
            .status_counts
            .get(status)
            .copied()
            .unwrap_or(0)
            .to_string()
    };
    let counts = fill(
        texts.dm_admin_panel_insights_counts,
        &[
            ("pending", &stats.pending.to_string()),
            ("approved", &count_of("approved")),
            ("denied", &count_of("denied")),
            ("withdrawn", &count_of("withdrawn")),
            ("total", &stats.total.to_string()),
            (
                "average_length",
                &format!("{:.1}", stats.average_pending_answer_length),
            ),
        ],
    );

    let languages_block = if stats.languages.is_empty() {
        texts.dm_admin_panel_insights_languages_empty.to_string()
    } else {
        let mut rows: Vec<_> = stats.languages.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        let listing = rows
            .iter()
            .map(|(code, count)| format!("• {}: {count}", escape_html(code)))
            .collect::<Vec<_>>()
            .join("\n");
        fill(
            texts.dm_admin_panel_insights_languages,
            &[("languages", &listing)],
        )
    };

    let recent_block = if stats.recent_updates.is_empty() {
        texts.dm_admin_panel_insights_recent_empty.to_string()
    } else {
        let listing = stats
            .recent_updates
            .iter()
            .map(|entry| {
                format!(
                    "• <code>{}</code> – {} ({})",
                    escape_html(&entry.user_id),
                    entry.status.as_str(),
                    escape_html(&entry.updated_at)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        fill(texts.dm_admin_panel_insights_recent, &[("items", &listing)])
    };

    [
        texts.dm_admin_panel_insights_title.to_string(),
        counts,
        languages_block,
        recent_block,
    ]
    .join("\n")
}

fn format_application_summary(responses: &[ApplicationResponse], texts: &TextPack) -> String {
    let mut lines = vec![texts.dm_application_summary_title.to_string()];
    for response in responses {
        lines.push(fill(
            texts.dm_application_summary_item,
            &[
                ("question", &escape_html(&response.question)),
                (
                    "answer",
                    &if response.answer.is_empty() {
                        "—".to_string()
                    } else {
                        escape_html(&response.answer)
                    },
                ),
            ],
        ));
    }
    lines.join("\n")
}

fn collapse_responses(responses: &[ApplicationResponse]) -> String {
    responses
        .iter()
        .map(|response| {
            format!("{} {}", response.question.trim(), response.answer.trim())
                .trim()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
