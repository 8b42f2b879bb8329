//! Localized texts for every bot surface.
//!
//! One [`TextPack`] per language; Persian is the default. Templates carry
//! `{name}` placeholders rendered by [`fill`]. Callers escape user-supplied
//! values before substitution; pack texts themselves are trusted.

/// Languages the bot ships texts for.
pub const AVAILABLE_LANGUAGE_CODES: &[&str] = &["fa", "en"];

/// Used when the user expressed no preference and the platform gave no hint.
pub const DEFAULT_LANGUAGE_CODE: &str = "fa";

/// Maps platform language hints (`fa-IR`, `en_US`, …) to a supported code.
pub fn normalize_language_code(code: &str) -> Option<&'static str> {
    let base = code
        .split(|c| c == '-' || c == '_')
        .next()
        .unwrap_or("")
        .to_lowercase();
    match base.as_str() {
        "fa" | "fas" | "per" => Some("fa"),
        "en" | "eng" => Some("en"),
        _ => None,
    }
}

/// Pack for a language code, falling back to the default pack.
pub fn text_pack(code: &str) -> &'static TextPack {
    match normalize_language_code(code) {
        Some("en") => &ENGLISH_TEXTS,
        Some("fa") => &PERSIAN_TEXTS,
        _ => default_text_pack(),
    }
}

pub fn default_text_pack() -> &'static TextPack {
    &PERSIAN_TEXTS
}

/// Renders a `{name}` template. Unknown placeholders are left in place so a
/// missing argument is visible instead of silently dropped.
pub fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in args {
        rendered = rendered.replace(&format!("{{{key}}}"), value);
    }
    rendered
}

/// All user-facing texts for one language.
#[derive(Debug)]
pub struct TextPack {
    pub language_names: &'static [(&'static str, &'static str)],

    // DM basics
    pub dm_welcome: &'static str,
    pub glass_panel_caption: &'static str,
    pub dm_cancelled: &'static str,
    pub dm_rate_limited: &'static str,
    pub error_generic: &'static str,

    // Application flow
    pub dm_application_started: &'static str,
    pub dm_application_already_member: &'static str,
    pub dm_application_duplicate: &'static str,
    pub dm_application_no_questions: &'static str,
    pub dm_application_received: &'static str,
    pub dm_application_required: &'static str,
    pub dm_application_invalid_choice: &'static str,
    pub dm_application_summary_title: &'static str,
    pub dm_application_summary_item: &'static str,
    pub dm_application_item: &'static str,

    // Status & withdraw
    pub dm_status_none: &'static str,
    pub dm_status_pending: &'static str,
    pub dm_status_approved: &'static str,
    pub dm_status_denied: &'static str,
    pub dm_status_withdrawn: &'static str,
    pub dm_status_last_updated_label: &'static str,
    pub dm_status_template: &'static str,
    pub dm_status_template_with_note: &'static str,
    pub dm_withdraw_success: &'static str,
    pub dm_withdraw_not_found: &'static str,

    // Admin shared
    pub dm_admin_only: &'static str,
    pub dm_not_owner: &'static str,
    pub dm_no_pending: &'static str,
    pub dm_no_admins: &'static str,
    pub dm_admin_enter_user_id: &'static str,
    pub dm_admin_invalid_user_id: &'static str,
    pub dm_admin_added: &'static str,
    pub dm_already_admin: &'static str,
    pub dm_admin_removed: &'static str,
    pub dm_not_admin: &'static str,

    // Admin panel
    pub dm_admin_panel_intro: &'static str,
    pub dm_admin_panel_members_empty: &'static str,
    pub dm_admin_panel_members_header: &'static str,
    pub dm_admin_manage_title: &'static str,
    pub dm_admin_manage_intro: &'static str,
    pub dm_admin_manage_list_empty: &'static str,
    pub dm_admin_manage_list_header: &'static str,
    pub dm_admin_manage_list_entry: &'static str,
    pub dm_admin_manage_list_unknown: &'static str,
    pub dm_admin_panel_add_admin_prompt: &'static str,
    pub dm_admin_panel_insights_title: &'static str,
    pub dm_admin_panel_insights_counts: &'static str,
    pub dm_admin_panel_insights_languages: &'static str,
    pub dm_admin_panel_insights_languages_empty: &'static str,
    pub dm_admin_panel_insights_recent: &'static str,
    pub dm_admin_panel_insights_recent_empty: &'static str,
    pub dm_admin_panel_more_tools_text: &'static str,
    pub dm_admin_panel_more_tools_no_webapp: &'static str,

    // Question management
    pub dm_admin_questions_menu_title: &'static str,
    pub dm_admin_questions_menu_intro: &'static str,
    pub dm_admin_questions_list_item: &'static str,
    pub dm_admin_questions_empty: &'static str,
    pub dm_admin_questions_new_title: &'static str,
    pub dm_admin_questions_new_prompt: &'static str,
    pub dm_admin_questions_add_prompt: &'static str,
    pub dm_admin_questions_import_prompt: &'static str,
    pub dm_admin_questions_edit_prompt: &'static str,
    pub dm_admin_questions_delete_prompt: &'static str,
    pub dm_admin_questions_reset_prompt: &'static str,
    pub dm_admin_questions_export_success: &'static str,
    pub dm_admin_questions_not_found: &'static str,
    pub dm_admin_questions_cancelled: &'static str,
    pub dm_admin_questions_invalid_payload: &'static str,
    pub dm_admin_questions_saved: &'static str,
    pub dm_admin_questions_import_success: &'static str,
    pub dm_admin_questions_deleted: &'static str,
    pub dm_admin_questions_reset_language_success: &'static str,
    pub dm_admin_questions_cancel_keyword: &'static str,
    pub dm_admin_questions_reset_keyword: &'static str,
    pub dm_admin_questions_delete_keyword: &'static str,

    // Review notes
    pub dm_application_note_prompt_approve: &'static str,
    pub dm_application_note_prompt_deny: &'static str,
    pub dm_application_note_skip_hint: &'static str,
    pub dm_application_note_skip_keyword: &'static str,
    pub dm_application_note_label: &'static str,
    pub dm_application_note_confirm_approve: &'static str,
    pub dm_application_note_confirm_deny: &'static str,
    pub dm_application_approved_user: &'static str,
    pub dm_application_denied_user: &'static str,

    // Language menu
    pub dm_language_menu_title: &'static str,
    pub dm_language_updated: &'static str,

    // Default form prompts
    pub dm_application_role_prompt: &'static str,
    pub dm_application_goals_prompt: &'static str,
    pub dm_application_availability_prompt: &'static str,
    /// role key → (label, aliases…); the first entry is the display label.
    pub dm_application_role_options: &'static [(&'static str, &'static [&'static str])],
    /// role key → follow-up prompt shown when that role was chosen.
    pub dm_application_followup_prompts: &'static [(&'static str, &'static str)],

    // DM buttons
    pub dm_apply_button: &'static str,
    pub dm_status_button: &'static str,
    pub dm_withdraw_button: &'static str,
    pub dm_admin_panel_button: &'static str,
    pub dm_language_button: &'static str,
    pub dm_open_webapp_button: &'static str,
    pub dm_language_close_button: &'static str,
    pub dm_application_approve_button: &'static str,
    pub dm_application_reject_button: &'static str,
    pub dm_admin_panel_view_applications_button: &'static str,
    pub dm_admin_panel_manage_admins_button: &'static str,
    pub dm_admin_panel_manage_questions_button: &'static str,
    pub dm_admin_panel_back_button: &'static str,
    pub dm_admin_manage_add_button: &'static str,
    pub dm_admin_manage_remove_button: &'static str,
    pub dm_admin_manage_list_button: &'static str,
    pub dm_admin_questions_add_button: &'static str,
    pub dm_admin_questions_import_button: &'static str,
    pub dm_admin_questions_export_button: &'static str,
    pub dm_admin_questions_reset_form_button: &'static str,
    pub dm_admin_questions_back_button: &'static str,

    // Group leaderboards & commands
    pub group_no_data: &'static str,
    pub group_xp_leaderboard_title: &'static str,
    pub group_cup_leaderboard_title: &'static str,
    pub group_leaderboard_refresh_button: &'static str,
    pub group_xp_updated: &'static str,
    pub group_myxp_no_data: &'static str,
    pub group_myxp_response: &'static str,
    pub group_add_xp_usage: &'static str,
    pub group_add_xp_success: &'static str,
    pub group_remove_xp_success: &'static str,
    pub group_add_cup_usage: &'static str,
    pub group_add_cup_invalid_format: &'static str,
    pub group_cup_added: &'static str,
    pub group_keyword_fallback: &'static str,

    // Group help
    pub group_help_intro: &'static str,
    pub group_help_member_title: &'static str,
    pub group_help_cmd_help: &'static str,
    pub group_help_cmd_myxp: &'static str,
    pub group_help_cmd_xp: &'static str,
    pub group_help_cmd_cups: &'static str,
    pub group_help_admin_title: &'static str,
    pub group_help_admin_hint: &'static str,
    pub group_help_cmd_panel: &'static str,
    pub group_help_cmd_add_cup: &'static str,
    pub group_help_cmd_addxp: &'static str,
    pub group_help_footer: &'static str,

    // Group admin panel
    pub group_panel_intro: &'static str,
    pub group_panel_overview_title: &'static str,
    pub group_panel_metric_tracked: &'static str,
    pub group_panel_metric_total_xp: &'static str,
    pub group_panel_metric_top_member: &'static str,
    pub group_panel_metric_top_member_empty: &'static str,
    pub group_panel_metric_cups: &'static str,
    pub group_panel_metric_admins: &'static str,
    pub group_panel_recent_cup: &'static str,
    pub group_panel_last_activity: &'static str,
    pub group_panel_actions_hint: &'static str,
    pub group_panel_help_hint: &'static str,
    pub group_panel_unknown_chat: &'static str,
    pub group_panel_closed: &'static str,
    pub group_panel_cancel_keyword: &'static str,
    pub group_panel_cancelled: &'static str,
    pub group_panel_invalid_target: &'static str,
    pub group_panel_action_error: &'static str,
    pub group_panel_ban_prompt: &'static str,
    pub group_panel_mute_prompt: &'static str,
    pub group_panel_add_xp_prompt: &'static str,
    pub group_panel_remove_xp_prompt: &'static str,
    pub group_panel_ban_success: &'static str,
    pub group_panel_mute_success: &'static str,
    pub group_panel_cups_hint: &'static str,
    pub group_panel_admins_hint: &'static str,
    pub group_panel_settings_hint: &'static str,
    pub group_panel_menu_ban_title: &'static str,
    pub group_panel_menu_ban_description: &'static str,
    pub group_panel_menu_mute_title: &'static str,
    pub group_panel_menu_mute_description: &'static str,
    pub group_panel_menu_xp_title: &'static str,
    pub group_panel_menu_xp_description: &'static str,
    pub group_panel_menu_cups_title: &'static str,
    pub group_panel_menu_cups_description: &'static str,
    pub group_panel_menu_admins_title: &'static str,
    pub group_panel_menu_admins_description: &'static str,
    pub group_panel_menu_settings_title: &'static str,
    pub group_panel_menu_settings_description: &'static str,
    pub group_panel_menu_xp_members_empty: &'static str,
    pub group_panel_menu_xp_members_entry: &'static str,
    pub group_panel_menu_xp_members_header: &'static str,
    pub group_panel_menu_admins_list_empty: &'static str,
    pub group_panel_menu_admins_list_unknown: &'static str,
    pub group_panel_menu_admins_list_entry: &'static str,
    pub group_panel_menu_admins_list_header: &'static str,

    // Group panel buttons
    pub group_panel_help_button: &'static str,
    pub group_panel_refresh_button: &'static str,
    pub group_panel_ban_button: &'static str,
    pub group_panel_mute_button: &'static str,
    pub group_panel_add_xp_button: &'static str,
    pub group_panel_manage_cups_button: &'static str,
    pub group_panel_manage_admins_button: &'static str,
    pub group_panel_settings_button: &'static str,
    pub group_panel_close_button: &'static str,
    pub group_panel_menu_back_button: &'static str,
    pub group_panel_menu_ban_execute_button: &'static str,
    pub group_panel_menu_ban_help_button: &'static str,
    pub group_panel_menu_mute_execute_button: &'static str,
    pub group_panel_menu_mute_help_button: &'static str,
    pub group_panel_menu_xp_list_button: &'static str,
    pub group_panel_menu_xp_add_button: &'static str,
    pub group_panel_menu_xp_remove_button: &'static str,
    pub group_panel_menu_cups_latest_button: &'static str,
    pub group_panel_menu_cups_howto_button: &'static str,
    pub group_panel_menu_admins_list_button: &'static str,
    pub group_panel_menu_admins_howto_button: &'static str,
    pub group_panel_menu_settings_tools_button: &'static str,
    pub group_panel_menu_settings_help_button: &'static str,

    // Personal panel
    pub group_personal_panel_recently_sent: &'static str,
    pub group_personal_panel_dm_error: &'static str,
    pub group_personal_panel_dm_prompt: &'static str,
    pub group_personal_panel_dm_prompt_no_data: &'static str,
    pub group_personal_panel_title: &'static str,
    pub group_personal_panel_profile_heading: &'static str,
    pub group_personal_panel_no_data: &'static str,
    pub group_personal_panel_profile_line: &'static str,
    pub group_personal_panel_rank_line: &'static str,
    pub group_personal_panel_progress_label: &'static str,
    pub group_personal_panel_trophies_heading: &'static str,
    pub group_personal_panel_trophies_empty: &'static str,
    pub group_personal_panel_leaderboard_heading: &'static str,
    pub group_personal_panel_leaderboard_entry: &'static str,
    pub group_personal_panel_profile_button: &'static str,
    pub group_personal_panel_leaderboard_button: &'static str,
    pub group_personal_panel_refresh_button: &'static str,
}

impl TextPack {
    /// Display label for a language code, falling back to the raw code.
    pub fn language_label<'a>(&self, code: &'a str) -> &'a str {
        self.language_names
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }

    /// Follow-up prompt for a chosen role, when one is configured.
    pub fn followup_prompt(&self, role_key: &str) -> Option<&'static str> {
        self.dm_application_followup_prompts
            .iter()
            .find(|(key, _)| *key == role_key)
            .map(|(_, prompt)| *prompt)
    }

    /// The Persian pack uses the Persian list separator.
    pub fn list_separator(&self) -> &'static str {
        if std::ptr::eq(self, &PERSIAN_TEXTS) {
            "، "
        } else {
            ", "
        }
    }
}

pub static PERSIAN_TEXTS: TextPack = TextPack {
    language_names: &[("fa", "فارسی"), ("en", "English")],

    dm_welcome: "✨ به گیلد فلیزکس خوش آمدید!\nاز دکمه‌های زیر برای درخواست عضویت، پیگیری وضعیت یا تغییر زبان استفاده کنید.",
    glass_panel_caption: "🪟 پنل شیشه‌ای گیلد",
    dm_cancelled: "فرآیند جاری لغو شد. هر زمان آماده بودید دوباره شروع کنید.",
    dm_rate_limited: "⏳ کمی آهسته‌تر! چند لحظه دیگر دوباره تلاش کنید.",
    error_generic: "❌ خطایی رخ داد. لطفاً دوباره تلاش کنید.",

    dm_application_started: "📝 فرم عضویت آغاز شد. به پرسش‌ها یکی‌یکی پاسخ دهید. برای انصراف /cancel را بفرستید.",
    dm_application_already_member: "شما هم‌اکنون عضو تأییدشدهٔ گیلد هستید. 🎉",
    dm_application_duplicate: "درخواست شما قبلاً ثبت شده و در صف بررسی است.",
    dm_application_no_questions: "فعلاً پرسشی برای فرم عضویت تنظیم نشده است. بعداً دوباره سر بزنید.",
    dm_application_received: "✅ درخواست شما ثبت شد. نتیجهٔ بررسی به شما اطلاع داده می‌شود.",
    dm_application_required: "این پرسش اجباری است. لطفاً پاسخی بنویسید.",
    dm_application_invalid_choice: "لطفاً یکی از گزینه‌های زیر را انتخاب کنید: {options}",
    dm_application_summary_title: "📋 خلاصهٔ پاسخ‌های شما:",
    dm_application_summary_item: "• {question}\n  ↳ {answer}",
    dm_application_item: "👤 <b>{full_name}</b> ({username})\n🆔 <code>{user_id}</code>\n🕑 {created_at}\n\n{answers}",

    dm_status_none: "هنوز درخواستی ثبت نکرده‌اید.",
    dm_status_pending: "⏳ در انتظار بررسی",
    dm_status_approved: "✅ تأیید شده",
    dm_status_denied: "❌ رد شده",
    dm_status_withdrawn: "↩️ پس گرفته شده",
    dm_status_last_updated_label: "آخرین به‌روزرسانی",
    dm_status_template: "وضعیت درخواست: {status}\n{last_updated_label}: {updated_at}",
    dm_status_template_with_note: "وضعیت درخواست: {status}\n{last_updated_label}: {updated_at}\n📝 یادداشت: {note}",
    dm_withdraw_success: "درخواست شما پس گرفته شد.",
    dm_withdraw_not_found: "درخواست در انتظاری برای پس گرفتن پیدا نشد.",

    dm_admin_only: "این بخش مخصوص مدیران گیلد است.",
    dm_not_owner: "فقط مالک گیلد می‌تواند این کار را انجام دهد.",
    dm_no_pending: "درخواست در انتظاری وجود ندارد.",
    dm_no_admins: "هنوز مدیری ثبت نشده است.",
    dm_admin_enter_user_id: "شناسهٔ کاربر را بفرستید.",
    dm_admin_invalid_user_id: "شناسهٔ کاربر نامعتبر است.",
    dm_admin_added: "🛡️ کاربر <code>{user_id}</code> مدیر شد.",
    dm_already_admin: "کاربر <code>{user_id}</code> از قبل مدیر است.",
    dm_admin_removed: "کاربر <code>{user_id}</code> از مدیران حذف شد.",
    dm_not_admin: "کاربر <code>{user_id}</code> مدیر نیست.",

    dm_admin_panel_intro: "🛡️ پنل مدیریت گیلد\nاز دکمه‌های زیر برای رسیدگی به درخواست‌ها و تنظیمات استفاده کنید.",
    dm_admin_panel_members_empty: "هنوز عضو تأییدشده‌ای وجود ندارد.",
    dm_admin_panel_members_header: "👥 اعضای تأییدشده ({count}):\n{members}",
    dm_admin_manage_title: "🛡️ مدیریت مدیران",
    dm_admin_manage_intro: "از دکمه‌های زیر برای افزودن، حذف یا مرور مدیران استفاده کنید.",
    dm_admin_manage_list_empty: "فهرست مدیران خالی است.",
    dm_admin_manage_list_header: "🛡️ مدیران فعلی:",
    dm_admin_manage_list_entry: "• {display} — <code>{user_id}</code>",
    dm_admin_manage_list_unknown: "بدون نام",
    dm_admin_panel_add_admin_prompt: "شناسهٔ کاربری که باید مدیر شود را بفرستید.",
    dm_admin_panel_insights_title: "📊 وضعیت درخواست‌های گیلد",
    dm_admin_panel_insights_counts: "⏳ در انتظار: {pending}\n✅ تأیید شده: {approved}\n❌ رد شده: {denied}\n↩️ پس گرفته: {withdrawn}\n📦 مجموع: {total}\n✍️ میانگین طول پاسخ در انتظار: {average_length}",
    dm_admin_panel_insights_languages: "🌍 زبان متقاضیان:\n{languages}",
    dm_admin_panel_insights_languages_empty: "🌍 هنوز دادهٔ زبانی ثبت نشده است.",
    dm_admin_panel_insights_recent: "🕑 آخرین تغییرها:\n{items}",
    dm_admin_panel_insights_recent_empty: "🕑 تغییر تازه‌ای ثبت نشده است.",
    dm_admin_panel_more_tools_text: "🌐 ابزارهای بیشتر در داشبورد وب: {webapp_url}",
    dm_admin_panel_more_tools_no_webapp: "داشبورد وب پیکربندی نشده است.",

    dm_admin_questions_menu_title: "🧊 مدیریت پرسش‌های فرم ({language})",
    dm_admin_questions_menu_intro: "پرسش‌ها را اضافه، ویرایش یا حذف کنید. برای بازنشانی کل فرم، واژهٔ «{reset_keyword}» را بفرستید.",
    dm_admin_questions_list_item: "{order}. <b>{title}</b> — <code>{question_id}</code> ({kind})",
    dm_admin_questions_empty: "پرسشی برای این زبان تعریف نشده است.",
    dm_admin_questions_new_title: "پرسش تازه",
    dm_admin_questions_new_prompt: "متن پرسش را اینجا بنویسید",
    dm_admin_questions_add_prompt: "این قالب JSON را ویرایش کرده و بفرستید:\n<pre>{template}</pre>\nبرای انصراف «{cancel_keyword}» را بفرستید.",
    dm_admin_questions_import_prompt: "آرایهٔ JSON پرسش‌ها را بفرستید؛ نمونه:\n<pre>{template}</pre>\nبرای انصراف «{cancel_keyword}» را بفرستید.",
    dm_admin_questions_edit_prompt: "تعریف فعلی پرسش:\n<pre>{template}</pre>\nنسخهٔ ویرایش‌شده را بفرستید یا «{cancel_keyword}» برای انصراف.",
    dm_admin_questions_delete_prompt: "حذف «{title}» (<code>{question_id}</code>)؟ برای تأیید «{confirm_keyword}» و برای انصراف «{cancel_keyword}» را بفرستید.",
    dm_admin_questions_reset_prompt: "برای بازگشت به فرم پیش‌فرض «{reset_keyword}» و برای انصراف «{cancel_keyword}» را بفرستید.",
    dm_admin_questions_export_success: "📤 خروجی فرم فعلی:",
    dm_admin_questions_not_found: "پرسش موردنظر پیدا نشد.",
    dm_admin_questions_cancelled: "ویرایش پرسش‌ها لغو شد.",
    dm_admin_questions_invalid_payload: "JSON ارسال‌شده معتبر نیست. دوباره تلاش کنید.",
    dm_admin_questions_saved: "✅ پرسش «{label}» ذخیره شد.",
    dm_admin_questions_import_success: "✅ {count} پرسش وارد شد.",
    dm_admin_questions_deleted: "🗑️ پرسش حذف شد.",
    dm_admin_questions_reset_language_success: "♻️ فرم این زبان به حالت پیش‌فرض برگشت.",
    dm_admin_questions_cancel_keyword: "انصراف",
    dm_admin_questions_reset_keyword: "بازنشانی",
    dm_admin_questions_delete_keyword: "تایید",

    dm_application_note_prompt_approve: "برای تأیید {full_name} (<code>{user_id}</code>) می‌توانید یادداشتی بنویسید.",
    dm_application_note_prompt_deny: "برای رد {full_name} (<code>{user_id}</code>) می‌توانید دلیلی بنویسید.",
    dm_application_note_skip_hint: "برای رد شدن از یادداشت، «رد شدن» را بفرستید.",
    dm_application_note_skip_keyword: "رد شدن",
    dm_application_note_label: "یادداشت",
    dm_application_note_confirm_approve: "✅ {full_name} (<code>{user_id}</code>) تأیید شد.",
    dm_application_note_confirm_deny: "❌ درخواست {full_name} (<code>{user_id}</code>) رد شد.",
    dm_application_approved_user: "🎉 درخواست عضویت شما در گیلد تأیید شد. خوش آمدید!",
    dm_application_denied_user: "متأسفانه درخواست عضویت شما پذیرفته نشد.",

    dm_language_menu_title: "🌍 زبان گفتگو را انتخاب کنید:",
    dm_language_updated: "زبان شما به‌روزرسانی شد.",

    dm_application_role_prompt: "در گیلد بیشتر چه نقشی می‌گیرید؟ (جنگجو / استراتژیست / پشتیبان)",
    dm_application_goals_prompt: "از عضویت در گیلد چه هدفی دارید؟",
    dm_application_availability_prompt: "در هفته چند ساعت و چه زمان‌هایی در دسترس هستید؟",
    dm_application_role_options: &[
        ("warrior", &["جنگجو", "warrior"]),
        ("strategist", &["استراتژیست", "strategist"]),
        ("support", &["پشتیبان", "support"]),
    ],
    dm_application_followup_prompts: &[
        ("warrior", "از یک نبرد که به آن افتخار می‌کنید بگویید."),
        ("strategist", "آخرین نقشه‌ای که برای تیم چیدید چه بود؟"),
        ("support", "چطور به هم‌تیمی‌های تازه‌کار کمک می‌کنید؟"),
    ],

    dm_apply_button: "درخواست عضویت",
    dm_status_button: "وضعیت درخواست",
    dm_withdraw_button: "پس گرفتن درخواست",
    dm_admin_panel_button: "پنل مدیریت",
    dm_language_button: "تغییر زبان",
    dm_open_webapp_button: "داشبورد وب",
    dm_language_close_button: "بستن",
    dm_application_approve_button: "تأیید",
    dm_application_reject_button: "رد",
    dm_admin_panel_view_applications_button: "درخواست‌های در انتظار",
    dm_admin_panel_manage_admins_button: "مدیریت مدیران",
    dm_admin_panel_manage_questions_button: "مدیریت پرسش‌ها",
    dm_admin_panel_back_button: "بستن",
    dm_admin_manage_add_button: "افزودن مدیر",
    dm_admin_manage_remove_button: "حذف مدیر",
    dm_admin_manage_list_button: "فهرست مدیران",
    dm_admin_questions_add_button: "افزودن پرسش",
    dm_admin_questions_import_button: "درون‌ریزی",
    dm_admin_questions_export_button: "برون‌بری",
    dm_admin_questions_reset_form_button: "بازنشانی فرم",
    dm_admin_questions_back_button: "بازگشت",

    group_no_data: "هنوز داده‌ای ثبت نشده است.",
    group_xp_leaderboard_title: "🏆 جدول امتیاز اعضای فعال",
    group_cup_leaderboard_title: "🥇 جدول افتخارات گیلد",
    group_leaderboard_refresh_button: "به‌روزرسانی",
    group_xp_updated: "✨ {full_name} به {xp} امتیاز رسید!",
    group_myxp_no_data: "هنوز امتیازی برای شما ثبت نشده است.",
    group_myxp_response: "👤 {full_name}\n✨ امتیاز: {xp} · سطح {level}\nتا سطح بعدی: {xp_to_next} امتیاز",
    group_add_xp_usage: "شیوهٔ استفاده: روی پیام عضو ریپلای کنید و بنویسید /addxp مقدار",
    group_add_xp_success: "✨ {xp} امتیاز برای {full_name} ثبت شد.",
    group_remove_xp_success: "➖ امتیاز {full_name} به {xp} رسید.",
    group_add_cup_usage: "شیوهٔ استفاده: /add_cup عنوان | توضیح | نفر اول, نفر دوم, نفر سوم",
    group_add_cup_invalid_format: "قالب ورودی درست نیست. عنوان و توضیح کوتاه به همراه حداکثر ۱۰ نفر بنویسید.",
    group_cup_added: "🏆 جام «{title}» ثبت شد.",
    group_keyword_fallback: "برای دیدن نمایه، «پروفایل» یا «xp» را بفرستید؛ برای جدول، «لیدربورد».",

    group_help_intro: "📖 راهنمای ربات گیلد",
    group_help_member_title: "دستورهای اعضا:",
    group_help_cmd_help: "نمایش همین راهنما",
    group_help_cmd_myxp: "امتیاز و سطح شما",
    group_help_cmd_xp: "جدول امتیاز گروه",
    group_help_cmd_cups: "جدول جام‌های گروه",
    group_help_admin_title: "دستورهای مدیران:",
    group_help_admin_hint: "این دستورها فقط برای مدیران گیلد کار می‌کنند.",
    group_help_cmd_panel: "باز کردن پنل مدیریت گروه",
    group_help_cmd_add_cup: "ثبت جام تازه",
    group_help_cmd_addxp: "دادن امتیاز دستی",
    group_help_footer: "سؤالی بود؟ در خصوصی به ربات پیام بدهید.",

    group_panel_intro: "🛡️ پنل مدیریت «{chat_title}»",
    group_panel_overview_title: "📊 نمای کلی گروه",
    group_panel_metric_tracked: "👥 اعضای دارای امتیاز: {members}",
    group_panel_metric_total_xp: "✨ مجموع امتیاز: {total_xp}",
    group_panel_metric_top_member: "🥇 برترین عضو: {name} — {xp} امتیاز (سطح {level})",
    group_panel_metric_top_member_empty: "🥇 هنوز عضو برتری ثبت نشده است.",
    group_panel_metric_cups: "🏆 جام‌ها: {count}",
    group_panel_metric_admins: "🛡️ مدیران: {count}",
    group_panel_recent_cup: "🎖️ آخرین جام: {title} ({created_at})",
    group_panel_last_activity: "🕑 آخرین فعالیت: {timestamp}",
    group_panel_actions_hint: "از دکمه‌های زیر یک بخش را انتخاب کنید.",
    group_panel_help_hint: "برای راهنما دکمهٔ ℹ️ را بزنید.",
    group_panel_unknown_chat: "این گروه",
    group_panel_closed: "پنل مدیریت بسته شد.",
    group_panel_cancel_keyword: "انصراف",
    group_panel_cancelled: "عملیات لغو شد.",
    group_panel_invalid_target: "روی پیام عضو موردنظر ریپلای کنید.",
    group_panel_action_error: "انجام عملیات ممکن نشد.",
    group_panel_ban_prompt: "روی پیام عضوی که باید اخراج شود ریپلای کنید. برای انصراف «انصراف» را بفرستید.",
    group_panel_mute_prompt: "روی پیام عضوی که باید بی‌صدا شود ریپلای کنید. برای انصراف «انصراف» را بفرستید.",
    group_panel_add_xp_prompt: "روی پیام عضو ریپلای کنید و مقدار امتیاز را بنویسید.",
    group_panel_remove_xp_prompt: "روی پیام عضو ریپلای کنید و مقدار کسر امتیاز را بنویسید.",
    group_panel_ban_success: "🚫 {full_name} از گروه اخراج شد.",
    group_panel_mute_success: "🔇 {full_name} بی‌صدا شد.",
    group_panel_cups_hint: "جام تازه را با /add_cup ثبت کنید.",
    group_panel_admins_hint: "مدیران را از پنل خصوصی ربات مدیریت کنید.",
    group_panel_settings_hint: "تنظیمات بیشتر در فایل پیکربندی ربات است.",
    group_panel_menu_ban_title: "🚫 اخراج عضو",
    group_panel_menu_ban_description: "عضو خاطی را با ریپلای اخراج کنید.",
    group_panel_menu_mute_title: "🔇 بی‌صدا کردن",
    group_panel_menu_mute_description: "جلوی پیام دادن عضو را بگیرید.",
    group_panel_menu_xp_title: "✨ مدیریت امتیاز",
    group_panel_menu_xp_description: "نمایش اعضا و تغییر دستی امتیاز.",
    group_panel_menu_cups_title: "🏆 جام‌ها",
    group_panel_menu_cups_description: "آخرین جام‌ها و شیوهٔ ثبت.",
    group_panel_menu_admins_title: "🛡️ مدیران",
    group_panel_menu_admins_description: "فهرست مدیران ثبت‌شده.",
    group_panel_menu_settings_title: "⚙️ تنظیمات",
    group_panel_menu_settings_description: "ابزارها و تنظیمات عمومی.",
    group_panel_menu_xp_members_empty: "هنوز عضوی امتیاز نگرفته است.",
    group_panel_menu_xp_members_entry: "{index}. {name} — {xp} امتیاز (سطح {level})",
    group_panel_menu_xp_members_header: "✨ اعضای دارای امتیاز ({count}):\n{members}",
    group_panel_menu_admins_list_empty: "مدیری ثبت نشده است.",
    group_panel_menu_admins_list_unknown: "بدون نام",
    group_panel_menu_admins_list_entry: "• {display} — <code>{user_id}</code>",
    group_panel_menu_admins_list_header: "🛡️ مدیران ({count}):\n{admins}",

    group_panel_help_button: "راهنما",
    group_panel_refresh_button: "به‌روزرسانی",
    group_panel_ban_button: "اخراج",
    group_panel_mute_button: "بی‌صدا",
    group_panel_add_xp_button: "امتیاز",
    group_panel_manage_cups_button: "جام‌ها",
    group_panel_manage_admins_button: "مدیران",
    group_panel_settings_button: "تنظیمات",
    group_panel_close_button: "بستن",
    group_panel_menu_back_button: "بازگشت",
    group_panel_menu_ban_execute_button: "اخراج با ریپلای",
    group_panel_menu_ban_help_button: "راهنمای اخراج",
    group_panel_menu_mute_execute_button: "بی‌صدا با ریپلای",
    group_panel_menu_mute_help_button: "راهنمای بی‌صدا",
    group_panel_menu_xp_list_button: "فهرست اعضا",
    group_panel_menu_xp_add_button: "افزودن امتیاز",
    group_panel_menu_xp_remove_button: "کسر امتیاز",
    group_panel_menu_cups_latest_button: "آخرین جام‌ها",
    group_panel_menu_cups_howto_button: "شیوهٔ ثبت جام",
    group_panel_menu_admins_list_button: "فهرست مدیران",
    group_panel_menu_admins_howto_button: "راهنمای مدیران",
    group_panel_menu_settings_tools_button: "ابزارها",
    group_panel_menu_settings_help_button: "راهنمای تنظیمات",

    group_personal_panel_recently_sent: "پنل شخصی شما همین چند لحظه پیش فرستاده شد.",
    group_personal_panel_dm_error: "فرستادن پنل شخصی ممکن نشد.",
    group_personal_panel_dm_prompt: "👤 امتیاز: {xp} · سطح {level} · رتبه {rank} · جام‌ها: {trophies}",
    group_personal_panel_dm_prompt_no_data: "هنوز امتیازی برای شما ثبت نشده است؛ با فعالیت در گروه شروع کنید!",
    group_personal_panel_title: "🪟 پنل شخصی — {chat_title}",
    group_personal_panel_profile_heading: "👤 نمایه",
    group_personal_panel_no_data: "هنوز امتیازی ثبت نشده است.",
    group_personal_panel_profile_line: "✨ امتیاز: {xp} · سطح {level}",
    group_personal_panel_rank_line: "🏅 رتبه: {rank} از {total}",
    group_personal_panel_progress_label: "پیشرفت سطح: {current}/{target}",
    group_personal_panel_trophies_heading: "🏆 افتخارات",
    group_personal_panel_trophies_empty: "هنوز جامی ثبت نشده است.",
    group_personal_panel_leaderboard_heading: "📊 برترین‌ها",
    group_personal_panel_leaderboard_entry: "{marker}{index}. {name} — {xp} امتیاز (سطح {level})",
    group_personal_panel_profile_button: "نمایه",
    group_personal_panel_leaderboard_button: "جدول امتیاز",
    group_personal_panel_refresh_button: "به‌روزرسانی",
};

pub static ENGLISH_TEXTS: TextPack = TextPack {
    language_names: &[("fa", "فارسی"), ("en", "English")],

    dm_welcome: "✨ Welcome to the Flyzex guild!\nUse the buttons below to apply, track your application, or switch language.",
    glass_panel_caption: "🪟 Guild glass panel",
    dm_cancelled: "The current flow was cancelled. Start again whenever you are ready.",
    dm_rate_limited: "⏳ Easy there! Try again in a few moments.",
    error_generic: "❌ Something went wrong. Please try again.",

    dm_application_started: "📝 The membership form has started. Answer the questions one by one; send /cancel to stop.",
    dm_application_already_member: "You are already an approved guild member. 🎉",
    dm_application_duplicate: "Your application is already queued for review.",
    dm_application_no_questions: "No application questions are configured yet. Please check back later.",
    dm_application_received: "✅ Your application was submitted. You will hear back after review.",
    dm_application_required: "This question is required. Please write an answer.",
    dm_application_invalid_choice: "Please pick one of these options: {options}",
    dm_application_summary_title: "📋 Summary of your answers:",
    dm_application_summary_item: "• {question}\n  ↳ {answer}",
    dm_application_item: "👤 <b>{full_name}</b> ({username})\n🆔 <code>{user_id}</code>\n🕑 {created_at}\n\n{answers}",

    dm_status_none: "You have not submitted an application yet.",
    dm_status_pending: "⏳ awaiting review",
    dm_status_approved: "✅ approved",
    dm_status_denied: "❌ denied",
    dm_status_withdrawn: "↩️ withdrawn",
    dm_status_last_updated_label: "Last updated",
    dm_status_template: "Application status: {status}\n{last_updated_label}: {updated_at}",
    dm_status_template_with_note: "Application status: {status}\n{last_updated_label}: {updated_at}\n📝 Note: {note}",
    dm_withdraw_success: "Your application was withdrawn.",
    dm_withdraw_not_found: "No pending application to withdraw.",

    dm_admin_only: "This area is for guild admins.",
    dm_not_owner: "Only the guild owner can do that.",
    dm_no_pending: "There are no pending applications.",
    dm_no_admins: "No admins are registered yet.",
    dm_admin_enter_user_id: "Send the user id.",
    dm_admin_invalid_user_id: "That user id is not valid.",
    dm_admin_added: "🛡️ User <code>{user_id}</code> is now an admin.",
    dm_already_admin: "User <code>{user_id}</code> is already an admin.",
    dm_admin_removed: "User <code>{user_id}</code> was removed from the admins.",
    dm_not_admin: "User <code>{user_id}</code> is not an admin.",

    dm_admin_panel_intro: "🛡️ Guild admin panel\nUse the buttons below to review applications and manage settings.",
    dm_admin_panel_members_empty: "There are no approved members yet.",
    dm_admin_panel_members_header: "👥 Approved members ({count}):\n{members}",
    dm_admin_manage_title: "🛡️ Manage admins",
    dm_admin_manage_intro: "Use the buttons below to add, remove, or list admins.",
    dm_admin_manage_list_empty: "The admin list is empty.",
    dm_admin_manage_list_header: "🛡️ Current admins:",
    dm_admin_manage_list_entry: "• {display} — <code>{user_id}</code>",
    dm_admin_manage_list_unknown: "unnamed",
    dm_admin_panel_add_admin_prompt: "Send the id of the user to promote.",
    dm_admin_panel_insights_title: "📊 Guild application insights",
    dm_admin_panel_insights_counts: "⏳ Pending: {pending}\n✅ Approved: {approved}\n❌ Denied: {denied}\n↩️ Withdrawn: {withdrawn}\n📦 Total: {total}\n✍️ Average pending answer length: {average_length}",
    dm_admin_panel_insights_languages: "🌍 Applicant languages:\n{languages}",
    dm_admin_panel_insights_languages_empty: "🌍 No language data recorded yet.",
    dm_admin_panel_insights_recent: "🕑 Recent updates:\n{items}",
    dm_admin_panel_insights_recent_empty: "🕑 No recent updates.",
    dm_admin_panel_more_tools_text: "🌐 More tools on the web dashboard: {webapp_url}",
    dm_admin_panel_more_tools_no_webapp: "No web dashboard is configured.",

    dm_admin_questions_menu_title: "🧊 Manage form questions ({language})",
    dm_admin_questions_menu_intro: "Add, edit, or delete questions. Send “{reset_keyword}” to reset the whole form.",
    dm_admin_questions_list_item: "{order}. <b>{title}</b> — <code>{question_id}</code> ({kind})",
    dm_admin_questions_empty: "No questions are defined for this language.",
    dm_admin_questions_new_title: "New question",
    dm_admin_questions_new_prompt: "Write the question prompt here",
    dm_admin_questions_add_prompt: "Edit this JSON template and send it back:\n<pre>{template}</pre>\nSend “{cancel_keyword}” to cancel.",
    dm_admin_questions_import_prompt: "Send a JSON array of questions; for example:\n<pre>{template}</pre>\nSend “{cancel_keyword}” to cancel.",
    dm_admin_questions_edit_prompt: "Current definition:\n<pre>{template}</pre>\nSend the edited version, or “{cancel_keyword}” to cancel.",
    dm_admin_questions_delete_prompt: "Delete “{title}” (<code>{question_id}</code>)? Send “{confirm_keyword}” to confirm or “{cancel_keyword}” to cancel.",
    dm_admin_questions_reset_prompt: "Send “{reset_keyword}” to restore the default form, or “{cancel_keyword}” to cancel.",
    dm_admin_questions_export_success: "📤 Current form export:",
    dm_admin_questions_not_found: "That question was not found.",
    dm_admin_questions_cancelled: "Question editing cancelled.",
    dm_admin_questions_invalid_payload: "That JSON is not valid. Please try again.",
    dm_admin_questions_saved: "✅ Question “{label}” saved.",
    dm_admin_questions_import_success: "✅ Imported {count} questions.",
    dm_admin_questions_deleted: "🗑️ Question deleted.",
    dm_admin_questions_reset_language_success: "♻️ This language's form is back to the default.",
    dm_admin_questions_cancel_keyword: "cancel",
    dm_admin_questions_reset_keyword: "reset",
    dm_admin_questions_delete_keyword: "confirm",

    dm_application_note_prompt_approve: "You may add a note for approving {full_name} (<code>{user_id}</code>).",
    dm_application_note_prompt_deny: "You may add a reason for denying {full_name} (<code>{user_id}</code>).",
    dm_application_note_skip_hint: "Send “skip” to continue without a note.",
    dm_application_note_skip_keyword: "skip",
    dm_application_note_label: "Note",
    dm_application_note_confirm_approve: "✅ {full_name} (<code>{user_id}</code>) was approved.",
    dm_application_note_confirm_deny: "❌ The application of {full_name} (<code>{user_id}</code>) was denied.",
    dm_application_approved_user: "🎉 Your guild application was approved. Welcome aboard!",
    dm_application_denied_user: "Unfortunately your guild application was not accepted.",

    dm_language_menu_title: "🌍 Pick your language:",
    dm_language_updated: "Your language was updated.",

    dm_application_role_prompt: "Which role fits you best in the guild? (warrior / strategist / support)",
    dm_application_goals_prompt: "What do you want out of joining the guild?",
    dm_application_availability_prompt: "How many hours a week are you available, and when?",
    dm_application_role_options: &[
        ("warrior", &["warrior", "جنگجو"]),
        ("strategist", &["strategist", "استراتژیست"]),
        ("support", &["support", "پشتیبان"]),
    ],
    dm_application_followup_prompts: &[
        ("warrior", "Tell us about a battle you are proud of."),
        ("strategist", "What was the last plan you drew up for a team?"),
        ("support", "How do you help newer teammates?"),
    ],

    dm_apply_button: "Apply to the guild",
    dm_status_button: "Application status",
    dm_withdraw_button: "Withdraw application",
    dm_admin_panel_button: "Admin panel",
    dm_language_button: "Change language",
    dm_open_webapp_button: "Web dashboard",
    dm_language_close_button: "Close",
    dm_application_approve_button: "Approve",
    dm_application_reject_button: "Reject",
    dm_admin_panel_view_applications_button: "Pending applications",
    dm_admin_panel_manage_admins_button: "Manage admins",
    dm_admin_panel_manage_questions_button: "Manage questions",
    dm_admin_panel_back_button: "Close",
    dm_admin_manage_add_button: "Add admin",
    dm_admin_manage_remove_button: "Remove admin",
    dm_admin_manage_list_button: "List admins",
    dm_admin_questions_add_button: "Add question",
    dm_admin_questions_import_button: "Import",
    dm_admin_questions_export_button: "Export",
    dm_admin_questions_reset_form_button: "Reset form",
    dm_admin_questions_back_button: "Back",

    group_no_data: "Nothing recorded here yet.",
    group_xp_leaderboard_title: "🏆 XP board for active members",
    group_cup_leaderboard_title: "🥇 Guild trophy board",
    group_leaderboard_refresh_button: "Refresh",
    group_xp_updated: "✨ {full_name} reached {xp} XP!",
    group_myxp_no_data: "No XP recorded for you yet.",
    group_myxp_response: "👤 {full_name}\n✨ XP: {xp} · level {level}\n{xp_to_next} XP to the next level",
    group_add_xp_usage: "Usage: reply to a member's message with /addxp amount",
    group_add_xp_success: "✨ Granted XP; {full_name} now has {xp}.",
    group_remove_xp_success: "➖ {full_name} is down to {xp} XP.",
    group_add_cup_usage: "Usage: /add_cup title | description | first, second, third",
    group_add_cup_invalid_format: "That format is not right. Keep the title and description short, with at most 10 podium names.",
    group_cup_added: "🏆 Cup “{title}” recorded.",
    group_keyword_fallback: "Send “profile” or “xp” for your panel, or “leaderboard” for the board.",

    group_help_intro: "📖 Guild bot guide",
    group_help_member_title: "Member commands:",
    group_help_cmd_help: "show this guide",
    group_help_cmd_myxp: "your XP and level",
    group_help_cmd_xp: "the group XP board",
    group_help_cmd_cups: "the group trophy board",
    group_help_admin_title: "Admin commands:",
    group_help_admin_hint: "These commands only work for guild admins.",
    group_help_cmd_panel: "open the group admin panel",
    group_help_cmd_add_cup: "record a new cup",
    group_help_cmd_addxp: "grant XP manually",
    group_help_footer: "Questions? Message the bot privately.",

    group_panel_intro: "🛡️ Admin panel for “{chat_title}”",
    group_panel_overview_title: "📊 Group overview",
    group_panel_metric_tracked: "👥 Members with XP: {members}",
    group_panel_metric_total_xp: "✨ Total XP: {total_xp}",
    group_panel_metric_top_member: "🥇 Top member: {name} — {xp} XP (level {level})",
    group_panel_metric_top_member_empty: "🥇 No top member yet.",
    group_panel_metric_cups: "🏆 Cups: {count}",
    group_panel_metric_admins: "🛡️ Admins: {count}",
    group_panel_recent_cup: "🎖️ Latest cup: {title} ({created_at})",
    group_panel_last_activity: "🕑 Last activity: {timestamp}",
    group_panel_actions_hint: "Pick a section with the buttons below.",
    group_panel_help_hint: "Hit ℹ️ for the guide.",
    group_panel_unknown_chat: "this group",
    group_panel_closed: "Admin panel closed.",
    group_panel_cancel_keyword: "cancel",
    group_panel_cancelled: "Action cancelled.",
    group_panel_invalid_target: "Reply to the member's message.",
    group_panel_action_error: "Could not complete that action.",
    group_panel_ban_prompt: "Reply to the member who should be banned. Send “cancel” to abort.",
    group_panel_mute_prompt: "Reply to the member who should be muted. Send “cancel” to abort.",
    group_panel_add_xp_prompt: "Reply to the member's message with the XP amount.",
    group_panel_remove_xp_prompt: "Reply to the member's message with the XP amount to deduct.",
    group_panel_ban_success: "🚫 {full_name} was banned from the group.",
    group_panel_mute_success: "🔇 {full_name} was muted.",
    group_panel_cups_hint: "Record a new cup with /add_cup.",
    group_panel_admins_hint: "Manage admins from the bot's private panel.",
    group_panel_settings_hint: "Further settings live in the bot's configuration file.",
    group_panel_menu_ban_title: "🚫 Ban a member",
    group_panel_menu_ban_description: "Remove a misbehaving member by replying to them.",
    group_panel_menu_mute_title: "🔇 Mute",
    group_panel_menu_mute_description: "Stop a member from sending messages.",
    group_panel_menu_xp_title: "✨ XP management",
    group_panel_menu_xp_description: "List members and adjust XP manually.",
    group_panel_menu_cups_title: "🏆 Cups",
    group_panel_menu_cups_description: "Latest cups and how to record them.",
    group_panel_menu_admins_title: "🛡️ Admins",
    group_panel_menu_admins_description: "The registered admin roster.",
    group_panel_menu_settings_title: "⚙️ Settings",
    group_panel_menu_settings_description: "General tools and configuration.",
    group_panel_menu_xp_members_empty: "No member has earned XP yet.",
    group_panel_menu_xp_members_entry: "{index}. {name} — {xp} XP (level {level})",
    group_panel_menu_xp_members_header: "✨ Members with XP ({count}):\n{members}",
    group_panel_menu_admins_list_empty: "No admins registered.",
    group_panel_menu_admins_list_unknown: "unnamed",
    group_panel_menu_admins_list_entry: "• {display} — <code>{user_id}</code>",
    group_panel_menu_admins_list_header: "🛡️ Admins ({count}):\n{admins}",

    group_panel_help_button: "Help",
    group_panel_refresh_button: "Refresh",
    group_panel_ban_button: "Ban",
    group_panel_mute_button: "Mute",
    group_panel_add_xp_button: "XP",
    group_panel_manage_cups_button: "Cups",
    group_panel_manage_admins_button: "Admins",
    group_panel_settings_button: "Settings",
    group_panel_close_button: "Close",
    group_panel_menu_back_button: "Back",
    group_panel_menu_ban_execute_button: "Ban via reply",
    group_panel_menu_ban_help_button: "Ban guide",
    group_panel_menu_mute_execute_button: "Mute via reply",
    group_panel_menu_mute_help_button: "Mute guide",
    group_panel_menu_xp_list_button: "List members",
    group_panel_menu_xp_add_button: "Add XP",
    group_panel_menu_xp_remove_button: "Deduct XP",
    group_panel_menu_cups_latest_button: "Latest cups",
    group_panel_menu_cups_howto_button: "How to record",
    group_panel_menu_admins_list_button: "List admins",
    group_panel_menu_admins_howto_button: "Admins guide",
    group_panel_menu_settings_tools_button: "Tools",
    group_panel_menu_settings_help_button: "Settings guide",

    group_personal_panel_recently_sent: "Your personal panel was sent only moments ago.",
    group_personal_panel_dm_error: "Could not deliver your personal panel.",
    group_personal_panel_dm_prompt: "👤 XP: {xp} · level {level} · rank {rank} · cups: {trophies}",
    group_personal_panel_dm_prompt_no_data: "No XP recorded for you yet; start by being active in the group!",
    group_personal_panel_title: "🪟 Personal panel — {chat_title}",
    group_personal_panel_profile_heading: "👤 Profile",
    group_personal_panel_no_data: "No XP recorded yet.",
    group_personal_panel_profile_line: "✨ XP: {xp} · level {level}",
    group_personal_panel_rank_line: "🏅 Rank: {rank} of {total}",
    group_personal_panel_progress_label: "Level progress: {current}/{target}",
    group_personal_panel_trophies_heading: "🏆 Trophies",
    group_personal_panel_trophies_empty: "No cups recorded yet.",
    group_personal_panel_leaderboard_heading: "📊 Top members",
    group_personal_panel_leaderboard_entry: "{marker}{index}. {name} — {xp} XP (level {level})",
    group_personal_panel_profile_button: "Profile",
    group_personal_panel_leaderboard_button: "Leaderboard",
    group_personal_panel_refresh_button: "Refresh",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_handles_region_suffixes() {
        assert_eq!(normalize_language_code("fa-IR"), Some("fa"));
        assert_eq!(normalize_language_code("en_US"), Some("en"));
        assert_eq!(normalize_language_code("FA"), Some("fa"));
        assert_eq!(normalize_language_code("de"), None);
    }

    #[test]
    fn pack_lookup_falls_back_to_default() {
        assert!(std::ptr::eq(text_pack("en"), &ENGLISH_TEXTS));
        assert!(std::ptr::eq(text_pack("fa"), &PERSIAN_TEXTS));
        assert!(std::ptr::eq(text_pack("unknown"), default_text_pack()));
    }

    #[test]
    fn fill_replaces_named_placeholders() {
        let rendered = fill("hello {name}, {name}!", &[("name", "world")]);
        assert_eq!(rendered, "hello world, world!");
        let untouched = fill("{missing}", &[("name", "x")]);
        assert_eq!(untouched, "{missing}");
    }

    #[test]
    fn leaderboard_titles_match_both_languages() {
        assert_eq!(ENGLISH_TEXTS.group_xp_leaderboard_title, "🏆 XP board for active members");
        assert_eq!(ENGLISH_TEXTS.group_cup_leaderboard_title, "🥇 Guild trophy board");
        assert_eq!(PERSIAN_TEXTS.group_xp_leaderboard_title, "🏆 جدول امتیاز اعضای فعال");
        assert_eq!(PERSIAN_TEXTS.group_cup_leaderboard_title, "🥇 جدول افتخارات گیلد");
        assert_eq!(PERSIAN_TEXTS.list_separator(), "، ");
        assert_eq!(ENGLISH_TEXTS.list_separator(), ", ");
    }
}
