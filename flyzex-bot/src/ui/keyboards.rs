//! Builders for the bot's inline keyboards: the glass DM welcome panel, the
//! admin panels, review cards, leaderboards, and the personal panel.

use flyzex_core::{Button, InlineKeyboard};

use crate::localization::{TextPack, AVAILABLE_LANGUAGE_CODES};

/// Welcome panel shown on /start in a private chat.
pub fn glass_dm_welcome_keyboard(
    texts: &TextPack,
    webapp_url: Option<&str>,
    is_admin: bool,
) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::default()
        .row(vec![Button::callback(
            format!("🪟 {}", texts.dm_apply_button),
            "apply_for_guild",
        )])
        .row(vec![Button::callback(
            format!("📨 {}", texts.dm_status_button),
            "application_status",
        )])
        .row(vec![Button::callback(
            format!("❌ {}", texts.dm_withdraw_button),
            "application_withdraw",
        )]);
    if is_admin {
        keyboard = keyboard.row(vec![Button::callback(
            format!("🛡️ {}", texts.dm_admin_panel_button),
            "admin_panel",
        )]);
    }
    keyboard = keyboard.row(vec![Button::callback(
        format!("🌍 {}", texts.dm_language_button),
        "language_menu",
    )]);
    if let Some(url) = webapp_url {
        keyboard = keyboard.row(vec![Button::url(
            format!("🧊 {}", texts.dm_open_webapp_button),
            url,
        )]);
    }
    keyboard
}

/// Approve/reject card attached to a pending application.
pub fn application_review_keyboard(user_id: &str, texts: &TextPack) -> InlineKeyboard {
    InlineKeyboard::default()
        .row(vec![
            Button::callback(
                format!("✅ {}", texts.dm_application_approve_button),
                format!("application:{user_id}:approve"),
            ),
            Button::callback(
                format!("❌ {}", texts.dm_application_reject_button),
                format!("application:{user_id}:reject"),
            ),
        ])
        .row(vec![Button::callback(
            format!("📊 {}", texts.dm_status_button),
            "application:skip",
        )])
}

/// Root of the DM admin panel.
pub fn admin_panel_keyboard(texts: &TextPack, webapp_url: Option<&str>) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::default()
        .row(vec![Button::callback(
            format!("⏳ {}", texts.dm_admin_panel_view_applications_button),
            "admin_panel:view_applications",
        )])
        .row(vec![Button::callback(
            format!("🛡️ {}", texts.dm_admin_panel_manage_admins_button),
            "admin_panel:manage_admins",
        )])
        .row(vec![Button::callback(
            format!("🧊 {}", texts.dm_admin_panel_manage_questions_button),
            "admin_panel:manage_questions",
        )])
        .row(vec![
            Button::callback(
                format!("📊 {}", texts.dm_admin_panel_insights_title),
                "admin_panel:insights",
            ),
            Button::callback(
                format!("🌐 {}", texts.dm_open_webapp_button),
                "admin_panel:more_tools",
            ),
        ]);
    if let Some(url) = webapp_url {
        keyboard = keyboard.row(vec![Button::url(
            format!("🧊 {}", texts.dm_open_webapp_button),
            url,
        )]);
    }
    keyboard.row(vec![Button::callback(
        format!("✖️ {}", texts.dm_admin_panel_back_button),
        "admin_panel:back",
    )])
}

/// Owner-only admin roster management.
pub fn admin_management_keyboard(texts: &TextPack) -> InlineKeyboard {
    InlineKeyboard::default()
        .row(vec![Button::callback(
            format!("➕ {}", texts.dm_admin_manage_add_button),
            "admin_panel:manage_admins:add",
        )])
        .row(vec![Button::callback(
            format!("➖ {}", texts.dm_admin_manage_remove_button),
            "admin_panel:manage_admins:remove",
        )])
        .row(vec![Button::callback(
            format!("📝 {}", texts.dm_admin_manage_list_button),
            "admin_panel:manage_admins:list",
        )])
        .row(vec![Button::callback(
            format!("⬅️ {}", texts.dm_admin_questions_back_button),
            "admin_panel:back_to_panel",
        )])
}

/// Question management menu. One edit/delete row per question, capped so the
/// keypad stays usable.
pub fn admin_questions_keyboard(
    texts: &TextPack,
    questions: &[flyzex_storage::QuestionDefinition],
) -> InlineKeyboard {
    let mut keyboard = InlineKeyboard::default().row(vec![
        Button::callback(
            format!("➕ {}", texts.dm_admin_questions_add_button),
            "admin_panel:manage_questions:add",
        ),
        Button::callback(
            format!("📥 {}", texts.dm_admin_questions_import_button),
            "admin_panel:manage_questions:import",
        ),
    ]);
    for (index, question) in questions.iter().take(8).enumerate() {
        keyboard = keyboard.row(vec![
            Button::callback(
                format!("✏️ {}", question.display_title()),
                format!("admin_panel:manage_questions:edit_index:{index}"),
            ),
            Button::callback(
                "🗑️".to_string(),
                format!("admin_panel:manage_questions:delete_index:{index}"),
            ),
        ]);
    }
    keyboard
        .row(vec![
            Button::callback(
                format!("📤 {}", texts.dm_admin_questions_export_button),
                "admin_panel:manage_questions:export",
            ),
            Button::callback(
                format!("♻️ {}", texts.dm_admin_questions_reset_form_button),
                "admin_panel:manage_questions:reset",
            ),
        ])
        .row(vec![Button::callback(
            format!("⬅️ {}", texts.dm_admin_questions_back_button),
            "admin_panel:manage_questions:back",
        )])
}

/// Language picker; the active language is marked.
pub fn language_options_keyboard(active: Option<&str>, texts: &TextPack) -> InlineKeyboard {
    let row = AVAILABLE_LANGUAGE_CODES
        .iter()
        .map(|code| {
            let label = texts.language_label(code);
            let text = if Some(*code) == active {
                format!("✅ {label}")
            } else {
                label.to_string()
            };
            Button::callback(text, format!("set_language:{code}"))
        })
        .collect();
    InlineKeyboard::default().row(row).row(vec![Button::callback(
        texts.dm_language_close_button,
        "close_language_menu",
    )])
}

/// Group admin panel; `menu` picks the submenu layout.
pub fn group_admin_panel_keyboard(texts: &TextPack, menu: &str) -> InlineKeyboard {
    let mut keyboard = match menu {
        "ban" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("🚫 {}", texts.group_panel_menu_ban_execute_button),
                "group_panel:action:ban",
            )])
            .row(vec![Button::callback(
                format!("ℹ️ {}", texts.group_panel_menu_ban_help_button),
                "group_panel:action:ban_help",
            )]),
        "mute" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("🔇 {}", texts.group_panel_menu_mute_execute_button),
                "group_panel:action:mute",
            )])
            .row(vec![Button::callback(
                format!("ℹ️ {}", texts.group_panel_menu_mute_help_button),
                "group_panel:action:mute_help",
            )]),
        "xp" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("📋 {}", texts.group_panel_menu_xp_list_button),
                "group_panel:action:xp_members",
            )])
            .row(vec![
                Button::callback(
                    format!("✨ {}", texts.group_panel_menu_xp_add_button),
                    "group_panel:action:add_xp",
                ),
                Button::callback(
                    format!("➖ {}", texts.group_panel_menu_xp_remove_button),
                    "group_panel:action:remove_xp",
                ),
            ]),
        "cups" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("🏆 {}", texts.group_panel_menu_cups_latest_button),
                "group_panel:action:cups_latest",
            )])
            .row(vec![Button::callback(
                format!("ℹ️ {}", texts.group_panel_menu_cups_howto_button),
                "group_panel:action:cups_help",
            )]),
        "admins" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("🛡️ {}", texts.group_panel_menu_admins_list_button),
                "group_panel:action:admins_list",
            )])
            .row(vec![Button::callback(
                format!("ℹ️ {}", texts.group_panel_menu_admins_howto_button),
                "group_panel:action:admins_help",
            )]),
        "settings" => InlineKeyboard::default()
            .row(vec![Button::callback(
                format!("🌐 {}", texts.group_panel_menu_settings_tools_button),
                "group_panel:action:settings_tools",
            )])
            .row(vec![Button::callback(
                format!("ℹ️ {}", texts.group_panel_menu_settings_help_button),
                "group_panel:action:settings_help",
            )]),
        _ => InlineKeyboard::default()
            .row(vec![
                Button::callback(
                    format!("ℹ️ {}", texts.group_panel_help_button),
                    "group_panel:help",
                ),
                Button::callback(
                    format!("🔄 {}", texts.group_panel_refresh_button),
                    "group_panel:refresh",
                ),
            ])
            .row(vec![
                Button::callback(
                    format!("🚫 {}", texts.group_panel_ban_button),
                    "group_panel:menu:ban",
                ),
                Button::callback(
                    format!("🔇 {}", texts.group_panel_mute_button),
                    "group_panel:menu:mute",
                ),
            ])
            .row(vec![
                Button::callback(
                    format!("✨ {}", texts.group_panel_add_xp_button),
                    "group_panel:menu:xp",
                ),
                Button::callback(
                    format!("🏆 {}", texts.group_panel_manage_cups_button),
                    "group_panel:menu:cups",
                ),
            ])
            .row(vec![
                Button::callback(
                    format!("🛡️ {}", texts.group_panel_manage_admins_button),
                    "group_panel:menu:admins",
                ),
                Button::callback(
                    format!("⚙️ {}", texts.group_panel_settings_button),
                    "group_panel:menu:settings",
                ),
            ])
            .row(vec![Button::callback(
                format!("✖️ {}", texts.group_panel_close_button),
                "group_panel:close",
            )]),
    };
    if menu != "root" {
        keyboard = keyboard.row(vec![Button::callback(
            format!("⬅️ {}", texts.group_panel_menu_back_button),
            "group_panel:menu:root",
        )]);
    }
    keyboard
}

/// Refresh button under a leaderboard; `board` is `xp` or `cups`.
pub fn leaderboard_refresh_keyboard(board: &str, chat_id: &str, texts: &TextPack) -> InlineKeyboard {
    InlineKeyboard::default().row(vec![Button::callback(
        format!("🔄 {}", texts.group_leaderboard_refresh_button),
        format!("leaderboard:{board}:{chat_id}:refresh"),
    )])
}

/// View switcher under the personal panel.
pub fn personal_panel_keyboard(chat_id: &str, view: &str, texts: &TextPack) -> InlineKeyboard {
    InlineKeyboard::default()
        .row(vec![
            Button::callback(
                format!("👤 {}", texts.group_personal_panel_profile_button),
                format!("personal_panel:view:{chat_id}:profile"),
            ),
            Button::callback(
                format!("📊 {}", texts.group_personal_panel_leaderboard_button),
                format!("personal_panel:view:{chat_id}:leaderboard"),
            ),
        ])
        .row(vec![Button::callback(
            format!("🔄 {}", texts.group_personal_panel_refresh_button),
            format!("personal_panel:refresh:{chat_id}:{view}"),
        )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::ENGLISH_TEXTS;
    use flyzex_core::ButtonAction;

    #[test]
    fn welcome_keyboard_shows_admin_row_only_for_admins() {
        let member = glass_dm_welcome_keyboard(&ENGLISH_TEXTS, None, false);
        let admin = glass_dm_welcome_keyboard(&ENGLISH_TEXTS, None, true);
        assert_eq!(admin.rows.len(), member.rows.len() + 1);
        assert!(admin.rows.iter().any(|row| row
            .iter()
            .any(|b| b.action == ButtonAction::Callback("admin_panel".into()))));
    }

    #[test]
    fn welcome_keyboard_adds_webapp_url_row() {
        let keyboard = glass_dm_welcome_keyboard(&ENGLISH_TEXTS, Some("https://dash.example"), false);
        let last = keyboard.rows.last().unwrap();
        assert_eq!(
            last[0].action,
            ButtonAction::Url("https://dash.example".into())
        );
    }

    #[test]
    fn review_keyboard_encodes_the_applicant_id() {
        let keyboard = application_review_keyboard("u42", &ENGLISH_TEXTS);
        assert_eq!(
            keyboard.rows[0][0].action,
            ButtonAction::Callback("application:u42:approve".into())
        );
        assert_eq!(
            keyboard.rows[0][1].action,
            ButtonAction::Callback("application:u42:reject".into())
        );
    }

    #[test]
    fn group_panel_submenus_carry_a_back_button() {
        for menu in ["ban", "mute", "xp", "cups", "admins", "settings"] {
            let keyboard = group_admin_panel_keyboard(&ENGLISH_TEXTS, menu);
            let last = keyboard.rows.last().unwrap();
            assert_eq!(
                last[0].action,
                ButtonAction::Callback("group_panel:menu:root".into()),
                "menu {menu} is missing its back row"
            );
        }
        let root = group_admin_panel_keyboard(&ENGLISH_TEXTS, "root");
        assert_eq!(
            root.rows.last().unwrap()[0].action,
            ButtonAction::Callback("group_panel:close".into())
        );
    }

    #[test]
    fn language_keyboard_marks_the_active_language() {
        let keyboard = language_options_keyboard(Some("en"), &ENGLISH_TEXTS);
        let row = &keyboard.rows[0];
        let english = row
            .iter()
            .find(|b| b.action == ButtonAction::Callback("set_language:en".into()))
            .unwrap();
        assert!(english.text.starts_with("✅ "));
    }
}
