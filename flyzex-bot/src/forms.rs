//! Built-in application form, used whenever a language has no admin-edited
//! override stored: a role choice, a role-specific follow-up, goals, and
//! availability.

use flyzex_storage::{QuestionDefinition, QuestionKind, QuestionOption};

use crate::localization::TextPack;

/// The default form for one language, built from its text pack.
pub fn default_application_form(texts: &TextPack) -> Vec<QuestionDefinition> {
    let role_options: Vec<QuestionOption> = texts
        .dm_application_role_options
        .iter()
        .map(|(value, labels)| QuestionOption {
            value: (*value).to_string(),
            label: labels.first().map(|label| (*label).to_string()),
            aliases: labels.iter().skip(1).map(|alias| (*alias).to_string()).collect(),
        })
        .collect();

    let mut form = vec![QuestionDefinition {
        question_id: "role_prompt".to_string(),
        title: None,
        prompt: texts.dm_application_role_prompt.to_string(),
        kind: QuestionKind::Choice,
        order: 1,
        required: true,
        options: role_options,
        depends_on: None,
        depends_value: None,
    }];

    for (index, (role_key, prompt)) in texts.dm_application_followup_prompts.iter().enumerate() {
        form.push(QuestionDefinition {
            question_id: format!("followup_{role_key}"),
            title: None,
            prompt: (*prompt).to_string(),
            kind: QuestionKind::Text,
            order: 2 + index as u32,
            required: true,
            options: Vec::new(),
            depends_on: Some("role_prompt".to_string()),
            depends_value: Some((*role_key).to_string()),
        });
    }

    let tail_order = 2 + texts.dm_application_followup_prompts.len() as u32;
    form.push(QuestionDefinition {
        question_id: "goals_prompt".to_string(),
        title: None,
        prompt: texts.dm_application_goals_prompt.to_string(),
        kind: QuestionKind::Text,
        order: tail_order,
        required: true,
        options: Vec::new(),
        depends_on: None,
        depends_value: None,
    });
    form.push(QuestionDefinition {
        question_id: "availability_prompt".to_string(),
        title: None,
        prompt: texts.dm_application_availability_prompt.to_string(),
        kind: QuestionKind::Text,
        order: tail_order + 1,
        required: true,
        options: Vec::new(),
        depends_on: None,
        depends_value: None,
    });
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::localization::ENGLISH_TEXTS;
    use flyzex_storage::select_next_question;
    use std::collections::HashMap;

    #[test]
    fn default_form_branches_on_role() {
        let form = default_application_form(&ENGLISH_TEXTS);
        assert_eq!(form[0].question_id, "role_prompt");
        assert_eq!(form[0].kind, QuestionKind::Choice);

        let mut answered = HashMap::new();
        answered.insert("role_prompt".to_string(), "support".to_string());
        let next = select_next_question(&form, &answered).unwrap();
        assert_eq!(next.question_id, "followup_support");

        answered.insert("followup_support".to_string(), "I mentor".to_string());
        let next = select_next_question(&form, &answered).unwrap();
        assert_eq!(next.question_id, "goals_prompt");
    }

    #[test]
    fn role_options_match_persian_aliases() {
        let form = default_application_form(&ENGLISH_TEXTS);
        let matched = form[0].options.iter().find(|o| o.matches("جنگجو"));
        assert_eq!(matched.unwrap().value, "warrior");
    }
}
