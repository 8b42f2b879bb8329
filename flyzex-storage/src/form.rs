//! Application form definitions: ordered questions with optional choice
//! options and `depends_on` branching, editable by admins as JSON.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Choice,
}

impl Default for QuestionKind {
    fn default() -> Self {
        QuestionKind::Text
    }
}

/// One selectable option of a choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl QuestionOption {
    /// Case-insensitive match against the value, label, or any alias.
    pub fn matches(&self, answer: &str) -> bool {
        let answer = answer.trim();
        let eq = |candidate: &str| candidate.trim().eq_ignore_ascii_case(answer)
            || candidate.trim().to_lowercase() == answer.to_lowercase();
        eq(&self.value)
            || self.label.as_deref().is_some_and(eq)
            || self.aliases.iter().any(|alias| eq(alias))
    }

    /// Label when present, otherwise the raw value.
    pub fn display_label(&self) -> &str {
        self.label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.value)
    }
}

/// One question of the application form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub question_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub prompt: String,
    #[serde(default)]
    pub kind: QuestionKind,
    #[serde(default)]
    pub order: u32,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    #[serde(default)]
    pub depends_on: Option<String>,
    #[serde(default)]
    pub depends_value: Option<String>,
}

fn default_required() -> bool {
    true
}

impl QuestionDefinition {
    /// Title, falling back to the prompt and then the id.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(if self.prompt.is_empty() {
                &self.question_id
            } else {
                &self.prompt
            })
    }
}

/// Picks the next unanswered question whose dependency (if any) is satisfied
/// by an already-recorded answer.
pub fn select_next_question<'a>(
    definitions: &'a [QuestionDefinition],
    answered: &HashMap<String, String>,
) -> Option<&'a QuestionDefinition> {
    definitions.iter().find(|definition| {
        if answered.contains_key(&definition.question_id) {
            return false;
        }
        match &definition.depends_on {
            None => true,
            Some(dependency) => match answered.get(dependency) {
                None => false,
                Some(value) => definition
                    .depends_value
                    .as_ref()
                    .map_or(true, |expected| value == expected),
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, depends_on: Option<&str>, depends_value: Option<&str>) -> QuestionDefinition {
        QuestionDefinition {
            question_id: id.to_string(),
            title: None,
            prompt: format!("prompt {id}"),
            kind: QuestionKind::Text,
            order: 0,
            required: true,
            options: Vec::new(),
            depends_on: depends_on.map(str::to_string),
            depends_value: depends_value.map(str::to_string),
        }
    }

    #[test]
    fn option_matches_value_label_and_alias_case_insensitively() {
        let option = QuestionOption {
            value: "warrior".into(),
            label: Some("Front-line warrior".into()),
            aliases: vec!["جنگجو".into()],
        };
        assert!(option.matches("WARRIOR"));
        assert!(option.matches("front-line warrior"));
        assert!(option.matches("جنگجو"));
        assert!(!option.matches("healer"));
    }

    #[test]
    fn branching_waits_for_dependency_then_filters_by_value() {
        let definitions = vec![
            question("role", None, None),
            question("followup_warrior", Some("role"), Some("warrior")),
            question("goals", None, None),
        ];

        let mut answered = HashMap::new();
        assert_eq!(
            select_next_question(&definitions, &answered).unwrap().question_id,
            "role"
        );

        answered.insert("role".to_string(), "healer".to_string());
        assert_eq!(
            select_next_question(&definitions, &answered).unwrap().question_id,
            "goals"
        );

        answered.insert("role".to_string(), "warrior".to_string());
        assert_eq!(
            select_next_question(&definitions, &answered).unwrap().question_id,
            "followup_warrior"
        );
    }

    #[test]
    fn definition_round_trips_admin_json() {
        let json = r#"{
            "question_id": "q1",
            "title": "Role",
            "prompt": "What is your role?",
            "kind": "choice",
            "order": 1,
            "required": true,
            "options": [{"value": "warrior", "label": "Warrior"}],
            "depends_on": null,
            "depends_value": null
        }"#;
        let definition: QuestionDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(definition.kind, QuestionKind::Choice);
        assert_eq!(definition.options[0].display_label(), "Warrior");

        let back = serde_json::to_string(&definition).unwrap();
        let reparsed: QuestionDefinition = serde_json::from_str(&back).unwrap();
        assert_eq!(reparsed, definition);
    }
}
