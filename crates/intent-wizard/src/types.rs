use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use atelier_types::{Category, ModelDescriptor};

/// Identifies a questionnaire step and keys its recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionId {
    UseCase,
    Genre,
    Style,
    Audience,
    Reference,
    Models,
}

/// Recorded answers: one value per question, last write wins.
///
/// The free-text brief from the Random Model prompt sits beside the map
/// rather than in it; it is the only open-ended field, everything else is
/// validated against its step's option list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardAnswers {
    values: BTreeMap<QuestionId, String>,
    pub random_brief: Option<String>,
}

impl WizardAnswers {
    pub fn get(&self, question: QuestionId) -> Option<&str> {
        self.values.get(&question).map(String::as_str)
    }

    pub fn set(&mut self, question: QuestionId, value: impl Into<String>) {
        self.values.insert(question, value.into());
    }

    pub fn contains(&self, question: QuestionId) -> bool {
        self.values.contains_key(&question)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.random_brief.is_none()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.random_brief = None;
    }
}

/// Where the questionnaire currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WizardStatus {
    /// Walking the steps; navigation and answering are live.
    InProgress,
    /// The Random Model free-text prompt is open; navigation is held until
    /// the prompt is submitted or cancelled.
    AwaitingPrompt,
    /// The model multi-select sub-flow is open; navigation is held until
    /// the selection is confirmed or cancelled.
    AwaitingSelection,
    /// Category derived and shortlist populated. Re-entry only via reset.
    Complete,
}

/// One step of the questionnaire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepDef {
    pub id: QuestionId,
    pub title: String,
    pub kind: StepKind,
    /// Optional steps may be advanced past without an answer.
    pub optional: bool,
}

/// What a step asks of the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StepKind {
    /// Single choice from a fixed option list.
    Choice { options: Vec<String> },
    /// Opens the multi-select sub-flow over the model catalog.
    ModelSelect,
    /// Reference upload; the core records at most a locator string.
    Upload,
}

/// The wizard's serializable state, also the snapshot unit for drafts.
///
/// `selected_model_id`, when set and `selected_models` is non-empty, is
/// always a member of `selected_models`; the session's selection operations
/// maintain that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardState {
    pub step: usize,
    pub status: WizardStatus,
    pub answers: WizardAnswers,
    pub selected_category: Option<Category>,
    pub available_models: Vec<ModelDescriptor>,
    pub selected_model_id: Option<String>,
    pub selected_models: Vec<String>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: 0,
            status: WizardStatus::InProgress,
            answers: WizardAnswers::default(),
            selected_category: None,
            available_models: Vec::new(),
            selected_model_id: None,
            selected_models: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_last_write_wins() {
        let mut answers = WizardAnswers::default();
        answers.set(QuestionId::Style, "Voxel");
        answers.set(QuestionId::Style, "Cartoon");
        assert_eq!(answers.get(QuestionId::Style), Some("Cartoon"));
        assert_eq!(answers.len(), 1);
    }

    #[test]
    fn answers_clear_drops_brief_too() {
        let mut answers = WizardAnswers::default();
        answers.set(QuestionId::UseCase, "Random Model");
        answers.random_brief = Some("a neon samurai".to_string());
        answers.clear();
        assert!(answers.is_empty());
        assert_eq!(answers.random_brief, None);
    }

    #[test]
    fn question_ids_serialize_as_snake_case_keys() {
        let mut answers = WizardAnswers::default();
        answers.set(QuestionId::UseCase, "Game Asset");
        let json = serde_json::to_value(&answers).unwrap();
        assert_eq!(json["values"]["use_case"], "Game Asset");
    }

    #[test]
    fn status_serializes_tagged() {
        let json = serde_json::to_value(WizardStatus::AwaitingPrompt).unwrap();
        assert_eq!(json["type"], "AwaitingPrompt");
    }
}
