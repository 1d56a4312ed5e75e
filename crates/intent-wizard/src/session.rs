//! The questionnaire state machine.

use atelier_types::ModelDescriptor;
use model_registry::Registry;

use crate::rules;
use crate::steps;
use crate::types::{QuestionId, StepDef, StepKind, WizardState, WizardStatus};

/// Drives an ordered questionnaire to a terminal category decision, and
/// tracks model selection for side-by-side comparison afterwards.
///
/// Guarded operations never fail: anything invalid in the current status
/// (or with a missing precondition) leaves the state untouched and returns
/// `false`, so the UI disables the matching control instead of handling
/// errors.
#[derive(Debug)]
pub struct WizardSession {
    steps: Vec<StepDef>,
    state: WizardState,
}

impl WizardSession {
    /// A session over the default product flow.
    pub fn new() -> Self {
        Self::with_steps(steps::default_flow())
    }

    pub fn with_steps(steps: Vec<StepDef>) -> Self {
        assert!(!steps.is_empty(), "a wizard flow needs at least one step");
        Self {
            steps,
            state: WizardState::default(),
        }
    }

    pub fn steps(&self) -> &[StepDef] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> usize {
        self.state.step
    }

    pub fn status(&self) -> WizardStatus {
        self.state.status
    }

    pub fn current_step(&self) -> &StepDef {
        &self.steps[self.state.step]
    }

    /// Snapshot for drafts; [`restore`](Self::restore) is the inverse.
    pub fn snapshot(&self) -> WizardState {
        self.state.clone()
    }

    /// Replace the state wholesale, clamping the step into range in case the
    /// snapshot came from a longer flow.
    pub fn restore(&mut self, mut state: WizardState) {
        state.step = state.step.min(self.steps.len() - 1);
        self.state = state;
    }

    // ── Questionnaire ──────────────────────────────────────────────────────

    /// Record an answer. Choice answers must be one of the step's options;
    /// the model multi-select has no scalar answer and is driven by its
    /// sub-flow instead. Answering the use-case question with
    /// "Random Model" opens the free-text prompt.
    ///
    /// Recording does not advance the step.
    pub fn answer(&mut self, question: QuestionId, value: impl Into<String>) -> bool {
        if self.state.status != WizardStatus::InProgress {
            return false;
        }
        let value = value.into();
        let Some(step) = self.steps.iter().find(|s| s.id == question) else {
            return false;
        };
        match &step.kind {
            StepKind::Choice { options } => {
                if !options.iter().any(|o| o == &value) {
                    return false;
                }
            }
            StepKind::Upload => {}
            StepKind::ModelSelect => return false,
        }

        let opens_prompt = question == QuestionId::UseCase && value == steps::RANDOM_MODEL;
        self.state.answers.set(question, value);
        if opens_prompt {
            self.state.status = WizardStatus::AwaitingPrompt;
        }
        true
    }

    /// Whether `next` would currently move.
    pub fn can_advance(&self) -> bool {
        self.state.status == WizardStatus::InProgress && self.step_satisfied(self.current_step())
    }

    /// Advance one step; from the last step, derive the category, fill the
    /// shortlist from the registry, preselect a model, and complete.
    pub fn next(&mut self, registry: &Registry) -> bool {
        if !self.can_advance() {
            return false;
        }
        if self.state.step + 1 >= self.steps.len() {
            self.complete(registry);
        } else {
            self.state.step += 1;
        }
        true
    }

    /// Step back one step, stopping at the first. No-op once complete;
    /// re-entry is only via [`reset`](Self::reset).
    pub fn prev(&mut self) -> bool {
        if self.state.status != WizardStatus::InProgress || self.state.step == 0 {
            return false;
        }
        self.state.step -= 1;
        true
    }

    /// Back to a fresh session. Valid in every status.
    pub fn reset(&mut self) {
        self.state = WizardState::default();
    }

    /// The would-be shortlist for the answers recorded so far, without
    /// finalizing anything. Lets the UI preview models mid-flow.
    pub fn preview_models(&self, registry: &Registry) -> Vec<ModelDescriptor> {
        let category = rules::derive_category(&self.state.answers);
        registry
            .list_by_category(category)
            .into_iter()
            .cloned()
            .collect()
    }

    fn step_satisfied(&self, step: &StepDef) -> bool {
        step.optional || self.state.answers.contains(step.id)
    }

    fn complete(&mut self, registry: &Registry) {
        let category = rules::derive_category(&self.state.answers);
        let models: Vec<ModelDescriptor> = registry
            .list_by_category(category)
            .into_iter()
            .cloned()
            .collect();
        self.state.selected_model_id = self
            .state
            .selected_models
            .first()
            .cloned()
            .or_else(|| models.first().map(|m| m.id.clone()));
        self.state.selected_category = Some(category);
        self.state.available_models = models;
        self.state.status = WizardStatus::Complete;
    }

    // ── Random Model prompt ────────────────────────────────────────────────

    /// Store the free-text brief and close the prompt. Control returns to
    /// the same step; the user still presses next themselves.
    pub fn submit_random_brief(&mut self, text: impl Into<String>) -> bool {
        if self.state.status != WizardStatus::AwaitingPrompt {
            return false;
        }
        self.state.answers.random_brief = Some(text.into());
        self.state.status = WizardStatus::InProgress;
        true
    }

    /// Close the prompt without storing a brief. The "Random Model" answer
    /// stays recorded.
    pub fn cancel_random_brief(&mut self) -> bool {
        if self.state.status != WizardStatus::AwaitingPrompt {
            return false;
        }
        self.state.status = WizardStatus::InProgress;
        true
    }

    // ── Model multi-select sub-flow ────────────────────────────────────────

    /// Open the multi-select sub-flow. Only valid while the current step is
    /// the model-select step.
    pub fn begin_model_selection(&mut self) -> bool {
        if self.state.status != WizardStatus::InProgress {
            return false;
        }
        if !matches!(self.current_step().kind, StepKind::ModelSelect) {
            return false;
        }
        self.state.status = WizardStatus::AwaitingSelection;
        true
    }

    /// Confirm a non-empty selection: the step counts as answered, the first
    /// chosen model becomes the selected one, and the wizard advances as if
    /// next had been pressed.
    pub fn confirm_model_selection(&mut self, registry: &Registry) -> bool {
        if self.state.status != WizardStatus::AwaitingSelection
            || self.state.selected_models.is_empty()
        {
            return false;
        }
        self.state.status = WizardStatus::InProgress;
        self.state
            .answers
            .set(QuestionId::Models, self.state.selected_models.join(","));
        self.state.selected_model_id = self.state.selected_models.first().cloned();
        self.next(registry)
    }

    /// Close the sub-flow without marking the step answered. Membership
    /// toggled so far is kept.
    pub fn cancel_model_selection(&mut self) -> bool {
        if self.state.status != WizardStatus::AwaitingSelection {
            return false;
        }
        self.state.status = WizardStatus::InProgress;
        true
    }

    // ── Selection / compare ────────────────────────────────────────────────

    /// Make `id` the active model. Unknown ids are rejected; while the
    /// compare set is non-empty the id must be one of its members.
    pub fn select_model(&mut self, registry: &Registry, id: &str) -> bool {
        if registry.find(id).is_err() {
            return false;
        }
        if !self.state.selected_models.is_empty()
            && !self.state.selected_models.iter().any(|m| m == id)
        {
            return false;
        }
        self.state.selected_model_id = Some(id.to_string());
        true
    }

    /// Symmetric membership toggle on the compare set. Removing the active
    /// model moves the selection to the first remaining member, or clears it
    /// together with the set.
    pub fn toggle_model_selection(&mut self, registry: &Registry, id: &str) -> bool {
        if registry.find(id).is_err() {
            return false;
        }
        if let Some(pos) = self.state.selected_models.iter().position(|m| m == id) {
            self.state.selected_models.remove(pos);
            if self.state.selected_model_id.as_deref() == Some(id) {
                self.state.selected_model_id = self.state.selected_models.first().cloned();
            }
        } else {
            self.state.selected_models.push(id.to_string());
        }
        self.enforce_selection_membership();
        true
    }

    /// Bulk-replace the compare set. Unknown ids are dropped, duplicates
    /// collapse to their first occurrence, order is kept.
    pub fn set_selected_models<I, S>(&mut self, registry: &Registry, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut kept: Vec<String> = Vec::new();
        for id in ids {
            let id = id.into();
            if registry.find(&id).is_ok() && !kept.contains(&id) {
                kept.push(id);
            }
        }
        self.state.selected_models = kept;
        self.enforce_selection_membership();
    }

    /// Re-establish membership of `selected_model_id` in a non-empty
    /// `selected_models` after the set changed under an existing selection.
    fn enforce_selection_membership(&mut self) {
        let Some(current) = self.state.selected_model_id.as_deref() else {
            return;
        };
        if self.state.selected_models.is_empty() {
            return;
        }
        if !self.state.selected_models.iter().any(|m| m == current) {
            self.state.selected_model_id = self.state.selected_models.first().cloned();
        }
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}
