//! WorkshopBuilder — fluent API for scripting customizer sessions in tests.
//!
//! Wraps `workshop_bridge::dispatch()` to test the real dispatch path, not a
//! simulation. Scene bytes come from a configurable source, so the same
//! scenario runs against the mock importer or the real glTF parser.

use atelier_types::{HexColor, ModelDescriptor};
use base64::Engine;
use intent_wizard::{QuestionId, WizardState, WizardStatus};
use model_registry::Registry;
use paint_engine::PaintConfig;
use scene_kernel::{GltfImporter, MockImporter, SceneBuilder, SceneDocument};
use workshop_bridge::messages::*;
use workshop_bridge::WorkshopState;

use crate::assertions;
use crate::helpers::*;

/// A decoded export: download name, MIME type, and raw payload bytes.
#[derive(Debug, Clone)]
pub struct ExportedAsset {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Where delivered scene payloads come from.
#[derive(Debug)]
enum SceneSource {
    /// Every load yields a clone of one prepared scene; payload bytes are
    /// ignored.
    Mock(SceneDocument),
    /// Payload bytes go through the real glTF importer.
    Gltf,
}

/// A fluent builder for driving and verifying customizer sessions.
///
/// Wraps [`WorkshopState`] and feeds every call through the real message
/// dispatch, so scenarios exercise exactly what the UI exercises. Methods
/// that expect a particular response convert anything else into
/// [`HarnessError`]; guarded no-ops surface as [`HarnessError::Rejected`].
#[derive(Debug)]
pub struct WorkshopBuilder {
    pub state: WorkshopState,
    source: SceneSource,
    history: Vec<(String, String)>,
}

impl WorkshopBuilder {
    /// A builder over the shipped catalog delivering the stock three-part
    /// avatar for every load.
    pub fn mock() -> Self {
        Self::with_scene(SceneBuilder::avatar())
    }

    /// A builder delivering clones of `scene` for every load.
    pub fn with_scene(scene: SceneDocument) -> Self {
        Self {
            state: WorkshopState::new(),
            source: SceneSource::Mock(scene),
            history: Vec::new(),
        }
    }

    /// A builder that parses delivered payloads with the real glTF importer.
    pub fn gltf() -> Self {
        Self {
            state: WorkshopState::new(),
            source: SceneSource::Gltf,
            history: Vec::new(),
        }
    }

    /// Swap in a custom catalog before the session starts.
    pub fn with_catalog(mut self, registry: Registry) -> Self {
        self.state = WorkshopState::with_registry(registry);
        self
    }

    /// Make subsequent loads deliver clones of `scene` (a glTF builder
    /// switches to the mock source).
    pub fn set_scene(&mut self, scene: SceneDocument) -> &mut Self {
        self.source = SceneSource::Mock(scene);
        self
    }

    /// Dispatch one raw message and record it in the history log.
    pub fn send(&mut self, msg: UiToEngine) -> EngineToUi {
        let sent = message_label(&msg);
        let response = match &self.source {
            SceneSource::Mock(scene) => {
                let importer = MockImporter::returning(scene.clone());
                workshop_bridge::dispatch(&mut self.state, msg, &importer)
            }
            SceneSource::Gltf => {
                workshop_bridge::dispatch(&mut self.state, msg, &GltfImporter::new())
            }
        };
        self.history
            .push((sent.to_string(), response_label(&response).to_string()));
        response
    }

    // ── Wizard Flow ─────────────────────────────────────────────────────

    /// Record an answer for a questionnaire step.
    pub fn answer(&mut self, question: QuestionId, value: &str) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::Answer {
            question,
            value: value.to_string(),
        })
    }

    /// Advance the wizard one step.
    pub fn next(&mut self) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::Next)
    }

    /// Step the wizard back one step.
    pub fn prev(&mut self) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::Prev)
    }

    /// Throw the questionnaire away and start over.
    pub fn reset_wizard(&mut self) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::ResetWizard)
    }

    /// Submit the free-text brief for the Random Model prompt.
    pub fn submit_random_brief(&mut self, text: &str) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::SubmitRandomBrief {
            text: text.to_string(),
        })
    }

    /// Close the Random Model prompt without a brief.
    pub fn cancel_random_brief(&mut self) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::CancelRandomBrief)
    }

    /// Answer all four choice questions and advance through the optional
    /// reference step, leaving the wizard on the model-select step.
    pub fn complete_intake(&mut self) -> Result<&mut Self, HarnessError> {
        for (question, value) in standard_intake() {
            self.answer(question, value)?.next()?;
        }
        // Past the optional reference step onto the model select.
        self.next()
    }

    /// Drive the multi-select sub-flow: begin, toggle each id, confirm.
    /// Completes the wizard when called on the model-select step.
    pub fn choose_models(&mut self, ids: &[&str]) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::BeginModelSelection)?;
        for id in ids {
            self.wizard_op(UiToEngine::ToggleModelSelection {
                model_id: id.to_string(),
            })?;
        }
        self.wizard_op(UiToEngine::ConfirmModelSelection)
    }

    /// The would-be shortlist for the answers recorded so far.
    pub fn preview(&mut self) -> Result<Vec<ModelDescriptor>, HarnessError> {
        match self.send(UiToEngine::PreviewModels) {
            EngineToUi::ModelsPreviewed { models } => Ok(models),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("PreviewModels", &other)),
        }
    }

    // ── Selection / Compare ─────────────────────────────────────────────

    /// Make `id` the active selection.
    pub fn select_model(&mut self, id: &str) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::SelectModel {
            model_id: id.to_string(),
        })
    }

    /// Toggle `id` in or out of the compare set.
    pub fn toggle_model(&mut self, id: &str) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::ToggleModelSelection {
            model_id: id.to_string(),
        })
    }

    /// Replace the compare set wholesale.
    pub fn set_selected_models(&mut self, ids: &[&str]) -> Result<&mut Self, HarnessError> {
        self.wizard_op(UiToEngine::SetSelectedModels {
            model_ids: ids.iter().map(|s| s.to_string()).collect(),
        })
    }

    // ── Scene Loading ───────────────────────────────────────────────────

    /// Ask the engine for a fetch instruction, returning the issued token.
    pub fn request_load(&mut self, model_id: &str) -> Result<LoadToken, HarnessError> {
        match self.send(UiToEngine::RequestLoad {
            model_id: model_id.to_string(),
        }) {
            EngineToUi::LoadRequested { token, .. } => Ok(token),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("RequestLoad", &other)),
        }
    }

    /// Deliver payload bytes for `token`. Returns the ready part list, or
    /// [`HarnessError::Rejected`] when the token was superseded.
    pub fn deliver(
        &mut self,
        token: LoadToken,
        payload: &[u8],
    ) -> Result<Vec<String>, HarnessError> {
        match self.send(UiToEngine::SceneLoaded {
            token,
            data: encode_payload(payload),
        }) {
            EngineToUi::SceneReady { parts, .. } => Ok(parts),
            EngineToUi::LoadDiscarded { .. } => Err(HarnessError::Rejected {
                op: "SceneLoaded".to_string(),
            }),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("SceneLoaded", &other)),
        }
    }

    /// Request a load and immediately deliver `payload` for its token.
    pub fn load_with(
        &mut self,
        model_id: &str,
        payload: &[u8],
    ) -> Result<Vec<String>, HarnessError> {
        let token = self.request_load(model_id)?;
        self.deliver(token, payload)
    }

    /// Request a load and deliver an empty payload, which the mock source
    /// ignores. A glTF builder needs [`load_with`](Self::load_with) and real
    /// container bytes.
    pub fn load(&mut self, model_id: &str) -> Result<Vec<String>, HarnessError> {
        self.load_with(model_id, b"")
    }

    // ── Painting ────────────────────────────────────────────────────────

    /// Override one part's color. Returns the renderer-dirty part list.
    pub fn paint(&mut self, part: &str, color: HexColor) -> Result<Vec<String>, HarnessError> {
        self.scene_op(UiToEngine::SetPartColor {
            part: part.to_string(),
            color,
        })
    }

    /// Paint every part matching a stock group in one stroke.
    pub fn paint_group(&mut self, group: &str, color: HexColor) -> Result<Vec<String>, HarnessError> {
        self.scene_op(UiToEngine::PaintGroup {
            group: group.to_string(),
            color,
        })
    }

    /// Drop every override and revert to native colors.
    pub fn reset_colors(&mut self) -> Result<Vec<String>, HarnessError> {
        self.scene_op(UiToEngine::ResetColors)
    }

    /// Highlight `part`, or clear the highlight with `None`. Returns the
    /// highlight the engine settled on.
    pub fn activate(&mut self, part: Option<&str>) -> Result<Option<String>, HarnessError> {
        match self.send(UiToEngine::SetActivePart {
            part: part.map(str::to_string),
        }) {
            EngineToUi::ActivePartChanged { part } => Ok(part),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("SetActivePart", &other)),
        }
    }

    // ── File Operations ─────────────────────────────────────────────────

    /// Export the painted scene, decoding the payload back to bytes.
    pub fn export(&mut self, binary: bool) -> Result<ExportedAsset, HarnessError> {
        match self.send(UiToEngine::ExportAsset { binary }) {
            EngineToUi::ExportReady {
                file_name,
                mime,
                data,
            } => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(data.as_bytes())
                    .map_err(|e| HarnessError::Payload {
                        reason: e.to_string(),
                    })?;
                Ok(ExportedAsset {
                    file_name,
                    mime,
                    bytes,
                })
            }
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("ExportAsset", &other)),
        }
    }

    /// Serialize the session to a draft, returning the JSON document.
    pub fn save_draft(&mut self, name: Option<&str>) -> Result<String, HarnessError> {
        match self.send(UiToEngine::SaveDraft {
            name: name.map(str::to_string),
        }) {
            EngineToUi::DraftSaved { json_data } => Ok(json_data),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("SaveDraft", &other)),
        }
    }

    /// Restore a session from a draft document.
    pub fn load_draft(&mut self, json: &str) -> Result<(WizardState, PaintConfig), HarnessError> {
        match self.send(UiToEngine::LoadDraft {
            data: json.to_string(),
        }) {
            EngineToUi::DraftLoaded { state, paint } => Ok((state, paint)),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected("LoadDraft", &other)),
        }
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// The current wizard snapshot.
    pub fn wizard_state(&self) -> WizardState {
        self.state.wizard.snapshot()
    }

    pub fn status(&self) -> WizardStatus {
        self.state.wizard.status()
    }

    /// Discovered part names of the loaded scene.
    pub fn parts(&self) -> &[String] {
        self.state.bench.parts()
    }

    /// The color currently configured for `part`.
    pub fn configured_color(&self, part: &str) -> Option<HexColor> {
        self.state.bench.config().get(part)
    }

    /// The color currently applied to `part` in the scene.
    pub fn scene_color(&self, part: &str) -> Option<HexColor> {
        self.state.scene.as_ref()?.part_color(part)
    }

    /// The highlighted part.
    pub fn active_part(&self) -> Option<&str> {
        self.state.bench.active_part()
    }

    /// Id of the model the current scene was loaded from.
    pub fn current_model_id(&self) -> Option<&str> {
        self.state.current_model.as_ref().map(|m| m.id.as_str())
    }

    /// The dispatch history log as (sent, response) labels.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert the wizard sits in `expected` status.
    pub fn assert_status(&self, expected: WizardStatus) -> Result<&Self, HarnessError> {
        let actual = self.status();
        if actual == expected {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("expected wizard status {:?}, got {:?}", expected, actual),
            })
        }
    }

    /// Assert the questionnaire has completed.
    pub fn assert_complete(&self) -> Result<&Self, HarnessError> {
        self.assert_status(WizardStatus::Complete)
    }

    /// Assert the discovered part list matches exactly, order included.
    pub fn assert_parts(&self, expected: &[&str]) -> Result<&Self, HarnessError> {
        assertions::assert_scene_parts(&self.state, expected)?;
        Ok(self)
    }

    /// Assert `part` is painted `color` in both the config and the scene.
    pub fn assert_painted(&self, part: &str, color: HexColor) -> Result<&Self, HarnessError> {
        assertions::assert_painted(&self.state, part, color)?;
        Ok(self)
    }

    // ── Internal Helpers ────────────────────────────────────────────────

    /// Dispatch a message that must answer `WizardUpdated { changed: true }`.
    fn wizard_op(&mut self, msg: UiToEngine) -> Result<&mut Self, HarnessError> {
        let op = message_label(&msg);
        match self.send(msg) {
            EngineToUi::WizardUpdated { changed: true, .. } => Ok(self),
            EngineToUi::WizardUpdated { changed: false, .. } => Err(HarnessError::Rejected {
                op: op.to_string(),
            }),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected(op, &other)),
        }
    }

    /// Dispatch a paint message that must answer `SceneUpdated`.
    fn scene_op(&mut self, msg: UiToEngine) -> Result<Vec<String>, HarnessError> {
        let op = message_label(&msg);
        match self.send(msg) {
            EngineToUi::SceneUpdated { dirty_parts } => Ok(dirty_parts),
            EngineToUi::Error { message, .. } => Err(HarnessError::DispatchError { message }),
            other => Err(unexpected(op, &other)),
        }
    }
}

fn unexpected(op: &str, got: &EngineToUi) -> HarnessError {
    HarnessError::UnexpectedResponse {
        op: op.to_string(),
        got: response_label(got).to_string(),
    }
}

fn message_label(msg: &UiToEngine) -> &'static str {
    match msg {
        UiToEngine::Answer { .. } => "Answer",
        UiToEngine::Next => "Next",
        UiToEngine::Prev => "Prev",
        UiToEngine::ResetWizard => "ResetWizard",
        UiToEngine::SubmitRandomBrief { .. } => "SubmitRandomBrief",
        UiToEngine::CancelRandomBrief => "CancelRandomBrief",
        UiToEngine::BeginModelSelection => "BeginModelSelection",
        UiToEngine::ConfirmModelSelection => "ConfirmModelSelection",
        UiToEngine::CancelModelSelection => "CancelModelSelection",
        UiToEngine::PreviewModels => "PreviewModels",
        UiToEngine::SelectModel { .. } => "SelectModel",
        UiToEngine::ToggleModelSelection { .. } => "ToggleModelSelection",
        UiToEngine::SetSelectedModels { .. } => "SetSelectedModels",
        UiToEngine::RequestLoad { .. } => "RequestLoad",
        UiToEngine::SceneLoaded { .. } => "SceneLoaded",
        UiToEngine::SetPartColor { .. } => "SetPartColor",
        UiToEngine::SetActivePart { .. } => "SetActivePart",
        UiToEngine::PaintGroup { .. } => "PaintGroup",
        UiToEngine::ResetColors => "ResetColors",
        UiToEngine::ExportAsset { .. } => "ExportAsset",
        UiToEngine::SaveDraft { .. } => "SaveDraft",
        UiToEngine::LoadDraft { .. } => "LoadDraft",
    }
}

fn response_label(msg: &EngineToUi) -> &'static str {
    match msg {
        EngineToUi::WizardUpdated { .. } => "WizardUpdated",
        EngineToUi::ModelsPreviewed { .. } => "ModelsPreviewed",
        EngineToUi::LoadRequested { .. } => "LoadRequested",
        EngineToUi::LoadDiscarded { .. } => "LoadDiscarded",
        EngineToUi::SceneReady { .. } => "SceneReady",
        EngineToUi::SceneUpdated { .. } => "SceneUpdated",
        EngineToUi::ActivePartChanged { .. } => "ActivePartChanged",
        EngineToUi::ExportReady { .. } => "ExportReady",
        EngineToUi::DraftSaved { .. } => "DraftSaved",
        EngineToUi::DraftLoaded { .. } => "DraftLoaded",
        EngineToUi::Error { .. } => "Error",
    }
}
