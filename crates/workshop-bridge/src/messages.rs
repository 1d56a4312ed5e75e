use std::fmt;

use serde::{Deserialize, Serialize};

use atelier_types::{HexColor, ModelDescriptor};
use intent_wizard::{QuestionId, WizardState};
use paint_engine::PaintConfig;

/// Identifies one scene-load round trip between the engine and the host.
///
/// Tokens increase monotonically per [`WorkshopState`](crate::WorkshopState);
/// only the newest outstanding token is accepted back, so a slow fetch that
/// resolves after the user already moved on is discarded instead of
/// clobbering the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadToken(pub u64);

impl fmt::Display for LoadToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Messages from the UI (JavaScript main thread) to the engine (WASM Worker).
/// Serialized as JSON for postMessage transfer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UiToEngine {
    // -- Wizard flow --
    /// Record an answer for a questionnaire step.
    Answer {
        question: QuestionId,
        value: String,
    },
    /// Advance the wizard one step (completing it from the last step).
    Next,
    /// Step the wizard back one step.
    Prev,
    /// Throw the questionnaire away and start over.
    ResetWizard,
    /// Submit the free-text brief for the Random Model prompt.
    SubmitRandomBrief {
        text: String,
    },
    /// Close the Random Model prompt without a brief.
    CancelRandomBrief,
    /// Open the model multi-select sub-flow.
    BeginModelSelection,
    /// Confirm the multi-select and advance.
    ConfirmModelSelection,
    /// Close the multi-select without confirming.
    CancelModelSelection,
    /// Ask for the would-be shortlist for the answers so far.
    PreviewModels,

    // -- Selection / compare --
    /// Make one model the active selection.
    SelectModel {
        model_id: String,
    },
    /// Toggle a model in or out of the compare set.
    ToggleModelSelection {
        model_id: String,
    },
    /// Replace the compare set wholesale.
    SetSelectedModels {
        model_ids: Vec<String>,
    },

    // -- Scene loading --
    /// Ask the engine to load a model; the engine answers with a fetch
    /// instruction ([`EngineToUi::LoadRequested`]).
    RequestLoad {
        model_id: String,
    },
    /// Deliver fetched scene bytes (base64) for an earlier load request.
    SceneLoaded {
        token: LoadToken,
        data: String,
    },

    // -- Painting --
    /// Override one part's color.
    SetPartColor {
        part: String,
        color: HexColor,
    },
    /// Highlight a part in the editor (or clear the highlight).
    SetActivePart {
        part: Option<String>,
    },
    /// Paint every part matching a stock group in one stroke.
    PaintGroup {
        group: String,
        color: HexColor,
    },
    /// Drop every color override and revert to native colors.
    ResetColors,

    // -- File operations --
    /// Export the painted scene as a downloadable asset.
    ExportAsset {
        binary: bool,
    },
    /// Serialize the session to a draft file.
    SaveDraft {
        name: Option<String>,
    },
    /// Restore a session from a draft file.
    LoadDraft {
        data: String,
    },
}

/// Messages from the engine (WASM Worker) to the UI (JavaScript main thread).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EngineToUi {
    /// The wizard state after a wizard or selection operation. `changed` is
    /// `false` when the operation was a guarded no-op.
    WizardUpdated {
        changed: bool,
        state: WizardState,
    },

    /// The shortlist preview for the answers recorded so far.
    ModelsPreviewed {
        models: Vec<ModelDescriptor>,
    },

    /// Fetch instruction: the host should fetch `asset_path` and answer
    /// with [`UiToEngine::SceneLoaded`] carrying the same token.
    LoadRequested {
        token: LoadToken,
        asset_path: String,
    },

    /// A scene completion arrived for a superseded request and was dropped.
    LoadDiscarded {
        token: LoadToken,
    },

    /// A scene finished loading: its paintable parts and the colors
    /// currently configured for them.
    SceneReady {
        token: LoadToken,
        parts: Vec<String>,
        paint: PaintConfig,
    },

    /// Part materials changed; the renderer should refresh these parts.
    SceneUpdated {
        dirty_parts: Vec<String>,
    },

    /// The highlighted part changed.
    ActivePartChanged {
        part: Option<String>,
    },

    /// Export finished: a base64 payload plus download name and MIME type.
    ExportReady {
        file_name: String,
        mime: String,
        data: String,
    },

    /// Draft serialization finished.
    DraftSaved {
        json_data: String,
    },

    /// A draft was restored. The paint config applies once the draft's
    /// model is (re)loaded.
    DraftLoaded {
        state: WizardState,
        paint: PaintConfig,
    },

    /// An error occurred in the engine.
    Error {
        message: String,
        model_id: Option<String>,
    },
}
