use atelier_types::ModelDescriptor;
use file_format::DraftMetadata;
use intent_wizard::WizardSession;
use model_registry::Registry;
use paint_engine::PaintBench;
use scene_kernel::SceneDocument;

use crate::messages::LoadToken;

/// The engine state wrapper for the WASM bridge.
///
/// One instance per bridge: the catalog, the wizard session, the paint
/// bench, and the currently loaded scene, plus the in-flight load tracking
/// that keeps slow fetches from clobbering newer ones.
#[derive(Debug)]
pub struct WorkshopState {
    /// The model catalog queries run against.
    pub registry: Registry,
    /// The questionnaire and selection state machine.
    pub wizard: WizardSession,
    /// The paint session for the loaded scene.
    pub bench: PaintBench,
    /// The loaded scene, if a load has resolved.
    pub scene: Option<SceneDocument>,
    /// The descriptor the current scene was loaded from.
    pub current_model: Option<ModelDescriptor>,
    /// Draft metadata for save operations.
    pub meta: DraftMetadata,
    pending_load: Option<PendingLoad>,
    last_token: u64,
}

#[derive(Debug)]
struct PendingLoad {
    token: LoadToken,
    model_id: String,
}

impl WorkshopState {
    /// A workshop over the shipped catalog.
    pub fn new() -> Self {
        Self::with_registry(Registry::builtin())
    }

    pub fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            wizard: WizardSession::new(),
            bench: PaintBench::new(),
            scene: None,
            current_model: None,
            meta: DraftMetadata::new("Untitled"),
            pending_load: None,
            last_token: 0,
        }
    }

    /// Issue a token for a new load request. The new request supersedes any
    /// outstanding one; the superseded completion will be discarded when it
    /// arrives.
    pub fn begin_load(&mut self, model_id: String) -> LoadToken {
        self.last_token += 1;
        let token = LoadToken(self.last_token);
        self.pending_load = Some(PendingLoad { token, model_id });
        token
    }

    /// Accept a completion if its token matches the outstanding request,
    /// returning the model id the request was for. A match consumes the
    /// request, so a failed import needs a fresh `begin_load` to retry.
    pub fn accept_load(&mut self, token: LoadToken) -> Option<String> {
        if self.pending_load.as_ref()?.token != token {
            return None;
        }
        self.pending_load.take().map(|p| p.model_id)
    }

    /// The token of the outstanding load request, if any.
    pub fn pending_load(&self) -> Option<LoadToken> {
        self.pending_load.as_ref().map(|p| p.token)
    }
}

impl Default for WorkshopState {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from the WASM bridge layer.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BridgeError {
    #[error("registry error: {0}")]
    Registry(#[from] model_registry::RegistryError),

    #[error("scene error: {0}")]
    Scene(#[from] scene_kernel::SceneError),

    #[error("draft error: {0}")]
    Draft(#[from] file_format::LoadError),

    #[error("export error: {0}")]
    Export(#[from] file_format::ExportError),

    #[error("no scene loaded")]
    NoScene,

    #[error("bad payload: {reason}")]
    Payload { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_increase_and_supersede() {
        let mut state = WorkshopState::new();
        let first = state.begin_load("avatar-1".into());
        let second = state.begin_load("avatar-2".into());
        assert!(second > first);

        // The superseded completion is refused, the newest accepted.
        assert_eq!(state.accept_load(first), None);
        assert_eq!(state.accept_load(second), Some("avatar-2".to_string()));

        // A completion consumes the request.
        assert_eq!(state.accept_load(second), None);
        assert_eq!(state.pending_load(), None);
    }

    #[test]
    fn completion_without_request_is_refused() {
        let mut state = WorkshopState::new();
        assert_eq!(state.accept_load(LoadToken(1)), None);
    }
}
