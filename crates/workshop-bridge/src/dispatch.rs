use base64::Engine;
use tracing::debug;

use scene_kernel::SceneImporter;

use crate::messages::{EngineToUi, UiToEngine};
use crate::workshop_state::{BridgeError, WorkshopState};

/// Dispatch a UI message to the engine and return a response.
///
/// This is the main entry point for processing messages from the JavaScript
/// main thread. Each message is dispatched to the appropriate engine method,
/// and the result is converted to an EngineToUi response. Guarded wizard and
/// paint operations answer with unchanged state instead of erroring; only
/// lookup and resource failures surface as [`EngineToUi::Error`].
pub fn dispatch(
    state: &mut WorkshopState,
    msg: UiToEngine,
    importer: &dyn SceneImporter,
) -> EngineToUi {
    match handle_message(state, msg, importer) {
        Ok(response) => response,
        Err(e) => EngineToUi::Error {
            message: e.to_string(),
            model_id: None,
        },
    }
}

fn handle_message(
    state: &mut WorkshopState,
    msg: UiToEngine,
    importer: &dyn SceneImporter,
) -> Result<EngineToUi, BridgeError> {
    match msg {
        // -- Wizard flow --
        UiToEngine::Answer { question, value } => {
            let changed = state.wizard.answer(question, value);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::Next => {
            let changed = state.wizard.next(&state.registry);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::Prev => {
            let changed = state.wizard.prev();
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::ResetWizard => {
            state.wizard.reset();
            Ok(wizard_updated(state, true))
        }

        UiToEngine::SubmitRandomBrief { text } => {
            let changed = state.wizard.submit_random_brief(text);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::CancelRandomBrief => {
            let changed = state.wizard.cancel_random_brief();
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::BeginModelSelection => {
            let changed = state.wizard.begin_model_selection();
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::ConfirmModelSelection => {
            let changed = state.wizard.confirm_model_selection(&state.registry);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::CancelModelSelection => {
            let changed = state.wizard.cancel_model_selection();
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::PreviewModels => Ok(EngineToUi::ModelsPreviewed {
            models: state.wizard.preview_models(&state.registry),
        }),

        // -- Selection / compare --
        UiToEngine::SelectModel { model_id } => {
            let changed = state.wizard.select_model(&state.registry, &model_id);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::ToggleModelSelection { model_id } => {
            let changed = state.wizard.toggle_model_selection(&state.registry, &model_id);
            Ok(wizard_updated(state, changed))
        }

        UiToEngine::SetSelectedModels { model_ids } => {
            state.wizard.set_selected_models(&state.registry, model_ids);
            Ok(wizard_updated(state, true))
        }

        // -- Scene loading --
        UiToEngine::RequestLoad { model_id } => {
            let asset_path = state.registry.find(&model_id)?.asset_path.clone();
            let token = state.begin_load(model_id);
            debug!(token = token.0, asset_path, "load requested");
            Ok(EngineToUi::LoadRequested { token, asset_path })
        }

        UiToEngine::SceneLoaded { token, data } => {
            let Some(model_id) = state.accept_load(token) else {
                debug!(token = token.0, "discarding superseded scene completion");
                return Ok(EngineToUi::LoadDiscarded { token });
            };
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(data.as_bytes())
                .map_err(|e| BridgeError::Payload {
                    reason: e.to_string(),
                })?;
            let mut scene = importer.import(&bytes)?;
            state.bench.rebind(&mut scene);
            // SceneReady means a full renderer rebuild; per-part dirt is moot.
            scene.take_dirty();
            state.current_model = state.registry.find(&model_id).ok().cloned();
            state.scene = Some(scene);
            debug!(
                token = token.0,
                parts = state.bench.parts().len(),
                "scene ready"
            );
            Ok(EngineToUi::SceneReady {
                token,
                parts: state.bench.parts().to_vec(),
                paint: state.bench.config().clone(),
            })
        }

        // -- Painting --
        UiToEngine::SetPartColor { part, color } => {
            let Some(scene) = state.scene.as_mut() else {
                return Ok(scene_updated(Vec::new()));
            };
            state.bench.set_color(&part, color);
            state.bench.sync(scene);
            Ok(scene_updated(scene.take_dirty()))
        }

        UiToEngine::SetActivePart { part } => {
            match part {
                Some(part) => {
                    state.bench.set_active(&part);
                }
                None => state.bench.clear_active(),
            }
            Ok(EngineToUi::ActivePartChanged {
                part: state.bench.active_part().map(str::to_string),
            })
        }

        UiToEngine::PaintGroup { group, color } => {
            let Some(scene) = state.scene.as_mut() else {
                return Ok(scene_updated(Vec::new()));
            };
            let Some(group) = paint_engine::default_groups()
                .into_iter()
                .find(|g| g.label.eq_ignore_ascii_case(&group))
            else {
                return Ok(scene_updated(Vec::new()));
            };
            state.bench.paint_group(scene, &group, color);
            Ok(scene_updated(scene.take_dirty()))
        }

        UiToEngine::ResetColors => {
            state.bench.reset_all();
            let Some(scene) = state.scene.as_mut() else {
                return Ok(scene_updated(Vec::new()));
            };
            state.bench.sync(scene);
            Ok(scene_updated(scene.take_dirty()))
        }

        // -- File operations --
        UiToEngine::ExportAsset { binary } => {
            let scene = state.scene.as_ref().ok_or(BridgeError::NoScene)?;
            let product = state
                .current_model
                .as_ref()
                .map(|m| m.name.as_str())
                .or(scene.name.as_deref())
                .unwrap_or("Workshop");
            let file_name = file_format::asset_file_name(product, binary);
            let (mime, payload) = if binary {
                (file_format::GLB_MIME, file_format::export_glb(scene)?)
            } else {
                (
                    file_format::GLTF_MIME,
                    file_format::export_gltf_json(scene)?.into_bytes(),
                )
            };
            debug!(file_name, bytes = payload.len(), "asset exported");
            Ok(EngineToUi::ExportReady {
                file_name,
                mime: mime.to_string(),
                data: base64::engine::general_purpose::STANDARD.encode(payload),
            })
        }

        UiToEngine::SaveDraft { name } => {
            if let Some(name) = name {
                state.meta.name = name;
            }
            state.meta.touch();
            let snapshot = state.wizard.snapshot();
            let json_data = file_format::save_draft(
                &state.meta,
                &snapshot,
                state.bench.config(),
                state.bench.active_part(),
            );
            Ok(EngineToUi::DraftSaved { json_data })
        }

        UiToEngine::LoadDraft { data } => {
            let draft = file_format::load_draft(&data)?;
            let same_model = state.current_model.as_ref().map(|m| m.id.as_str())
                == draft.wizard.selected_model_id.as_deref();
            state.meta = draft.meta;
            state.wizard.restore(draft.wizard);
            state.bench.restore(draft.paint, draft.active_part);
            // When the draft names the model already on screen its colors
            // apply immediately; otherwise they wait for the next load.
            if same_model {
                if let Some(scene) = state.scene.as_mut() {
                    state.bench.rebind(scene);
                    scene.take_dirty();
                }
            }
            Ok(EngineToUi::DraftLoaded {
                state: state.wizard.snapshot(),
                paint: state.bench.config().clone(),
            })
        }
    }
}

/// Build a WizardUpdated response from the current wizard state.
fn wizard_updated(state: &WorkshopState, changed: bool) -> EngineToUi {
    EngineToUi::WizardUpdated {
        changed,
        state: state.wizard.snapshot(),
    }
}

fn scene_updated(dirty_parts: Vec<String>) -> EngineToUi {
    EngineToUi::SceneUpdated { dirty_parts }
}
