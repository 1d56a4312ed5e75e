//! WASM entry points for the web worker.
//!
//! This module is only compiled for the `wasm32` target. It provides the
//! `#[wasm_bindgen]` functions that JavaScript calls from the web worker.

use wasm_bindgen::prelude::*;

use scene_kernel::GltfImporter;

use crate::dispatch;
use crate::messages::{EngineToUi, UiToEngine};
use crate::workshop_state::WorkshopState;

// Global workshop state — single-threaded in the web worker.
thread_local! {
    static WORKSHOP: std::cell::RefCell<Option<WasmWorkshop>> = std::cell::RefCell::new(None);
}

/// Holds the workshop state and importer for the WASM module.
struct WasmWorkshop {
    state: WorkshopState,
    importer: GltfImporter,
}

/// Initialize the WASM workshop. Must be called once before any other
/// function.
///
/// Sets up panic hooks for better error messages and creates the workshop
/// state over the built-in catalog.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();

    WORKSHOP.with(|cell| {
        *cell.borrow_mut() = Some(WasmWorkshop {
            state: WorkshopState::new(),
            importer: GltfImporter::new(),
        });
    });

    web_sys::console::log_1(&"atelier workshop core initialized".into());
}

/// Process a JSON message from the UI and return a JSON response.
///
/// This is the main entry point for the web worker's message handler.
/// The input should be a JSON-serialized `UiToEngine` message.
/// Returns a JSON-serialized `EngineToUi` response.
#[wasm_bindgen]
pub fn process_message(json_input: &str) -> String {
    let response = WORKSHOP.with(|cell| {
        let mut workshop = cell.borrow_mut();
        let workshop = workshop
            .as_mut()
            .expect("Workshop not initialized. Call init() first.");

        let msg: UiToEngine = match serde_json::from_str(json_input) {
            Ok(msg) => msg,
            Err(e) => {
                return EngineToUi::Error {
                    message: format!("Failed to parse message: {}", e),
                    model_id: None,
                };
            }
        };

        dispatch::dispatch(&mut workshop.state, msg, &workshop.importer)
    });

    serde_json::to_string(&response).unwrap_or_else(|e| {
        format!(
            r#"{{"type":"Error","message":"Serialization failed: {}","model_id":null}}"#,
            e
        )
    })
}

/// Get the current wizard state as JSON.
///
/// Useful for the UI to query state without sending a full command.
#[wasm_bindgen]
pub fn get_wizard_state() -> String {
    WORKSHOP.with(|cell| {
        let workshop = cell.borrow();
        let workshop = workshop.as_ref().expect("Workshop not initialized.");
        serde_json::to_string(workshop.state.wizard.state()).unwrap_or_default()
    })
}

/// Get the loaded scene's paintable part names as a JSON array.
///
/// Empty until a load resolves.
#[wasm_bindgen]
pub fn get_part_names() -> String {
    WORKSHOP.with(|cell| {
        let workshop = cell.borrow();
        let workshop = match workshop.as_ref() {
            Some(w) => w,
            None => return "[]".to_string(),
        };
        serde_json::to_string(workshop.state.bench.parts()).unwrap_or_default()
    })
}
