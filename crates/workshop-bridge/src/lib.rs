//! The JSON message bridge between the JavaScript UI and the workshop core.
//!
//! The frontend owns pages, routing, and the renderer; everything the
//! customizer decides — wizard flow, catalog queries, paint state, export —
//! lives behind [`dispatch`]: one [`UiToEngine`] message in, one
//! [`EngineToUi`] response out. On `wasm32` the [`wasm_api`] module wraps
//! dispatch in a `thread_local` singleton with a `process_message(json)`
//! entry point; native tests call [`dispatch`] directly with a
//! [`MockImporter`](scene_kernel::MockImporter).

pub mod dispatch;
pub mod messages;
pub mod workshop_state;

#[cfg(target_arch = "wasm32")]
pub mod wasm_api;

pub use dispatch::dispatch;
pub use messages::{EngineToUi, LoadToken, UiToEngine};
pub use workshop_state::{BridgeError, WorkshopState};
