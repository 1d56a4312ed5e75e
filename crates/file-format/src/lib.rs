pub mod errors;
pub mod glb;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use errors::{ExportError, LoadError};
pub use glb::{asset_file_name, export_glb, export_gltf_json, GLB_MIME, GLTF_MIME};
pub use load::{load_draft, Draft};
pub use metadata::DraftMetadata;
pub use save::{save_draft, FORMAT_VERSION};
