pub mod gltf_import;
pub mod mock;
pub mod traits;
pub mod types;

pub use gltf_import::GltfImporter;
pub use mock::{MockImporter, SceneBuilder};
pub use traits::SceneImporter;
pub use types::*;
