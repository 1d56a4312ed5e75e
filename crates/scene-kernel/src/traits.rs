use crate::types::{SceneDocument, SceneError};

/// Turns raw asset bytes into a [`SceneDocument`].
///
/// Production code uses [`GltfImporter`](crate::GltfImporter); tests swap in
/// [`MockImporter`](crate::MockImporter) so pipelines run on deterministic
/// scenes without real model files.
pub trait SceneImporter {
    fn import(&self, bytes: &[u8]) -> Result<SceneDocument, SceneError>;
}
