//! Deterministic test doubles for scene import.
//!
//! [`MockImporter`] hands out a prepared [`SceneDocument`] (or a prepared
//! error) regardless of input bytes; [`SceneBuilder`] assembles synthetic
//! scenes with predictable part names and colors. Used by paint-engine,
//! workshop-bridge, and test-harness tests so pipelines run without real
//! model files.

use atelier_types::HexColor;

use crate::traits::SceneImporter;
use crate::types::{MaterialData, PartNode, Primitive, SceneDocument, SceneError};

/// Test double that ignores its input bytes.
#[derive(Debug, Clone)]
pub struct MockImporter {
    outcome: Result<SceneDocument, SceneError>,
}

impl MockImporter {
    /// An importer that yields `scene` for any input.
    pub fn returning(scene: SceneDocument) -> Self {
        Self { outcome: Ok(scene) }
    }

    /// An importer that fails with `error` for any input.
    pub fn failing(error: SceneError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl SceneImporter for MockImporter {
    fn import(&self, _bytes: &[u8]) -> Result<SceneDocument, SceneError> {
        self.outcome.clone()
    }
}

/// Builds synthetic scenes one named part at a time.
///
/// Every part carries a single unit-triangle primitive so code paths that
/// touch geometry (export, mesh counting) stay exercised.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    scene: SceneDocument,
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(mut self, name: &str) -> Self {
        self.scene.name = Some(name.to_string());
        self
    }

    /// Add a part holding one unit-triangle primitive in the given color.
    pub fn part(mut self, name: &str, color: HexColor) -> Self {
        self.scene.parts.push(PartNode {
            name: name.to_string(),
            matrix: None,
            primitives: vec![unit_triangle(color)],
        });
        self
    }

    pub fn build(self) -> SceneDocument {
        self.scene
    }

    /// A three-part character scene, the staple of paint scenarios.
    pub fn avatar() -> SceneDocument {
        Self::new()
            .named("avatar")
            .part("Body", HexColor::WHITE)
            .part("Goggles", HexColor::BLACK)
            .part("Shirt", HexColor::new(0x64, 0x74, 0x8b))
            .build()
    }
}

fn unit_triangle(color: HexColor) -> Primitive {
    Primitive {
        positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        normals: Some(vec![[0.0, 0.0, 1.0]; 3]),
        tex_coords: None,
        indices: Some(vec![0, 1, 2]),
        material: MaterialData {
            base_color: color.to_linear(),
            native_color: color.to_linear(),
            metallic: 0.0,
            ..MaterialData::default()
        },
    }
}
