use atelier_types::HexColor;

/// Errors from scene import.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SceneError {
    #[error("failed to parse scene: {reason}")]
    Parse { reason: String },

    #[error("scene references a binary chunk that is missing")]
    MissingBlob,

    #[error("scene references an external resource: {uri}")]
    ExternalResource { uri: String },

    #[error("unsupported data URI in scene: {uri}")]
    UnsupportedDataUri { uri: String },

    #[error("mesh primitive has no vertex positions in part: {part}")]
    MissingPositions { part: String },

    #[error("scene import failed: {reason}")]
    Import { reason: String },
}

/// The owned scene graph: every mesh node of the source asset, flattened in
/// traversal order, with materials cloned per node so parts recolor
/// independently even when the source file shared one material between them.
///
/// This is the single mutable 3D state of the workshop. The paint engine
/// writes colors into it; the exporter reads it back out. Nothing here is
/// persisted — drafts store the paint config, not geometry.
#[derive(Debug, Clone, Default)]
pub struct SceneDocument {
    /// Scene name from the source asset, if any.
    pub name: Option<String>,
    /// Mesh nodes in traversal order. Duplicate names are allowed.
    pub parts: Vec<PartNode>,
    /// Encoded images (PNG/JPEG bytes) referenced by materials.
    pub images: Vec<ImageData>,
    /// Part names whose materials changed since the last `take_dirty`.
    pub(crate) dirty: Vec<String>,
}

/// A named mesh node — the unit of color customization.
#[derive(Debug, Clone)]
pub struct PartNode {
    pub name: String,
    /// Flattened node transform, column-major. `None` means identity.
    pub matrix: Option<[f32; 16]>,
    pub primitives: Vec<Primitive>,
}

/// One mesh primitive with its own material instance.
#[derive(Debug, Clone)]
pub struct Primitive {
    pub positions: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tex_coords: Option<Vec<[f32; 2]>>,
    pub indices: Option<Vec<u32>>,
    pub material: MaterialData,
}

/// Material state for a single primitive. Colors are linear RGBA, as in
/// the glTF material they came from; hex conversion happens at the edges.
#[derive(Debug, Clone)]
pub struct MaterialData {
    pub name: Option<String>,
    pub base_color: [f32; 4],
    /// Base color as imported, untouched by repainting. Clearing all
    /// overrides reverts parts to this.
    pub native_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    /// Index into `SceneDocument::images` for the base color texture.
    pub base_color_image: Option<usize>,
}

impl Default for MaterialData {
    fn default() -> Self {
        Self {
            name: None,
            base_color: [1.0, 1.0, 1.0, 1.0],
            native_color: [1.0, 1.0, 1.0, 1.0],
            metallic: 1.0,
            roughness: 1.0,
            base_color_image: None,
        }
    }
}

/// An encoded image kept verbatim for re-embedding on export.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl SceneDocument {
    /// Part names in traversal order, duplicates included.
    /// Deduplication is the paint engine's concern.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// The current color of the first node carrying `name`, in sRGB hex.
    pub fn part_color(&self, name: &str) -> Option<HexColor> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.primitives.first())
            .map(|prim| HexColor::from_linear(prim.material.base_color))
    }

    /// The color `name` was imported with, ignoring any repaint since.
    pub fn part_native_color(&self, name: &str) -> Option<HexColor> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .and_then(|p| p.primitives.first())
            .map(|prim| HexColor::from_linear(prim.material.native_color))
    }

    /// Set the material color of every node named `name`.
    ///
    /// Returns the number of primitives whose color actually changed;
    /// writing a color a part already has touches nothing, so re-applying a
    /// config is observationally idempotent. Alpha is preserved. Changed
    /// parts are recorded for `take_dirty`.
    pub fn set_part_color(&mut self, name: &str, color: HexColor) -> usize {
        let mut changed = 0;
        for part in self.parts.iter_mut().filter(|p| p.name == name) {
            let mut part_touched = false;
            for prim in &mut part.primitives {
                if HexColor::from_linear(prim.material.base_color) == color {
                    continue;
                }
                let linear = color.to_linear();
                let alpha = prim.material.base_color[3];
                prim.material.base_color = [linear[0], linear[1], linear[2], alpha];
                changed += 1;
                part_touched = true;
            }
            if part_touched && !self.dirty.iter().any(|d| d == name) {
                self.dirty.push(name.to_string());
            }
        }
        changed
    }

    /// Drain the set of part names repainted since the last call.
    ///
    /// The bridge forwards these to the renderer so material updates land on
    /// the next frame; an empty result means nothing needs flushing.
    pub fn take_dirty(&mut self) -> Vec<String> {
        std::mem::take(&mut self.dirty)
    }

    pub fn mesh_count(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::SceneBuilder;

    #[test]
    fn set_part_color_skips_unchanged_values() {
        let mut scene = SceneBuilder::new()
            .part("Body", HexColor::WHITE)
            .part("Visor", HexColor::BLACK)
            .build();

        let red: HexColor = "#ef4444".parse().unwrap();
        assert_eq!(scene.set_part_color("Body", red), 1);
        assert_eq!(scene.take_dirty(), vec!["Body".to_string()]);

        // Same color again: no mutation, nothing dirty.
        assert_eq!(scene.set_part_color("Body", red), 0);
        assert!(scene.take_dirty().is_empty());
    }

    #[test]
    fn set_part_color_touches_every_node_with_that_name() {
        let mut scene = SceneBuilder::new()
            .part("Trim", HexColor::WHITE)
            .part("Trim", HexColor::BLACK)
            .build();

        let green: HexColor = "#10b981".parse().unwrap();
        assert_eq!(scene.set_part_color("Trim", green), 2);
        assert_eq!(scene.part_color("Trim"), Some(green));
        // Dirty list carries the name once, not per node.
        assert_eq!(scene.take_dirty(), vec!["Trim".to_string()]);
    }

    #[test]
    fn native_color_survives_repainting() {
        let mut scene = SceneBuilder::new().part("Body", HexColor::WHITE).build();
        let red: HexColor = "#ef4444".parse().unwrap();

        scene.set_part_color("Body", red);
        assert_eq!(scene.part_color("Body"), Some(red));
        assert_eq!(scene.part_native_color("Body"), Some(HexColor::WHITE));
    }

    #[test]
    fn unknown_part_is_a_no_op() {
        let mut scene = SceneBuilder::new().part("Body", HexColor::WHITE).build();
        assert_eq!(scene.set_part_color("Nope", HexColor::BLACK), 0);
        assert!(scene.take_dirty().is_empty());
    }

    #[test]
    fn empty_scene_has_no_parts() {
        let scene = SceneDocument::default();
        assert!(scene.is_empty());
        assert_eq!(scene.part_names().count(), 0);
        assert_eq!(scene.part_color("anything"), None);
    }
}
