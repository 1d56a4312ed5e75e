//! Keyword-driven part groups for one-click bulk painting.
//!
//! Asset packs rarely agree on part naming ("Body", "body_low", "ApeTorso"),
//! so groups match by substring instead of exact name. A part belongs to a
//! group when its node name or one of its material names contains any of the
//! group's keywords, ASCII case-insensitive.

use atelier_types::HexColor;
use scene_kernel::{PartNode, SceneDocument};

/// A named bundle of keywords, e.g. `Skin = {body, skin, ape}`.
#[derive(Debug, Clone)]
pub struct PartGroup {
    pub label: String,
    keywords: Vec<String>,
}

impl PartGroup {
    /// Keywords are lowercased once here so matching stays allocation-free.
    pub fn new<I, S>(label: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.into().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Does this node belong to the group?
    pub fn matches(&self, node: &PartNode) -> bool {
        let name = node.name.to_ascii_lowercase();
        if self.keywords.iter().any(|k| name.contains(k.as_str())) {
            return true;
        }
        node.primitives
            .iter()
            .filter_map(|p| p.material.name.as_deref())
            .any(|material| {
                let material = material.to_ascii_lowercase();
                self.keywords.iter().any(|k| material.contains(k.as_str()))
            })
    }

    /// Member part names, first-seen order, deduplicated.
    pub fn members(&self, scene: &SceneDocument) -> Vec<String> {
        let mut members: Vec<String> = Vec::new();
        for node in &scene.parts {
            if self.matches(node) && !members.iter().any(|m| m == &node.name) {
                members.push(node.name.clone());
            }
        }
        members
    }
}

/// The stock groups shipped with the workshop.
pub fn default_groups() -> Vec<PartGroup> {
    vec![
        PartGroup::new("Skin", ["body", "skin", "ape"]),
        PartGroup::new("Goggles", ["goggle", "glass", "eye"]),
        PartGroup::new("Apparel", ["shirt", "outfit", "cloth", "jacket"]),
    ]
}

/// Paint every member of `group` with `color`, directly on the scene.
///
/// Returns the number of primitives changed. Callers holding a
/// [`PaintBench`](crate::PaintBench) should prefer
/// [`paint_group`](crate::PaintBench::paint_group) so the overrides land in
/// the config too.
pub fn apply_group_color(
    scene: &mut SceneDocument,
    group: &PartGroup,
    color: HexColor,
) -> usize {
    let mut changed = 0;
    for member in group.members(scene) {
        changed += scene.set_part_color(&member, color);
    }
    changed
}
