//! Part discovery and color-override application.
//!
//! The free functions are the primitive passes; [`PaintBench`] strings them
//! together into the editing session the bridge drives: sync after every
//! load, after every edit, pull the dirty parts, repeat.

use atelier_types::HexColor;
use scene_kernel::SceneDocument;
use tracing::{debug, instrument};

use crate::config::PaintConfig;
use crate::groups::PartGroup;

/// Paintable part names, first-seen order, deduplicated.
///
/// A scene may carry the same name on several nodes; the paint engine treats
/// them as one part (a single config entry repaints all of them).
pub fn discover_parts(scene: &SceneDocument) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for name in scene.part_names() {
        if !parts.iter().any(|p| p == name) {
            parts.push(name.to_string());
        }
    }
    parts
}

/// Record the native color of every discovered part missing from `config`.
///
/// Native means the color the part was imported with, so recapturing after
/// a reset reverts painted parts. Existing entries are left untouched; user
/// edits survive a recapture and carry across model switches when part
/// names coincide. Returns how many entries were added.
pub fn capture_defaults(scene: &SceneDocument, config: &mut PaintConfig) -> usize {
    let mut captured = 0;
    for name in discover_parts(scene) {
        if config.contains(&name) {
            continue;
        }
        if let Some(native) = scene.part_native_color(&name) {
            config.set(name, native);
            captured += 1;
        }
    }
    captured
}

/// Write every configured color into the scene.
///
/// Returns the number of primitives that actually changed. Parts already
/// holding their configured color are skipped, so a second identical call
/// returns 0 and dirties nothing. Config entries naming parts the scene
/// does not contain are inert.
#[instrument(skip(scene, config), fields(entries = config.len()))]
pub fn apply_config(scene: &mut SceneDocument, config: &PaintConfig) -> usize {
    let mut changed = 0;
    for (part, color) in config.iter() {
        changed += scene.set_part_color(part, color);
    }
    if changed > 0 {
        debug!(changed, "applied color overrides");
    }
    changed
}

/// The paint session for one loaded model.
///
/// Owns the discovered part list, the override config, and the part the UI
/// currently highlights. The scene itself stays outside; every operation
/// that repaints takes it as an argument so ownership stays with the
/// workshop state.
#[derive(Debug, Clone, Default)]
pub struct PaintBench {
    parts: Vec<String>,
    config: PaintConfig,
    active_part: Option<String>,
}

impl PaintBench {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discovered part names, first-seen order.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn active_part(&self) -> Option<&str> {
        self.active_part.as_deref()
    }

    /// Discover parts, capture native defaults for new ones, and re-apply
    /// the config. Returns the number of primitives repainted.
    ///
    /// Run after a scene loads and after every edit; repeating it with
    /// nothing changed repaints nothing.
    pub fn sync(&mut self, scene: &mut SceneDocument) -> usize {
        self.parts = discover_parts(scene);
        capture_defaults(scene, &mut self.config);
        apply_config(scene, &self.config)
    }

    /// Override one part's color and make it the active part.
    ///
    /// Rejected (`false`, no state change) for names not in the discovered
    /// part list. The caller follows up with [`sync`](Self::sync) to push
    /// the change into the scene.
    pub fn set_color(&mut self, part: &str, color: HexColor) -> bool {
        if !self.parts.iter().any(|p| p == part) {
            return false;
        }
        self.config.set(part, color);
        self.active_part = Some(part.to_string());
        true
    }

    /// Highlight a part without touching its color.
    pub fn set_active(&mut self, part: &str) -> bool {
        if !self.parts.iter().any(|p| p == part) {
            return false;
        }
        self.active_part = Some(part.to_string());
        true
    }

    pub fn clear_active(&mut self) {
        self.active_part = None;
    }

    /// Drop every override. The part list and active part survive; the next
    /// [`sync`](Self::sync) recaptures native defaults.
    pub fn reset_all(&mut self) {
        self.config.clear();
    }

    /// Switch to a different scene: keep only overrides whose part names
    /// occur there, drop a stale active part, then sync.
    pub fn rebind(&mut self, scene: &mut SceneDocument) -> usize {
        let next = discover_parts(scene);
        self.config.retain(|part| next.iter().any(|n| n == part));
        if let Some(active) = &self.active_part {
            if !next.iter().any(|n| n == active) {
                self.active_part = None;
            }
        }
        self.sync(scene)
    }

    /// Override every member of `group` and apply in one pass.
    ///
    /// The overrides land in the config too, so a later sync does not revert
    /// the group paint. The active part is left alone. Returns the number of
    /// primitives changed.
    pub fn paint_group(
        &mut self,
        scene: &mut SceneDocument,
        group: &PartGroup,
        color: HexColor,
    ) -> usize {
        for member in group.members(scene) {
            if self.parts.iter().any(|p| p == &member) {
                self.config.set(member, color);
            }
        }
        apply_config(scene, &self.config)
    }

    /// Install a previously saved config and active part, as when a draft
    /// loads. Takes effect against a scene on the next sync or rebind.
    pub fn restore(&mut self, config: PaintConfig, active_part: Option<String>) {
        self.config = config;
        self.active_part = active_part;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_kernel::SceneBuilder;

    #[test]
    fn discover_dedupes_preserving_first_seen_order() {
        let scene = SceneBuilder::new()
            .part("Body", HexColor::WHITE)
            .part("Trim", HexColor::BLACK)
            .part("Body", HexColor::WHITE)
            .part("Roof", HexColor::WHITE)
            .build();

        assert_eq!(discover_parts(&scene), vec!["Body", "Trim", "Roof"]);
    }

    #[test]
    fn capture_only_fills_missing_entries() {
        let scene = SceneBuilder::avatar();
        let red = HexColor::new(0xef, 0x44, 0x44);
        let mut config = PaintConfig::new();
        config.set("Body", red);

        assert_eq!(capture_defaults(&scene, &mut config), 2);
        // The user's edit wins over the native white.
        assert_eq!(config.get("Body"), Some(red));
        assert_eq!(config.get("Goggles"), Some(HexColor::BLACK));
        assert_eq!(config.get("Shirt"), Some(HexColor::new(0x64, 0x74, 0x8b)));
    }

    #[test]
    fn apply_twice_changes_nothing_the_second_time() {
        let mut scene = SceneBuilder::avatar();
        let mut config = PaintConfig::new();
        config.set("Body", HexColor::new(0x10, 0xb9, 0x81));
        config.set("Goggles", HexColor::WHITE);

        assert_eq!(apply_config(&mut scene, &config), 2);
        assert_eq!(apply_config(&mut scene, &config), 0);
    }

    #[test]
    fn set_color_requires_a_discovered_part() {
        let mut scene = SceneBuilder::avatar();
        let mut bench = PaintBench::new();
        bench.sync(&mut scene);

        assert!(!bench.set_color("Wings", HexColor::BLACK));
        assert_eq!(bench.active_part(), None);

        assert!(bench.set_color("Body", HexColor::BLACK));
        assert_eq!(bench.active_part(), Some("Body"));
        assert_eq!(bench.config().get("Body"), Some(HexColor::BLACK));
    }

    #[test]
    fn group_paint_survives_the_next_sync() {
        let mut scene = SceneBuilder::avatar();
        let mut bench = PaintBench::new();
        bench.sync(&mut scene);

        let skin = PartGroup::new("Skin", ["body", "skin", "ape"]);
        let tan = HexColor::new(0xd9, 0xa0, 0x66);
        assert_eq!(bench.paint_group(&mut scene, &skin, tan), 1);
        assert_eq!(bench.config().get("Body"), Some(tan));
        assert_eq!(bench.active_part(), None);

        // A later sync keeps the group color instead of reverting it.
        assert_eq!(bench.sync(&mut scene), 0);
        assert_eq!(scene.part_color("Body"), Some(tan));
    }

    #[test]
    fn reset_reverts_painted_parts_on_the_next_sync() {
        let mut scene = SceneBuilder::avatar();
        let mut bench = PaintBench::new();
        bench.sync(&mut scene);
        bench.set_color("Body", HexColor::new(0xef, 0x44, 0x44));
        bench.sync(&mut scene);
        assert_eq!(
            scene.part_color("Body"),
            Some(HexColor::new(0xef, 0x44, 0x44))
        );

        bench.reset_all();
        assert!(bench.config().is_empty());
        assert_eq!(bench.parts().len(), 3);

        // Recapture uses native colors, so the repaint undoes the edit.
        assert_eq!(bench.sync(&mut scene), 1);
        assert_eq!(scene.part_color("Body"), Some(HexColor::WHITE));
        assert_eq!(bench.config().len(), 3);
    }
}
