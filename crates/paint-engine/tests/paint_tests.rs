use atelier_types::HexColor;
use paint_engine::{
    apply_config, capture_defaults, default_groups, discover_parts, PaintBench, PaintConfig,
};
use scene_kernel::{SceneBuilder, SceneDocument};

/// Parse a hex literal the tests can read at a glance.
fn hex(s: &str) -> HexColor {
    s.parse().unwrap()
}

/// A second model sharing the "Body" part name with the avatar.
fn habitat() -> SceneDocument {
    SceneBuilder::new()
        .named("habitat")
        .part("Body", hex("#9ca3af"))
        .part("Roof", hex("#7f1d1d"))
        .part("Door", hex("#78350f"))
        .build()
}

// ── Empty scenes ───────────────────────────────────────────────────────────

#[test]
fn empty_scene_discovers_nothing_and_apply_is_a_no_op() {
    let mut scene = SceneDocument::default();
    assert!(discover_parts(&scene).is_empty());

    let mut config = PaintConfig::new();
    config.set("Body", hex("#ef4444"));
    assert_eq!(apply_config(&mut scene, &config), 0);
    assert!(scene.take_dirty().is_empty());
}

#[test]
fn bench_sync_on_empty_scene_leaves_everything_empty() {
    let mut scene = SceneDocument::default();
    let mut bench = PaintBench::new();

    assert_eq!(bench.sync(&mut scene), 0);
    assert!(bench.parts().is_empty());
    assert!(bench.config().is_empty());
    assert!(!bench.set_color("Body", HexColor::WHITE));
}

// ── Capture and merge ──────────────────────────────────────────────────────

#[test]
fn capture_merges_prior_edits_with_new_native_defaults() {
    // The distilled scenario: config holds an edit for partA, the scene
    // carries partA and partB.
    let scene = SceneBuilder::new()
        .part("partA", hex("#0000ff"))
        .part("partB", hex("#00ff00"))
        .build();
    let mut config = PaintConfig::new();
    config.set("partA", hex("#ff0000"));

    capture_defaults(&scene, &mut config);

    assert_eq!(config.get("partA"), Some(hex("#ff0000")));
    assert_eq!(config.get("partB"), Some(hex("#00ff00")));
    assert_eq!(config.len(), 2);
}

#[test]
fn first_sync_captures_but_repaints_nothing() {
    let mut scene = SceneBuilder::avatar();
    let mut bench = PaintBench::new();

    assert_eq!(bench.sync(&mut scene), 0);
    assert_eq!(bench.parts(), ["Body", "Goggles", "Shirt"]);
    assert_eq!(bench.config().len(), 3);
    assert!(scene.take_dirty().is_empty());
}

// ── Edit, apply, dirty propagation ─────────────────────────────────────────

#[test]
fn edit_then_sync_repaints_and_dirties_only_that_part() {
    let mut scene = SceneBuilder::avatar();
    let mut bench = PaintBench::new();
    bench.sync(&mut scene);
    scene.take_dirty();

    assert!(bench.set_color("Shirt", hex("#10b981")));
    assert_eq!(bench.active_part(), Some("Shirt"));

    assert_eq!(bench.sync(&mut scene), 1);
    assert_eq!(scene.part_color("Shirt"), Some(hex("#10b981")));
    assert_eq!(scene.take_dirty(), vec!["Shirt".to_string()]);

    // Re-running with nothing new is silent.
    assert_eq!(bench.sync(&mut scene), 0);
    assert!(scene.take_dirty().is_empty());
}

#[test]
fn config_entries_for_other_models_are_inert() {
    let mut scene = SceneBuilder::avatar();
    let mut config = PaintConfig::new();
    config.set("Rotor", hex("#f59e0b"));
    config.set("Body", hex("#f59e0b"));

    // Only the part that exists changes.
    assert_eq!(apply_config(&mut scene, &config), 1);
    assert_eq!(scene.take_dirty(), vec!["Body".to_string()]);
}

// ── Model switching ────────────────────────────────────────────────────────

#[test]
fn rebind_carries_shared_names_and_drops_the_rest() {
    let mut avatar = SceneBuilder::avatar();
    let mut bench = PaintBench::new();
    bench.sync(&mut avatar);
    bench.set_color("Body", hex("#ef4444"));
    bench.set_color("Shirt", hex("#3b82f6"));
    bench.sync(&mut avatar);

    let mut habitat = habitat();
    bench.rebind(&mut habitat);

    // The shared "Body" edit carried over and was painted onto the new model.
    assert_eq!(bench.parts(), ["Body", "Roof", "Door"]);
    assert_eq!(bench.config().get("Body"), Some(hex("#ef4444")));
    assert_eq!(habitat.part_color("Body"), Some(hex("#ef4444")));

    // Avatar-only entries are gone; new parts captured native.
    assert!(!bench.config().contains("Shirt"));
    assert!(!bench.config().contains("Goggles"));
    assert_eq!(bench.config().get("Roof"), Some(hex("#7f1d1d")));
}

#[test]
fn rebind_clears_an_active_part_the_new_model_lacks() {
    let mut avatar = SceneBuilder::avatar();
    let mut bench = PaintBench::new();
    bench.sync(&mut avatar);
    bench.set_color("Goggles", hex("#111827"));

    let mut habitat = habitat();
    bench.rebind(&mut habitat);
    assert_eq!(bench.active_part(), None);

    // An active part the new model shares survives a rebind.
    let mut avatar = SceneBuilder::avatar();
    bench.set_color("Body", hex("#ef4444"));
    bench.rebind(&mut avatar);
    assert_eq!(bench.active_part(), Some("Body"));
}

// ── Reset ──────────────────────────────────────────────────────────────────

#[test]
fn reset_then_sync_reverts_every_painted_part() {
    let mut scene = SceneBuilder::avatar();
    let mut bench = PaintBench::new();
    bench.sync(&mut scene);
    bench.set_color("Body", hex("#ef4444"));
    bench.set_color("Goggles", hex("#f59e0b"));
    bench.sync(&mut scene);
    scene.take_dirty();

    bench.reset_all();
    assert_eq!(bench.sync(&mut scene), 2);

    assert_eq!(scene.part_color("Body"), Some(HexColor::WHITE));
    assert_eq!(scene.part_color("Goggles"), Some(HexColor::BLACK));
    let mut dirty = scene.take_dirty();
    dirty.sort();
    assert_eq!(dirty, vec!["Body".to_string(), "Goggles".to_string()]);
}

// ── Groups ─────────────────────────────────────────────────────────────────

#[test]
fn stock_group_paint_through_the_bench() {
    let mut scene = SceneBuilder::avatar();
    let mut bench = PaintBench::new();
    bench.sync(&mut scene);

    let groups = default_groups();
    let apparel = groups.iter().find(|g| g.label == "Apparel").unwrap();
    assert_eq!(bench.paint_group(&mut scene, apparel, hex("#14b8a6")), 1);

    assert_eq!(scene.part_color("Shirt"), Some(hex("#14b8a6")));
    assert_eq!(bench.config().get("Shirt"), Some(hex("#14b8a6")));
    // Other groups' parts untouched.
    assert_eq!(scene.part_color("Body"), Some(HexColor::WHITE));
}
