//! End-to-end bridge scenarios: every step goes through `dispatch`, the way
//! the JavaScript UI drives the engine in production.

use atelier_types::{Category, HexColor};
use base64::Engine;
use intent_wizard::{QuestionId, WizardStatus};
use scene_kernel::{MockImporter, SceneBuilder, SceneImporter};
use workshop_bridge::messages::*;
use workshop_bridge::{dispatch, WorkshopState};

fn payload(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

fn send(state: &mut WorkshopState, importer: &dyn SceneImporter, msg: UiToEngine) -> EngineToUi {
    dispatch(state, msg, importer)
}

/// Answer the four intent questions, skip the optional reference, and pick
/// `model_id` in the multi-select. Leaves the wizard complete.
fn complete_wizard(state: &mut WorkshopState, importer: &dyn SceneImporter, model_id: &str) {
    for (question, value) in [
        (QuestionId::UseCase, "Game Asset"),
        (QuestionId::Genre, "Battle Royale"),
        (QuestionId::Style, "Cartoon"),
        (QuestionId::Audience, "Teens"),
    ] {
        send(
            state,
            importer,
            UiToEngine::Answer {
                question,
                value: value.to_string(),
            },
        );
        send(state, importer, UiToEngine::Next);
    }
    send(state, importer, UiToEngine::Next);
    send(state, importer, UiToEngine::BeginModelSelection);
    send(
        state,
        importer,
        UiToEngine::ToggleModelSelection {
            model_id: model_id.to_string(),
        },
    );
    let response = send(state, importer, UiToEngine::ConfirmModelSelection);
    let EngineToUi::WizardUpdated { changed: true, state: wizard } = response else {
        panic!("confirming the selection should complete the wizard");
    };
    assert_eq!(wizard.status, WizardStatus::Complete);
}

/// Request `model_id` and resolve the fetch immediately.
fn load_model(state: &mut WorkshopState, importer: &dyn SceneImporter, model_id: &str) -> LoadToken {
    let EngineToUi::LoadRequested { token, .. } = send(
        state,
        importer,
        UiToEngine::RequestLoad {
            model_id: model_id.to_string(),
        },
    ) else {
        panic!("expected LoadRequested");
    };
    let EngineToUi::SceneReady { token: ready, .. } = send(
        state,
        importer,
        UiToEngine::SceneLoaded {
            token,
            data: payload(b""),
        },
    ) else {
        panic!("expected SceneReady");
    };
    assert_eq!(ready, token);
    token
}

// ── Scenario: customize and export ──────────────────────────────────────

#[test]
fn wizard_load_paint_export_round_trip() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());

    complete_wizard(&mut state, &importer, "avatar-1");
    assert_eq!(
        state.wizard.state().selected_category,
        Some(Category::Avatar)
    );
    assert_eq!(
        state.wizard.state().selected_model_id.as_deref(),
        Some("avatar-1")
    );

    load_model(&mut state, &importer, "avatar-1");

    // Paint the body red; only the body should come back dirty.
    let red = HexColor::new(0xef, 0x44, 0x44);
    let response = send(
        &mut state,
        &importer,
        UiToEngine::SetPartColor {
            part: "Body".to_string(),
            color: red,
        },
    );
    let EngineToUi::SceneUpdated { dirty_parts } = response else {
        panic!("expected SceneUpdated");
    };
    assert_eq!(dirty_parts, vec!["Body"]);

    // Repainting the same color is idempotent: nothing dirties.
    let response = send(
        &mut state,
        &importer,
        UiToEngine::SetPartColor {
            part: "Body".to_string(),
            color: red,
        },
    );
    assert!(matches!(
        response,
        EngineToUi::SceneUpdated { dirty_parts } if dirty_parts.is_empty()
    ));

    // Export carries the paint and the product name.
    let response = send(&mut state, &importer, UiToEngine::ExportAsset { binary: true });
    let EngineToUi::ExportReady { file_name, mime, data } = response else {
        panic!("expected ExportReady");
    };
    assert_eq!(file_name, "Character 1_Asset.glb");
    assert_eq!(mime, "model/gltf-binary");

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .unwrap();
    assert_eq!(&bytes[0..4], b"glTF");
    let json_len = u32::from_le_bytes(bytes[12..16].try_into().unwrap()) as usize;
    let json = std::str::from_utf8(&bytes[20..20 + json_len]).unwrap();
    assert!(json.contains("\"Body\""));
    assert!(json.contains("\"Goggles\""));
}

#[test]
fn gltf_json_export_is_self_contained() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());

    complete_wizard(&mut state, &importer, "avatar-2");
    load_model(&mut state, &importer, "avatar-2");

    let response = send(&mut state, &importer, UiToEngine::ExportAsset { binary: false });
    let EngineToUi::ExportReady { file_name, mime, data } = response else {
        panic!("expected ExportReady");
    };
    assert_eq!(file_name, "Character 2_Asset.gltf");
    assert_eq!(mime, "model/gltf+json");

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(data)
        .unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("\"asset\""));
    assert!(text.contains("data:application/octet-stream;base64,"));
}

// ── Scenario: group paint and reset ─────────────────────────────────────

#[test]
fn group_paint_then_reset_reverts_to_native() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());
    complete_wizard(&mut state, &importer, "avatar-1");
    load_model(&mut state, &importer, "avatar-1");

    let tan = HexColor::new(0xd9, 0xa0, 0x66);
    let response = send(
        &mut state,
        &importer,
        UiToEngine::PaintGroup {
            group: "Skin".to_string(),
            color: tan,
        },
    );
    let EngineToUi::SceneUpdated { dirty_parts } = response else {
        panic!("expected SceneUpdated");
    };
    assert_eq!(dirty_parts, vec!["Body"]);
    assert_eq!(
        state.scene.as_ref().unwrap().part_color("Body"),
        Some(tan)
    );

    // Unknown group labels fall through without touching anything.
    let response = send(
        &mut state,
        &importer,
        UiToEngine::PaintGroup {
            group: "Wheels".to_string(),
            color: tan,
        },
    );
    assert!(matches!(
        response,
        EngineToUi::SceneUpdated { dirty_parts } if dirty_parts.is_empty()
    ));

    let response = send(&mut state, &importer, UiToEngine::ResetColors);
    let EngineToUi::SceneUpdated { dirty_parts } = response else {
        panic!("expected SceneUpdated");
    };
    assert_eq!(dirty_parts, vec!["Body"]);
    assert_eq!(
        state.scene.as_ref().unwrap().part_color("Body"),
        Some(HexColor::WHITE)
    );
}

// ── Scenario: model switch keeps coinciding paint ───────────────────────

#[test]
fn model_switch_keeps_name_coinciding_overrides() {
    let mut state = WorkshopState::new();
    let first = MockImporter::returning(SceneBuilder::avatar());
    complete_wizard(&mut state, &first, "avatar-1");
    load_model(&mut state, &first, "avatar-1");

    let green = HexColor::new(0x10, 0xb9, 0x81);
    send(
        &mut state,
        &first,
        UiToEngine::SetPartColor {
            part: "Body".to_string(),
            color: green,
        },
    );

    // The next model shares "Body" but not "Goggles"/"Shirt".
    let second = MockImporter::returning(
        SceneBuilder::new()
            .named("creature")
            .part("Body", HexColor::WHITE)
            .part("Tail", HexColor::BLACK)
            .build(),
    );
    load_model(&mut state, &second, "animal-1");

    let scene = state.scene.as_ref().unwrap();
    assert_eq!(scene.part_color("Body"), Some(green));
    assert_eq!(scene.part_color("Tail"), Some(HexColor::BLACK));
    assert_eq!(state.bench.config().get("Goggles"), None);
    assert_eq!(state.current_model.as_ref().unwrap().id, "animal-1");
}

// ── Scenario: draft save and restore ────────────────────────────────────

#[test]
fn draft_round_trip_restores_wizard_and_paint() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());
    complete_wizard(&mut state, &importer, "avatar-1");
    load_model(&mut state, &importer, "avatar-1");

    let red = HexColor::new(0xef, 0x44, 0x44);
    send(
        &mut state,
        &importer,
        UiToEngine::SetPartColor {
            part: "Shirt".to_string(),
            color: red,
        },
    );

    let response = send(
        &mut state,
        &importer,
        UiToEngine::SaveDraft {
            name: Some("Red shirt".to_string()),
        },
    );
    let EngineToUi::DraftSaved { json_data } = response else {
        panic!("expected DraftSaved");
    };
    assert!(json_data.contains("\"format\": \"atelier\""));

    // A fresh session restores everything from the draft.
    let mut restored = WorkshopState::new();
    let response = send(&mut restored, &importer, UiToEngine::LoadDraft { data: json_data });
    let EngineToUi::DraftLoaded { state: wizard, paint } = response else {
        panic!("expected DraftLoaded");
    };
    assert_eq!(wizard.status, WizardStatus::Complete);
    assert_eq!(wizard.selected_model_id.as_deref(), Some("avatar-1"));
    assert_eq!(paint.get("Shirt"), Some(red));
    assert_eq!(restored.meta.name, "Red shirt");
    assert_eq!(restored.bench.active_part(), Some("Shirt"));

    // Re-fetching the draft's model repaints it from the restored config.
    load_model(&mut restored, &importer, "avatar-1");
    assert_eq!(
        restored.scene.as_ref().unwrap().part_color("Shirt"),
        Some(red)
    );
}

#[test]
fn loading_a_draft_over_the_same_scene_applies_immediately() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());
    complete_wizard(&mut state, &importer, "avatar-1");
    load_model(&mut state, &importer, "avatar-1");

    let blue = HexColor::new(0x3b, 0x82, 0xf6);
    send(
        &mut state,
        &importer,
        UiToEngine::SetPartColor {
            part: "Body".to_string(),
            color: blue,
        },
    );
    let EngineToUi::DraftSaved { json_data } = send(
        &mut state,
        &importer,
        UiToEngine::SaveDraft { name: None },
    ) else {
        panic!("expected DraftSaved");
    };

    // Meanwhile the user resets their colors but keeps the scene.
    send(&mut state, &importer, UiToEngine::ResetColors);
    assert_eq!(
        state.scene.as_ref().unwrap().part_color("Body"),
        Some(HexColor::WHITE)
    );

    send(&mut state, &importer, UiToEngine::LoadDraft { data: json_data });
    assert_eq!(
        state.scene.as_ref().unwrap().part_color("Body"),
        Some(blue)
    );
}

#[test]
fn corrupt_draft_surfaces_a_single_error() {
    let mut state = WorkshopState::new();
    let importer = MockImporter::returning(SceneBuilder::avatar());

    let response = send(
        &mut state,
        &importer,
        UiToEngine::LoadDraft {
            data: "{\"format\":\"blueprint\",\"version\":1}".to_string(),
        },
    );
    let EngineToUi::Error { message, .. } = response else {
        panic!("expected Error");
    };
    assert!(message.contains("draft error"));
}
