//! The default product questionnaire.
//!
//! Option labels are product data; the category rules in [`crate::rules`]
//! match on a subset of them, so the two modules share these constants.

use crate::types::{QuestionId, StepDef, StepKind};

/// The use-case option that diverts into the free-text prompt.
pub const RANDOM_MODEL: &str = "Random Model";

pub const USE_CASES: [&str; 4] = ["Game Asset", "Collectible", "Brand Mascot", RANDOM_MODEL];

pub const GENRES: [&str; 10] = [
    "Defi War",
    "Escape Game",
    "Battle Royale",
    "Dungeon Siege",
    "Cyber Sport",
    "Eco Utopia",
    "Space Odyssey",
    "Shadow Stealth",
    "Wild West",
    "Ancient Samurai",
];

pub const STYLES: [&str; 5] = ["Voxel", "Cartoon", "Low Poly", "Clay Motion", "High Poly"];

pub const AUDIENCES: [&str; 4] = ["Kids", "Family", "Teens", "Adults"];

/// The six-step default flow: four intent questions, an optional reference
/// upload, and the model multi-select.
pub fn default_flow() -> Vec<StepDef> {
    vec![
        StepDef {
            id: QuestionId::UseCase,
            title: "What do you want to create?".to_string(),
            kind: choice(&USE_CASES),
            optional: false,
        },
        StepDef {
            id: QuestionId::Genre,
            title: "Pick a genre".to_string(),
            kind: choice(&GENRES),
            optional: false,
        },
        StepDef {
            id: QuestionId::Style,
            title: "Pick a visual style".to_string(),
            kind: choice(&STYLES),
            optional: false,
        },
        StepDef {
            id: QuestionId::Audience,
            title: "Who is it for?".to_string(),
            kind: choice(&AUDIENCES),
            optional: false,
        },
        StepDef {
            id: QuestionId::Reference,
            title: "Add a reference image".to_string(),
            kind: StepKind::Upload,
            optional: true,
        },
        StepDef {
            id: QuestionId::Models,
            title: "Pick your models".to_string(),
            kind: StepKind::ModelSelect,
            optional: false,
        },
    ]
}

fn choice(labels: &[&str]) -> StepKind {
    StepKind::Choice {
        options: labels.iter().map(|s| s.to_string()).collect(),
    }
}
