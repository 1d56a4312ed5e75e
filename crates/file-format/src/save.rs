use intent_wizard::WizardState;
use paint_engine::PaintConfig;
use serde::Serialize;

use crate::metadata::DraftMetadata;

/// Current file format version.
pub const FORMAT_VERSION: u32 = 1;

/// The top-level draft file structure.
#[derive(Debug, Clone, Serialize)]
pub struct DraftFile<'a> {
    /// Format identifier.
    pub format: String,
    /// Format version number.
    pub version: u32,
    /// Draft metadata.
    pub meta: &'a DraftMetadata,
    /// The wizard session snapshot (answers, category, selections).
    pub wizard: &'a WizardState,
    /// Per-part color overrides.
    pub paint: &'a PaintConfig,
    /// The part highlighted in the editor, if any.
    pub active_part: Option<&'a str>,
}

/// Serialize a workshop draft to a pretty-printed JSON string.
///
/// Geometry is not saved; reloading a draft re-fetches the model by the
/// wizard's selected id and repaints it from `paint`.
pub fn save_draft(
    meta: &DraftMetadata,
    wizard: &WizardState,
    paint: &PaintConfig,
    active_part: Option<&str>,
) -> String {
    let file = DraftFile {
        format: "atelier".to_string(),
        version: FORMAT_VERSION,
        meta,
        wizard,
        paint,
        active_part,
    };
    serde_json::to_string_pretty(&file).expect("draft serialization should never fail")
}
