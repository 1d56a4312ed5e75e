use intent_wizard::WizardState;
use paint_engine::PaintConfig;
use serde::Deserialize;

use crate::errors::LoadError;
use crate::metadata::DraftMetadata;
use crate::save::FORMAT_VERSION;

/// The top-level file structure for deserialization.
#[derive(Debug, Clone, Deserialize)]
struct DraftFileRaw {
    format: String,
    version: u32,
    meta: DraftMetadata,
    wizard: WizardState,
    paint: PaintConfig,
    active_part: Option<String>,
}

/// A validated, version-migrated draft ready to restore into a session.
#[derive(Debug, Clone)]
pub struct Draft {
    pub meta: DraftMetadata,
    pub wizard: WizardState,
    pub paint: PaintConfig,
    pub active_part: Option<String>,
}

/// Deserialize a draft from a JSON string.
///
/// Validates the format identifier and version, applying migrations when
/// the file predates the current format.
pub fn load_draft(json: &str) -> Result<Draft, LoadError> {
    let raw: DraftFileRaw =
        serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if raw.format != "atelier" {
        return Err(LoadError::UnknownFormat(raw.format));
    }

    if raw.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: raw.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let draft = Draft {
        meta: raw.meta,
        wizard: raw.wizard,
        paint: raw.paint,
        active_part: raw.active_part,
    };

    if raw.version < FORMAT_VERSION {
        return crate::migrate::migrate(draft, raw.version, FORMAT_VERSION);
    }
    Ok(draft)
}
