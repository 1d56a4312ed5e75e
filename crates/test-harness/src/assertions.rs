//! Rich assertion helpers with diagnostic output.
//!
//! Failures carry expected vs actual plus whatever session detail narrows
//! the gap: the discovered part list, the config entries, the chunk layout
//! of a rejected container.

use atelier_types::HexColor;
use paint_engine::PaintConfig;
use workshop_bridge::WorkshopState;

use crate::helpers::HarnessError;

/// Assert the discovered part list matches `expected` exactly, order included.
pub fn assert_scene_parts(state: &WorkshopState, expected: &[&str]) -> Result<(), HarnessError> {
    let actual: Vec<&str> = state.bench.parts().iter().map(String::as_str).collect();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("expected parts {:?}, got {:?}", expected, actual),
        })
    }
}

/// Assert `part` is painted `color` in both the config and the scene.
pub fn assert_painted(
    state: &WorkshopState,
    part: &str,
    color: HexColor,
) -> Result<(), HarnessError> {
    assert_config_entry(state.bench.config(), part, color)?;
    let scene = state.scene.as_ref().ok_or(HarnessError::NoScene)?;
    match scene.part_color(part) {
        Some(actual) if actual == color => Ok(()),
        Some(actual) => Err(HarnessError::AssertionFailed {
            detail: format!("scene paints {} {}, expected {}", part, actual, color),
        }),
        None => Err(HarnessError::AssertionFailed {
            detail: format!("scene has no part named {}", part),
        }),
    }
}

/// Assert the config holds `color` for `part`.
pub fn assert_config_entry(
    config: &PaintConfig,
    part: &str,
    color: HexColor,
) -> Result<(), HarnessError> {
    match config.get(part) {
        Some(actual) if actual == color => Ok(()),
        Some(actual) => Err(HarnessError::AssertionFailed {
            detail: format!("config holds {} for {}, expected {}", actual, part, color),
        }),
        None => Err(HarnessError::AssertionFailed {
            detail: format!(
                "no config entry for {}; entries: {:?}",
                part,
                config.iter().map(|(p, _)| p).collect::<Vec<_>>()
            ),
        }),
    }
}

/// Validate the GLB container layout and return the parsed JSON chunk.
///
/// Checks the magic, version, declared total length, chunk tags, and the
/// 4-byte chunk alignment the format requires.
pub fn assert_glb_container(bytes: &[u8]) -> Result<serde_json::Value, HarnessError> {
    let fail = |detail: String| HarnessError::AssertionFailed { detail };

    if bytes.len() < 12 {
        return Err(fail(format!(
            "container is {} bytes, the header alone needs 12",
            bytes.len()
        )));
    }
    if &bytes[0..4] != b"glTF" {
        return Err(fail(format!("bad magic {:?}", &bytes[0..4])));
    }
    let version = read_u32(bytes, 4);
    if version != 2 {
        return Err(fail(format!("glTF version {}, expected 2", version)));
    }
    let declared = read_u32(bytes, 8) as usize;
    if declared != bytes.len() {
        return Err(fail(format!(
            "header declares {} bytes, container is {}",
            declared,
            bytes.len()
        )));
    }

    let mut json = None;
    let mut offset = 12;
    while offset < bytes.len() {
        if offset + 8 > bytes.len() {
            return Err(fail(format!("truncated chunk header at offset {}", offset)));
        }
        let len = read_u32(bytes, offset) as usize;
        let tag = &bytes[offset + 4..offset + 8];
        if len % 4 != 0 {
            return Err(fail(format!(
                "chunk at offset {} has unaligned length {}",
                offset, len
            )));
        }
        let body = bytes
            .get(offset + 8..offset + 8 + len)
            .ok_or_else(|| fail(format!("chunk at offset {} overruns the container", offset)))?;
        match tag {
            b"JSON" => {
                let value: serde_json::Value = serde_json::from_slice(body)
                    .map_err(|e| fail(format!("JSON chunk does not parse: {}", e)))?;
                json = Some(value);
            }
            b"BIN\0" => {}
            other => return Err(fail(format!("unknown chunk tag {:?}", other))),
        }
        offset += 8 + len;
    }

    json.ok_or_else(|| fail("container has no JSON chunk".to_string()))
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::glb_bytes;
    use scene_kernel::SceneBuilder;

    #[test]
    fn glb_container_check_accepts_real_exports() {
        let bytes = glb_bytes(&SceneBuilder::avatar()).unwrap();
        let json = assert_glb_container(&bytes).unwrap();
        assert_eq!(json["asset"]["version"], "2.0");
        assert!(json["nodes"].as_array().is_some());
    }

    #[test]
    fn glb_container_check_rejects_bad_magic() {
        let err = assert_glb_container(b"NOPE\x02\x00\x00\x00\x0c\x00\x00\x00").unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn glb_container_check_rejects_length_mismatch() {
        let mut bytes = glb_bytes(&SceneBuilder::avatar()).unwrap();
        bytes.push(0);
        let err = assert_glb_container(&bytes).unwrap_err();
        assert!(err.to_string().contains("declares"));
    }

    #[test]
    fn config_entry_mismatch_reports_both_colors() {
        let mut config = PaintConfig::new();
        config.set("Body", HexColor::WHITE);
        let err = assert_config_entry(&config, "Body", HexColor::BLACK).unwrap_err();
        assert!(err.to_string().contains("#ffffff"));
        assert!(err.to_string().contains("#000000"));
    }
}
