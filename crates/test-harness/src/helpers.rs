//! Helper functions: error types, payload encoding, canned intake answers.

use base64::Engine;
use intent_wizard::QuestionId;
use scene_kernel::SceneDocument;

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("dispatch error: {message}")]
    DispatchError { message: String },

    #[error("operation refused: {op}")]
    Rejected { op: String },

    #[error("unexpected response to {op}: {got}")]
    UnexpectedResponse { op: String, got: String },

    #[error("no scene loaded")]
    NoScene,

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("export error: {0}")]
    Export(#[from] file_format::ExportError),

    #[error("bad payload: {reason}")]
    Payload { reason: String },
}

// ── Payload Encoding ────────────────────────────────────────────────────────

/// Base64-encode payload bytes the way the host delivers fetched assets.
pub fn encode_payload(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Serialize `scene` into GLB container bytes, the payload shape a real
/// fetch hands the engine.
pub fn glb_bytes(scene: &SceneDocument) -> Result<Vec<u8>, HarnessError> {
    Ok(file_format::export_glb(scene)?)
}

// ── Canned Answers ──────────────────────────────────────────────────────────

/// One valid answer per required choice step, in step order.
///
/// The style answer lands the questionnaire in the character category, which
/// matches the stock avatar scene the mock builder delivers.
pub fn standard_intake() -> [(QuestionId, &'static str); 4] {
    [
        (QuestionId::UseCase, "Game Asset"),
        (QuestionId::Genre, "Battle Royale"),
        (QuestionId::Style, "Cartoon"),
        (QuestionId::Audience, "Teens"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use scene_kernel::SceneBuilder;

    #[test]
    fn standard_intake_answers_every_required_step() {
        let pairs = standard_intake();
        assert_eq!(pairs.len(), 4);
        assert_eq!(pairs[0].0, QuestionId::UseCase);
        assert_eq!(pairs[3].0, QuestionId::Audience);
    }

    #[test]
    fn glb_bytes_produce_a_container() {
        let bytes = glb_bytes(&SceneBuilder::avatar()).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
    }

    #[test]
    fn encode_payload_is_standard_base64() {
        assert_eq!(encode_payload(b"glTF"), "Z2xURg==");
    }
}
