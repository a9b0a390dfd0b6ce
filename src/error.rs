//! Error types for decoding persisted layouts

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("layout record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("layout record must be a JSON object")]
    NotAnObject,

    #[error("unsupported layout record version {found} (expected {expected})")]
    UnsupportedVersion { found: String, expected: u32 },

    #[error("layout record field 'widgets' must be an array")]
    WidgetsNotArray,
}

impl RecordError {
    /// Create a version mismatch error from whatever the `version` field held
    pub fn unsupported_version(found: Option<&serde_json::Value>, expected: u32) -> Self {
        Self::UnsupportedVersion {
            found: found.map_or_else(|| "<missing>".to_string(), |v| v.to_string()),
            expected,
        }
    }
}
