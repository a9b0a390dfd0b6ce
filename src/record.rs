//! Persisted layout record
//!
//! ```json
//! { "version": 1, "savedAt": 1700000000000, "widgets": [
//!   { "id": "temp", "mw": 1.0, "mh": 1.0, "rx": 0.25, "ry": 0.5, "z": 3, "kind": "gauge" }
//! ]}
//! ```
//!
//! Decoding is lenient per widget: entries without a string id are skipped
//! and unusable numeric fields are treated as missing, so the builder falls
//! back to the fresh grid placement for them. A wrong version or a
//! non-array `widgets` field rejects the whole record.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::RecordError;
use crate::layout::Item;

/// Current record format version
pub const RECORD_VERSION: u32 = 1;

/// The stored form of a whole layout
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub version: u32,
    /// Save time in epoch milliseconds
    pub saved_at: u64,
    pub widgets: Vec<WidgetRecord>,
}

/// The stored form of one item
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct WidgetRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mw: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mh: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rx: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl WidgetRecord {
    /// Capture the persisted fields of an item
    pub fn from_item(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            mw: Some(item.mw),
            mh: Some(item.mh),
            rx: Some(item.rx),
            ry: Some(item.ry),
            z: Some(item.z),
            kind: Some(item.kind.clone()),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let id = entry.get("id")?.as_str()?;
        if id.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            mw: finite(entry, "mw"),
            mh: finite(entry, "mh"),
            rx: finite(entry, "rx"),
            ry: finite(entry, "ry"),
            z: entry.get("z").and_then(integer),
            kind: entry.get("kind").and_then(Value::as_str).map(str::to_string),
        })
    }
}

impl LayoutRecord {
    /// Snapshot a list of items
    pub fn from_items(items: &[Item], saved_at: u64) -> Self {
        Self {
            version: RECORD_VERSION,
            saved_at,
            widgets: items.iter().map(WidgetRecord::from_item).collect(),
        }
    }

    /// Decode a record, reporting why it was rejected
    pub fn parse(text: &str) -> Result<Self, RecordError> {
        let value: Value = serde_json::from_str(text)?;
        let root = value.as_object().ok_or(RecordError::NotAnObject)?;

        let version = root.get("version");
        // `1.0` is the same version as `1`
        if version.and_then(Value::as_f64) != Some(f64::from(RECORD_VERSION)) {
            return Err(RecordError::unsupported_version(version, RECORD_VERSION));
        }

        let widgets = root
            .get("widgets")
            .and_then(Value::as_array)
            .ok_or(RecordError::WidgetsNotArray)?;

        let saved_at = root
            .get("savedAt")
            .and_then(|v| v.as_u64().or_else(|| v.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)))
            .unwrap_or(0);

        Ok(Self {
            version: RECORD_VERSION,
            saved_at,
            widgets: widgets.iter().filter_map(WidgetRecord::from_json).collect(),
        })
    }

    /// Decode a record, treating any rejection as "no record"
    pub fn load(text: &str) -> Option<Self> {
        match Self::parse(text) {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(error = %err, "ignoring persisted layout");
                None
            }
        }
    }

    /// Encode as compact JSON
    pub fn to_json(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON
    pub fn to_json_pretty(&self) -> Result<String, RecordError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a widget entry by id
    pub fn get(&self, id: &str) -> Option<&WidgetRecord> {
        self.widgets.iter().find(|w| w.id == id)
    }
}

fn finite(entry: &Map<String, Value>, key: &str) -> Option<f64> {
    entry.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

fn integer(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

/// Milliseconds since the Unix epoch, zero if the clock is before it
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
