//! Widget manifest: the configured list of items
//!
//! The manifest names every widget on the board in display order. The layout
//! core only cares about the `id` (the persistence join key) and the count;
//! label, unit, kind and any kind-specific keys are carried through for the
//! rendering side.
//!
//! ```toml
//! [metadata]
//! name = "Bench rig"
//!
//! [layout]
//! gap = 12.0
//!
//! [[widgets]]
//! id = "temp"
//! label = "Temperature"
//! unit = "°C"
//! kind = "gauge"
//! max = 120
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::LayoutConfig;

/// Errors that can occur when loading or validating a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse manifest TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("widget #{index} has an empty id")]
    EmptyId { index: usize },
    #[error("duplicate widget id '{id}'")]
    DuplicateId { id: String },
}

/// One configured widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default)]
    pub kind: String,
    /// Kind-specific settings, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl WidgetSpec {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            unit: None,
            kind: kind.into(),
            extra: BTreeMap::new(),
        }
    }
}

/// A parsed manifest
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub name: Option<String>,
    pub layout: LayoutConfig,
    pub widgets: Vec<WidgetSpec>,
}

#[derive(Deserialize)]
struct TomlManifest {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    layout: LayoutConfig,
    #[serde(default)]
    widgets: Vec<WidgetSpec>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

impl Manifest {
    /// Load a manifest from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a manifest from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let parsed: TomlManifest = toml::from_str(content)?;
        validate_ids(&parsed.widgets)?;

        Ok(Manifest {
            name: parsed.metadata.and_then(|m| m.name),
            layout: parsed.layout,
            widgets: parsed.widgets,
        })
    }
}

/// Ids must be non-empty and unique
pub fn validate_ids(widgets: &[WidgetSpec]) -> Result<(), ManifestError> {
    let mut seen = HashSet::new();
    for (index, widget) in widgets.iter().enumerate() {
        if widget.id.trim().is_empty() {
            return Err(ManifestError::EmptyId { index });
        }
        if !seen.insert(widget.id.as_str()) {
            return Err(ManifestError::DuplicateId {
                id: widget.id.clone(),
            });
        }
    }
    Ok(())
}
