//! Annotatable items and their metadata.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Per-item metadata (age, view position, etc.), keyed by column name.
///
/// Kept ordered so telemetry and titles render deterministically.
pub type ItemMetadata = BTreeMap<String, String>;

/// One annotatable image plus its metadata.
///
/// Items are read-only once loaded; the full item set is fixed for the
/// session lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    /// Unique key identifying this item within the session.
    pub key: String,
    /// Resolved path to the image file.
    pub path: PathBuf,
    /// Arbitrary per-item metadata.
    pub metadata: ItemMetadata,
    /// Ground-truth label value, used by some question variants.
    pub label: Option<String>,
}

impl Item {
    /// Create a new item with empty metadata and no label.
    pub fn new(key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            metadata: ItemMetadata::new(),
            label: None,
        }
    }

    /// Attach a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Attach a ground-truth label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Look up a metadata value, substituting an empty string when absent.
    ///
    /// Malformed per-item metadata is tolerated, never fatal.
    pub fn metadata_value(&self, key: &str) -> &str {
        self.metadata.get(key).map(String::as_str).unwrap_or("")
    }
}
