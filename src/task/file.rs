//! Task document ingestion.
//!
//! A task document is a JSON file with an item table (column-oriented), the
//! names of the image-path and label columns, and a base directory for
//! resolving relative image paths:
//!
//! ```json
//! {
//!   "dataset": {
//!     "dataframe": {
//!       "path": ["scan_001.png", "scan_002.png"],
//!       "Finding Labels": ["Pneumonia", "Normal"],
//!       "Patient Age": ["58Y", "41Y"]
//!     },
//!     "image_path": "path",
//!     "output_labels": "Finding Labels",
//!     "base_image_directory": "images"
//!   },
//!   "google_forms": { "sheet_url": "https://..." }
//! }
//! ```
//!
//! The image-path column doubles as the item key. Missing or null metadata
//! cells become empty strings, never errors.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::TaskError;
use crate::model::Item;
use crate::task::TaskDescriptor;

#[derive(Debug, Deserialize)]
struct TaskFile {
    dataset: DatasetSection,
    #[serde(default)]
    google_forms: Option<FormsSection>,
}

#[derive(Debug, Deserialize)]
struct DatasetSection {
    dataframe: BTreeMap<String, Vec<Value>>,
    image_path: String,
    output_labels: String,
    #[serde(default)]
    base_image_directory: String,
    /// Optional explicit candidate label list; derived from the label
    /// column's unique values when absent.
    #[serde(default)]
    labels: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct FormsSection {
    #[serde(default)]
    sheet_url: Option<String>,
}

/// Read and parse a task document into a [`TaskDescriptor`].
///
/// Relative `base_image_directory` values are resolved against the task
/// file's parent directory.
pub fn read_task_file(path: impl AsRef<Path>) -> Result<TaskDescriptor, TaskError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)?;
    let task_file: TaskFile = serde_json::from_str(&raw)?;
    let dataset = task_file.dataset;

    let key_column = dataset
        .dataframe
        .get(&dataset.image_path)
        .ok_or_else(|| TaskError::missing_field(dataset.image_path.clone()))?;

    let base_dir = path
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&dataset.base_image_directory);

    let mut descriptor = TaskDescriptor::default().with_label_column(&dataset.output_labels);

    for (row, key_value) in key_column.iter().enumerate() {
        let key = cell_to_string(key_value);
        if key.is_empty() {
            log::warn!("Skipping row {row}: empty image path");
            continue;
        }

        let mut item = Item::new(&key, base_dir.join(&key));
        for (column, values) in &dataset.dataframe {
            if column == &dataset.image_path {
                continue;
            }
            // short or missing cells become empty strings
            let value = values.get(row).map(cell_to_string).unwrap_or_default();
            if column == &dataset.output_labels {
                item.label = Some(value.clone());
            }
            item.metadata.insert(column.clone(), value);
        }
        descriptor.insert_item(item);
    }

    let labels = match dataset.labels {
        Some(labels) => labels,
        None => unique_label_values(&descriptor),
    };
    descriptor = descriptor.with_labels(labels);

    if let Some(forms) = task_file.google_forms {
        if let Some(url) = forms.sheet_url {
            descriptor = descriptor.with_sheet_url(url);
        }
    }

    log::debug!(
        "Read task file {}: {} items, {} labels",
        path.display(),
        descriptor.item_count(),
        descriptor.labels().len()
    );
    Ok(descriptor)
}

/// Sorted unique values of the label column across all items.
fn unique_label_values(descriptor: &TaskDescriptor) -> Vec<String> {
    let mut labels: Vec<String> = descriptor
        .item_keys()
        .filter_map(|key| descriptor.item(key))
        .filter_map(|item| item.label.clone())
        .filter(|label| !label.is_empty())
        .collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

/// Render a dataframe cell as a string; null becomes empty.
fn cell_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TASK_JSON: &str = r#"{
        "dataset": {
            "dataframe": {
                "path": ["scan_002.png", "scan_001.png"],
                "Finding Labels": ["Pneumonia", "Normal"],
                "Patient Age": ["58Y"]
            },
            "image_path": "path",
            "output_labels": "Finding Labels",
            "base_image_directory": "images"
        },
        "google_forms": {
            "sheet_url": "https://docs.google.com/spreadsheets/d/sheet42/edit?usp=sharing"
        }
    }"#;

    fn write_task_file(dir: &Path, contents: &str) -> std::path::PathBuf {
        let path = dir.join("task.json");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_task_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_task_file(dir.path(), TASK_JSON);

        let descriptor = read_task_file(&path).unwrap();
        assert_eq!(descriptor.item_count(), 2);
        assert_eq!(descriptor.labels(), &["Normal", "Pneumonia"]);
        assert_eq!(descriptor.label_column(), "Finding Labels");
        assert_eq!(descriptor.sheet_id(), Some("sheet42"));

        let item = descriptor.item("scan_002.png").unwrap();
        assert_eq!(item.path, dir.path().join("images").join("scan_002.png"));
        assert_eq!(item.label.as_deref(), Some("Pneumonia"));
        assert_eq!(item.metadata_value("Patient Age"), "58Y");

        // the Patient Age column is short; the second row reads as empty
        let item = descriptor.item("scan_001.png").unwrap();
        assert_eq!(item.metadata_value("Patient Age"), "");
    }

    #[test]
    fn test_missing_image_path_column_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_task_file(
            dir.path(),
            r#"{"dataset": {"dataframe": {}, "image_path": "path", "output_labels": "l"}}"#,
        );

        let err = read_task_file(&path).unwrap_err();
        assert!(matches!(err, TaskError::MissingField { field } if field == "path"));
    }

    #[test]
    fn test_explicit_labels_override_derivation() {
        let dir = tempfile::tempdir().unwrap();
        let json = TASK_JSON.replace(
            "\"image_path\"",
            "\"labels\": [\"Pneumonia\", \"Normal\"], \"image_path\"",
        );
        let path = write_task_file(dir.path(), &json);

        let descriptor = read_task_file(&path).unwrap();
        assert_eq!(descriptor.labels(), &["Pneumonia", "Normal"]);
    }
}
