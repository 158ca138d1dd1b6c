//! Scoring and parsing helpers for completed annotations.
//!
//! Works on rows read back from a submission sink (or remote sheet),
//! tolerating the malformed telemetry that real campaigns produce.

use serde_json::Value;

/// Leniently parse a JSON string, returning an empty object on failure.
pub fn safe_json_value(input: &str) -> Value {
    match serde_json::from_str(input) {
        Ok(value) => value,
        Err(e) => {
            log::debug!("Invalid json row: {e}");
            Value::Object(serde_json::Map::new())
        }
    }
}

/// Decide whether a binary-task answer was correct.
///
/// `task` is the label that was judged, `answered` the label the respondent
/// effectively asserted (`None` for a negative/unknown assertion), and
/// `truth` the ground-truth label of the item.
pub fn binary_correct(task: &str, answered: Option<&str>, truth: &str) -> bool {
    match answered {
        Some(answered) => answered == truth,
        // nothing asserted: wrong exactly when the judged label was the truth
        None => truth != task,
    }
}

/// One parsed annotation row from a results sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationRow {
    /// Raw annotator identifier, e.g. `"rad_bob"`.
    pub annotator: String,
    /// Annotator group (identifier prefix before the first underscore).
    pub annotator_class: String,
    /// Annotator display name (identifier rest, underscores as spaces).
    pub annotator_name: String,
    /// The respondent's answer label.
    pub label: String,
    /// Whether the answer reads as a negative ("No ..." or "No").
    pub answer_negative: bool,
    /// Seconds the item was viewed, 0.0 when telemetry is missing.
    pub viewing_time: f64,
    /// The full parsed viewing telemetry.
    pub viewing_info: Value,
}

impl AnnotationRow {
    /// Parse a raw sheet row into its derived fields.
    pub fn parse(annotator: &str, label: &str, viewing_info: &str) -> Self {
        let info = safe_json_value(viewing_info);
        let viewing_time = info
            .get("viewing_time")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);

        let (class, name) = match annotator.split_once('_') {
            Some((class, rest)) => (class.to_string(), rest.replace('_', " ")),
            None => (annotator.to_string(), annotator.to_string()),
        };

        Self {
            annotator: annotator.to_string(),
            annotator_class: class,
            annotator_name: name,
            label: label.to_string(),
            answer_negative: label == "No" || label.contains("No "),
            viewing_time,
            viewing_info: info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_json_value_tolerates_garbage() {
        assert_eq!(safe_json_value("{\"bob\": 5}")["bob"], 5);
        assert_eq!(
            safe_json_value("{\"bob\": [1,2,3}"),
            Value::Object(serde_json::Map::new())
        );
    }

    #[test]
    fn test_binary_correct_matches_truth() {
        assert!(binary_correct("Pneumonia", Some("Pneumonia"), "Pneumonia"));
        assert!(!binary_correct("Pneumonia", Some("Influenza"), "Pneumonia"));
    }

    #[test]
    fn test_binary_correct_without_assertion() {
        // judged label was not the truth: withholding was right
        assert!(binary_correct("Influenza", None, "Pneumonia"));
        // judged label was the truth: withholding was wrong
        assert!(!binary_correct("Pneumonia", None, "Pneumonia"));
    }

    #[test]
    fn test_annotation_row_parsing() {
        let row = AnnotationRow::parse(
            "rad_bob",
            "No",
            "{\"viewing_time\": 5, \"views\": [1,2,3]}",
        );

        assert_eq!(row.annotator_class, "rad");
        assert_eq!(row.annotator_name, "bob");
        assert_eq!(row.viewing_time, 5.0);
        assert!(row.answer_negative);
        assert_eq!(row.viewing_info["views"][2], 3);
    }

    #[test]
    fn test_annotation_row_without_underscore() {
        let row = AnnotationRow::parse("nobody", "Yes, clearly", "not json");

        assert_eq!(row.annotator_class, "nobody");
        assert_eq!(row.annotator_name, "nobody");
        assert_eq!(row.viewing_time, 0.0);
        assert!(!row.answer_negative);
    }
}
