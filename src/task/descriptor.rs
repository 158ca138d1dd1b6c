//! Task descriptor describing one annotation campaign.

use std::collections::{BTreeMap, HashMap};

use crate::model::Item;

/// Everything a session needs to know about an annotation campaign:
/// candidate labels, the item set, and the optional binary-task extras
/// (unknown option, per-label question texts).
#[derive(Debug, Clone, Default)]
pub struct TaskDescriptor {
    labels: Vec<String>,
    items: BTreeMap<String, Item>,
    label_column: String,
    unknown_option: Option<String>,
    question_texts: Option<HashMap<String, String>>,
    sheet_url: Option<String>,
}

impl TaskDescriptor {
    /// Create a descriptor with an ordered candidate label list.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            ..Self::default()
        }
    }

    /// Replace the ordered candidate label list.
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }

    /// Add an item, keyed by its unique item key.
    pub fn with_item(mut self, item: Item) -> Self {
        self.insert_item(item);
        self
    }

    /// Insert an item, replacing any previous item with the same key.
    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.key.clone(), item);
    }

    /// Set the name of the column holding ground-truth labels.
    pub fn with_label_column(mut self, column: impl Into<String>) -> Self {
        self.label_column = column.into();
        self
    }

    /// Set the label offered as a third "don't know" answer choice.
    pub fn with_unknown_option(mut self, option: impl Into<String>) -> Self {
        self.unknown_option = Some(option.into());
        self
    }

    /// Set bespoke question text for one candidate label.
    pub fn with_question_text(
        mut self,
        label: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.question_texts
            .get_or_insert_with(HashMap::new)
            .insert(label.into(), text.into());
        self
    }

    /// Set the remote results-sheet URL.
    pub fn with_sheet_url(mut self, url: impl Into<String>) -> Self {
        self.sheet_url = Some(url.into());
        self
    }

    /// The ordered candidate label list.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Item keys in sorted order (the order sampling draws from).
    pub fn item_keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Number of items in the campaign.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Look up an item by key.
    pub fn item(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    /// Name of the ground-truth label column.
    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    /// The "don't know" answer label, if the campaign offers one.
    pub fn unknown_option(&self) -> Option<&str> {
        self.unknown_option.as_deref()
    }

    /// Per-label question texts, if the campaign defines them.
    pub fn question_texts(&self) -> Option<&HashMap<String, String>> {
        self.question_texts.as_ref()
    }

    /// The remote results-sheet URL, if configured.
    pub fn sheet_url(&self) -> Option<&str> {
        self.sheet_url.as_deref()
    }

    /// Extract the sheet identifier from the sheet URL.
    ///
    /// Sharing URLs carry `#gid=...` fragments and `?usp=sharing` or
    /// `/edit` suffixes around the id; the id is the last path segment
    /// once those are stripped.
    pub fn sheet_id(&self) -> Option<&str> {
        let url = self.sheet_url.as_deref()?;
        let base = url.split_once('#').map_or(url, |(base, _)| base);
        let trimmed = base
            .trim_end_matches("?usp=sharing")
            .trim_end_matches("/edit");
        trimmed.rsplit('/').next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_keys_are_sorted() {
        let descriptor = TaskDescriptor::new(vec!["Pneumonia".into()])
            .with_item(Item::new("b.png", "/img/b.png"))
            .with_item(Item::new("a.png", "/img/a.png"))
            .with_item(Item::new("c.png", "/img/c.png"));

        let keys: Vec<&str> = descriptor.item_keys().collect();
        assert_eq!(keys, vec!["a.png", "b.png", "c.png"]);
    }

    #[test]
    fn test_sheet_id_extraction() {
        let descriptor = TaskDescriptor::default()
            .with_sheet_url("https://docs.google.com/spreadsheets/d/abc123XYZ/edit?usp=sharing");
        assert_eq!(descriptor.sheet_id(), Some("abc123XYZ"));

        let descriptor = TaskDescriptor::default()
            .with_sheet_url("https://docs.google.com/spreadsheets/d/abc123XYZ/edit");
        assert_eq!(descriptor.sheet_id(), Some("abc123XYZ"));

        let descriptor = TaskDescriptor::default()
            .with_sheet_url("https://docs.google.com/spreadsheets/d/abc123XYZ/edit#gid=0");
        assert_eq!(descriptor.sheet_id(), Some("abc123XYZ"));

        assert_eq!(TaskDescriptor::default().sheet_id(), None);
    }

    #[test]
    fn test_duplicate_item_key_replaces() {
        let descriptor = TaskDescriptor::default()
            .with_item(Item::new("a.png", "/img/old.png"))
            .with_item(Item::new("a.png", "/img/new.png"));

        assert_eq!(descriptor.item_count(), 1);
        assert_eq!(
            descriptor.item("a.png").unwrap().path.to_str(),
            Some("/img/new.png")
        );
    }
}
