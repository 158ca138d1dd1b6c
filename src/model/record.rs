//! Answer events and result records.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The classification policy a session runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnotationMode {
    /// Fixed question, varying answer (the item label).
    MultiClass,
    /// Varying question (a candidate label), fixed Yes/No/Unknown answers.
    BinaryClass,
}

impl AnnotationMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            AnnotationMode::MultiClass => "MultiClass",
            AnnotationMode::BinaryClass => "BinaryClass",
        }
    }
}

impl fmt::Display for AnnotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An (answer, question) pair produced when a respondent clicks an option.
///
/// `answer = None, question = None` is the synthetic session-start event
/// used to sample the first item; it never produces a [`ResultRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerEvent {
    /// The selected option label, `None` for the start event.
    pub answer: Option<String>,
    /// The question the option answered, if the panel carries one.
    pub question: Option<String>,
}

impl AnswerEvent {
    /// Create a respondent answer event.
    pub fn new(answer: impl Into<String>, question: Option<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            question,
        }
    }

    /// Create the synthetic session-start event.
    pub fn start() -> Self {
        Self::default()
    }

    /// Check whether this is the synthetic start event.
    pub fn is_start(&self) -> bool {
        self.answer.is_none()
    }
}

/// The atomic unit of session output, emitted once per completed answer.
///
/// Immutable once created. The `viewing_info` field carries the viewer's
/// JSON-encoded telemetry for the item that was just finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Which classification policy produced this record.
    pub annotation_mode: AnnotationMode,
    /// Mode-specific task description (label list or judged label).
    pub task: String,
    /// Key of the item the respondent just finished.
    pub item_id: String,
    /// The respondent's chosen answer.
    pub label: String,
    /// JSON-encoded viewing telemetry for the finished item.
    pub viewing_info: String,
    /// Free-text comment captured at submission time.
    pub comment: String,
}
