//! Widget state for session-driven UI affordances.
//!
//! The session never renders anything itself; it drives this state layer
//! and the host mirrors it into whatever UI surface it embeds. Keeping the
//! state here keeps the session struct simple and the transitions testable.

/// Visual style of the progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressStyle {
    /// Session in progress.
    #[default]
    Info,
    /// Session complete.
    Success,
}

/// Progress display state.
///
/// The value is monotonically non-decreasing; a bounded bar never exceeds
/// its maximum, an unbounded bar counts forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressBar {
    value: usize,
    max: Option<usize>,
    style: ProgressStyle,
}

impl ProgressBar {
    /// Create a progress bar counting up to `max`.
    pub fn new(max: usize) -> Self {
        Self {
            value: 0,
            max: Some(max),
            style: ProgressStyle::Info,
        }
    }

    /// Create a progress bar with no maximum.
    pub fn unbounded() -> Self {
        Self {
            value: 0,
            max: None,
            style: ProgressStyle::Info,
        }
    }

    /// Number of items completed so far.
    pub fn value(&self) -> usize {
        self.value
    }

    /// The total the bar counts towards, if bounded.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Current display style.
    pub fn style(&self) -> ProgressStyle {
        self.style
    }

    /// Advance the counter by one, capped at the maximum when bounded.
    pub fn increment(&mut self) {
        match self.max {
            Some(max) if self.value >= max => {}
            _ => self.value += 1,
        }
    }

    /// Mark the bar as successfully completed.
    pub fn mark_success(&mut self) {
        self.style = ProgressStyle::Success;
    }
}

/// Free-text comment field state.
///
/// Hidden until the session inserts the closing-comment affordance one
/// submission before the end; closed together with the rest of the answer
/// UI on the terminal transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentField {
    value: String,
    rows: u32,
    visible: bool,
    closed: bool,
}

impl CommentField {
    /// Create a hidden, empty comment field.
    pub fn new() -> Self {
        Self {
            value: String::new(),
            rows: 1,
            visible: false,
            closed: false,
        }
    }

    /// Current comment text.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Number of text rows shown.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Whether the field is part of the answer UI.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the field has been disabled.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Update the comment text (respondent edit). Ignored once closed.
    pub fn set_value(&mut self, value: impl Into<String>) {
        if !self.closed {
            self.value = value.into();
        }
    }

    /// Insert the field into the answer UI with a prompt text.
    pub fn show_with_prompt(&mut self, prompt: &str) {
        self.value = prompt.to_string();
        self.rows = 8;
        self.visible = true;
    }

    /// Disable the field.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl Default for CommentField {
    fn default() -> Self {
        Self::new()
    }
}
