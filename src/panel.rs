//! Multiple-choice question panel.
//!
//! Holds an ordered list of selectable option labels grouped into rows,
//! plus the current question and its prompt rendering. A click produces a
//! single [`AnswerEvent`] and disables all options until the next
//! `set_question`.

use std::collections::HashMap;

use crate::model::AnswerEvent;

/// How the question prompt is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionPrompt {
    /// Fixed template, rendered as `"{template} {question}?"`.
    ///
    /// An empty template gives `" {question}?"`, the plain phrasing used
    /// by the multi-class task.
    Suffix(String),
    /// Full prompt looked up per question, empty string when missing.
    ///
    /// Lets the binary task show bespoke phrasing per candidate label.
    PerQuestion(HashMap<String, String>),
}

impl QuestionPrompt {
    /// Render the prompt text for a question.
    pub fn render(&self, question: &str) -> String {
        match self {
            QuestionPrompt::Suffix(template) => format!("{template} {question}?"),
            QuestionPrompt::PerQuestion(map) => map.get(question).cloned().unwrap_or_default(),
        }
    }
}

/// Panel presenting one question and a set of clickable options.
pub struct QuestionPanel {
    options: Vec<String>,
    options_per_row: usize,
    question: String,
    prompt: QuestionPrompt,
    prompt_text: String,
    enabled: bool,
    closed: bool,
    subscriber: Option<Box<dyn FnMut(AnswerEvent)>>,
}

impl QuestionPanel {
    /// Create a panel with an initial question and option labels.
    pub fn new(
        question: impl Into<String>,
        options: Vec<String>,
        prompt: QuestionPrompt,
        options_per_row: usize,
    ) -> Self {
        let mut panel = Self {
            options,
            options_per_row: options_per_row.max(1),
            question: String::new(),
            prompt,
            prompt_text: String::new(),
            enabled: true,
            closed: false,
            subscriber: None,
        };
        panel.set_question(question);
        panel
    }

    /// The option labels, in presentation order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Options grouped into display rows of the configured width.
    pub fn option_rows(&self) -> Vec<&[String]> {
        self.options.chunks(self.options_per_row).collect()
    }

    /// The current question string.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// The rendered prompt for the current question.
    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    /// Whether the options are currently clickable.
    pub fn is_enabled(&self) -> bool {
        self.enabled && !self.closed
    }

    /// Whether the panel has been closed for good.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Set a new question: re-renders the prompt and re-enables all options.
    pub fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
        self.prompt_text = self.prompt.render(&self.question);
        self.enabled = true;
    }

    /// Register the single submit subscriber, replacing any previous one.
    pub fn on_submit<F>(&mut self, callback: F)
    where
        F: FnMut(AnswerEvent) + 'static,
    {
        self.subscriber = Some(Box::new(callback));
    }

    /// Close the panel permanently; further clicks are no-ops.
    pub fn close(&mut self) {
        self.closed = true;
        self.enabled = false;
    }

    /// Handle a click on the option at `index`.
    ///
    /// Disables all options for this prompt, notifies the subscriber and
    /// returns the produced event. Clicks on a disabled or closed panel,
    /// or out of range, are no-ops returning `None`.
    pub fn click(&mut self, index: usize) -> Option<AnswerEvent> {
        if !self.is_enabled() {
            return None;
        }
        let answer = self.options.get(index)?.clone();
        self.enabled = false;

        let event = AnswerEvent::new(answer, Some(self.question.clone()));
        if let Some(subscriber) = self.subscriber.as_mut() {
            subscriber(event.clone());
        }
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_suffix_prompt_rendering() {
        let prompt = QuestionPrompt::Suffix("Does the image show".to_string());
        assert_eq!(prompt.render("Pneumonia"), "Does the image show Pneumonia?");
    }

    #[test]
    fn test_per_question_prompt_falls_back_to_empty() {
        let mut map = HashMap::new();
        map.insert("Effusion".to_string(), "Is fluid visible?".to_string());
        let prompt = QuestionPrompt::PerQuestion(map);

        assert_eq!(prompt.render("Effusion"), "Is fluid visible?");
        assert_eq!(prompt.render("Pneumonia"), "");
    }

    #[test]
    fn test_click_disables_until_next_question() {
        let mut panel = QuestionPanel::new(
            "Pneumonia",
            labels(&["Yes", "No"]),
            QuestionPrompt::Suffix(String::new()),
            1,
        );

        let event = panel.click(0).unwrap();
        assert_eq!(event.answer.as_deref(), Some("Yes"));
        assert_eq!(event.question.as_deref(), Some("Pneumonia"));

        // disabled until set_question
        assert!(panel.click(1).is_none());
        panel.set_question("Effusion");
        assert!(panel.click(1).is_some());
    }

    #[test]
    fn test_click_out_of_range_is_noop() {
        let mut panel = QuestionPanel::new(
            "q",
            labels(&["Yes", "No"]),
            QuestionPrompt::Suffix(String::new()),
            1,
        );
        assert!(panel.click(5).is_none());
        assert!(panel.is_enabled());
    }

    #[test]
    fn test_closed_panel_ignores_clicks() {
        let mut panel = QuestionPanel::new(
            "q",
            labels(&["Yes", "No"]),
            QuestionPrompt::Suffix(String::new()),
            1,
        );
        panel.close();
        assert!(panel.click(0).is_none());

        // set_question cannot resurrect a closed panel
        panel.set_question("other");
        assert!(panel.click(0).is_none());
    }

    #[test]
    fn test_subscriber_replacement() {
        let mut panel = QuestionPanel::new(
            "q",
            labels(&["Yes"]),
            QuestionPrompt::Suffix(String::new()),
            1,
        );

        let first = Rc::new(RefCell::new(0));
        let second = Rc::new(RefCell::new(0));
        let first_count = Rc::clone(&first);
        panel.on_submit(move |_| *first_count.borrow_mut() += 1);
        let second_count = Rc::clone(&second);
        panel.on_submit(move |_| *second_count.borrow_mut() += 1);

        panel.click(0);
        assert_eq!(*first.borrow(), 0);
        assert_eq!(*second.borrow(), 1);
    }

    #[test]
    fn test_option_rows_grouping() {
        let panel = QuestionPanel::new(
            "q",
            labels(&["a", "b", "c", "d", "e"]),
            QuestionPrompt::Suffix(String::new()),
            2,
        );
        let rows = panel.option_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], &["a".to_string(), "b".to_string()][..]);
        assert_eq!(rows[2], &["e".to_string()][..]);
    }
}
