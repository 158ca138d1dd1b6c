//! The task session: sequences image presentation, question selection,
//! answer collection and submission-event dispatch.
//!
//! A session reacts only to discrete UI callback events dispatched by a
//! host event loop; nothing here blocks or suspends. The host owns the
//! rendering of the viewer, panel, progress bar and comment field state
//! that the session drives.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::TaskError;
use crate::model::{AnnotationMode, AnswerEvent, ResultRecord};
use crate::panel::{QuestionPanel, QuestionPrompt};
use crate::session::SessionConfig;
use crate::task::TaskDescriptor;
use crate::viewer::{ImageViewer, ViewerRegistry};
use crate::widget::{CommentField, ProgressBar};

/// Fixed question shown by the multi-class task.
pub const MULTI_CLASS_QUESTION: &str = "Select the most appropriate label for the given image";

/// Default prompt template for the binary task.
pub const BINARY_DEFAULT_QUESTION: &str =
    "Does the following text accurately describe the image:";

/// Prompt text placed in the comment field one submission before the end.
const CLOSING_COMMENT_PROMPT: &str = "Comments or Feedback?";

/// Classification policy the session runs under.
enum TaskMode {
    /// Fixed question; `task` is the comma-joined label list, constant.
    MultiClass { task: String },
    /// Varying question; `task` is the label that was just judged.
    BinaryClass,
}

/// Mode-specific fields of a result record.
struct ModeFields {
    mode: AnnotationMode,
    task: String,
}

/// An annotation session for one respondent.
///
/// Constructed through [`TaskSession::multi_class`] or
/// [`TaskSession::binary_class`]; construction samples the first item via a
/// synthetic start event, which produces no result record.
pub struct TaskSession {
    labels: Vec<String>,
    descriptor: TaskDescriptor,
    item_keys: Vec<String>,
    mode: TaskMode,
    viewer: Box<dyn ImageViewer>,
    panel: QuestionPanel,
    comment: CommentField,
    progress: ProgressBar,
    rng: StdRng,
    maximum_count: Option<usize>,
    current_item_id: Option<String>,
    subscriber: Option<Box<dyn FnMut(ResultRecord)>>,
    closing_comment_added: bool,
    terminal: bool,
}

impl TaskSession {
    /// Create a multi-class session: one fixed question, the candidate
    /// labels as answer options.
    pub fn multi_class(
        labels: Vec<String>,
        descriptor: TaskDescriptor,
        config: &SessionConfig,
        registry: &ViewerRegistry,
    ) -> Result<Self, TaskError> {
        let panel = QuestionPanel::new(
            MULTI_CLASS_QUESTION,
            labels.clone(),
            QuestionPrompt::Suffix(String::new()),
            1,
        );
        let task = labels.join(",");
        Self::new(
            labels,
            descriptor,
            config,
            registry,
            panel,
            TaskMode::MultiClass { task },
        )
    }

    /// Create a binary session: each submission judges one candidate label
    /// with Yes/No (plus the descriptor's unknown option, if any).
    pub fn binary_class(
        labels: Vec<String>,
        descriptor: TaskDescriptor,
        config: &SessionConfig,
        registry: &ViewerRegistry,
    ) -> Result<Self, TaskError> {
        let mut choices = vec!["Yes".to_string(), "No".to_string()];
        if let Some(unknown) = descriptor.unknown_option() {
            choices.push(unknown.to_string());
        }
        let prompt = match descriptor.question_texts() {
            Some(texts) => QuestionPrompt::PerQuestion(texts.clone()),
            None => QuestionPrompt::Suffix(BINARY_DEFAULT_QUESTION.to_string()),
        };
        let panel = QuestionPanel::new(String::new(), choices, prompt, 1);
        Self::new(
            labels,
            descriptor,
            config,
            registry,
            panel,
            TaskMode::BinaryClass,
        )
    }

    fn new(
        labels: Vec<String>,
        descriptor: TaskDescriptor,
        config: &SessionConfig,
        registry: &ViewerRegistry,
        panel: QuestionPanel,
        mode: TaskMode,
    ) -> Result<Self, TaskError> {
        if labels.is_empty() {
            return Err(TaskError::invalid_task("candidate label list is empty"));
        }
        let item_keys: Vec<String> = descriptor.item_keys().map(str::to_string).collect();
        if item_keys.is_empty() {
            return Err(TaskError::invalid_task("task has no items"));
        }

        let viewer = registry.create(&config.viewer, &config.viewer_config)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let progress = match config.maximum_count {
            Some(maximum_count) => ProgressBar::new(maximum_count),
            None => ProgressBar::unbounded(),
        };

        let mut session = Self {
            labels,
            descriptor,
            item_keys,
            mode,
            viewer,
            panel,
            comment: CommentField::new(),
            progress,
            rng,
            maximum_count: config.maximum_count,
            current_item_id: None,
            subscriber: None,
            closing_comment_added: false,
            terminal: false,
        };

        // sample and show the first item
        session.submit(AnswerEvent::start())?;
        Ok(session)
    }

    /// Register the single submission subscriber, replacing any previous
    /// one. It is invoked synchronously with each result record.
    pub fn on_submit<F>(&mut self, callback: F)
    where
        F: FnMut(ResultRecord) + 'static,
    {
        self.subscriber = Some(Box::new(callback));
    }

    /// Key of the item currently on screen.
    pub fn current_item_id(&self) -> Option<&str> {
        self.current_item_id.as_deref()
    }

    /// Number of completed (respondent-initiated) submissions.
    pub fn progress_count(&self) -> usize {
        self.progress.value()
    }

    /// Whether the session has frozen.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The classification policy this session runs under.
    pub fn annotation_mode(&self) -> AnnotationMode {
        match self.mode {
            TaskMode::MultiClass { .. } => AnnotationMode::MultiClass,
            TaskMode::BinaryClass => AnnotationMode::BinaryClass,
        }
    }

    /// The configured submission limit, if any.
    pub fn maximum_count(&self) -> Option<usize> {
        self.maximum_count
    }

    /// JSON-encoded viewing telemetry from the active viewer.
    pub fn viewing_info(&self) -> String {
        self.viewer.viewing_info()
    }

    /// The question panel state, for host rendering.
    pub fn panel(&self) -> &QuestionPanel {
        &self.panel
    }

    /// The progress bar state, for host rendering.
    pub fn progress_bar(&self) -> &ProgressBar {
        &self.progress
    }

    /// The comment field state, for host rendering.
    pub fn comment_field(&self) -> &CommentField {
        &self.comment
    }

    /// Update the comment text (respondent edit).
    pub fn set_comment(&mut self, comment: impl Into<String>) {
        self.comment.set_value(comment);
    }

    /// The active viewer.
    pub fn viewer(&self) -> &dyn ImageViewer {
        self.viewer.as_ref()
    }

    /// The active viewer, for forwarding host interactions.
    pub fn viewer_mut(&mut self) -> &mut dyn ImageViewer {
        self.viewer.as_mut()
    }

    /// Route a click on the panel option at `index` into the session.
    ///
    /// Clicks on a disabled or closed panel are no-ops.
    pub fn click_option(&mut self, index: usize) -> Result<(), TaskError> {
        match self.panel.click(index) {
            Some(event) => self.submit(event),
            None => Ok(()),
        }
    }

    /// State-transition entry point for a completed answer.
    ///
    /// Runs as an atomic sequence: snapshot the finished item, clear the
    /// viewer, advance progress, sample the next item/question, emit the
    /// result record, then handle the closing-comment and terminal
    /// transitions. A submit on a terminal session is a no-op.
    pub fn submit(&mut self, event: AnswerEvent) -> Result<(), TaskError> {
        if self.terminal {
            log::debug!("Submit ignored: session is terminal");
            return Ok(());
        }

        // snapshot describes the item just finished, not the next one
        let finished_item = self.current_item_id.clone();
        let viewing_info = self.viewer.viewing_info();
        let comment = self.comment.value().to_string();

        // reset the display before the next item loads
        self.viewer.clear_image();

        if !event.is_start() {
            self.progress.increment();
        }

        let fields = self.advance(&event)?;

        // the synthetic start event emits no record
        if let Some(answer) = event.answer.clone() {
            let record = ResultRecord {
                annotation_mode: fields.mode,
                task: fields.task,
                item_id: finished_item.unwrap_or_default(),
                label: answer,
                viewing_info,
                comment,
            };
            match self.subscriber.as_mut() {
                Some(subscriber) => subscriber(record),
                None => log::debug!("No submission subscriber registered; record dropped"),
            }
        }

        if let Some(maximum_count) = self.maximum_count {
            // one-time closing-comment affordance, strictly before the
            // terminal check
            if !self.closing_comment_added && self.progress.value() + 1 == maximum_count {
                self.comment.show_with_prompt(CLOSING_COMMENT_PROMPT);
                self.closing_comment_added = true;
            }
            if self.progress.value() >= maximum_count {
                self.enter_terminal();
            }
        }
        Ok(())
    }

    /// Policy step: mode-specific record fields plus next-item
    /// (and, for binary, next-question) sampling and viewer/panel update.
    fn advance(&mut self, event: &AnswerEvent) -> Result<ModeFields, TaskError> {
        let fields = match &self.mode {
            TaskMode::MultiClass { task } => ModeFields {
                mode: AnnotationMode::MultiClass,
                task: task.clone(),
            },
            TaskMode::BinaryClass => ModeFields {
                mode: AnnotationMode::BinaryClass,
                task: event.question.clone().unwrap_or_default(),
            },
        };

        // uniform with replacement over the sorted item keys; repeats are
        // intentional
        let next_key = self
            .item_keys
            .choose(&mut self.rng)
            .cloned()
            .ok_or_else(|| TaskError::invalid_task("no items to sample from"))?;
        self.load_item(&next_key)?;

        match &self.mode {
            TaskMode::MultiClass { .. } => {
                // same question, re-issued to re-enable the options
                let question = self.panel.question().to_string();
                self.panel.set_question(question);
            }
            TaskMode::BinaryClass => {
                let question = self
                    .labels
                    .choose(&mut self.rng)
                    .cloned()
                    .ok_or_else(|| TaskError::invalid_task("no candidate labels"))?;
                self.panel.set_question(question);
            }
        }
        Ok(fields)
    }

    /// Load an item into the viewer and make it current.
    fn load_item(&mut self, key: &str) -> Result<(), TaskError> {
        let item = self
            .descriptor
            .item(key)
            .ok_or_else(|| TaskError::invalid_task(format!("unknown item key: {key}")))?;
        self.viewer.load_image(&item.path, &item.metadata)?;
        self.current_item_id = Some(key.to_string());
        Ok(())
    }

    /// Freeze the session: no further image loads or submissions.
    fn enter_terminal(&mut self) {
        self.viewer.clear_image();
        self.panel.close();
        self.comment.close();
        self.progress.mark_success();
        self.terminal = true;
        log::debug!("Session complete: {} items annotated", self.progress.value());
    }
}
