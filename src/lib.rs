//! RADANNO - radiology annotation sessions.
//!
//! An interactive annotation core for radiology images, built to be
//! embedded in a host event loop (typically a notebook UI). Annotators
//! view medical images and answer multiple-choice or binary questions
//! about them; each completed answer is timed and dispatched to a single
//! submission subscriber.
//!
//! The crate owns the task state machine ([`TaskSession`]), the question
//! panel and the viewer capability contract. Rendering pixels, embedding
//! HTML widgets and remote submission over HTTP are the host's concern and
//! reach the core only through the [`ImageViewer`] trait and the
//! `on_submit` subscriber.

pub mod analysis;
mod data;
mod error;
mod model;
mod panel;
mod session;
mod sink;
mod task;
mod viewer;
mod widget;

pub use data::{ImageData, decode_image_data};
pub use error::TaskError;
pub use model::{AnnotationMode, AnswerEvent, Item, ItemMetadata, ResultRecord};
pub use panel::{QuestionPanel, QuestionPrompt};
pub use session::{BINARY_DEFAULT_QUESTION, MULTI_CLASS_QUESTION, SessionConfig, TaskSession};
pub use sink::{CollectSink, JsonLinesSink};
pub use task::{TaskDescriptor, read_task_file};
pub use viewer::{
    ImageViewer, PanZoomViewer, SimpleViewer, ToolbarViewer, ViewerConfig, ViewerError,
    ViewerRegistry,
};
pub use widget::{CommentField, ProgressBar, ProgressStyle};
