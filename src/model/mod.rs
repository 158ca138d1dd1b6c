//! Data models shared across the annotation session.

mod item;
mod record;

pub use item::{Item, ItemMetadata};
pub use record::{AnnotationMode, AnswerEvent, ResultRecord};
