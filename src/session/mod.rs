//! The annotation task session state machine.

mod config;
mod task;


pub use config::SessionConfig;
pub use task::{BINARY_DEFAULT_QUESTION, MULTI_CLASS_QUESTION, TaskSession};
