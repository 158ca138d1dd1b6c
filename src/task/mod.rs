//! Annotation campaign descriptors and task-file ingestion.

mod descriptor;
mod file;

pub use descriptor::TaskDescriptor;
pub use file::read_task_file;
