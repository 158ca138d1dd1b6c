//! Submission sinks: consumers of emitted result records.
//!
//! The session's `on_submit` subscriber is the sole boundary to
//! persistence. Failures inside a sink are the sink's concern; the session
//! keeps counting items shown, not items durably recorded.

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::error::TaskError;
use crate::model::ResultRecord;

/// Sink writing one JSON object per line to a writer.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Create a sink over a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Append one record as a JSON line and flush.
    pub fn write(&mut self, record: &ResultRecord) -> Result<(), TaskError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + 'static> JsonLinesSink<W> {
    /// Turn the sink into an `on_submit` subscriber.
    ///
    /// Write failures are logged and otherwise dropped; the session has no
    /// retry logic.
    pub fn subscriber(mut self) -> impl FnMut(ResultRecord) + 'static {
        move |record| {
            if let Err(e) = self.write(&record) {
                log::warn!("Failed to persist result record: {e}");
            }
        }
    }
}

/// In-memory sink collecting records, mainly for tests and headless runs.
///
/// Cloning shares the underlying buffer, so one handle can subscribe while
/// another inspects the collected records (the session model is
/// single-threaded).
#[derive(Clone, Default)]
pub struct CollectSink {
    records: Rc<RefCell<Vec<ResultRecord>>>,
}

impl CollectSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records collected so far.
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether anything has been collected.
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// Snapshot of the collected records.
    pub fn records(&self) -> Vec<ResultRecord> {
        self.records.borrow().clone()
    }

    /// Build an `on_submit` subscriber feeding this sink.
    pub fn subscriber(&self) -> impl FnMut(ResultRecord) + 'static {
        let records = Rc::clone(&self.records);
        move |record| records.borrow_mut().push(record)
    }
}
