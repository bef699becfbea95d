use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use crate::core::FormData;
use crate::error::SubmissionError;

/// Receives the validated form snapshot when a submission starts.
pub trait SubmissionSink {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmissionError>;
}

/// Stub sink: logs the snapshot and always succeeds.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmissionError> {
        info!(
            first_name = %data.first_name,
            last_name = %data.last_name,
            email = %data.email,
            "form submitted"
        );
        Ok(())
    }
}

/// Keeps every snapshot it receives. Clones share the same record, so a
/// caller can hand one clone to a controller and inspect the other.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    inner: Rc<RefCell<Recording>>,
}

#[derive(Debug, Default)]
struct Recording {
    submissions: Vec<FormData>,
    next_failure: Option<SubmissionError>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submissions(&self) -> Vec<FormData> {
        self.inner.borrow().submissions.clone()
    }

    pub fn count(&self) -> usize {
        self.inner.borrow().submissions.len()
    }

    /// Makes the next submit call return `error`.
    pub fn fail_next(&self, error: SubmissionError) {
        self.inner.borrow_mut().next_failure = Some(error);
    }
}

impl SubmissionSink for RecordingSink {
    fn submit(&mut self, data: &FormData) -> Result<(), SubmissionError> {
        let mut inner = self.inner.borrow_mut();
        inner.submissions.push(data.clone());
        match inner.next_failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
