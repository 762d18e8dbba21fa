//! Pass reports and errors

use crate::graph::GraphError;
use crate::records::RecordError;
use thiserror::Error;

/// Summary of what a single pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassReport {
    pub pass_id: String,
    /// Triples that were new to the graph
    pub added: usize,
    /// Triples that were present and got removed
    pub removed: usize,
    /// Operator-facing remarks (skipped rows, invalid literals, ...)
    pub notes: Vec<String>,
}

impl PassReport {
    pub fn new(pass_id: impl Into<String>) -> Self {
        Self {
            pass_id: pass_id.into(),
            ..Default::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// True if the pass left the graph untouched
    pub fn is_noop(&self) -> bool {
        self.added == 0 && self.removed == 0
    }
}

/// Errors that abort a pass (and with it the run).
///
/// Data-level irregularities never end up here; they become report notes.
#[derive(Debug, Error)]
pub enum PassError {
    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
    #[error("record API error: {0}")]
    Record(#[from] RecordError),
    #[error("pass '{pass}' failed: {message}")]
    Failed { pass: String, message: String },
}

/// Result type for pass operations
pub type PassResult<T> = Result<T, PassError>;
