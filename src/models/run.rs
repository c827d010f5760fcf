use serde::Serialize;
use tracing::warn;

use crate::error::PipelineError;

/// One skipped document or record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub code: String,
    pub message: String,
}

/// Consolidated report of everything skipped during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunLog {
    pub entries: Vec<LogEntry>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a non-fatal error
    pub fn record(&mut self, error: &PipelineError) {
        warn!("{}", error);
        self.entries.push(LogEntry {
            code: error.code().to_string(),
            message: error.to_string(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries with the given code
    pub fn count(&self, code: &str) -> usize {
        self.entries.iter().filter(|e| e.code == code).count()
    }

    /// One line per entry, `code: message`
    pub fn format(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{}: {}", e.code, e.message))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
