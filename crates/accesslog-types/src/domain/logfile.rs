use serde::{Deserialize, Serialize};

use super::record::Record;

/// In-memory image of one log file: its access token plus records in append order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFile {
    token: String,
    records: Vec<Record>,
}

impl LogFile {
    /// Empty log bound to `token` (used when the target file does not exist yet)
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            records: Vec::new(),
        }
    }

    pub fn with_records(token: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            token: token.into(),
            records,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Records in insertion order (not re-sorted by timestamp)
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// One parsed command ready to be applied to a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommand {
    pub token: String,
    pub record: Record,
    pub target_file: String,
}
