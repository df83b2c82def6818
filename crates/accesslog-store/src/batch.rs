use accesslog_core::{Batch, BatchLine, parse_command};
use accesslog_types::{Error, PendingCommand, Result};
use serde::{Deserialize, Serialize};

use crate::store::{AppendOutcome, CreationPolicy, LogStore};

/// What to do with the rest of a batch after a line fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchPolicy {
    /// Keep going and report every failing line
    #[default]
    Continue,
    /// Stop at the first failing line; earlier lines stay applied
    Abort,
}

/// One batch line that could not be applied
#[derive(Debug)]
pub struct LineFailure {
    /// 1-based line number in the batch source
    pub line: usize,
    pub error: Error,
}

/// Outcome of running a whole batch
#[derive(Debug, Default)]
pub struct BatchReport {
    pub applied: usize,
    pub failures: Vec<LineFailure>,
    /// Lines left unprocessed because the policy stopped the run
    pub skipped: usize,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Apply a parsed command to the file it names
pub fn apply_command(command: &PendingCommand, creation: &CreationPolicy) -> Result<AppendOutcome> {
    LogStore::new(&command.target_file)
        .with_creation_policy(creation.clone())
        .append(&command.token, command.record.clone())
}

/// Applies batch lines one read-modify-write cycle at a time, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchRunner {
    policy: BatchPolicy,
    creation: CreationPolicy,
}

impl BatchRunner {
    pub fn new(policy: BatchPolicy) -> Self {
        Self {
            policy,
            creation: CreationPolicy::default(),
        }
    }

    pub fn with_creation_policy(mut self, creation: CreationPolicy) -> Self {
        self.creation = creation;
        self
    }

    pub fn run(&self, batch: &Batch) -> BatchReport {
        let mut report = BatchReport::default();

        for (index, line) in batch.iter().enumerate() {
            match self.apply_line(line) {
                Ok(_) => report.applied += 1,
                Err(error) => {
                    tracing::warn!(line = line.number, %error, "batch line failed");
                    report.failures.push(LineFailure {
                        line: line.number,
                        error,
                    });

                    if self.policy == BatchPolicy::Abort {
                        report.skipped = batch.len() - index - 1;
                        break;
                    }
                }
            }
        }

        tracing::debug!(
            applied = report.applied,
            failed = report.failures.len(),
            skipped = report.skipped,
            "batch finished"
        );
        report
    }

    fn apply_line(&self, line: &BatchLine) -> Result<AppendOutcome> {
        let command = parse_command(&line.fields)?;
        apply_command(&command, &self.creation)
    }
}
