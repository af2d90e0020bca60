use std::fmt;

use crate::error::{BatchError, BatchResult};

/// One key that failed, with the reason.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub key: String,
    pub cause: String,
}

/// Per-key outcomes of one batch, in processing order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub successes: Vec<String>,
    pub failures: Vec<Failure>,
}

impl BatchReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, key: impl Into<String>) {
        self.successes.push(key.into());
    }

    pub fn record_failure(&mut self, key: impl Into<String>, cause: impl fmt::Display) {
        self.failures.push(Failure {
            key: key.into(),
            cause: cause.to_string(),
        });
    }

    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    pub fn total(&self) -> usize {
        self.success_count() + self.failure_count()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// `success=<n> failure=<m>`
    pub fn summary(&self) -> String {
        format!(
            "success={} failure={}",
            self.success_count(),
            self.failure_count()
        )
    }

    /// Turn any failure into [`BatchError::Failures`].
    pub fn into_result(self) -> BatchResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(BatchError::Failures(self.failure_count()))
        }
    }
}
