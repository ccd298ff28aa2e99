//! Batch result aggregation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::jobs::{JobResult, JobSuccess};

/// One failed unit, with enough identity for the host to offer a
/// retry of just that unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFailure {
    pub unit_id: String,
    pub label: String,
    pub reason: String,
    /// Book the failure belongs to, for host-side failure lists that
    /// span batches.
    pub book_label: String,
}

/// Aggregated outcome of one conversion batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSummary {
    /// One-line book identity the batch ran for.
    pub book_label: String,
    /// Successful jobs, ordered by track number.
    pub succeeded: Vec<JobSuccess>,
    /// Failed jobs, in completion order.
    pub failed: Vec<BatchFailure>,
    /// Words synthesized across successful jobs only.
    pub total_words: usize,
    /// Wall-clock time from dispatch to pool shutdown.
    pub elapsed: Duration,
}

impl BatchSummary {
    /// Fold the pool's unordered result set into a summary.
    pub fn from_results(book_label: &str, results: Vec<JobResult>, elapsed: Duration) -> Self {
        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        for result in results {
            match result {
                JobResult::Success(s) => succeeded.push(s),
                JobResult::Failure(f) => failed.push(BatchFailure {
                    unit_id: f.unit_id,
                    label: f.label,
                    reason: f.reason,
                    book_label: book_label.to_string(),
                }),
            }
        }

        succeeded.sort_by_key(|s| s.track_number);
        let total_words = succeeded.iter().map(|s| s.word_count).sum();

        Self {
            book_label: book_label.to_string(),
            succeeded,
            failed,
            total_words,
            elapsed,
        }
    }

    /// True when every dispatched job produced its file.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// JSON form of the summary, for handing across the host bridge.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Effective synthesis speed in words per minute; 0 when no time
    /// elapsed.
    pub fn words_per_minute(&self) -> f64 {
        let seconds = self.elapsed.as_secs_f64();
        if seconds == 0.0 {
            0.0
        } else {
            60.0 * self.total_words as f64 / seconds
        }
    }
}
