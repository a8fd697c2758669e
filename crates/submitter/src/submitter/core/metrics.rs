//! Result counters for submission runs
//!
//! Concurrent submissions update these through atomic counters, so no
//! completion is lost regardless of how the futures interleave.

use std::sync::atomic::{AtomicU64, Ordering};

use super::Acknowledgement;

/// Shared result counters
///
/// `total` is bumped when a submission attempt starts; `successful` and
/// `failed` once it finishes. Every path through the submitter does both, so
/// the counters add up whenever no attempt is in flight.
#[derive(Debug, Default)]
pub struct SubmissionMetrics {
    pub total: AtomicU64,
    pub successful: AtomicU64,
    pub failed: AtomicU64,
    pub already_processed: AtomicU64,
}

impl SubmissionMetrics {
    /// Record that a submission attempt has started
    pub fn record_submission_started(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a 2xx response from the endpoint
    pub fn record_success(&self, acknowledgement: &Acknowledgement) {
        self.successful.fetch_add(1, Ordering::Relaxed);
        if *acknowledgement == Acknowledgement::AlreadyProcessed {
            self.already_processed.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed submission of any kind
    pub fn record_failure(&self) {
        self.failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current counters
    pub fn snapshot(&self) -> ResultCounters {
        ResultCounters {
            success: self.successful.load(Ordering::Relaxed),
            error: self.failed.load(Ordering::Relaxed),
            total: self.total.load(Ordering::Relaxed),
            already_processed: self.already_processed.load(Ordering::Relaxed),
        }
    }
}

/// Immutable snapshot of the result counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCounters {
    pub success: u64,
    pub error: u64,
    pub total: u64,
    /// Subset of `success` the endpoint reported as already processed
    pub already_processed: u64,
}

impl ResultCounters {
    /// Submissions that have finished, successfully or not
    pub fn completed(&self) -> u64 {
        self.success + self.error
    }

    /// True once every URL has been accounted for
    pub fn is_complete(&self) -> bool {
        self.completed() == self.total
    }

    /// Success rate as a fraction of the total URL count (0.0 to 1.0)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.success as f64 / self.total as f64
        }
    }
}
