//! Shared orchestration types: progress reporting and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One progress tick, emitted after each job completes (in either
/// direction).
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Jobs finished so far, successes and failures alike.
    pub completed: usize,
    /// Total jobs in the batch.
    pub total: usize,
    /// Label of the unit that just finished.
    pub label: String,
}

/// Callback invoked after each job completes. Shared across workers.
pub type ProgressCallback = Arc<dyn Fn(&BatchProgress) + Send + Sync>;

/// Handle for cancelling a running batch.
///
/// Cancellation is cooperative: workers check the flag between jobs, so
/// the job in flight finishes but no new one starts.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_handle_is_shared_across_clones() {
        let handle = CancelHandle::new();
        let clone = handle.clone();

        assert!(!clone.is_cancelled());
        handle.cancel();
        assert!(clone.is_cancelled());
    }
}
