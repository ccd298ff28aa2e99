//! Batch orchestration.
//!
//! Top-level driver of a conversion batch: setup and validation, a
//! bounded worker pool over the job queue, per-job state progression,
//! and result aggregation.

mod batch;
mod errors;
mod pool;
mod summary;
mod types;
mod worker;

pub use batch::{BatchRequest, Orchestrator};
pub use errors::BatchError;
pub use pool::WorkerPool;
pub use summary::{BatchFailure, BatchSummary};
pub use types::{BatchProgress, CancelHandle, ProgressCallback};
