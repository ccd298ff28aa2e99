//! Bounded worker pool over a shared job queue.
//!
//! Plain scoped threads pulling from a mutexed deque. Each worker mints
//! its own engine handle through the factory and configures it once;
//! a handle is never shared between workers. Results accumulate
//! per-worker and merge when the pool shuts down.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::encode::Encoder;
use crate::engine::{EngineFactory, SpeechEngine};
use crate::jobs::{JobDescriptor, JobFailure, JobResult};
use crate::logging::BatchLogger;
use crate::models::VoiceSelection;

use super::types::{BatchProgress, CancelHandle, ProgressCallback};
use super::worker;

/// Pool of worker threads processing a batch's jobs.
pub struct WorkerPool<'a, F: EngineFactory> {
    factory: &'a F,
    encoder: &'a Encoder,
    voice: VoiceSelection,
    max_workers: usize,
}

impl<'a, F: EngineFactory> WorkerPool<'a, F> {
    pub fn new(
        factory: &'a F,
        encoder: &'a Encoder,
        voice: VoiceSelection,
        max_workers: usize,
    ) -> Self {
        Self {
            factory,
            encoder,
            voice,
            max_workers,
        }
    }

    /// Run all jobs to completion (or cancellation) and return the
    /// merged result set.
    ///
    /// Result order is unspecified; the aggregator re-orders by track
    /// number. Cancelled jobs produce no result at all.
    pub fn run(
        &self,
        jobs: Vec<JobDescriptor>,
        logger: &BatchLogger,
        cancel: &CancelHandle,
        progress: Option<ProgressCallback>,
    ) -> Vec<JobResult> {
        let total = jobs.len();
        let workers = self.max_workers.min(total).max(1);

        logger.info(&format!(
            "Dispatching {} job(s) across {} worker(s)",
            total, workers
        ));

        let queue = Mutex::new(VecDeque::from(jobs));
        let completed = AtomicUsize::new(0);
        let merged: Mutex<Vec<JobResult>> = Mutex::new(Vec::with_capacity(total));

        std::thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    let mut local: Vec<JobResult> = Vec::new();
                    let mut engine = match self.engine_for_worker() {
                        Ok(engine) => Some(engine),
                        Err(e) => {
                            logger.error(&format!("worker has no speech engine: {}", e));
                            None
                        }
                    };

                    loop {
                        if cancel.is_cancelled() {
                            break;
                        }
                        let job = match queue.lock().pop_front() {
                            Some(job) => job,
                            None => break,
                        };

                        let result = match engine.as_mut() {
                            Some(engine) => {
                                worker::process_job(engine, self.encoder, &job, logger)
                            }
                            None => JobResult::Failure(JobFailure {
                                unit_id: job.unit_id.clone(),
                                label: job.label.clone(),
                                reason: "no speech engine available".to_string(),
                            }),
                        };

                        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                        if let Some(callback) = &progress {
                            callback(&BatchProgress {
                                completed: done,
                                total,
                                label: job.label.clone(),
                            });
                        }
                        local.push(result);
                    }

                    merged.lock().extend(local);
                });
            }
        });

        merged.into_inner()
    }

    /// Mint and configure one engine handle for a worker.
    fn engine_for_worker(&self) -> Result<F::Engine, crate::engine::SynthesisError> {
        let mut engine = self.factory.create()?;
        engine.configure(&self.voice)?;
        Ok(engine)
    }
}
