//! Per-job processing: the Pending -> Synthesizing -> Encoding ->
//! Succeeded/Failed state machine, run to completion on one worker
//! thread. No retries, no backward transitions.

use std::fs;
use std::time::Instant;

use crate::encode::Encoder;
use crate::engine::SpeechEngine;
use crate::jobs::{JobDescriptor, JobFailure, JobResult, JobSuccess};
use crate::logging::BatchLogger;

/// Run one job through synthesis, encode, and relocation.
///
/// Every failure is captured into a `JobResult::Failure`; nothing
/// propagates out of the worker. On encode failure the intermediate
/// file is left in place for diagnostics.
pub(super) fn process_job<E: SpeechEngine>(
    engine: &mut E,
    encoder: &Encoder,
    job: &JobDescriptor,
    logger: &BatchLogger,
) -> JobResult {
    let started = Instant::now();

    logger.info(&format!(
        "Track {}: synthesizing '{}' ({} words)",
        job.padded_track, job.label, job.word_count
    ));

    if let Err(e) = engine.synthesize(&job.transcript, &job.wav_path) {
        logger.error(&format!("Track {}: {}", job.padded_track, e));
        return failure(job, format!("synthesis failed: {}", e));
    }

    // The engine contract guarantees this, but the encoder must never
    // run against a missing intermediate.
    if !job.wav_path.exists() {
        return failure(job, "synthesis produced no intermediate file".to_string());
    }

    logger.info(&format!("Track {}: encoding", job.padded_track));

    if let Err(e) = encoder.encode(job) {
        logger.error(&format!("Track {}: {}", job.padded_track, e));
        return failure(job, format!("encoding failed: {}", e));
    }

    let final_path = job.final_path();
    if let Err(e) = fs::copy(&job.mp3_path, &final_path) {
        logger.error(&format!(
            "Track {}: failed to copy to {}: {}",
            job.padded_track,
            final_path.display(),
            e
        ));
        return failure(job, format!("copy to destination failed: {}", e));
    }

    // Best-effort cleanup of the working files; a leftover is not a
    // failure.
    let _ = fs::remove_file(&job.wav_path);
    let _ = fs::remove_file(&job.mp3_path);

    let duration = started.elapsed();
    logger.info(&format!(
        "Track {}: done in {:.1}s -> {}",
        job.padded_track,
        duration.as_secs_f64(),
        final_path.display()
    ));

    JobResult::Success(JobSuccess {
        track_number: job.track_number,
        unit_id: job.unit_id.clone(),
        final_path,
        word_count: job.word_count,
        duration,
    })
}

fn failure(job: &JobDescriptor, reason: String) -> JobResult {
    JobResult::Failure(JobFailure {
        unit_id: job.unit_id.clone(),
        label: job.label.clone(),
        reason,
    })
}
