//! Batch orchestration: setup, dispatch, aggregation, cleanup.
//!
//! The `Orchestrator` owns the whole conversion of one book: it
//! validates the environment, derives tags and directories from the
//! book's metadata, builds the job list, runs the worker pool, and
//! folds the results into a summary. Hard failures happen only before
//! dispatch; once workers start, everything is captured per job.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::artwork;
use crate::config::Settings;
use crate::encode::{EncodeError, Encoder};
use crate::engine::EngineFactory;
use crate::jobs::JobBuilder;
use crate::logging::BatchLogger;
use crate::models::{BookMetadata, ContentUnit, TagSet, VoiceSelection};
use crate::planner::{plan_tracks, sanitize_label};

use super::errors::BatchError;
use super::pool::WorkerPool;
use super::summary::BatchSummary;
use super::types::{CancelHandle, ProgressCallback};

/// Everything one batch needs from the caller.
pub struct BatchRequest<'a> {
    /// Extracted units in spine order, empty ones included.
    pub units: &'a [ContentUnit],
    /// Unit ids the user chose to record.
    pub selection: &'a [String],
    /// Book-level metadata.
    pub meta: &'a BookMetadata,
    /// Voice and rate to record with.
    pub voice: VoiceSelection,
    /// Directory the album subdirectory is created under.
    pub dest_root: &'a Path,
}

/// Runs conversion batches against the configured tools.
pub struct Orchestrator {
    settings: Settings,
}

impl Orchestrator {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Convert one book's selected units into tagged audio files.
    ///
    /// Blocks until every job has finished or cancellation is observed.
    pub fn run_batch<F: EngineFactory>(
        &self,
        factory: &F,
        request: BatchRequest<'_>,
        logger: &BatchLogger,
        cancel: &CancelHandle,
        progress: Option<ProgressCallback>,
    ) -> Result<BatchSummary, BatchError> {
        let meta = request.meta;
        let book_label = meta.book_label();

        logger.info(&format!("Starting batch: {}", book_label));

        // Tool check up front, before any filesystem work.
        let encoder = Encoder::new(&self.settings.tools.encoder_program);
        if let Err(EncodeError::ProgramMissing { path }) = encoder.check_available() {
            return Err(BatchError::EncoderMissing { path });
        }

        // The finished files live in an album-named subdirectory.
        let album = meta.series_title().unwrap_or_else(|| meta.title.clone());
        let dest_dir = request.dest_root.join(sanitize_label(&album));
        fs::create_dir_all(&dest_dir).map_err(|source| BatchError::DestinationUnwritable {
            path: dest_dir.clone(),
            source,
        })?;

        let work_dir = self.work_dir_for(&album);
        fs::create_dir_all(&work_dir).map_err(|source| BatchError::WorkDir {
            path: work_dir.clone(),
            source,
        })?;

        let outcome = self.dispatch(
            factory, &request, &encoder, album, &dest_dir, &work_dir, &book_label, logger, cancel,
            progress,
        );

        // The working directory is transient regardless of outcome,
        // including pre-dispatch aborts.
        if let Err(e) = fs::remove_dir_all(&work_dir) {
            tracing::warn!("failed to clean working directory {}: {}", work_dir.display(), e);
        }

        let summary = outcome?;
        logger.info(&format!(
            "Batch finished: {} succeeded, {} failed, {} words in {:.1}s ({:.0} wpm)",
            summary.succeeded.len(),
            summary.failed.len(),
            summary.total_words,
            summary.elapsed.as_secs_f64(),
            summary.words_per_minute()
        ));
        logger.flush();

        Ok(summary)
    }

    /// Everything between work-dir creation and cleanup: cover and tag
    /// derivation, job build, and the pool run.
    #[allow(clippy::too_many_arguments)]
    fn dispatch<F: EngineFactory>(
        &self,
        factory: &F,
        request: &BatchRequest<'_>,
        encoder: &Encoder,
        album: String,
        dest_dir: &Path,
        work_dir: &Path,
        book_label: &str,
        logger: &BatchLogger,
        cancel: &CancelHandle,
        progress: Option<ProgressCallback>,
    ) -> Result<BatchSummary, BatchError> {
        let meta = request.meta;
        let cover = self.prepare_cover(meta, work_dir, dest_dir, logger);

        let tags = TagSet {
            artist: meta.first_author().to_string(),
            album,
            year: meta.pub_year.clone().unwrap_or_default(),
            genre: self.settings.output.default_genre.clone(),
            comment: TagSet::voice_comment(&self.settings.output.comment_prefix, &request.voice),
            cover,
        };

        let plans = plan_tracks(request.units);
        let builder = JobBuilder::new(request.units, &plans, &tags, work_dir, dest_dir);
        let jobs = builder.build(request.selection)?;

        let pool = WorkerPool::new(factory, encoder, request.voice.clone(), self.worker_budget());

        let started = Instant::now();
        let results = pool.run(jobs, logger, cancel, progress);
        let elapsed = started.elapsed();

        Ok(BatchSummary::from_results(book_label, results, elapsed))
    }

    /// Place the cover where configuration wants it.
    ///
    /// Embedding enabled: a bounded thumbnail in the working directory,
    /// referenced by every job's tag set. Otherwise: one shared bounded
    /// `cover.jpg` next to the finished files. Cover problems degrade
    /// to a coverless batch, never a failed one.
    fn prepare_cover(
        &self,
        meta: &BookMetadata,
        work_dir: &Path,
        dest_dir: &Path,
        logger: &BatchLogger,
    ) -> Option<PathBuf> {
        let bytes = meta.cover.as_deref()?;

        if self.settings.output.embed_cover {
            let thumb_path = work_dir.join("cover.jpg");
            match artwork::write_thumbnail(bytes, &thumb_path) {
                Ok(()) => Some(thumb_path),
                Err(e) => {
                    logger.warn(&format!("cover thumbnail skipped: {}", e));
                    None
                }
            }
        } else {
            let side_path = dest_dir.join("cover.jpg");
            if let Err(e) = artwork::write_thumbnail(bytes, &side_path) {
                logger.warn(&format!("cover.jpg skipped: {}", e));
            }
            None
        }
    }

    fn work_dir_for(&self, album: &str) -> PathBuf {
        Path::new(&self.settings.paths.work_root).join(sanitize_label(album))
    }

    /// Worker count: configured cap, or the host CPU count when the
    /// cap is 0. The pool further limits this to the job count.
    fn worker_budget(&self) -> usize {
        match self.settings.batch.max_workers {
            0 => num_cpus::get(),
            n => n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_budget_zero_means_host_cpus() {
        let orch = Orchestrator::new(Settings::default());
        assert_eq!(orch.worker_budget(), num_cpus::get());

        let mut settings = Settings::default();
        settings.batch.max_workers = 3;
        let orch = Orchestrator::new(settings);
        assert_eq!(orch.worker_budget(), 3);
    }
}
