//! Job descriptor and per-job outcome types.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::TagSet;

/// One unit's end-to-end synthesis + encode task.
///
/// An immutable snapshot built by the [`super::JobBuilder`]: tag edits
/// made after construction do not retroactively affect existing jobs.
/// Consumed exactly once by the worker pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    /// Source unit id.
    pub unit_id: String,
    /// Human-readable unit label, for reporting.
    pub label: String,
    /// Text to synthesize.
    pub transcript: String,
    /// Word count of the transcript.
    pub word_count: usize,
    /// 1-based track number from the track plan.
    pub track_number: u32,
    /// Zero-padded track number.
    pub padded_track: String,
    /// Filesystem-safe base name for output files.
    pub safe_name: String,
    /// Intermediate audio file written by the synthesis stage.
    pub wav_path: PathBuf,
    /// Encoded file written by the encode stage, before relocation.
    pub mp3_path: PathBuf,
    /// Directory the final file is copied into.
    pub dest_dir: PathBuf,
    /// Tag fields applied to the output file.
    pub tags: TagSet,
}

impl JobDescriptor {
    /// Final path of the encoded file after relocation.
    pub fn final_path(&self) -> PathBuf {
        match self.mp3_path.file_name() {
            Some(name) => self.dest_dir.join(name),
            None => self.dest_dir.clone(),
        }
    }
}

/// Outcome of processing one job. Appended to the result set once,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JobResult {
    Success(JobSuccess),
    Failure(JobFailure),
}

impl JobResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// A job that produced its final file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSuccess {
    /// Track number, used to reorder the batch at aggregation time.
    pub track_number: u32,
    /// Source unit id.
    pub unit_id: String,
    /// Final encoded file at the destination.
    pub final_path: PathBuf,
    /// Words synthesized for this file.
    pub word_count: usize,
    /// Wall-clock time this job took.
    pub duration: Duration,
}

/// A job that failed at some stage. Carries enough identity for the
/// caller to re-attempt just this unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobFailure {
    /// Source unit id.
    pub unit_id: String,
    /// Human-readable unit label.
    pub label: String,
    /// Human-readable failure reason.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagSet;

    #[test]
    fn final_path_keeps_filename_in_dest_dir() {
        let job = JobDescriptor {
            unit_id: "text/ch01.xhtml".into(),
            label: "Chapter 1".into(),
            transcript: "hello".into(),
            word_count: 1,
            track_number: 1,
            padded_track: "01".into(),
            safe_name: "01_Chapter 1".into(),
            wav_path: PathBuf::from("/work/01_Chapter 1.wav"),
            mp3_path: PathBuf::from("/work/01_Chapter 1.mp3"),
            dest_dir: PathBuf::from("/out/My Album"),
            tags: TagSet {
                artist: "A".into(),
                album: "B".into(),
                year: "2001".into(),
                genre: "Speech".into(),
                comment: "TTS: V (0)".into(),
                cover: None,
            },
        };
        assert_eq!(
            job.final_path(),
            PathBuf::from("/out/My Album/01_Chapter 1.mp3")
        );
    }
}
