//! Builds the batch's job list from the user's unit selection.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{ContentUnit, TagSet};
use crate::planner::TrackPlan;

use super::types::JobDescriptor;

/// Batch-fatal, pre-dispatch build errors.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The selection produced no runnable jobs. Reported to the caller
    /// before any external process is invoked.
    #[error("nothing to record: none of the selected units contain text")]
    EmptySelection,
}

/// Exclusive owner of `JobDescriptor` construction.
///
/// Order is always re-derived from the original spine order, never the
/// selection order. Selecting an empty unit is a no-op, not an error.
pub struct JobBuilder<'a> {
    units: &'a [ContentUnit],
    plans: &'a HashMap<String, TrackPlan>,
    tags: &'a TagSet,
    work_dir: &'a Path,
    dest_dir: &'a Path,
}

impl<'a> JobBuilder<'a> {
    pub fn new(
        units: &'a [ContentUnit],
        plans: &'a HashMap<String, TrackPlan>,
        tags: &'a TagSet,
        work_dir: &'a Path,
        dest_dir: &'a Path,
    ) -> Self {
        Self {
            units,
            plans,
            tags,
            work_dir,
            dest_dir,
        }
    }

    /// Produce exactly one job per selected unit that has a track plan.
    pub fn build(&self, selection: &[String]) -> Result<Vec<JobDescriptor>, BuildError> {
        let selected: HashSet<&str> = selection.iter().map(String::as_str).collect();

        let jobs: Vec<JobDescriptor> = self
            .units
            .iter()
            .filter(|unit| selected.contains(unit.id.as_str()))
            .filter_map(|unit| {
                let plan = self.plans.get(&unit.id)?;
                Some(self.job_for(unit, plan))
            })
            .collect();

        if jobs.is_empty() {
            return Err(BuildError::EmptySelection);
        }
        Ok(jobs)
    }

    fn job_for(&self, unit: &ContentUnit, plan: &TrackPlan) -> JobDescriptor {
        let wav_path = self.work_file(&plan.safe_name, "wav");
        let mp3_path = self.work_file(&plan.safe_name, "mp3");

        JobDescriptor {
            unit_id: unit.id.clone(),
            label: unit.label.clone(),
            transcript: unit.transcript.clone(),
            word_count: unit.word_count,
            track_number: plan.track_number,
            padded_track: plan.padded_track.clone(),
            safe_name: plan.safe_name.clone(),
            wav_path,
            mp3_path,
            dest_dir: self.dest_dir.to_path_buf(),
            tags: self.tags.clone(),
        }
    }

    fn work_file(&self, safe_name: &str, ext: &str) -> PathBuf {
        self.work_dir.join(format!("{}.{}", safe_name, ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan_tracks;

    fn unit(id: &str, label: &str, text: &str) -> ContentUnit {
        ContentUnit {
            id: id.into(),
            transcript: text.into(),
            label: label.into(),
            word_count: text.split_whitespace().count(),
            sample: String::new(),
        }
    }

    fn tags() -> TagSet {
        TagSet {
            artist: "Ann Author".into(),
            album: "A Tale".into(),
            year: "1999".into(),
            genre: "Speech".into(),
            comment: "TTS: Hazel (0)".into(),
            cover: None,
        }
    }

    fn units() -> Vec<ContentUnit> {
        vec![
            unit("a.xhtml", "Cover", ""),
            unit("b.xhtml", "One", "first chapter"),
            unit("c.xhtml", "Two", "second chapter"),
        ]
    }

    #[test]
    fn selection_order_does_not_reorder_output() {
        let units = units();
        let plans = plan_tracks(&units);
        let tags = tags();
        let builder = JobBuilder::new(&units, &plans, &tags, Path::new("/w"), Path::new("/d"));

        // Selection deliberately reversed relative to spine order.
        let jobs = builder
            .build(&["c.xhtml".to_string(), "b.xhtml".to_string()])
            .unwrap();

        assert_eq!(jobs[0].unit_id, "b.xhtml");
        assert_eq!(jobs[1].unit_id, "c.xhtml");
    }

    #[test]
    fn empty_unit_selection_is_a_noop() {
        let units = units();
        let plans = plan_tracks(&units);
        let tags = tags();
        let builder = JobBuilder::new(&units, &plans, &tags, Path::new("/w"), Path::new("/d"));

        let jobs = builder
            .build(&["a.xhtml".to_string(), "b.xhtml".to_string()])
            .unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].unit_id, "b.xhtml");
    }

    #[test]
    fn all_empty_selection_fails_the_batch() {
        let units = units();
        let plans = plan_tracks(&units);
        let tags = tags();
        let builder = JobBuilder::new(&units, &plans, &tags, Path::new("/w"), Path::new("/d"));

        let result = builder.build(&["a.xhtml".to_string()]);
        assert!(matches!(result, Err(BuildError::EmptySelection)));
    }

    #[test]
    fn building_twice_is_idempotent() {
        let units = units();
        let plans = plan_tracks(&units);
        let tags = tags();
        let builder = JobBuilder::new(&units, &plans, &tags, Path::new("/w"), Path::new("/d"));

        let selection = vec!["b.xhtml".to_string(), "c.xhtml".to_string()];
        let first = builder.build(&selection).unwrap();
        let second = builder.build(&selection).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn every_job_embeds_the_same_tag_set() {
        let units = units();
        let plans = plan_tracks(&units);
        let tags = tags();
        let builder = JobBuilder::new(&units, &plans, &tags, Path::new("/w"), Path::new("/d"));

        let jobs = builder
            .build(&["b.xhtml".to_string(), "c.xhtml".to_string()])
            .unwrap();
        assert_eq!(jobs[0].tags, jobs[1].tags);
        assert_eq!(jobs[0].tags, tags);
    }
}
