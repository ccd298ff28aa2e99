//! External-encoder adapter.
//!
//! Wraps the command-line MP3 encoder (LAME-style interface): tag flags
//! followed by positional source and destination paths. Success requires
//! both a zero exit status and the destination file actually existing,
//! since encoders have been seen to exit 0 without writing anything.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;

use crate::jobs::JobDescriptor;

/// Errors from the encode stage. Per-job and isolated, except for
/// `ProgramMissing` which is a pre-dispatch batch check.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// The encoder executable is not where configuration says it is.
    #[error("encoder executable not found: {}", path.display())]
    ProgramMissing { path: PathBuf },

    /// The encoder process could not be started.
    #[error("failed to start encoder: {source}")]
    Launch {
        #[source]
        source: io::Error,
    },

    /// The encoder exited with a non-zero status.
    #[error("encoder exited with code {exit_code}: {message}")]
    ExitStatus { exit_code: i32, message: String },

    /// Exit was clean but no output file appeared.
    #[error("encoder produced no output at {}", path.display())]
    MissingOutput { path: PathBuf },
}

/// Handle on the external encoder executable.
#[derive(Debug, Clone)]
pub struct Encoder {
    program: PathBuf,
}

impl Encoder {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Pre-dispatch availability check.
    ///
    /// A program given as a path must exist; a bare program name is
    /// assumed resolvable on PATH and fails at launch time instead.
    pub fn check_available(&self) -> Result<(), EncodeError> {
        let has_dir = self.program.parent().map(|p| !p.as_os_str().is_empty()).unwrap_or(false);
        if has_dir && !self.program.exists() {
            return Err(EncodeError::ProgramMissing {
                path: self.program.clone(),
            });
        }
        Ok(())
    }

    /// Tag flag arguments for one job, in the encoder's `--xx value`
    /// convention: artist, album, year, genre, comment, then the
    /// per-file title and track number, then the optional embedded
    /// cover image.
    pub fn tag_args(job: &JobDescriptor) -> Vec<OsString> {
        let tags = &job.tags;
        let mut args: Vec<OsString> = Vec::new();

        for (flag, value) in [
            ("--ta", tags.artist.as_str()),
            ("--tl", tags.album.as_str()),
            ("--ty", tags.year.as_str()),
            ("--tg", tags.genre.as_str()),
            ("--tc", tags.comment.as_str()),
            ("--tt", job.label.as_str()),
        ] {
            args.push(OsString::from(flag));
            args.push(OsString::from(value));
        }
        args.push(OsString::from("--tn"));
        args.push(OsString::from(job.track_number.to_string()));

        if let Some(cover) = &tags.cover {
            args.push(OsString::from("--ti"));
            args.push(cover.as_os_str().to_os_string());
        }
        args
    }

    /// Encode one job's intermediate file into its tagged MP3.
    pub fn encode(&self, job: &JobDescriptor) -> Result<(), EncodeError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(Self::tag_args(job))
            .arg(&job.wav_path)
            .arg(&job.mp3_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            "running encoder: {} {} -> {}",
            self.program.display(),
            job.wav_path.display(),
            job.mp3_path.display()
        );

        let output = cmd.output().map_err(|e| EncodeError::Launch { source: e })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(EncodeError::ExitStatus {
                exit_code: output.status.code().unwrap_or(-1),
                message: stderr.trim().to_string(),
            });
        }

        if !job.mp3_path.exists() {
            return Err(EncodeError::MissingOutput {
                path: job.mp3_path.clone(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagSet;

    fn job() -> JobDescriptor {
        JobDescriptor {
            unit_id: "text/ch02.xhtml".into(),
            label: "Chapter Two".into(),
            transcript: "text".into(),
            word_count: 1,
            track_number: 2,
            padded_track: "02".into(),
            safe_name: "02_Chapter Two".into(),
            wav_path: PathBuf::from("/work/02_Chapter Two.wav"),
            mp3_path: PathBuf::from("/work/02_Chapter Two.mp3"),
            dest_dir: PathBuf::from("/out"),
            tags: TagSet {
                artist: "Ann Author".into(),
                album: "A Tale".into(),
                year: "1999".into(),
                genre: "Speech".into(),
                comment: "TTS: Hazel (2)".into(),
                cover: Some(PathBuf::from("/work/embed.jpg")),
            },
        }
    }

    #[test]
    fn tag_args_cover_every_flag() {
        let args: Vec<String> = Encoder::tag_args(&job())
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "--ta", "Ann Author", "--tl", "A Tale", "--ty", "1999", "--tg", "Speech",
                "--tc", "TTS: Hazel (2)", "--tt", "Chapter Two", "--tn", "2", "--ti",
                "/work/embed.jpg",
            ]
        );
    }

    #[test]
    fn cover_flag_absent_without_cover() {
        let mut j = job();
        j.tags.cover = None;
        let args = Encoder::tag_args(&j);
        assert!(!args.iter().any(|a| a == "--ti"));
    }

    #[test]
    fn missing_pathed_program_fails_preflight() {
        let enc = Encoder::new("/nonexistent/dir/lame");
        assert!(matches!(
            enc.check_available(),
            Err(EncodeError::ProgramMissing { .. })
        ));
    }

    #[test]
    fn bare_program_name_passes_preflight() {
        assert!(Encoder::new("lame").check_available().is_ok());
    }
}
