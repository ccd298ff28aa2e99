//! Batch-fatal error types.
//!
//! Everything here fails the batch before any job is dispatched. Per-job
//! failures never appear as these errors; they are captured into the
//! result set and the batch keeps going.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::jobs::BuildError;

/// Errors that abort a batch during setup.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The selection produced no runnable jobs.
    #[error("nothing to record: none of the selected units contain text")]
    EmptySelection,

    /// The destination directory could not be created or written to.
    #[error("destination not writable: {}: {source}", path.display())]
    DestinationUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The encoder executable is not where configuration says it is.
    #[error("encoder executable not found: {}", path.display())]
    EncoderMissing { path: PathBuf },

    /// The transient working directory could not be prepared.
    #[error("failed to prepare working directory {}: {source}", path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<BuildError> for BatchError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::EmptySelection => Self::EmptySelection,
        }
    }
}
