//! Speech-engine abstraction.
//!
//! The TTS backend is a stateful configure-then-speak resource: a handle
//! must have the voice and rate applied before the first synthesis call,
//! and one handle must never serve two concurrent jobs. Concurrency is
//! achieved by minting one handle per worker through an
//! [`EngineFactory`], never by sharing a handle.

mod process;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::VoiceSelection;

pub use process::{CommandEngine, CommandEngineFactory};

/// Errors from the synthesis stage. Per-job and isolated: captured into
/// a failed job result, never propagated out of the worker pool.
#[derive(Error, Debug)]
pub enum SynthesisError {
    /// Engine used before `configure` was called.
    #[error("engine not configured with a voice")]
    NotConfigured,

    /// The engine process could not be started.
    #[error("failed to start engine '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The engine exited with a non-zero status.
    #[error("engine exited with code {exit_code}: {message}")]
    EngineExit { exit_code: i32, message: String },

    /// Synthesis did not complete within the configured timeout.
    #[error("synthesis timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// The engine reported success but wrote no usable output.
    #[error("engine produced no output at {}", path.display())]
    MissingOutput { path: PathBuf },

    /// File I/O around the synthesis call failed.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

/// One instance of the TTS backend, capable of one synthesis call at a
/// time. The worker owning the handle must hold it exclusively for the
/// duration of each call.
pub trait SpeechEngine: Send {
    /// Apply voice and rate to the engine instance. Must be called
    /// before the first `synthesize`.
    fn configure(&mut self, voice: &VoiceSelection) -> Result<(), SynthesisError>;

    /// Render `text` into an audio file at `output`.
    ///
    /// Returns only once the engine reports completion, not merely
    /// start; on success the output file exists and is non-empty.
    fn synthesize(&mut self, text: &str, output: &Path) -> Result<(), SynthesisError>;
}

/// Mints engine handles, one per worker.
pub trait EngineFactory: Sync {
    type Engine: SpeechEngine;

    fn create(&self) -> Result<Self::Engine, SynthesisError>;
}
