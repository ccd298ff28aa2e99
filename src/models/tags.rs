//! Voice selection and the audio-file tag set.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The voice and speech rate a batch is recorded with.
///
/// The id is opaque to the core; the engine adapter knows what to do
/// with it. Rate is clamped to the engine's supported range [-10, 10].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceSelection {
    /// Opaque engine voice identifier.
    pub id: String,
    /// Short display name of the voice.
    pub name: String,
    /// Speech rate in [-10, 10]; 0 is the voice's native rate.
    pub rate: i8,
}

impl VoiceSelection {
    pub fn new(id: impl Into<String>, name: impl Into<String>, rate: i8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rate: rate.clamp(-10, 10),
        }
    }
}

/// Tag fields applied uniformly to every output file of a batch.
///
/// The comment is derived from the selected voice and rate and is not
/// independently editable; per-file title and track tags come from the
/// unit's track plan, not from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagSet {
    /// Artist tag (`--ta`), usually the first author.
    pub artist: String,
    /// Album tag (`--tl`), usually "Series N - Title" or the title.
    pub album: String,
    /// Year tag (`--ty`).
    pub year: String,
    /// Genre tag (`--tg`).
    pub genre: String,
    /// Comment tag (`--tc`), derived from voice + rate.
    pub comment: String,
    /// Cover image to embed (`--ti`), when embedding is enabled.
    pub cover: Option<PathBuf>,
}

impl TagSet {
    /// Derive the comment tag from the selected voice and rate.
    ///
    /// `prefix` is the caller-supplied display string (no process-wide
    /// globals); e.g. prefix "TTS", voice "Hazel", rate 2 gives
    /// "TTS: Hazel (2)".
    pub fn voice_comment(prefix: &str, voice: &VoiceSelection) -> String {
        if prefix.is_empty() {
            format!("{} ({})", voice.name, voice.rate)
        } else {
            format!("{}: {} ({})", prefix, voice.name, voice.rate)
        }
    }
}
