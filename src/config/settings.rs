//! Settings struct with TOML-based sections.
//!
//! Settings are organized into logical sections that map to TOML tables.
//! Every field carries a serde default so a partial or older config file
//! still loads.

use serde::{Deserialize, Serialize};

/// Root settings structure containing all configuration sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Path-related settings.
    #[serde(default)]
    pub paths: PathSettings,

    /// Default voice and speech rate.
    #[serde(default)]
    pub voice: VoiceSettings,

    /// Text extraction options.
    #[serde(default)]
    pub extraction: ExtractionSettings,

    /// Output file and tagging options.
    #[serde(default)]
    pub output: OutputSettings,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolSettings,

    /// Batch execution settings.
    #[serde(default)]
    pub batch: BatchSettings,
}

/// Path configuration for output, working, and log directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathSettings {
    /// Destination folder the finished audio files land under.
    #[serde(default = "default_output_folder")]
    pub output_folder: String,

    /// Root folder for per-batch working files.
    #[serde(default = "default_work_root")]
    pub work_root: String,

    /// Folder for batch log files.
    #[serde(default = "default_logs_folder")]
    pub logs_folder: String,
}

fn default_output_folder() -> String {
    "audiobooks".to_string()
}

fn default_work_root() -> String {
    ".work".to_string()
}

fn default_logs_folder() -> String {
    ".logs".to_string()
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            output_folder: default_output_folder(),
            work_root: default_work_root(),
            logs_folder: default_logs_folder(),
        }
    }
}

/// Default voice and speech rate applied to new batches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// Preferred voice name; empty means the engine default.
    #[serde(default)]
    pub name: String,

    /// Speech rate in [-10, 10]; 0 is the voice's native rate.
    #[serde(default)]
    pub rate: i8,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            rate: 0,
        }
    }
}

/// Text extraction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionSettings {
    /// Speak image alt text as bracketed asides.
    #[serde(default)]
    pub speak_image_alt: bool,

    /// Prefix spoken before alt text, e.g. "Image" -> "[Image: Map]".
    #[serde(default = "default_image_alt_prefix")]
    pub image_alt_prefix: String,
}

fn default_image_alt_prefix() -> String {
    "Image".to_string()
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            speak_image_alt: false,
            image_alt_prefix: default_image_alt_prefix(),
        }
    }
}

/// Output file and tagging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Embed a cover thumbnail in every file instead of writing one
    /// shared cover.jpg next to them.
    #[serde(default = "default_true")]
    pub embed_cover: bool,

    /// Genre tag applied to every output file.
    #[serde(default = "default_genre")]
    pub default_genre: String,

    /// Prefix of the derived comment tag, e.g. "TTS" -> "TTS: Hazel (2)".
    #[serde(default = "default_comment_prefix")]
    pub comment_prefix: String,
}

fn default_true() -> bool {
    true
}

fn default_genre() -> String {
    "Speech".to_string()
}

fn default_comment_prefix() -> String {
    "TTS".to_string()
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            embed_cover: default_true(),
            default_genre: default_genre(),
            comment_prefix: default_comment_prefix(),
        }
    }
}

/// External tool locations. Bare names resolve on PATH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolSettings {
    /// MP3 encoder executable.
    #[serde(default = "default_encoder_program")]
    pub encoder_program: String,

    /// TTS engine executable.
    #[serde(default = "default_tts_program")]
    pub tts_program: String,
}

fn default_encoder_program() -> String {
    "lame".to_string()
}

fn default_tts_program() -> String {
    "espeak-ng".to_string()
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            encoder_program: default_encoder_program(),
            tts_program: default_tts_program(),
        }
    }
}

/// Batch execution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchSettings {
    /// Worker thread cap; 0 means use the host CPU count.
    #[serde(default)]
    pub max_workers: usize,

    /// Per-unit synthesis timeout in seconds.
    #[serde(default = "default_synthesis_timeout")]
    pub synthesis_timeout_secs: u64,
}

fn default_synthesis_timeout() -> u64 {
    600
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            max_workers: 0,
            synthesis_timeout_secs: default_synthesis_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_round_trip_through_toml() {
        let settings = Settings::default();
        let serialized = toml::to_string_pretty(&settings).unwrap();
        let parsed: Settings = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.tools.encoder_program, "lame");
        assert_eq!(parsed.batch.synthesis_timeout_secs, 600);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let parsed: Settings = toml::from_str("[voice]\nname = \"Hazel\"\nrate = 2\n").unwrap();
        assert_eq!(parsed.voice.name, "Hazel");
        assert_eq!(parsed.voice.rate, 2);
        assert!(parsed.output.embed_cover);
        assert_eq!(parsed.extraction.image_alt_prefix, "Image");
    }
}
