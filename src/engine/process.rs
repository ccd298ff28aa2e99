//! External-process speech engine.
//!
//! Wraps a command-line TTS program (espeak-ng style interface): voice
//! id, speech speed, and an output WAV path are passed as arguments and
//! the text as the final positional argument. Completion is polled with
//! bounded backoff rather than an unbounded blocking wait, so a hung
//! engine becomes a timeout failure instead of a stuck worker.

use std::ffi::OsString;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::models::VoiceSelection;

use super::{EngineFactory, SpeechEngine, SynthesisError};

/// Baseline speech speed in words per minute at rate 0.
const BASE_SPEED_WPM: i32 = 175;

/// Speed change per rate step. Rate -10..10 maps onto 75..275 wpm.
const SPEED_STEP_WPM: i32 = 10;

/// Initial completion-poll interval.
const POLL_START: Duration = Duration::from_millis(50);

/// Poll interval cap for the backoff loop.
const POLL_CAP: Duration = Duration::from_millis(1000);

/// One engine handle backed by an external TTS executable.
pub struct CommandEngine {
    program: PathBuf,
    timeout: Duration,
    voice: Option<VoiceSelection>,
}

impl CommandEngine {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
            voice: None,
        }
    }

    /// Map a rate in [-10, 10] onto the engine's speed argument.
    fn speed_for_rate(rate: i8) -> i32 {
        BASE_SPEED_WPM + SPEED_STEP_WPM * i32::from(rate)
    }

    /// Argument vector for one synthesis invocation.
    fn build_args(voice: &VoiceSelection, text: &str, output: &Path) -> Vec<OsString> {
        vec![
            OsString::from("-v"),
            OsString::from(&voice.id),
            OsString::from("-s"),
            OsString::from(Self::speed_for_rate(voice.rate).to_string()),
            OsString::from("-w"),
            output.as_os_str().to_os_string(),
            OsString::from(text),
        ]
    }

    /// Wait for the child with bounded backoff until exit or timeout.
    fn wait_with_timeout(
        &self,
        child: &mut std::process::Child,
    ) -> Result<std::process::ExitStatus, SynthesisError> {
        let deadline = Instant::now() + self.timeout;
        let mut interval = POLL_START;

        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SynthesisError::Timeout {
                            seconds: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(interval);
                    interval = (interval * 2).min(POLL_CAP);
                }
                Err(e) => {
                    return Err(SynthesisError::Io {
                        operation: "waiting for engine".to_string(),
                        source: e,
                    })
                }
            }
        }
    }
}

impl SpeechEngine for CommandEngine {
    fn configure(&mut self, voice: &VoiceSelection) -> Result<(), SynthesisError> {
        self.voice = Some(voice.clone());
        Ok(())
    }

    fn synthesize(&mut self, text: &str, output: &Path) -> Result<(), SynthesisError> {
        let voice = self.voice.as_ref().ok_or(SynthesisError::NotConfigured)?;

        let args = Self::build_args(voice, text, output);
        tracing::debug!(
            "running engine: {} ({} chars of text)",
            self.program.display(),
            text.len()
        );

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SynthesisError::Spawn {
                program: self.program.display().to_string(),
                source: e,
            })?;

        let status = self.wait_with_timeout(&mut child)?;

        if !status.success() {
            let mut message = String::new();
            if let Some(mut stderr) = child.stderr.take() {
                let _ = stderr.read_to_string(&mut message);
            }
            return Err(SynthesisError::EngineExit {
                exit_code: status.code().unwrap_or(-1),
                message: message.trim().to_string(),
            });
        }

        // Engines have been seen to exit 0 without writing anything.
        let nonempty = std::fs::metadata(output).map(|m| m.len() > 0).unwrap_or(false);
        if !nonempty {
            return Err(SynthesisError::MissingOutput {
                path: output.to_path_buf(),
            });
        }

        Ok(())
    }
}

/// Factory minting one [`CommandEngine`] per worker.
pub struct CommandEngineFactory {
    program: PathBuf,
    timeout: Duration,
}

impl CommandEngineFactory {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// Factory wired from the configured TTS program and synthesis
    /// timeout.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(
            &settings.tools.tts_program,
            Duration::from_secs(settings.batch.synthesis_timeout_secs),
        )
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl EngineFactory for CommandEngineFactory {
    type Engine = CommandEngine;

    fn create(&self) -> Result<CommandEngine, SynthesisError> {
        Ok(CommandEngine::new(&self.program, self.timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_maps_linearly_onto_speed() {
        assert_eq!(CommandEngine::speed_for_rate(0), 175);
        assert_eq!(CommandEngine::speed_for_rate(10), 275);
        assert_eq!(CommandEngine::speed_for_rate(-10), 75);
    }

    #[test]
    fn args_carry_voice_speed_and_output() {
        let voice = VoiceSelection::new("en-gb", "Hazel", 2);
        let args = CommandEngine::build_args(&voice, "hello there", Path::new("/tmp/out.wav"));
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            rendered,
            vec!["-v", "en-gb", "-s", "195", "-w", "/tmp/out.wav", "hello there"]
        );
    }

    #[test]
    fn synthesize_requires_configure_first() {
        let mut engine = CommandEngine::new("does-not-matter", Duration::from_secs(1));
        let err = engine.synthesize("text", Path::new("/tmp/x.wav")).unwrap_err();
        assert!(matches!(err, SynthesisError::NotConfigured));
    }

    #[cfg(unix)]
    #[test]
    fn missing_program_is_a_spawn_error() {
        let mut engine = CommandEngine::new("/nonexistent/tts-engine", Duration::from_secs(1));
        engine
            .configure(&VoiceSelection::new("v", "V", 0))
            .unwrap();
        let err = engine.synthesize("text", Path::new("/tmp/x.wav")).unwrap_err();
        assert!(matches!(err, SynthesisError::Spawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn hung_engine_is_killed_on_timeout() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-engine.sh");
        std::fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();

        let mut engine = CommandEngine::new(&script, Duration::from_millis(200));
        engine
            .configure(&VoiceSelection::new("v", "V", 0))
            .unwrap();

        let started = Instant::now();
        let err = engine
            .synthesize("text", &dir.path().join("out.wav"))
            .unwrap_err();

        assert!(matches!(err, SynthesisError::Timeout { .. }));
        // The child was killed, not waited out.
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn factory_wires_up_from_settings() {
        let mut settings = Settings::default();
        settings.tools.tts_program = "/opt/tts/espeak-ng".to_string();
        settings.batch.synthesis_timeout_secs = 42;

        let factory = CommandEngineFactory::from_settings(&settings);
        assert_eq!(factory.program(), Path::new("/opt/tts/espeak-ng"));
        assert_eq!(factory.timeout(), Duration::from_secs(42));
    }
}
