//! Configuration: TOML settings and the manager that loads and saves
//! them.

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    BatchSettings, ExtractionSettings, OutputSettings, PathSettings, Settings, ToolSettings,
    VoiceSettings,
};
