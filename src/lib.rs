//! Audiobook Core - batch ebook-to-speech conversion
//!
//! This crate contains all business logic with zero UI dependencies:
//! text extraction from book markup, track planning, and a worker pool
//! that drives an external TTS engine and MP3 encoder per selected
//! section. It can be used by a GUI plugin or a CLI tool.

pub mod artwork;
pub mod config;
pub mod encode;
pub mod engine;
pub mod extraction;
pub mod jobs;
pub mod logging;
pub mod models;
pub mod orchestrator;
pub mod planner;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
