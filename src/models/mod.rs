//! Shared data models for the conversion pipeline.
//!
//! Everything here is a plain value type: created once by a collaborator
//! or an upstream stage, then passed downstream by value. No component
//! holds a mutable back-reference into another's state.

mod book;
mod content;
mod enums;
mod tags;

pub use book::BookMetadata;
pub use content::{ContentUnit, SpineItem, TocEntry};
pub use enums::SourceFormat;
pub use tags::{TagSet, VoiceSelection};
