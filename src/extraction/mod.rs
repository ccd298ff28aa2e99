//! Content extraction: turning raw markup units into plain-text
//! transcripts with labels and word counts.
//!
//! The container layer hands over the spine as ordered `(id, markup)`
//! pairs plus the TOC tree; this module reduces them to an ordered
//! sequence of [`crate::models::ContentUnit`]s. A part that fails to
//! parse contributes an empty transcript rather than aborting the book.

mod extractor;
mod text;
mod toc;
mod words;

pub use extractor::extract_units;
pub use text::{page_text, AltTextOptions, TextError};
pub use toc::{flatten_toc, label_map, FlatTocEntry};
pub use words::count_words;
