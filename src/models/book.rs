//! Book-level metadata gathered once per book load.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::enums::SourceFormat;

/// Book-level facts, immutable after extraction.
///
/// Collected by the (out-of-scope) container layer from the library
/// database or the book's own metadata record, then handed to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookMetadata {
    /// Authors in display order. Never empty; defaults to `["Unknown"]`.
    pub authors: Vec<String>,
    /// Book title. Defaults to "Unknown".
    pub title: String,
    /// Sortable title, falls back to `title`.
    pub title_sort: String,
    /// Series name, if the book belongs to one.
    pub series: Option<String>,
    /// Position within the series.
    pub series_index: Option<f64>,
    /// Four-digit publication year, if known.
    pub pub_year: Option<String>,
    /// Library tags.
    pub tags: Vec<String>,
    /// BCP-47 / ISO language code of the book text ("en" if unknown).
    pub language: String,
    /// Raw cover image bytes, if a cover was found.
    #[serde(skip)]
    pub cover: Option<Vec<u8>>,
    /// Container format of the source book.
    pub format: SourceFormat,
    /// Path to the source book file.
    pub path_to_ebook: PathBuf,
}

impl BookMetadata {
    /// First author, used as the default artist tag.
    pub fn first_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("Unknown")
    }

    /// Series plus index, e.g. "Discworld 4". Empty when there is no series.
    ///
    /// A whole-number index is printed without the decimal point.
    pub fn series_label(&self) -> Option<String> {
        let series = self.series.as_deref()?;
        match self.series_index {
            Some(idx) if idx > 0.0 => {
                if idx.fract() == 0.0 {
                    Some(format!("{} {}", series, idx as i64))
                } else {
                    Some(format!("{} {}", series, idx))
                }
            }
            _ => Some(series.to_string()),
        }
    }

    /// "Series N - Title" when the book is in a series, used as the
    /// preferred album tag.
    pub fn series_title(&self) -> Option<String> {
        self.series_label().map(|s| format!("{} - {}", s, self.title))
    }

    /// One-line label identifying the book in logs and summaries.
    pub fn book_label(&self) -> String {
        format!("{} - {}", self.first_author(), self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta() -> BookMetadata {
        BookMetadata {
            authors: vec!["Ann Author".into(), "Bob Coauthor".into()],
            title: "A Tale".into(),
            title_sort: "Tale, A".into(),
            series: Some("Chronicles".into()),
            series_index: Some(2.0),
            pub_year: Some("1999".into()),
            tags: vec!["Fantasy".into()],
            language: "en".into(),
            cover: None,
            format: SourceFormat::Epub,
            path_to_ebook: PathBuf::from("/books/a_tale.epub"),
        }
    }

    #[test]
    fn series_title_includes_index() {
        assert_eq!(meta().series_title().unwrap(), "Chronicles 2 - A Tale");
    }

    #[test]
    fn fractional_series_index_keeps_fraction() {
        let mut m = meta();
        m.series_index = Some(1.5);
        assert_eq!(m.series_label().unwrap(), "Chronicles 1.5");
    }

    #[test]
    fn book_label_uses_first_author() {
        assert_eq!(meta().book_label(), "Ann Author - A Tale");
    }
}
