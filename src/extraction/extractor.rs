//! Builds the ordered `ContentUnit` sequence for a book.

use std::path::Path;

use crate::models::{ContentUnit, SpineItem, TocEntry};

use super::text::{page_text, AltTextOptions};
use super::toc::label_map;
use super::words::count_words;

/// Raw-markup excerpt length for previews.
const SAMPLE_CHARS: usize = 1000;

/// Produce one `ContentUnit` per spine item, in spine order.
///
/// Labels come from the TOC where present, otherwise from the unit id's
/// file stem. A part whose markup fails to parse yields an empty
/// transcript and a warning; the rest of the book is unaffected.
pub fn extract_units(
    spine: &[SpineItem],
    toc: &[TocEntry],
    language: &str,
    alt: &AltTextOptions,
) -> Vec<ContentUnit> {
    let labels = label_map(toc);

    spine
        .iter()
        .map(|item| {
            let label = labels
                .get(&item.id)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| stem_of(&item.id));

            let transcript = match page_text(&item.markup, alt) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!("unit '{}' could not be parsed: {}", item.id, e);
                    String::new()
                }
            };

            let word_count = count_words(&transcript, language);

            ContentUnit {
                id: item.id.clone(),
                transcript,
                label,
                word_count,
                sample: sample_of(&item.markup),
            }
        })
        .collect()
}

/// File stem of a unit id, e.g. "text/ch01.xhtml" -> "ch01".
fn stem_of(id: &str) -> String {
    Path::new(id)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| id.to_string())
}

/// Char-boundary-safe excerpt of the raw markup, with ellipsis.
fn sample_of(markup: &str) -> String {
    match markup.char_indices().nth(SAMPLE_CHARS) {
        Some((idx, _)) => format!("{}...", &markup[..idx]),
        None => markup.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TocEntry;

    fn part(body: &str) -> String {
        format!("<html><body>{}</body></html>", body)
    }

    fn spine() -> Vec<SpineItem> {
        vec![
            SpineItem::new("text/titlepage.xhtml", part("<div><img src=\"c.jpg\"/></div>")),
            SpineItem::new("text/ch01.xhtml", part("<p>It was a dark night.</p>")),
            SpineItem::new("text/ch02.xhtml", "not even close to xml"),
        ]
    }

    fn toc() -> Vec<TocEntry> {
        vec![TocEntry::new("text/ch01.xhtml", "Chapter One")]
    }

    #[test]
    fn units_come_out_in_spine_order() {
        let units = extract_units(&spine(), &toc(), "en", &AltTextOptions::default());
        let ids: Vec<&str> = units.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["text/titlepage.xhtml", "text/ch01.xhtml", "text/ch02.xhtml"]
        );
    }

    #[test]
    fn toc_label_wins_over_stem() {
        let units = extract_units(&spine(), &toc(), "en", &AltTextOptions::default());
        assert_eq!(units[1].label, "Chapter One");
        assert_eq!(units[0].label, "titlepage");
    }

    #[test]
    fn broken_part_yields_empty_transcript() {
        let units = extract_units(&spine(), &toc(), "en", &AltTextOptions::default());
        assert_eq!(units[2].transcript, "");
        assert_eq!(units[2].word_count, 0);
        // The rest of the book still extracted.
        assert!(units[1].word_count > 0);
    }

    #[test]
    fn sample_is_a_markup_excerpt() {
        let long_body = part(&"<p>word </p>".repeat(200));
        let spine = vec![SpineItem::new("a.xhtml", long_body)];
        let units = extract_units(&spine, &[], "en", &AltTextOptions::default());
        assert!(units[0].sample.ends_with("..."));
        assert!(units[0].sample.starts_with("<html>"));
    }
}
