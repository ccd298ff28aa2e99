//! Content units and the collaborator input shapes they are built from.

use serde::{Deserialize, Serialize};

/// One entry of the book spine as handed over by the container layer:
/// a stable unit id (document-relative path) plus its raw markup body.
#[derive(Debug, Clone)]
pub struct SpineItem {
    /// Document-relative path, unique within the book, spine order.
    pub id: String,
    /// Raw XHTML markup of the document part.
    pub markup: String,
}

impl SpineItem {
    pub fn new(id: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            markup: markup.into(),
        }
    }
}

/// One node of the table-of-contents tree.
///
/// `dest` is the unit id the entry points at; entries without a
/// destination (section headers) carry an empty `dest` and only
/// contribute their children.
#[derive(Debug, Clone, Default)]
pub struct TocEntry {
    /// Destination unit id, empty when the entry is a pure grouping node.
    pub dest: String,
    /// Human-readable entry title.
    pub title: String,
    /// Nested child entries.
    pub children: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(dest: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            dest: dest.into(),
            title: title.into(),
            children: Vec::new(),
        }
    }

    /// Builder-style child attachment, used heavily in tests.
    pub fn with_child(mut self, child: TocEntry) -> Self {
        self.children.push(child);
        self
    }
}

/// One addressable section of the source document, in spine order.
///
/// Created once per book load by the extractor and immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentUnit {
    /// Stable identifier (document-relative path), spine order significant.
    pub id: String,
    /// Plain-text rendering of the markup body. May be empty.
    pub transcript: String,
    /// Human-readable title from the TOC, or derived from the id.
    pub label: String,
    /// Word count of the transcript.
    pub word_count: usize,
    /// Short raw-markup excerpt for preview only; never synthesized.
    pub sample: String,
}

impl ContentUnit {
    /// Whether this unit carries any speakable text.
    pub fn has_text(&self) -> bool {
        !self.transcript.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_transcript_has_no_text() {
        let unit = ContentUnit {
            id: "text/ch01.xhtml".into(),
            transcript: String::new(),
            label: "Chapter 1".into(),
            word_count: 0,
            sample: String::new(),
        };
        assert!(!unit.has_text());
    }

    #[test]
    fn toc_builder_nests_children() {
        let toc = TocEntry::new("", "Part I")
            .with_child(TocEntry::new("text/ch01.xhtml", "Chapter 1"));
        assert_eq!(toc.children.len(), 1);
        assert!(toc.dest.is_empty());
    }
}
