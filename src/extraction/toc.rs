//! Table-of-contents reduction: nested entry tree to unit-id labels.

use std::collections::HashMap;

use crate::models::TocEntry;

/// One flattened TOC entry in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTocEntry {
    /// Destination unit id.
    pub dest: String,
    /// Entry title.
    pub title: String,
    /// Nesting depth, 1 for top-level entries.
    pub level: usize,
}

/// Flatten the TOC tree into document order.
///
/// Entries without a destination contribute only their children.
pub fn flatten_toc(entries: &[TocEntry]) -> Vec<FlatTocEntry> {
    let mut flat = Vec::new();
    for entry in entries {
        flatten_into(entry, 1, &mut flat);
    }
    flat
}

fn flatten_into(entry: &TocEntry, level: usize, out: &mut Vec<FlatTocEntry>) {
    if !entry.dest.is_empty() {
        out.push(FlatTocEntry {
            dest: entry.dest.clone(),
            title: entry.title.clone(),
            level,
        });
    }
    for child in &entry.children {
        flatten_into(child, level + 1, out);
    }
}

/// Reduce the flattened TOC to a unit-id -> label map.
///
/// When several entries point at the same unit, the first entry in
/// document order wins. Units absent from the TOC get no label here;
/// the extractor falls back to a name derived from the unit id.
pub fn label_map(entries: &[TocEntry]) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for entry in flatten_toc(entries) {
        map.entry(entry.dest).or_insert(entry.title);
    }
    map
}
