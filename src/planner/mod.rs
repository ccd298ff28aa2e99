//! Track planning: stable numbering and filesystem-safe names for the
//! units that actually contain speakable text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::ContentUnit;

/// Characters that may not appear in a filename on any target platform,
/// plus control characters.
static ILLEGAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).expect("valid regex"));

/// Runs of underscores left behind by sanitization.
static UNDERSCORE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"_{2,}").expect("valid regex"));

/// Sanitized labels are capped at this many characters.
const MAX_NAME_CHARS: usize = 50;

/// Naming and ordering data for one non-empty unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackPlan {
    /// 1-based track number, contiguous over non-empty units.
    pub track_number: u32,
    /// Track number zero-padded to the width of the total unit count.
    pub padded_track: String,
    /// Filesystem-safe output name: `{padded_track}_{sanitized label}`.
    ///
    /// The monotonically increasing prefix keeps names unique even when
    /// two labels sanitize to the same string.
    pub safe_name: String,
}

/// Assign track plans to every unit with a non-empty transcript.
///
/// Numbers are assigned scanning in document order, incrementing only on
/// non-empty units, so the output numbering is contiguous 1..K no matter
/// how many empty units are interspersed. Padding width is taken from
/// the *total* unit count so names sort lexically alongside the largest
/// possible track number.
pub fn plan_tracks(units: &[ContentUnit]) -> HashMap<String, TrackPlan> {
    let width = padding_width(units.len());
    let mut plans = HashMap::new();
    let mut track = 0u32;

    for unit in units {
        if !unit.has_text() {
            continue;
        }
        track += 1;
        let padded = format!("{:0width$}", track, width = width);
        let clean = sanitize_label(&unit.label);
        let name_part = if clean.is_empty() { "section" } else { &clean };
        plans.insert(
            unit.id.clone(),
            TrackPlan {
                track_number: track,
                padded_track: padded.clone(),
                safe_name: format!("{}_{}", padded, name_part),
            },
        );
    }
    plans
}

/// Decimal digit count of the total unit count, minimum 1.
pub fn padding_width(total_units: usize) -> usize {
    total_units.max(1).to_string().len()
}

/// Make a label safe for use in a filename.
///
/// Reserved and control characters become underscores, underscore runs
/// collapse, the result is capped at 50 characters, and remaining
/// underscores turn back into spaces for readability.
pub fn sanitize_label(label: &str) -> String {
    let replaced = ILLEGAL_CHARS.replace_all(label.trim(), "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let capped: String = collapsed.chars().take(MAX_NAME_CHARS).collect();
    capped.replace('_', " ").trim().to_string()
}
