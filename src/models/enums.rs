//! Enumerations shared across the crate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Source book container format.
///
/// The container itself is parsed by a collaborator; the format tag is
/// carried along for reporting and tag defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Epub,
    Azw3,
    Kepub,
}

impl SourceFormat {
    /// Parse from a format tag such as "EPUB" or "azw3".
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "epub" => Some(Self::Epub),
            "azw3" => Some(Self::Azw3),
            "kepub" => Some(Self::Kepub),
            _ => None,
        }
    }

    /// Upper-case tag for display ("EPUB", "AZW3", "KEPUB").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Epub => "EPUB",
            Self::Azw3 => "AZW3",
            Self::Kepub => "KEPUB",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
