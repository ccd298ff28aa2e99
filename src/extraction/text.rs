//! Plain-text rendering of a unit's markup body.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Whitespace (including NBSP) runs that end in a newline collapse to a
/// single blank line, so paragraph boundaries survive the flattening.
static PRE_NEWLINE_WS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\u{a0}]+\n").expect("valid regex"));

/// Errors from markup parsing. Per-unit and non-fatal: the extractor
/// converts them into an empty transcript and keeps going.
#[derive(Error, Debug)]
pub enum TextError {
    #[error("malformed markup: {0}")]
    MalformedMarkup(String),

    #[error("document has no <body> element")]
    NoBody,
}

/// How image alternate text is spoken, if at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltTextOptions {
    /// Rewrite `<img alt="...">` into inline bracketed text.
    pub speak_image_alt: bool,
    /// Announcement prefix, e.g. "Image". Empty for no prefix.
    pub prefix: String,
}

impl Default for AltTextOptions {
    fn default() -> Self {
        Self {
            speak_image_alt: false,
            prefix: "Image".to_string(),
        }
    }
}

impl AltTextOptions {
    /// Bracketed replacement text for one image's alt attribute.
    ///
    /// The prefix is added only when the alt text does not already start
    /// with it (case-insensitive), so "Image of Westeros" stays
    /// `[Image of Westeros]` rather than `[Image: Image of Westeros]`.
    fn bracketed(&self, alt: &str) -> String {
        if !self.prefix.is_empty()
            && !alt.to_lowercase().starts_with(&self.prefix.to_lowercase())
        {
            format!(" [{}: {}] ", self.prefix, alt)
        } else {
            format!(" [{}] ", alt)
        }
    }
}

/// Render one document part's markup to plain text.
///
/// Rules:
/// - `<br>` elements force a newline in the output stream.
/// - `<img>` elements with non-empty alt text become bracketed inline
///   text when enabled via `alt`.
/// - whitespace runs preceding a newline collapse into a blank line.
/// - the final string is trimmed.
pub fn page_text(markup: &str, alt: &AltTextOptions) -> Result<String, TextError> {
    let doc = roxmltree::Document::parse(markup)
        .map_err(|e| TextError::MalformedMarkup(e.to_string()))?;

    let body = doc
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name().eq_ignore_ascii_case("body"))
        .ok_or(TextError::NoBody)?;

    let mut out = String::new();
    collect_text(body, alt, &mut out);

    let collapsed = PRE_NEWLINE_WS.replace_all(&out, "\n\n");
    Ok(collapsed.trim().to_string())
}

/// Walk an element's children in document order, accumulating text.
fn collect_text(node: roxmltree::Node, alt: &AltTextOptions, out: &mut String) {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text() {
                out.push_str(text);
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }
        match child.tag_name().name() {
            "br" => out.push('\n'),
            "img" => {
                if alt.speak_image_alt {
                    let alt_text = child.attribute("alt").unwrap_or("").trim();
                    if !alt_text.is_empty() {
                        out.push_str(&alt.bracketed(alt_text));
                    }
                }
            }
            // Non-content elements contribute nothing to the transcript.
            "script" | "style" => {}
            _ => collect_text(child, alt, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrap(body: &str) -> String {
        format!("<html><head><title>t</title></head><body>{}</body></html>", body)
    }

    fn alt_on(prefix: &str) -> AltTextOptions {
        AltTextOptions {
            speak_image_alt: true,
            prefix: prefix.to_string(),
        }
    }

    #[test]
    fn br_forces_newline() {
        let text = page_text(&wrap("<p>one<br/>two</p>"), &AltTextOptions::default()).unwrap();
        assert_eq!(text, "one\ntwo");
    }

    #[test]
    fn alt_text_gets_prefix() {
        let text = page_text(
            &wrap(r#"<p>see <img alt="Map" src="m.jpg"/> here</p>"#),
            &alt_on("Image"),
        )
        .unwrap();
        assert!(text.contains("[Image: Map]"), "got: {}", text);
    }

    #[test]
    fn alt_text_prefix_not_duplicated() {
        let text = page_text(
            &wrap(r#"<p><img alt="Image of Westeros" src="m.jpg"/></p>"#),
            &alt_on("Image"),
        )
        .unwrap();
        assert!(text.contains("[Image of Westeros]"), "got: {}", text);
        assert!(!text.contains("[Image: Image of Westeros]"));
    }

    #[test]
    fn alt_text_ignored_when_disabled() {
        let text = page_text(
            &wrap(r#"<p>a <img alt="Map" src="m.jpg"/> b</p>"#),
            &AltTextOptions::default(),
        )
        .unwrap();
        assert!(!text.contains("Map"));
    }

    #[test]
    fn whitespace_before_newline_collapses() {
        let text = page_text(
            &wrap("<p>one \u{a0} \n</p><p>two</p>"),
            &AltTextOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "one\n\ntwo");
    }

    #[test]
    fn script_and_style_are_silent() {
        let text = page_text(
            &wrap("<p>kept</p><script>var x = 1;</script><style>p{}</style>"),
            &AltTextOptions::default(),
        )
        .unwrap();
        assert_eq!(text, "kept");
    }

    #[test]
    fn malformed_markup_is_an_error() {
        assert!(page_text("<html><body><p>oops", &AltTextOptions::default()).is_err());
    }
}
