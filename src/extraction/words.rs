//! Transcript word counting.

/// Count the words of a transcript, keyed by the book's language.
///
/// A period is treated as a token boundary: a space is inserted after
/// every "." before tokenizing, so abbreviation-adjacent words like
/// "etc.Next" do not merge into one token. For CJK languages each
/// ideograph counts as a word, since whitespace tokenization would
/// undercount them wildly.
pub fn count_words(text: &str, language: &str) -> usize {
    if text.is_empty() {
        return 0;
    }

    let spaced = text.replace('.', ". ");
    let cjk = is_cjk_language(language);

    let mut count = 0usize;
    for token in spaced.split_whitespace() {
        if cjk {
            let mut has_alpha = false;
            for ch in token.chars() {
                if is_cjk_char(ch) {
                    count += 1;
                } else if ch.is_alphanumeric() {
                    has_alpha = true;
                }
            }
            if has_alpha {
                count += 1;
            }
        } else if token.chars().any(char::is_alphanumeric) {
            count += 1;
        }
    }
    count
}

/// Primary-subtag check for languages written without word spacing.
fn is_cjk_language(language: &str) -> bool {
    let primary = language
        .split(['-', '_'])
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();
    matches!(primary.as_str(), "zh" | "ja" | "ko")
}

fn is_cjk_char(ch: char) -> bool {
    matches!(ch,
        '\u{4e00}'..='\u{9fff}'        // CJK unified ideographs
        | '\u{3400}'..='\u{4dbf}'      // extension A
        | '\u{3040}'..='\u{30ff}'      // hiragana + katakana
        | '\u{ac00}'..='\u{d7af}'      // hangul syllables
    )
}
