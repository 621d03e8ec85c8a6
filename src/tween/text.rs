//! Splitting text into independently animated units.

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBy {
    /// User-perceived characters (grapheme clusters)
    Chars,
    /// Whitespace-separated words
    Words,
}

/// One piece of split text and when it starts animating.
#[derive(Debug, Clone, PartialEq)]
pub struct TextUnit {
    pub index: usize,
    pub text: String,
    pub delay_ms: f32,
    /// A word that was followed by whitespace; the renderer keeps a
    /// non-breaking space after it so the line still wraps between words.
    pub trailing_space: bool,
}

/// Split `text` into units with delays `stagger_ms` apart.
///
/// Characters are grapheme clusters, so combining marks and Arabic
/// shaping sequences stay with their base letter. Whitespace between
/// words is not a unit of its own.
pub fn split_text(text: &str, by: SplitBy, stagger_ms: f32) -> Vec<TextUnit> {
    let pieces: Vec<(&str, bool)> = match by {
        SplitBy::Chars => text.graphemes(true).map(|g| (g, false)).collect(),
        SplitBy::Words => {
            let words: Vec<&str> = text.split_whitespace().collect();
            let last = words.len().saturating_sub(1);
            let trailing = text.ends_with(char::is_whitespace);
            words
                .into_iter()
                .enumerate()
                .map(|(i, w)| (w, i < last || trailing))
                .collect()
        }
    };

    pieces
        .into_iter()
        .enumerate()
        .map(|(index, (piece, trailing_space))| TextUnit {
            index,
            text: piece.to_string(),
            delay_ms: index as f32 * stagger_ms,
            trailing_space,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_keep_spacing_flag() {
        let units = split_text("Vision  for\ttomorrow", SplitBy::Words, 20.0);
        let words: Vec<&str> = units.iter().map(|u| u.text.as_str()).collect();
        assert_eq!(words, vec!["Vision", "for", "tomorrow"]);
        assert_eq!(
            units.iter().map(|u| u.trailing_space).collect::<Vec<_>>(),
            vec![true, true, false]
        );
        assert_eq!(units[2].delay_ms, 40.0);
    }

    #[test]
    fn test_chars_are_graphemes() {
        // e + combining acute, then an Arabic letter with a shadda
        let units = split_text("e\u{301}\u{628}\u{651}", SplitBy::Chars, 30.0);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "e\u{301}");
        assert_eq!(units[1].delay_ms, 30.0);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_text("", SplitBy::Chars, 10.0).is_empty());
        assert!(split_text("   ", SplitBy::Words, 10.0).is_empty());
    }
}
