use crate::variant::LEET_SPEAK;
use finl_unicode::categories::{CharacterCategories, MinorCategory};
use std::ops::Range;

/// Word characters in the sense of a regex `\w`.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Lowercase, without diacritics, without punctuation, trimmed.
///
/// ```
/// assert_eq!(saring::normalize_text("  Dasar ANJÍNG!! "), "dasar anjing");
/// ```
pub fn normalize_text(text: &str) -> String {
    Normalized::new(text).text
}

/// Normalized text that remembers where each of its characters came from.
pub(crate) struct Normalized {
    text: String,
    /// For each char of `text`, in order: (byte offset in `text`, byte range in the input).
    origins: Vec<(usize, Range<usize>)>,
}

impl Normalized {
    pub fn new(input: &str) -> Self {
        // Non-spacing marks (accents) are dropped after canonical decomposition.
        fn keep(c: char) -> bool {
            !matches!(c.get_minor_category(), MinorCategory::Mn)
                && (is_word_char(c) || c.is_whitespace())
        }

        let mut text = String::with_capacity(input.len());
        let mut origins = Vec::with_capacity(input.len());

        for (offset, raw) in input.char_indices() {
            let source = offset..offset + raw.len_utf8();
            for lower in raw.to_lowercase() {
                unicode_normalization::char::decompose_canonical(lower, |c| {
                    if keep(c) {
                        origins.push((text.len(), source.clone()));
                        text.push(c);
                    }
                });
            }
        }

        // Trim, keeping origins aligned.
        let leading = text.len() - text.trim_start().len();
        let trailing = text.len() - text.trim_end().len();
        if leading > 0 || trailing > 0 {
            // Blank text trims to nothing from both sides.
            let end = (text.len() - trailing).max(leading);
            origins.retain(|(at, _)| *at >= leading && *at < end);
            for (at, _) in origins.iter_mut() {
                *at -= leading;
            }
            text = text[leading..end].to_owned();
        }

        Self { text, origins }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    fn origin_index(&self, at: usize) -> Option<usize> {
        self.origins.binary_search_by_key(&at, |(a, _)| *a).ok()
    }

    /// Maps a byte range of the normalized text back to the input.
    pub fn source_range(&self, range: Range<usize>) -> Option<Range<usize>> {
        let first = self.origin_index(range.start)?;
        let last = self.origins[first..]
            .iter()
            .take_while(|(at, _)| *at < range.end)
            .last()?;
        Some(self.origins[first].1.start..last.1.end)
    }
}

/// Whether `range` is delimited by non-word characters (or the ends) in `text`.
pub(crate) fn is_whole_word(text: &str, range: Range<usize>) -> bool {
    let before = text[..range.start].chars().next_back();
    let after = text[range.end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

/// Splits after `.`, `!` or `?` when followed by whitespace or the end of the text. Blank
/// sentences are omitted.
pub fn split_into_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((offset, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let end = offset + c.len_utf8();
        match chars.peek() {
            Some(&(_, next)) if next.is_whitespace() => {}
            None => {}
            _ => continue,
        }
        sentences.push(&text[start..end]);
        while let Some(&(_, next)) = chars.peek() {
            if !next.is_whitespace() {
                break;
            }
            chars.next();
        }
        start = chars.peek().map_or(text.len(), |&(o, _)| o);
    }
    sentences.push(&text[start..]);

    sentences.retain(|s| !s.trim().is_empty());
    sentences
}

/// Rewrites text in leetspeak, using the first substitution available for each character.
/// Useful for testing evasion detection.
pub fn to_leet_speak(text: &str) -> String {
    text.chars()
        .map(|c| {
            let lower = c.to_lowercase().next().unwrap_or(c);
            LEET_SPEAK
                .get(lower)
                .and_then(|variants| variants.first())
                .and_then(|v| v.chars().next())
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{is_whole_word, normalize_text, split_into_sentences, to_leet_speak, Normalized};

    #[test]
    fn normalize() {
        assert_eq!(normalize_text("Dasar anjing!"), "dasar anjing");
        assert_eq!(normalize_text("asèe"), "asee");
        assert_eq!(normalize_text("pa'ak"), "paak");
        assert_eq!(normalize_text("a-n-j-i-n-g"), "anjing");
        assert_eq!(normalize_text(" \t!!"), "");
        assert_eq!(normalize_text("snake_case"), "snake_case");
    }

    #[test]
    fn source_range() {
        let input = "  Héllo, A-N-J-I-N-G!";
        let normalized = Normalized::new(input);
        assert_eq!(normalized.as_str(), "hello anjing");

        let hello = normalized.source_range(0..5).unwrap();
        assert_eq!(&input[hello], "Héllo");

        let anjing = normalized.source_range(6..12).unwrap();
        assert_eq!(&input[anjing.clone()], "A-N-J-I-N-G");

        assert!(is_whole_word(input, anjing));
        assert!(!is_whole_word(input, 3..7));

        let blank = Normalized::new(" ?! \t");
        assert_eq!(blank.as_str(), "");
        assert_eq!(blank.source_range(0..1), None);
    }

    #[test]
    fn whole_word() {
        let text = "anjing dan anjingan";
        assert!(is_whole_word(text, 0..6));
        assert!(!is_whole_word(text, 11..17));
        assert!(is_whole_word(text, 7..10));
    }

    #[test]
    fn sentences() {
        assert_eq!(
            split_into_sentences("Halo semua. Dasar anjing!   Apa kabar?"),
            vec!["Halo semua.", "Dasar anjing!", "Apa kabar?"]
        );
        assert_eq!(split_into_sentences("versi 1.5 rilis"), vec!["versi 1.5 rilis"]);
        assert_eq!(split_into_sentences("tanpa titik"), vec!["tanpa titik"]);
        assert!(split_into_sentences("   ").is_empty());
    }

    #[test]
    fn leet_speak() {
        assert_eq!(to_leet_speak("anjing"), "4nj1n6");
        assert_eq!(to_leet_speak("Babi"), "8481");
        assert_eq!(to_leet_speak("hmm"), "hmm");
    }
}
