use crate::error::Error;
use crate::Map;
use arrayvec::{ArrayString, ArrayVec};
use lazy_static::lazy_static;
use regex::{Match, Regex, RegexSet};
use std::collections::hash_map::Entry;
use std::ops::Deref;

lazy_static! {
    pub(crate) static ref LEET_SPEAK: Substitutions =
        Substitutions::parse(include_str!("leet_speak.csv"));
    pub(crate) static ref REGIONAL: Substitutions =
        Substitutions::parse(include_str!("regional.csv"));
}

/// Optional separator inserted between characters to catch "a n j i n g" or "a-n-j-i-n-g".
pub const SPLIT_SEPARATOR: &str = r"[\s\-._*+]?";

/// Whether a character may appear as a separator in split evasion.
pub(crate) fn is_split_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '.' | '_' | '*' | '+')
}

/// Characters that may stand in for the inner letters of a masked word, like `a****g`.
pub const MASK: &str = r"[*@#\-_.!?]";

pub(crate) fn is_mask_char(c: char) -> bool {
    matches!(c, '*' | '@' | '#' | '-' | '_' | '.' | '!' | '?')
}

type Variants = ArrayVec<ArrayString<4>, 4>;

/// Set of alternate spellings for an input character.
///
/// For example, in leetspeak, `a` can be written as `4` or `@`, so the pattern for `babi` also
/// matches `b4b1`.
#[derive(Clone, Debug, Default)]
pub struct Substitutions(Map<char, Variants>);

impl Substitutions {
    /// Empty.
    pub fn new() -> Self {
        Self(Default::default())
    }

    /// The default leetspeak table.
    pub fn leet_speak() -> Self {
        LEET_SPEAK.deref().clone()
    }

    /// The default table of Indonesian spelling alternations (`c`/`k`, `f`/`p`/`v`, old `dj`
    /// for `j`, ...).
    pub fn regional() -> Self {
        REGIONAL.deref().clone()
    }

    /// Lines of `char,variant variant ...`.
    fn parse(table: &'static str) -> Self {
        let mut ret = Self::new();
        for line in table.lines().filter(|line| !line.is_empty()) {
            let comma = line.find(',').unwrap();
            let src = line[..comma].chars().next().unwrap();
            for dst in line[comma + 1..].split_whitespace() {
                ret.insert(src, dst).unwrap();
            }
        }
        ret
    }

    pub(crate) fn get(&self, src: char) -> Option<&Variants> {
        self.0.get(&src)
    }

    /// Adds an alternate spelling for a (lowercase) character. A character has at most 4
    /// alternates of at most 4 bytes each.
    pub fn insert(&mut self, src: char, dst: &str) -> crate::Result<()> {
        let alternate = ArrayString::from(dst).map_err(|_| Error::AlternateTooLong {
            src,
            dst: dst.to_owned(),
        })?;
        let variants = self.0.entry(src).or_default();
        if !variants.contains(&alternate) {
            variants
                .try_push(alternate)
                .map_err(|_| Error::TooManyAlternates { src })?;
        }
        Ok(())
    }

    /// Removes an alternate spelling.
    pub fn remove(&mut self, src: char, dst: &str) {
        if let Entry::Occupied(mut occupied) = self.0.entry(src) {
            occupied.get_mut().retain(|v| v.as_str() != dst);
            if occupied.get().is_empty() {
                occupied.remove();
            }
        }
    }

    /// Regex source matching one character or any of its alternates.
    fn char_pattern(&self, c: char) -> String {
        let variants = match self.get(c) {
            Some(variants) if !variants.is_empty() => variants,
            _ => return regex::escape(c.encode_utf8(&mut [0; 4])),
        };

        let mut buf = [0; 4];
        let own: &str = c.encode_utf8(&mut buf);
        let all = std::iter::once(own).chain(variants.iter().map(|v| v.as_str()));

        if variants.iter().all(|v| v.chars().count() == 1) {
            format!("[{}]", all.map(regex::escape).collect::<String>())
        } else {
            format!("(?:{})", all.map(regex::escape).collect::<Vec<_>>().join("|"))
        }
    }

    /// Regex source matching `word` with every character expanded to its alternates.
    pub fn pattern(&self, word: &str) -> String {
        word.to_lowercase()
            .chars()
            .map(|c| self.char_pattern(c))
            .collect()
    }
}

/// An orthographic evasion class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variation {
    /// The word as written.
    Exact,
    /// Letters replaced by look-alike digits or symbols, like `4nj1ng`.
    LeetSpeak,
    /// Indonesian spelling alternations, like `kapir` for `kafir`.
    Regional,
    /// Characters separated by spaces or punctuation, like `a-n-j-i-n-g`.
    Split,
    /// Both of the above at once, like `4 n j 1 n g`.
    SplitLeetSpeak,
    /// Inner letters hidden behind [`MASK`] characters, like `a****g` or `b*bi`. The first and
    /// last letters stay, so words shorter than 3 characters can't be masked.
    Masked,
}

impl Variation {
    pub(crate) const ALL: [Self; 6] = [
        Self::Exact,
        Self::LeetSpeak,
        Self::Regional,
        Self::Split,
        Self::SplitLeetSpeak,
        Self::Masked,
    ];

    /// Split variations are never wrapped in word boundaries, since separators delimit them.
    pub fn is_split(self) -> bool {
        matches!(self, Self::Split | Self::SplitLeetSpeak)
    }
}

/// Produces regex sources for words under a [`Variation`].
#[derive(Clone, Debug)]
pub struct PatternGenerator {
    leet_speak: Substitutions,
    regional: Substitutions,
}

impl Default for PatternGenerator {
    fn default() -> Self {
        Self::new(Substitutions::leet_speak(), Substitutions::regional())
    }
}

impl PatternGenerator {
    pub fn new(leet_speak: Substitutions, regional: Substitutions) -> Self {
        Self {
            leet_speak,
            regional,
        }
    }

    pub fn leet_speak(&self) -> &Substitutions {
        &self.leet_speak
    }

    /// The regex source (case sensitivity not included) for `word`.
    ///
    /// `whole_word` wraps the pattern in `\b` unless the variation is a split variation.
    ///
    /// ```
    /// use saring::{PatternGenerator, Variation};
    ///
    /// let generator = PatternGenerator::default();
    /// assert_eq!(generator.pattern("babi", Variation::LeetSpeak, true), r"\b[b86][a4@][b86][i1!\|]\b");
    /// assert_eq!(generator.pattern("asu", Variation::Split, true), r"a[\s\-._*+]?s[\s\-._*+]?u");
    /// assert_eq!(generator.pattern("asu", Variation::Masked, false), r"a(?:s|[*@#\-_.!?])u");
    /// ```
    pub fn pattern(&self, word: &str, variation: Variation, whole_word: bool) -> String {
        let word = word.to_lowercase();
        let pattern = match variation {
            Variation::Exact => regex::escape(&word),
            Variation::LeetSpeak => self.leet_speak.pattern(&word),
            Variation::Regional => self.regional.pattern(&word),
            Variation::Split => word
                .chars()
                .map(|c| regex::escape(c.encode_utf8(&mut [0; 4])))
                .collect::<Vec<_>>()
                .join(SPLIT_SEPARATOR),
            Variation::SplitLeetSpeak => word
                .chars()
                .map(|c| self.leet_speak.char_pattern(c))
                .collect::<Vec<_>>()
                .join(SPLIT_SEPARATOR),
            Variation::Masked => Self::masked(&word),
        };

        if whole_word && !variation.is_split() {
            format!(r"\b{}\b", pattern)
        } else {
            pattern
        }
    }

    fn masked(word: &str) -> String {
        let chars: Vec<char> = word.chars().collect();
        let escape = |c: char| regex::escape(c.encode_utf8(&mut [0; 4]));
        match chars.as_slice() {
            [first, inner @ .., last] if !inner.is_empty() => {
                let mut pattern = escape(*first);
                for &c in inner {
                    pattern.push_str(&format!("(?:{}|{})", escape(c), MASK));
                }
                pattern.push_str(&escape(*last));
                pattern
            }
            _ => regex::escape(word),
        }
    }

    /// Compiles [`Self::pattern`] case-insensitively.
    pub fn regex(
        &self,
        word: &str,
        variation: Variation,
        whole_word: bool,
    ) -> Result<Regex, regex::Error> {
        Regex::new(&format!("(?i){}", self.pattern(word, variation, whole_word)))
    }
}

/// Compiled patterns for many words under one variation.
///
/// A [`RegexSet`] finds which words occur with one pass; only those are then located.
#[derive(Debug)]
pub(crate) struct VariantIndex {
    set: Option<RegexSet>,
    /// (caller-supplied key, compiled pattern).
    regexes: Vec<(usize, Regex)>,
}

impl VariantIndex {
    pub fn new<'a>(
        generator: &PatternGenerator,
        words: impl IntoIterator<Item = (usize, &'a str)>,
        variation: Variation,
        whole_word: bool,
    ) -> Self {
        let mut sources = Vec::new();
        let mut regexes = Vec::new();

        for (key, word) in words {
            let source = format!("(?i){}", generator.pattern(word, variation, whole_word));
            match Regex::new(&source) {
                Ok(regex) => {
                    sources.push(source);
                    regexes.push((key, regex));
                }
                Err(e) => log::warn!("skipping {:?} pattern for {:?}: {}", variation, word, e),
            }
        }

        let set = match RegexSet::new(&sources) {
            Ok(set) => Some(set),
            Err(e) => {
                log::warn!("{:?} patterns scanned one by one: {}", variation, e);
                None
            }
        };

        log::debug!(
            "compiled {} {:?} patterns (whole_word = {})",
            regexes.len(),
            variation,
            whole_word
        );

        Self { set, regexes }
    }

    /// Every match of every word whose key satisfies `keep`, grouped by word in insertion order.
    pub fn find<'t>(&self, text: &'t str, keep: impl Fn(usize) -> bool) -> Vec<(usize, Match<'t>)> {
        let candidates: Vec<usize> = match &self.set {
            Some(set) => set.matches(text).into_iter().collect(),
            None => (0..self.regexes.len()).collect(),
        };

        let mut ret = Vec::new();
        for idx in candidates {
            let (key, regex) = &self.regexes[idx];
            if keep(*key) {
                ret.extend(regex.find_iter(text).map(|m| (*key, m)));
            }
        }
        ret
    }
}
