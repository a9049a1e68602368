use crate::lexicon::LexiconEntry;
use crate::matcher::{Matcher, Occurrence};
use crate::options::Options;
use crate::MATCHER;
use rand::seq::SliceRandom;

/// Characters used when censoring with [`Options::with_use_random_grawlix`].
pub const GRAWLIX: [char; 6] = ['#', '@', '$', '%', '&', '!'];

/// Censor finds profanity with a [`Matcher`] and replaces every way it was written.
///
/// You can also make use of `Censor` via the [`CensorStr`] trait, which allows inline checking
/// and censoring of `&str` with the default matcher and options.
///
/// ```
/// use saring::Censor;
///
/// let censored = Censor::from_str("Dasar 4nj1ng!")
///     .with_full_word_censor(false)
///     .censor();
/// assert_eq!(censored, "Dasar 4****g!");
/// ```
pub struct Censor<'a> {
    matcher: &'a Matcher,
    text: &'a str,
    options: Options,
}

/// What [`Censor::censor_and_analyze`] did.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterResult {
    /// The censored text.
    pub filtered: String,
    /// Number of occurrences replaced.
    pub censored: usize,
    /// In order of appearance.
    pub replacements: Vec<Replacement>,
}

/// One censored occurrence.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Replacement {
    /// As written in the input.
    pub original: String,
    pub censored: String,
    /// The lexicon entry, unless the word came from a custom word list.
    pub metadata: Option<LexiconEntry>,
}

impl<'a> Censor<'a> {
    /// Creates a `Censor` from a `&str` that uses the bundled lexicon.
    pub fn from_str(text: &'a str) -> Self {
        Self::new(&MATCHER, text)
    }

    pub fn new(matcher: &'a Matcher, text: &'a str) -> Self {
        Self {
            matcher,
            text,
            options: Options::default(),
        }
    }

    /// Replaces all options, including those of matching.
    pub fn with_options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self
    }

    /// See [`Options::with_replace_with`].
    pub fn with_replace_with(&mut self, replace_with: char) -> &mut Self {
        self.options.with_replace_with(replace_with);
        self
    }

    /// See [`Options::with_full_word_censor`].
    pub fn with_full_word_censor(&mut self, full_word_censor: bool) -> &mut Self {
        self.options.with_full_word_censor(full_word_censor);
        self
    }

    /// See [`Options::with_use_random_grawlix`].
    pub fn with_use_random_grawlix(&mut self, use_random_grawlix: bool) -> &mut Self {
        self.options.with_use_random_grawlix(use_random_grawlix);
        self
    }

    /// Produces a censored string.
    pub fn censor(&self) -> String {
        self.censor_and_analyze().filtered
    }

    /// Censors, and reports what was censored.
    pub fn censor_and_analyze(&self) -> FilterResult {
        let outcome = self.matcher.find_profanity_detailed(self.text, &self.options);
        if outcome.is_empty() {
            return FilterResult {
                filtered: self.text.to_owned(),
                censored: 0,
                replacements: Vec::new(),
            };
        }

        let occurrences = outcome.occurrences(self.text, &self.options);

        let mut filtered = String::with_capacity(self.text.len());
        let mut replacements = Vec::with_capacity(occurrences.len());
        let mut last = 0;
        for Occurrence { word, range } in occurrences {
            let original = &self.text[range.clone()];
            let censored = self.replacement(original);
            filtered.push_str(&self.text[last..range.start]);
            filtered.push_str(&censored);
            last = range.end;
            replacements.push(Replacement {
                original: original.to_owned(),
                censored,
                metadata: self.matcher.lexicon().resolve(&word).cloned(),
            });
        }
        filtered.push_str(&self.text[last..]);

        FilterResult {
            filtered,
            censored: replacements.len(),
            replacements,
        }
    }

    fn replacement(&self, original: &str) -> String {
        let keep_first_and_last = !self.options.full_word_censor();
        if self.options.use_random_grawlix() {
            let mut rng = rand::thread_rng();
            censor_with(original, keep_first_and_last, || {
                *GRAWLIX.choose(&mut rng).unwrap_or(&'#')
            })
        } else {
            censor_word(original, self.options.replace_with(), keep_first_and_last)
        }
    }
}

fn censor_with(word: &str, keep_first_and_last: bool, mut replacement: impl FnMut() -> char) -> String {
    let len = word.chars().count();
    word.chars()
        .enumerate()
        .map(|(i, c)| {
            if keep_first_and_last && len > 2 && (i == 0 || i == len - 1) {
                c
            } else {
                replacement()
            }
        })
        .collect()
}

/// Replaces every character of `word`, or all but the first and last. Words of two characters
/// or fewer are always fully replaced.
///
/// ```
/// use saring::censor_word;
///
/// assert_eq!(censor_word("anjing", '*', false), "******");
/// assert_eq!(censor_word("anjing", '#', true), "a####g");
/// assert_eq!(censor_word("su", '*', true), "**");
/// ```
pub fn censor_word(word: &str, replacement: char, keep_first_and_last: bool) -> String {
    censor_with(word, keep_first_and_last, || replacement)
}

/// CensorStr makes it easy to sanitize a `String` or `&str` by calling `.censor()`.
pub trait CensorStr: Sized {
    /// The output is a newly allocated, censored string.
    fn censor(self) -> String;

    /// Returns `true` if the text contains profanity.
    fn is_profane(self) -> bool;

    /// Returns `true` if the text **does not** contain profanity.
    fn is_clean(self) -> bool {
        !self.is_profane()
    }
}

impl CensorStr for &str {
    fn censor(self) -> String {
        Censor::from_str(self).censor()
    }

    fn is_profane(self) -> bool {
        MATCHER.is_profane(self, &Options::default())
    }
}
