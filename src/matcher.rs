use crate::automaton::Automaton;
use crate::lexicon::{Category, Lexicon, LexiconEntry, Region};
use crate::options::Options;
#[cfg(feature = "similarity")]
use crate::similarity::{self, SimilarWord};
use crate::text::{is_whole_word, is_word_char, normalize_text, Normalized};
use crate::variant::{is_mask_char, is_split_separator, PatternGenerator, Substitutions, VariantIndex, Variation};
#[cfg(feature = "similarity")]
use crate::Map;
use crate::Set;
use regex::Regex;
use std::cmp::Reverse;
use std::ops::Range;
use std::sync::OnceLock;

const VARIANT_SLOTS: usize = Variation::ALL.len() * 2;

/// Finds lexicon words in text, by exact match, orthographic variants and similarity.
///
/// Expensive structures (the exact-match automaton, compiled variant patterns) are built once
/// per `Matcher` and shared by every call. Calls only read them, so a `Matcher` can be shared
/// between threads.
#[derive(Debug)]
pub struct Matcher {
    lexicon: Lexicon,
    generator: PatternGenerator,
    /// Canonical words first, then aliases.
    terms: Vec<Term>,
    /// Over normalized spellings of every term, regardless of any filter.
    automaton: Automaton,
    /// Automaton pattern id -> terms with that normalized spelling.
    pattern_terms: Vec<Vec<usize>>,
    /// Compiled on first use. See [`Self::variant_index`].
    variants: [OnceLock<VariantIndex>; VARIANT_SLOTS],
}

/// A spelling that resolves to a lexicon entry.
#[derive(Clone, Debug)]
struct Term {
    /// Lowercase.
    spelling: String,
    /// Index of the entry in the lexicon.
    entry: usize,
}

/// A canonical word and the text that gave it away.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchRecord {
    /// Canonical word, never an alias.
    pub word: String,
    /// Distinct substrings of the input (or, for similarity matches, lowercased tokens) that
    /// were detected as `word`, in order of discovery.
    pub triggers: Vec<String>,
}

/// Where a canonical word was written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence {
    pub word: String,
    /// Byte range in the text.
    pub range: Range<usize>,
}

/// Everything found by one call to [`Matcher::find_profanity_detailed`].
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    records: Vec<MatchRecord>,
    #[cfg(feature = "similarity")]
    similar_words: Vec<SimilarWord>,
}

impl MatchOutcome {
    /// Canonical words, in order of discovery.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.word.as_str())
    }

    pub fn into_words(self) -> Vec<String> {
        self.records.into_iter().map(|r| r.word).collect()
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// What triggered a canonical word, if it was found.
    pub fn triggers(&self, word: &str) -> Option<&[String]> {
        self.records
            .iter()
            .find(|r| r.word == word)
            .map(|r| r.triggers.as_slice())
    }

    /// Every distinct trigger of every word.
    pub fn all_triggers(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.records
            .iter()
            .flat_map(|r| r.triggers.iter().map(move |t| (r.word.as_str(), t.as_str())))
    }

    /// Tokens that were accepted as misspellings.
    #[cfg(feature = "similarity")]
    pub fn similar_words(&self) -> &[SimilarWord] {
        &self.similar_words
    }

    /// Locates every trigger in `text`, which must be the text that was matched, in order of
    /// position.
    ///
    /// Longer triggers win over shorter ones that overlap them, and spellings on the whitelist
    /// are left alone.
    pub fn occurrences(&self, text: &str, options: &Options) -> Vec<Occurrence> {
        let mut triggers: Vec<(&str, &str)> = self.all_triggers().collect();
        triggers.sort_by_key(|(_, trigger)| Reverse(trigger.chars().count()));

        let whitelist = options.whitelist_set();
        let mut ret: Vec<Occurrence> = Vec::new();
        for (word, trigger) in triggers {
            let regex = match surface_regex(trigger, !options.check_substring()) {
                Ok(regex) => regex,
                Err(e) => {
                    log::warn!("cannot locate {:?}: {}", trigger, e);
                    continue;
                }
            };
            for m in regex.find_iter(text) {
                let range = m.range();
                if whitelist.contains(&m.as_str().to_lowercase())
                    || ret
                        .iter()
                        .any(|o| o.range.start < range.end && range.start < o.range.end)
                {
                    continue;
                }
                ret.push(Occurrence {
                    word: word.to_owned(),
                    range,
                });
            }
        }
        ret.sort_by_key(|o| o.range.start);
        ret
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn record(&mut self, word: &str, trigger: &str) {
        let idx = match self.records.iter().position(|r| r.word == word) {
            Some(idx) => idx,
            None => {
                self.records.push(MatchRecord {
                    word: word.to_owned(),
                    triggers: Vec::new(),
                });
                self.records.len() - 1
            }
        };
        let triggers = &mut self.records[idx].triggers;
        if !triggers.iter().any(|t| t == trigger) {
            triggers.push(trigger.to_owned());
        }
    }
}

/// Case-insensitive pattern for a literal surface form. Word boundaries are only asserted next
/// to word characters, where they mean something.
fn surface_regex(surface: &str, whole_word: bool) -> Result<Regex, regex::Error> {
    let bound = |c: Option<char>| whole_word && c.map_or(false, is_word_char);
    let mut pattern = String::from("(?i)");
    if bound(surface.chars().next()) {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(surface));
    if bound(surface.chars().next_back()) {
        pattern.push_str(r"\b");
    }
    Regex::new(&pattern)
}

/// Per-call state. Filters are checked against every match, since the automaton and variant
/// patterns are shared by all calls and cover the whole lexicon.
struct Scan<'a> {
    matcher: &'a Matcher,
    options: &'a Options,
    whitelist: Set<String>,
    /// False for word lists, which ignore category, region and severity.
    filtered: bool,
    outcome: MatchOutcome,
}

impl Scan<'_> {
    /// Whether matches of a term may be reported, before considering what was matched.
    fn admits(&self, term: usize) -> bool {
        let term = &self.matcher.terms[term];
        let entry = &self.matcher.lexicon.entries()[term.entry];
        (!self.filtered || self.options.passes_filters(entry))
            && !self.whitelist.contains(&entry.word)
            && !self.whitelist.contains(&term.spelling)
    }

    fn accept(&mut self, term: usize, surface: &str, strategy: &str) -> bool {
        if !self.admits(term)
            || self.whitelist.contains(&surface.to_lowercase())
            || self.whitelist.contains(&normalize_text(surface))
        {
            return false;
        }
        let word = &self.matcher.lexicon.entries()[self.matcher.terms[term].entry].word;
        log::trace!("{} match {:?} -> {:?}", strategy, surface, word);
        self.outcome.record(word, surface);
        true
    }
}

impl Default for Matcher {
    /// Matches the bundled lexicon with the default substitution tables.
    fn default() -> Self {
        Self::new(Lexicon::default())
    }
}

impl Matcher {
    pub fn new(lexicon: Lexicon) -> Self {
        Self::with_generator(lexicon, PatternGenerator::default())
    }

    /// Uses custom leetspeak and regional substitution tables.
    pub fn with_substitutions(
        lexicon: Lexicon,
        leet_speak: Substitutions,
        regional: Substitutions,
    ) -> Self {
        Self::with_generator(lexicon, PatternGenerator::new(leet_speak, regional))
    }

    fn with_generator(lexicon: Lexicon, generator: PatternGenerator) -> Self {
        let mut terms: Vec<Term> = lexicon
            .entries()
            .iter()
            .enumerate()
            .map(|(entry, e)| Term {
                spelling: e.word.clone(),
                entry,
            })
            .collect();
        for (entry, e) in lexicon.entries().iter().enumerate() {
            for alias in &e.aliases {
                // Skip aliases that were reassigned to a later entry.
                if lexicon.alias_owner(alias) == Some(entry) {
                    terms.push(Term {
                        spelling: alias.clone(),
                        entry,
                    });
                }
            }
        }

        let mut automaton = Automaton::new();
        let mut pattern_terms: Vec<Vec<usize>> = Vec::new();
        for (idx, term) in terms.iter().enumerate() {
            match automaton.add_pattern(&normalize_text(&term.spelling)) {
                Ok(id) => {
                    if id == pattern_terms.len() {
                        pattern_terms.push(Vec::new());
                    }
                    pattern_terms[id].push(idx);
                }
                Err(e) => log::debug!("no exact matching for {:?}: {}", term.spelling, e),
            }
        }
        automaton.build();

        log::debug!(
            "matcher over {} entries, {} terms",
            lexicon.len(),
            terms.len()
        );

        Self {
            lexicon,
            generator,
            terms,
            automaton,
            pattern_terms,
            variants: Default::default(),
        }
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Patterns for every term, compiled on first use.
    fn variant_index(&self, variation: Variation, whole_word: bool) -> &VariantIndex {
        let slot = variation as usize * 2 + whole_word as usize;
        self.variants[slot].get_or_init(|| {
            VariantIndex::new(
                &self.generator,
                self.terms
                    .iter()
                    .enumerate()
                    .map(|(idx, term)| (idx, term.spelling.as_str())),
                variation,
                whole_word,
            )
        })
    }

    /// Canonical words found in text, without duplicates, in order of discovery.
    ///
    /// ```
    /// use saring::{Matcher, Options};
    ///
    /// let matcher = Matcher::default();
    /// assert_eq!(matcher.find_profanity("Dasar anjing!", &Options::default()), vec!["anjing"]);
    /// ```
    pub fn find_profanity(&self, text: &str, options: &Options) -> Vec<String> {
        self.find_profanity_detailed(text, options).into_words()
    }

    /// Like [`Self::find_profanity`], but also reports what triggered each word.
    pub fn find_profanity_detailed(&self, text: &str, options: &Options) -> MatchOutcome {
        match options.word_list() {
            Some(words) => Self::ad_hoc(words, &self.generator).scan(text, options, false),
            None => self.scan(text, options, true),
        }
    }

    /// Lexicon entries of the words found in text. Words not in the lexicon (from a custom word
    /// list) are omitted.
    pub fn find_profanity_with_metadata(&self, text: &str, options: &Options) -> Vec<LexiconEntry> {
        self.find_profanity(text, options)
            .iter()
            .filter_map(|word| self.lexicon.resolve(word).cloned())
            .collect()
    }

    pub fn is_profane(&self, text: &str, options: &Options) -> bool {
        !self.find_profanity_detailed(text, options).is_empty()
    }

    /// A throwaway matcher for a custom word list. Only its words are read, so the entries
    /// carry placeholder metadata.
    fn ad_hoc(words: &[String], generator: &PatternGenerator) -> Self {
        let lexicon = words
            .iter()
            .map(|word| LexiconEntry::new(word, Category::Profanity, Region::General, 1.0))
            .collect();
        Self::with_generator(lexicon, generator.clone())
    }

    fn variations(options: &Options) -> Vec<Variation> {
        let mut ret = Vec::with_capacity(5);
        if options.detect_leet_speak() {
            ret.push(Variation::LeetSpeak);
        }
        if options.indonesian_variation() {
            ret.push(Variation::Regional);
        }
        if options.detect_split() {
            ret.push(Variation::Split);
            if options.detect_leet_speak() {
                ret.push(Variation::SplitLeetSpeak);
            }
        }
        if options.detect_masked() {
            ret.push(Variation::Masked);
        }
        ret
    }

    fn scan(&self, text: &str, options: &Options, filtered: bool) -> MatchOutcome {
        let mut scan = Scan {
            matcher: self,
            options,
            whitelist: options.whitelist_set(),
            filtered,
            outcome: MatchOutcome::default(),
        };
        let whole_word = !options.check_substring();
        let normalized = Normalized::new(text);
        let variations = Self::variations(options);
        let fuzzy = cfg!(feature = "similarity") && options.detect_similarity();

        if variations.is_empty() && !fuzzy && !self.automaton.contains_any(normalized.as_str()) {
            return scan.outcome;
        }

        for hit in self.automaton.find_overlapping(normalized.as_str()) {
            let range = match normalized.source_range(hit.range) {
                Some(range) => range,
                None => continue,
            };
            // Normalization drops punctuation, so boundaries are judged in the input.
            if whole_word && !is_whole_word(text, range.clone()) {
                continue;
            }
            let surface = &text[range];
            for &term in &self.pattern_terms[hit.pattern] {
                scan.accept(term, surface, "exact");
            }
        }

        for variation in variations {
            let split = variation.is_split();
            let index = self.variant_index(variation, whole_word && !split);
            for (term, m) in index.find(text, |term| scan.admits(term)) {
                // Contiguous spellings are the exact pass's business, and a split word still
                // has to stand on its own.
                if split
                    && (!m.as_str().chars().any(is_split_separator)
                        || (whole_word && !is_whole_word(text, m.range())))
                {
                    continue;
                }
                // Unmasked spellings are left to the other passes.
                if variation == Variation::Masked && !m.as_str().chars().any(is_mask_char) {
                    continue;
                }
                let strategy = match variation {
                    Variation::Exact => "exact",
                    Variation::LeetSpeak => "leet_speak",
                    Variation::Regional => "regional",
                    Variation::Split => "split",
                    Variation::SplitLeetSpeak => "split_leet_speak",
                    Variation::Masked => "masked",
                };
                scan.accept(term, m.as_str(), strategy);
            }
        }

        #[cfg(feature = "similarity")]
        self.scan_similar(text, &mut scan);

        scan.outcome
    }

    #[cfg(feature = "similarity")]
    fn scan_similar(&self, text: &str, scan: &mut Scan<'_>) {
        if !scan.options.detect_similarity() {
            return;
        }
        let by_spelling: Map<&str, usize> = self
            .terms
            .iter()
            .enumerate()
            .filter(|&(idx, _)| scan.admits(idx))
            .map(|(idx, term)| (term.spelling.as_str(), idx))
            .collect();
        // Terms in a stable order, so ties go to canonical words.
        let mut candidates: Vec<(&str, usize)> = by_spelling.iter().map(|(&s, &i)| (s, i)).collect();
        candidates.sort_unstable_by_key(|&(_, idx)| idx);
        let words = candidates.iter().map(|&(spelling, _)| spelling);

        let options = scan.options;
        let found = if options.use_levenshtein() {
            similarity::find_by_levenshtein_distance(
                text,
                words,
                options.similarity_threshold(),
                options.max_levenshtein_distance(),
            )
        } else {
            similarity::find_by_similarity(text, words, options.similarity_threshold())
        };

        for similar in found {
            if let Some(&term) = by_spelling.get(similar.original.as_str()) {
                if scan.accept(term, &similar.word, "similarity") {
                    scan.outcome.similar_words.push(similar);
                }
            }
        }
    }
}

/// Distinct categories, in order of first appearance.
pub fn find_categories(entries: &[LexiconEntry]) -> Vec<Category> {
    let mut ret = Vec::new();
    for entry in entries {
        if !ret.contains(&entry.category) {
            ret.push(entry.category);
        }
    }
    ret
}

/// Distinct regions, in order of first appearance.
pub fn find_regions(entries: &[LexiconEntry]) -> Vec<Region> {
    let mut ret = Vec::new();
    for entry in entries {
        if !ret.contains(&entry.region) {
            ret.push(entry.region);
        }
    }
    ret
}

/// Overall severity of matched entries, in `[0, 1]`.
///
/// The average of each entry's severity weighted by [`Category::weight`] contributes 70%, and
/// the number of entries (saturating at 10) contributes 30%. No entries means 0.
pub fn calculate_severity(entries: &[LexiconEntry]) -> f32 {
    if entries.is_empty() {
        return 0.0;
    }
    let average = entries
        .iter()
        .map(|e| e.severity * e.category.weight())
        .sum::<f32>()
        / entries.len() as f32;
    let count = (entries.len() as f32 / 10.0).min(1.0);
    (0.7 * average + 0.3 * count).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::{calculate_severity, find_categories, find_regions, Matcher};
    use crate::{Category, Lexicon, LexiconEntry, Options, Region, Substitutions};
    use lazy_static::lazy_static;
    use regex::Regex;

    lazy_static! {
        static ref MATCHER: Matcher = Matcher::default();
    }

    fn find(text: &str, configure: impl FnOnce(&mut Options)) -> Vec<String> {
        let mut options = Options::default();
        configure(&mut options);
        MATCHER.find_profanity(text, &options)
    }

    #[test]
    fn exact() {
        assert_eq!(find("Dasar anjing!", |_| {}), vec!["anjing"]);
        assert_eq!(find("Dasar ANJÍNG!", |_| {}), vec!["anjing"]);
        assert!(find("Selamat pagi, apa kabar?", |_| {}).is_empty());
        assert!(find("", |_| {}).is_empty());
    }

    #[test]
    fn leet_speak() {
        assert!(find("Dasar 4nj1ng!", |_| {}).contains(&"anjing".to_owned()));
        assert!(find("Dasar 4nj1ng!", |o| {
            o.with_detect_leet_speak(false);
        })
        .is_empty());
    }

    #[test]
    fn split() {
        let found = find("a-n-j-i-n-g", |o| {
            o.with_detect_split(true);
        });
        assert!(found.contains(&"anjing".to_owned()));

        let found = find("dasar a n j i n g", |o| {
            o.with_detect_split(true);
        });
        assert!(found.contains(&"anjing".to_owned()));

        let found = find("dasar 4 n j 1 n g", |o| {
            o.with_detect_split(true);
        });
        assert!(found.contains(&"anjing".to_owned()));

        assert!(find("dasar a n j i n g", |_| {}).is_empty());
    }

    #[test]
    fn split_stands_alone() {
        // "s u" spans two words, so it isn't the split alias of "asu".
        let found = find("kasus untuk", |o| {
            o.with_detect_split(true).with_detect_leet_speak(false);
        });
        assert!(found.is_empty(), "{:?}", found);
    }

    #[test]
    fn masked() {
        let masked = |text: &str| {
            find(text, |o| {
                o.with_detect_masked(true);
            })
        };
        assert!(masked("dasar a****g!").contains(&"anjing".to_owned()));
        assert!(masked("dasar b*bi").contains(&"babi".to_owned()));
        assert!(!masked("a**g").contains(&"anjing".to_owned()));
        assert!(masked("anjingan").is_empty());

        let outcome = MATCHER.find_profanity_detailed("dasar a****g!", &{
            let mut options = Options::default();
            options.with_detect_masked(true);
            options
        });
        assert_eq!(outcome.triggers("anjing"), Some(&["a****g".to_owned()][..]));

        assert!(find("dasar a****g!", |_| {}).is_empty());
    }

    #[test]
    fn regional() {
        let found = find("dasar kavir", |o| {
            o.with_indonesian_variation(true);
        });
        assert_eq!(found, vec!["kafir"]);
        assert!(find("dasar kavir", |_| {}).is_empty());
    }

    #[test]
    fn whitelist() {
        assert!(find("anjing", |o| {
            o.with_whitelist(["anjing"]);
        })
        .is_empty());

        // Whitelisting a canonical word covers every way of writing it.
        let found = find("anjing 4nj1ng a n j i n g anjeng anjay", |o| {
            o.with_whitelist(["ANJING"])
                .with_detect_split(true)
                .with_indonesian_variation(true)
                .with_detect_similarity(true);
        });
        assert!(!found.contains(&"anjing".to_owned()), "{:?}", found);

        // Whitelisting an alias only covers the alias.
        assert!(find("dasar anjay", |o| {
            o.with_whitelist(["anjay"]);
        })
        .is_empty());
        assert_eq!(
            find("dasar anjay dan anjing", |o| {
                o.with_whitelist(["anjay"]);
            }),
            vec!["anjing"]
        );
    }

    #[test]
    fn severity() {
        assert_eq!(calculate_severity(&[]), 0.0);

        let options = Options::default();
        let anjing = MATCHER.find_profanity_with_metadata("anjing", &options);
        assert_eq!(anjing.len(), 1);
        let severity = calculate_severity(&anjing);
        assert!(severity > 0.0 && severity <= 1.0);
        // 0.7 * (0.7 * 0.7) + 0.3 * 0.1
        assert!((severity - 0.373).abs() < 1e-4, "{}", severity);

        let many: Vec<LexiconEntry> = (0..20)
            .map(|i| LexiconEntry::new(&format!("w{}", i), Category::Sexual, Region::General, 1.0))
            .collect();
        assert!((calculate_severity(&many) - (0.7 * 0.9 + 0.3)).abs() < 1e-4);
    }

    #[test]
    fn regions() {
        let found = find("jancok dan anjing", |o| {
            o.with_regions([Region::Jawa]);
        });
        assert!(found.contains(&"jancok".to_owned()));
        assert!(!found.contains(&"anjing".to_owned()));
    }

    #[test]
    fn category_filter_covers_aliases() {
        assert_eq!(find("dasar anjay", |_| {}), vec!["anjing"]);

        let text = "anjay 4nj4y kontol jancok bangsat a n j a y anjeng";
        let found = find(text, |o| {
            o.with_categories([Category::Sexual])
                .with_detect_split(true)
                .with_indonesian_variation(true)
                .with_detect_similarity(true);
        });
        assert!(!found.is_empty());
        for word in found {
            assert_eq!(
                MATCHER.lexicon().get(&word).unwrap().category,
                Category::Sexual,
                "{}",
                word
            );
        }
    }

    #[test]
    fn severity_threshold() {
        let found = find("anjing kontol", |o| {
            o.with_severity_threshold(0.85);
        });
        assert!(found.contains(&"kontol".to_owned()));
        assert!(!found.contains(&"anjing".to_owned()));
    }

    #[test]
    fn provenance() {
        let options = Options::default();
        let outcome = MATCHER.find_profanity_detailed("Dasar anjay, ANJING, 4nj1ng!", &options);
        assert_eq!(outcome.words().collect::<Vec<_>>(), vec!["anjing"]);
        assert_eq!(
            outcome.triggers("anjing").unwrap(),
            &["anjay".to_owned(), "ANJING".to_owned(), "4nj1ng".to_owned()]
        );
        assert_eq!(outcome.triggers("babi"), None);
        assert_eq!(outcome.all_triggers().count(), 3);
    }

    #[test]
    fn occurrences() {
        let mut options = Options::default();
        options.with_detect_split(true);
        let text = "a n j i n g, ANJING dan anjingan";
        let outcome = MATCHER.find_profanity_detailed(text, &options);
        let occurrences = outcome.occurrences(text, &options);
        let found: Vec<(&str, &str)> = occurrences
            .iter()
            .map(|o| (o.word.as_str(), &text[o.range.clone()]))
            .collect();
        assert_eq!(
            found,
            vec![("anjing", "a n j i n g"), ("anjing", "ANJING")]
        );
    }

    #[test]
    fn provenance_maps_to_input() {
        let mut options = Options::default();
        options.with_detect_leet_speak(false);
        let outcome = MATCHER.find_profanity_detailed("Dasar anj-ing!", &options);
        assert_eq!(outcome.triggers("anjing").unwrap(), &["anj-ing".to_owned()]);
    }

    #[test]
    fn substring() {
        assert!(find("pantai indah", |_| {}).is_empty());
        assert!(find("pantai indah", |o| {
            o.with_check_substring(true);
        })
        .contains(&"tai".to_owned()));
    }

    #[test]
    fn similarity() {
        assert!(find("dasar anjeng", |_| {}).is_empty());

        for levenshtein in [false, true] {
            let mut options = Options::default();
            options
                .with_detect_similarity(true)
                .with_use_levenshtein(levenshtein);
            let outcome = MATCHER.find_profanity_detailed("dasar anjeng", &options);
            assert_eq!(outcome.triggers("anjing").unwrap(), &["anjeng".to_owned()]);
            assert_eq!(outcome.similar_words().len(), 1);
            assert_eq!(outcome.similar_words()[0].original, "anjing");
            assert_eq!(
                outcome.similar_words()[0].distance.is_some(),
                levenshtein
            );
        }
    }

    #[test]
    fn similarity_unbounded_distance() {
        let found = find("dasar anjeng", |o| {
            o.with_detect_similarity(true)
                .with_use_levenshtein(true)
                .with_max_levenshtein_distance(usize::MAX);
        });
        assert!(found.contains(&"anjing".to_owned()));
    }

    #[test]
    fn word_list() {
        let found = find("kucing nakal dan anjing", |o| {
            o.with_word_list(["Kucing"]);
        });
        assert_eq!(found, vec!["kucing"]);

        let found = find("kucing nakal", |o| {
            o.with_word_list(["kucing"]).with_whitelist(["kucing"]);
        });
        assert!(found.is_empty());

        // Filters don't apply to word lists.
        let found = find("kucing", |o| {
            o.with_word_list(["kucing"]).with_severity_threshold(1.0);
        });
        assert_eq!(found, vec!["kucing"]);

        // Words outside the lexicon have no metadata.
        let mut options = Options::default();
        options.with_word_list(["kucing", "anjing"]);
        let entries = MATCHER.find_profanity_with_metadata("kucing anjing", &options);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].word, "anjing");
    }

    #[test]
    fn idempotent() {
        let mut options = Options::default();
        options
            .with_detect_split(true)
            .with_indonesian_variation(true)
            .with_detect_similarity(true);
        let text = "jancok 4nj1ng b-a-b-i kavir bangsad";
        let first = MATCHER.find_profanity(text, &options);
        assert!(!first.is_empty());
        assert_eq!(MATCHER.find_profanity(text, &options), first);
    }

    #[test]
    fn exact_agrees_with_regex() {
        let mut options = Options::default();
        options.with_detect_leet_speak(false);
        for entry in MATCHER.lexicon().entries() {
            let regex = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&entry.word))).unwrap();
            for text in [
                format!("kata {} lagi", entry.word),
                format!("halo,{}", entry.word),
                format!("{}.babi", entry.word),
                format!("dasar:{}", entry.word),
                format!("({})", entry.word.to_uppercase()),
            ] {
                assert!(regex.is_match(&text));
                assert!(
                    MATCHER.find_profanity(&text, &options).contains(&entry.word),
                    "{:?}",
                    text
                );
            }
        }

        assert_eq!(MATCHER.find_profanity("Halo,anjing", &options), vec!["anjing"]);
        assert_eq!(
            MATCHER.find_profanity("anjing.babi", &options),
            vec!["anjing", "babi"]
        );
        assert!(!MATCHER
            .find_profanity("anjingan", &options)
            .contains(&"anjing".to_owned()));
    }

    #[test]
    fn blank_input() {
        let mut options = Options::default();
        options
            .with_detect_split(true)
            .with_indonesian_variation(true)
            .with_detect_similarity(true);
        for text in ["", "   ", "?! ", "\t", "\n\n", "...", " - "] {
            assert!(MATCHER.find_profanity(text, &Options::default()).is_empty());
            assert!(MATCHER.find_profanity(text, &options).is_empty());
            assert!(!MATCHER.is_profane(text, &options));
        }
    }

    #[test]
    fn regex_metacharacters() {
        let lexicon = Lexicon::new([
            LexiconEntry::new("a+b", Category::Insult, Region::General, 0.5),
            LexiconEntry::new("(x)", Category::Insult, Region::General, 0.5),
        ]);
        let matcher = Matcher::new(lexicon);
        let mut options = Options::default();
        options.with_detect_split(true).with_indonesian_variation(true);
        assert!(matcher.find_profanity("aab", &options).is_empty());
        assert_eq!(matcher.find_profanity("kok a+b", &options), vec!["a+b"]);
    }

    #[test]
    fn custom_substitutions() {
        let lexicon = Lexicon::new([LexiconEntry::new(
            "babi",
            Category::Profanity,
            Region::General,
            0.6,
        )]);
        let mut leet = Substitutions::new();
        leet.insert('i', "y").unwrap();
        let matcher = Matcher::with_substitutions(lexicon, leet, Substitutions::new());
        let options = Options::default();
        assert_eq!(matcher.find_profanity("dasar baby", &options), vec!["babi"]);
        assert!(matcher.find_profanity("dasar b4b1", &options).is_empty());
    }

    #[test]
    fn projections() {
        let entries = MATCHER.find_profanity_with_metadata("jancok anjing kontol", &Options::default());
        assert_eq!(find_categories(&entries), vec![Category::Sexual, Category::Profanity]);
        assert_eq!(find_regions(&entries), vec![Region::Jawa, Region::General]);
        assert!(find_categories(&[]).is_empty());
    }
}
