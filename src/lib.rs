use lazy_static::lazy_static;
use rustc_hash::{FxHashMap, FxHashSet};

mod automaton;
mod char_map;
mod error;
mod lexicon;
mod matcher;
mod options;
mod text;
mod variant;

#[cfg(feature = "analysis")]
mod analysis;
#[cfg(feature = "censor")]
mod censor;
#[cfg(feature = "similarity")]
mod similarity;

pub use automaton::{Automaton, Hit, PatternId};
pub use error::{Error, Result};
pub use lexicon::{Category, Lexicon, LexiconEntry, Region};
pub use matcher::{
    calculate_severity, find_categories, find_regions, MatchOutcome, MatchRecord, Matcher,
    Occurrence,
};
pub use options::{Options, Preset};
pub use text::{normalize_text, split_into_sentences, to_leet_speak};
pub use variant::{PatternGenerator, Substitutions, Variation, MASK, SPLIT_SEPARATOR};

#[cfg(feature = "analysis")]
pub use analysis::{Analysis, BatchSummary, ContextMatch, SentenceAnalysis};
#[cfg(feature = "censor")]
pub use censor::{censor_word, Censor, CensorStr, FilterResult, Replacement, GRAWLIX};
#[cfg(feature = "similarity")]
pub use similarity::{
    find_by_levenshtein_distance, find_by_similarity, find_most_similar,
    find_most_similar_with_levenshtein, levenshtein_distance, string_similarity, SimilarWord,
};

pub(crate) type Map<K, V> = FxHashMap<K, V>;
pub(crate) type Set<T> = FxHashSet<T>;

lazy_static! {
    /// Built on first use from the bundled lexicon, then shared by the free functions below.
    pub(crate) static ref MATCHER: Matcher = Matcher::default();
}

/// Canonical words found in text by the default [`Matcher`]. See [`Matcher::find_profanity`].
///
/// ```
/// use saring::Options;
///
/// assert_eq!(saring::find_profanity("Dasar 4nj1ng!", &Options::default()), vec!["anjing"]);
/// ```
pub fn find_profanity(text: &str, options: &Options) -> Vec<String> {
    MATCHER.find_profanity(text, options)
}

/// See [`Matcher::find_profanity_detailed`].
pub fn find_profanity_detailed(text: &str, options: &Options) -> MatchOutcome {
    MATCHER.find_profanity_detailed(text, options)
}

/// See [`Matcher::find_profanity_with_metadata`].
pub fn find_profanity_with_metadata(text: &str, options: &Options) -> Vec<LexiconEntry> {
    MATCHER.find_profanity_with_metadata(text, options)
}

/// See [`Matcher::is_profane`].
pub fn is_profane(text: &str, options: &Options) -> bool {
    MATCHER.is_profane(text, options)
}

/// Censors text with the default [`Matcher`], reporting each replacement.
#[cfg(feature = "censor")]
pub fn filter_profanity(text: &str, options: &Options) -> FilterResult {
    Censor::from_str(text)
        .with_options(options.clone())
        .censor_and_analyze()
}

/// See [`Matcher::analyze`].
#[cfg(feature = "analysis")]
pub fn analyze(text: &str, options: &Options) -> Analysis {
    MATCHER.analyze(text, options)
}

/// See [`Matcher::batch_analyze`].
#[cfg(feature = "analysis")]
pub fn batch_analyze<S: AsRef<str> + Sync>(texts: &[S], options: &Options) -> BatchSummary {
    MATCHER.batch_analyze(texts, options)
}

/// See [`Matcher::analyze_by_sentence`].
#[cfg(feature = "analysis")]
pub fn analyze_by_sentence(text: &str, options: &Options) -> Vec<SentenceAnalysis> {
    MATCHER.analyze_by_sentence(text, options)
}

/// See [`Matcher::analyze_with_context`].
#[cfg(feature = "analysis")]
pub fn analyze_with_context(text: &str, window: usize, options: &Options) -> Vec<ContextMatch> {
    MATCHER.analyze_with_context(text, window, options)
}

#[cfg(test)]
mod tests {
    use crate::{
        find_profanity, find_profanity_detailed, find_profanity_with_metadata, is_profane,
        Category, Options, Preset, Region,
    };
    use rand::{thread_rng, Rng};

    const SAMPLES: [&str; 8] = [
        "Selamat pagi, apa kabar?",
        "Dasar anjing!",
        "jancok anjing kontol",
        "dasar a n j i n g",
        "ANJ1NG lo",
        "pantai indah sekali",
        "dasar kavir",
        "",
    ];

    #[test]
    fn facade() {
        let options = Options::default();
        assert_eq!(find_profanity("Dasar anjing!", &options), vec!["anjing"]);
        assert_eq!(
            find_profanity("jancok anjing kontol", &options),
            vec!["jancok", "anjing", "kontol"]
        );
        assert!(find_profanity("Selamat pagi, apa kabar?", &options).is_empty());

        let outcome = find_profanity_detailed("anjay", &options);
        assert_eq!(outcome.triggers("anjing"), Some(&["anjay".to_owned()][..]));

        let entries = find_profanity_with_metadata("kontol", &options);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].category, Category::Sexual);
        assert_eq!(entries[0].region, Region::General);
    }

    #[test]
    fn is_profane_agrees() {
        let mut options = Options::default();
        options
            .with_detect_split(true)
            .with_indonesian_variation(true);
        for sample in SAMPLES {
            assert_eq!(
                is_profane(sample, &options),
                !find_profanity(sample, &options).is_empty(),
                "{:?}",
                sample
            );
        }
    }

    #[test]
    fn presets() {
        for preset in Preset::ALL {
            let options = Options::from(preset);
            for sample in SAMPLES {
                let found = find_profanity(sample, &options);
                for entry in find_profanity_with_metadata(sample, &options) {
                    assert!(options.passes_filters(&entry), "{:?} {:?}", preset, entry);
                    assert!(found.contains(&entry.word));
                }
            }
        }

        let strict = Options::from(Preset::Strict);
        assert_eq!(find_profanity("pantai", &strict), vec!["tai"]);
        let light = Options::from(Preset::Light);
        assert!(find_profanity("Dasar anjing!", &light).is_empty());
        assert_eq!(find_profanity("dasar kontol", &light), vec!["kontol"]);
    }

    #[test]
    #[cfg(feature = "censor")]
    fn filter() {
        let result = crate::filter_profanity("Dasar anjing!", &Options::default());
        assert_eq!(result.filtered, "Dasar ******!");
        assert_eq!(result.censored, 1);
    }

    #[test]
    #[cfg(feature = "analysis")]
    fn analysis() {
        let options = Options::default();
        assert!(crate::analyze("Dasar anjing!", &options).has_profanity);
        assert_eq!(crate::analyze_by_sentence("Halo. Dasar anjing!", &options).len(), 2);
        assert_eq!(crate::analyze_with_context("Dasar anjing!", 1, &options).len(), 1);
        assert_eq!(
            crate::batch_analyze(&["Dasar anjing!", "Halo"], &options).profane_texts,
            1
        );
    }

    #[test]
    fn random_input() {
        let mut rng = thread_rng();
        let mut options = Options::default();
        options
            .with_detect_split(true)
            .with_indonesian_variation(true)
            .with_check_substring(true)
            .with_detect_similarity(rng.gen());

        for _ in 0..100 {
            let len = rng.gen_range(0..40);
            let text: String = (0..len)
                .map(|_| {
                    if rng.gen_bool(0.7) {
                        rng.gen_range('a'..='z')
                    } else {
                        rng.gen()
                    }
                })
                .collect();
            let outcome = find_profanity_detailed(&text, &options);
            for (word, trigger) in outcome.all_triggers() {
                assert!(!trigger.is_empty(), "{:?} -> {:?}", text, word);
            }
        }
    }
}

use doc_comment::doctest;
doctest!("../README.md");
