use crate::lexicon::{Category, LexiconEntry, Region};
use crate::matcher::{calculate_severity, find_categories, find_regions, Matcher, MatchOutcome};
use crate::options::Options;
use crate::similarity::SimilarWord;
use crate::text::split_into_sentences;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// What [`Matcher::analyze`] found in one text.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Analysis {
    pub has_profanity: bool,
    /// Canonical words, in order of discovery.
    pub matches: Vec<String>,
    /// Lexicon entries of `matches`, for those the lexicon knows.
    pub match_details: Vec<LexiconEntry>,
    pub categories: Vec<Category>,
    pub regions: Vec<Region>,
    /// See [`calculate_severity`].
    pub severity_score: f32,
    /// Misspellings, only if similarity detection was enabled.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub similar_words: Option<Vec<SimilarWord>>,
}

/// One sentence and its analysis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SentenceAnalysis {
    pub sentence: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub analysis: Analysis,
}

/// An occurrence of profanity with the surrounding words.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextMatch {
    /// Canonical word.
    pub word: String,
    /// As written.
    pub surface: String,
    /// The occurrence and up to the requested number of words on each side.
    pub context: String,
    /// Byte offset of the occurrence.
    pub start: usize,
    /// Byte offset after the occurrence.
    pub end: usize,
}

/// Aggregate of many analyses.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BatchSummary {
    pub total_texts: usize,
    pub profane_texts: usize,
    pub clean_texts: usize,
    /// Over profane texts only, or 0 if there are none.
    pub average_severity: f32,
    /// Most frequent first.
    pub top_categories: Vec<Category>,
    /// Most frequent first.
    pub top_regions: Vec<Region>,
    /// Up to 10 `(word, number of texts)`, most frequent first.
    pub most_frequent_words: Vec<(String, usize)>,
}

/// Most frequent first. Ties keep order of first appearance.
fn by_frequency<T: Eq>(items: impl IntoIterator<Item = T>) -> Vec<(T, usize)> {
    let mut counts: Vec<(T, usize)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(t, _)| *t == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item, 1)),
        }
    }
    counts.sort_by_key(|&(_, n)| std::cmp::Reverse(n));
    counts
}

impl Matcher {
    /// Matches, their metadata, and a severity score.
    ///
    /// ```
    /// use saring::{Category, Matcher, Options};
    ///
    /// let analysis = Matcher::default().analyze("Dasar anjing!", &Options::default());
    /// assert!(analysis.has_profanity);
    /// assert_eq!(analysis.categories, vec![Category::Profanity]);
    /// ```
    pub fn analyze(&self, text: &str, options: &Options) -> Analysis {
        self.analyze_outcome(self.find_profanity_detailed(text, options), options)
    }

    fn analyze_outcome(&self, outcome: MatchOutcome, options: &Options) -> Analysis {
        if outcome.is_empty() {
            return Analysis::default();
        }

        let similar_words = options
            .detect_similarity()
            .then(|| outcome.similar_words().to_vec());
        let matches = outcome.into_words();
        let match_details: Vec<LexiconEntry> = matches
            .iter()
            .filter_map(|word| self.lexicon().resolve(word).cloned())
            .collect();

        Analysis {
            has_profanity: true,
            categories: find_categories(&match_details),
            regions: find_regions(&match_details),
            severity_score: calculate_severity(&match_details),
            matches,
            match_details,
            similar_words,
        }
    }

    /// Analyzes each text, and summarizes. With the `rayon` feature, texts are analyzed in
    /// parallel.
    pub fn batch_analyze<S: AsRef<str> + Sync>(&self, texts: &[S], options: &Options) -> BatchSummary {
        #[cfg(feature = "rayon")]
        let analyses: Vec<Analysis> = texts
            .par_iter()
            .map(|text| self.analyze(text.as_ref(), options))
            .collect();
        #[cfg(not(feature = "rayon"))]
        let analyses: Vec<Analysis> = texts
            .iter()
            .map(|text| self.analyze(text.as_ref(), options))
            .collect();

        let profane: Vec<&Analysis> = analyses.iter().filter(|a| a.has_profanity).collect();
        let average_severity = if profane.is_empty() {
            0.0
        } else {
            profane.iter().map(|a| a.severity_score).sum::<f32>() / profane.len() as f32
        };

        log::debug!(
            "analyzed {} texts, {} profane",
            analyses.len(),
            profane.len()
        );

        BatchSummary {
            total_texts: texts.len(),
            profane_texts: profane.len(),
            clean_texts: texts.len() - profane.len(),
            average_severity,
            top_categories: by_frequency(profane.iter().flat_map(|a| a.categories.iter().copied()))
                .into_iter()
                .map(|(c, _)| c)
                .collect(),
            top_regions: by_frequency(profane.iter().flat_map(|a| a.regions.iter().copied()))
                .into_iter()
                .map(|(r, _)| r)
                .collect(),
            most_frequent_words: by_frequency(profane.iter().flat_map(|a| a.matches.iter().cloned()))
                .into_iter()
                .take(10)
                .collect(),
        }
    }

    /// One analysis per non-blank sentence.
    pub fn analyze_by_sentence(&self, text: &str, options: &Options) -> Vec<SentenceAnalysis> {
        split_into_sentences(text)
            .into_iter()
            .map(|sentence| SentenceAnalysis {
                sentence: sentence.to_owned(),
                analysis: self.analyze(sentence, options),
            })
            .collect()
    }

    /// Every occurrence of profanity, with up to `window` whitespace-separated words before and
    /// after it.
    pub fn analyze_with_context(
        &self,
        text: &str,
        window: usize,
        options: &Options,
    ) -> Vec<ContextMatch> {
        let outcome = self.find_profanity_detailed(text, options);
        if outcome.is_empty() {
            return Vec::new();
        }

        let words: Vec<(usize, usize)> = text
            .split_whitespace()
            .map(|word| {
                let start = word.as_ptr() as usize - text.as_ptr() as usize;
                (start, start + word.len())
            })
            .collect();

        outcome
            .occurrences(text, options)
            .into_iter()
            .map(|occurrence| {
                let (start, end) = (occurrence.range.start, occurrence.range.end);
                // Words overlapping the occurrence, then the window around them.
                let first = words.partition_point(|&(_, e)| e <= start);
                let last = words.partition_point(|&(s, _)| s < end);
                let from = words
                    .get(first.saturating_sub(window))
                    .map_or(start, |&(s, _)| s.min(start));
                let to = last
                    .saturating_add(window)
                    .checked_sub(1)
                    .map(|i| i.min(words.len().saturating_sub(1)))
                    .and_then(|i| words.get(i))
                    .map_or(end, |&(_, e)| e.max(end));

                ContextMatch {
                    word: occurrence.word,
                    surface: text[start..end].to_owned(),
                    context: text[from..to].to_owned(),
                    start,
                    end,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::by_frequency;
    use crate::{Category, Matcher, Options, Region};
    use lazy_static::lazy_static;

    lazy_static! {
        static ref MATCHER: Matcher = Matcher::default();
    }

    #[test]
    fn analyze() {
        let analysis = MATCHER.analyze("jancok, dasar anjing", &Options::default());
        assert!(analysis.has_profanity);
        assert_eq!(analysis.matches, vec!["jancok", "anjing"]);
        assert_eq!(analysis.match_details.len(), 2);
        assert_eq!(analysis.categories, vec![Category::Sexual, Category::Profanity]);
        assert_eq!(analysis.regions, vec![Region::Jawa, Region::General]);
        assert!(analysis.severity_score > 0.0 && analysis.severity_score <= 1.0);
        assert_eq!(analysis.similar_words, None);

        let clean = MATCHER.analyze("Selamat pagi", &Options::default());
        assert!(!clean.has_profanity);
        assert_eq!(clean.severity_score, 0.0);
        assert!(clean.matches.is_empty());
    }

    #[test]
    fn similar_words() {
        let mut options = Options::default();
        options.with_detect_similarity(true);
        let analysis = MATCHER.analyze("dasar anjeng", &options);
        assert_eq!(analysis.matches, vec!["anjing"]);
        let similar = analysis.similar_words.unwrap();
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].word, "anjeng");
    }

    #[test]
    fn batch() {
        let texts = [
            "Dasar anjing!",
            "Selamat pagi",
            "anjing dan jancok",
            "kontol",
            "Apa kabar?",
        ];
        let summary = MATCHER.batch_analyze(&texts, &Options::default());
        assert_eq!(summary.total_texts, 5);
        assert_eq!(summary.profane_texts, 3);
        assert_eq!(summary.clean_texts, 2);
        assert!(summary.average_severity > 0.0 && summary.average_severity <= 1.0);
        assert_eq!(summary.most_frequent_words[0], ("anjing".to_owned(), 2));
        assert_eq!(summary.most_frequent_words.len(), 3);
        assert_eq!(summary.top_regions, vec![Region::General, Region::Jawa]);
        assert_eq!(
            summary.top_categories,
            vec![Category::Profanity, Category::Sexual]
        );

        let empty = MATCHER.batch_analyze::<&str>(&[], &Options::default());
        assert_eq!(empty.total_texts, 0);
        assert_eq!(empty.average_severity, 0.0);
    }

    #[test]
    fn by_sentence() {
        let analyses = MATCHER.analyze_by_sentence(
            "Halo semua. Dasar anjing!   Apa kabar?",
            &Options::default(),
        );
        assert_eq!(analyses.len(), 3);
        assert_eq!(analyses[1].sentence, "Dasar anjing!");
        assert!(!analyses[0].analysis.has_profanity);
        assert!(analyses[1].analysis.has_profanity);
        assert!(!analyses[2].analysis.has_profanity);
    }

    #[test]
    fn context() {
        let text = "Halo, dasar anjing sialan kamu";
        let found = MATCHER.analyze_with_context(text, 1, &Options::default());
        assert_eq!(found.len(), 2);

        assert_eq!(found[0].word, "anjing");
        assert_eq!(found[0].context, "dasar anjing sialan");
        assert_eq!(&text[found[0].start..found[0].end], "anjing");

        assert_eq!(found[1].word, "sialan");
        assert_eq!(found[1].context, "anjing sialan kamu");

        let wide = MATCHER.analyze_with_context(text, 10, &Options::default());
        assert_eq!(wide[0].context, text);
        let widest = MATCHER.analyze_with_context(text, usize::MAX, &Options::default());
        assert_eq!(widest, wide);

        let narrow = MATCHER.analyze_with_context("Dasar anjing!", 0, &Options::default());
        assert_eq!(narrow[0].context, "anjing!");
        assert_eq!(narrow[0].surface, "anjing");

        assert!(MATCHER
            .analyze_with_context("Selamat pagi", 3, &Options::default())
            .is_empty());
    }

    #[test]
    fn frequency() {
        assert_eq!(
            by_frequency(["b", "a", "b", "c", "a", "b"]),
            vec![("b", 3), ("a", 2), ("c", 1)]
        );
        assert!(by_frequency(Vec::<u8>::new()).is_empty());
    }
}
