use crate::error::Error;
use crate::lexicon::{Category, LexiconEntry, Region};
use crate::Set;
use std::str::FromStr;

/// How text is matched (and censored).
///
/// Construct with [`Options::default`] or a [`Preset`], then adjust with the `with_*` methods.
///
/// ```
/// use saring::{Category, Options};
///
/// let mut options = Options::default();
/// options
///     .with_categories([Category::Sexual])
///     .with_detect_split(true)
///     .with_whitelist(["Asu"]);
/// assert!(options.detect_split());
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
pub struct Options {
    word_list: Option<Vec<String>>,
    whitelist: Vec<String>,
    categories: Option<Vec<Category>>,
    regions: Option<Vec<Region>>,
    severity_threshold: f32,
    detect_leet_speak: bool,
    indonesian_variation: bool,
    detect_split: bool,
    detect_masked: bool,
    detect_similarity: bool,
    use_levenshtein: bool,
    similarity_threshold: f32,
    max_levenshtein_distance: usize,
    check_substring: bool,
    replace_with: char,
    full_word_censor: bool,
    use_random_grawlix: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            word_list: None,
            whitelist: Vec::new(),
            categories: None,
            regions: None,
            severity_threshold: 0.0,
            detect_leet_speak: true,
            indonesian_variation: false,
            detect_split: false,
            detect_masked: false,
            detect_similarity: false,
            use_levenshtein: false,
            similarity_threshold: 0.8,
            max_levenshtein_distance: 2,
            check_substring: false,
            replace_with: '*',
            full_word_censor: true,
            use_random_grawlix: false,
        }
    }
}

impl Options {
    /// Options of a [`Preset`].
    pub fn from_preset(preset: Preset) -> Self {
        let mut ret = Self::default();
        match preset {
            Preset::Strict => {
                ret.with_check_substring(true).with_detect_leet_speak(true);
            }
            Preset::Moderate => {
                ret.with_severity_threshold(0.5);
            }
            Preset::Light => {
                ret.with_severity_threshold(0.7).with_categories([
                    Category::Sexual,
                    Category::Slur,
                    Category::Blasphemy,
                ]);
            }
            Preset::ChildSafe => {
                ret.with_check_substring(true)
                    .with_detect_leet_speak(true)
                    .with_full_word_censor(true);
            }
            Preset::Sexual => {
                ret.with_categories([Category::Sexual]);
            }
            Preset::Insults => {
                ret.with_categories([Category::Insult]);
            }
            Preset::Profanity => {
                ret.with_categories([Category::Profanity]);
            }
            Preset::General => {
                ret.with_regions([Region::General]);
            }
            Preset::Jawa => {
                ret.with_regions([Region::Jawa]);
            }
            Preset::Sunda => {
                ret.with_regions([Region::Sunda]);
            }
            Preset::Betawi => {
                ret.with_regions([Region::Betawi]);
            }
            Preset::Batak => {
                ret.with_regions([Region::Batak]);
            }
        }
        ret
    }

    /// Options of the preset with the given name, or [`Preset::Strict`] if there is none.
    pub fn from_preset_name(name: &str) -> Self {
        Self::from_preset(name.parse().unwrap_or(Preset::Strict))
    }

    /// Match only these words (case-insensitive) instead of the lexicon. Category, region and
    /// severity filters don't apply to them, but the whitelist does.
    ///
    /// The default is `None`.
    pub fn with_word_list<S: Into<String>>(
        &mut self,
        word_list: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.word_list = Some(word_list.into_iter().map(Into::into).collect());
        self
    }

    /// Never report these words (case-insensitive), whether they are canonical words, aliases or
    /// what was written in the text.
    ///
    /// The default is empty.
    pub fn with_whitelist<S: Into<String>>(
        &mut self,
        whitelist: impl IntoIterator<Item = S>,
    ) -> &mut Self {
        self.whitelist = whitelist.into_iter().map(Into::into).collect();
        self
    }

    /// Only report words of these categories.
    ///
    /// The default is `None`, meaning any category.
    pub fn with_categories(&mut self, categories: impl IntoIterator<Item = Category>) -> &mut Self {
        self.categories = Some(categories.into_iter().collect());
        self
    }

    /// Only report words of these regions.
    ///
    /// The default is `None`, meaning any region.
    pub fn with_regions(&mut self, regions: impl IntoIterator<Item = Region>) -> &mut Self {
        self.regions = Some(regions.into_iter().collect());
        self
    }

    /// Only report words at least this severe.
    ///
    /// The default is `0.0`.
    pub fn with_severity_threshold(&mut self, severity_threshold: f32) -> &mut Self {
        self.severity_threshold = severity_threshold;
        self
    }

    /// Detect words like `4nj1ng`.
    ///
    /// The default is `true`.
    pub fn with_detect_leet_speak(&mut self, detect_leet_speak: bool) -> &mut Self {
        self.detect_leet_speak = detect_leet_speak;
        self
    }

    /// Detect Indonesian spelling alternations, like `kapir` for `kafir`.
    ///
    /// The default is `false`.
    pub fn with_indonesian_variation(&mut self, indonesian_variation: bool) -> &mut Self {
        self.indonesian_variation = indonesian_variation;
        self
    }

    /// Detect words like `a n j i n g` and `a-n-j-i-n-g`. Combined with leetspeak detection,
    /// also detects `4 n j 1 n g`.
    ///
    /// The default is `false`.
    pub fn with_detect_split(&mut self, detect_split: bool) -> &mut Self {
        self.detect_split = detect_split;
        self
    }

    /// Detect words with their inner letters masked, like `a****g` or `b*bi`.
    ///
    /// The default is `false`.
    pub fn with_detect_masked(&mut self, detect_masked: bool) -> &mut Self {
        self.detect_masked = detect_masked;
        self
    }

    /// Detect misspellings by string similarity.
    ///
    /// The default is `false`.
    pub fn with_detect_similarity(&mut self, detect_similarity: bool) -> &mut Self {
        self.detect_similarity = detect_similarity;
        self
    }

    /// Bound misspellings by edit distance (see [`Self::with_max_levenshtein_distance`]) instead
    /// of comparing against words with a similar first letter.
    ///
    /// The default is `false`.
    pub fn with_use_levenshtein(&mut self, use_levenshtein: bool) -> &mut Self {
        self.use_levenshtein = use_levenshtein;
        self
    }

    /// Minimum similarity, from 0 to 1, of a misspelling.
    ///
    /// The default is `0.8`.
    pub fn with_similarity_threshold(&mut self, similarity_threshold: f32) -> &mut Self {
        self.similarity_threshold = similarity_threshold;
        self
    }

    /// The default is `2`.
    pub fn with_max_levenshtein_distance(&mut self, max_levenshtein_distance: usize) -> &mut Self {
        self.max_levenshtein_distance = max_levenshtein_distance;
        self
    }

    /// Report words that are part of longer words, like `tai` in `pantai`. Increases false
    /// positives.
    ///
    /// The default is `false`.
    pub fn with_check_substring(&mut self, check_substring: bool) -> &mut Self {
        self.check_substring = check_substring;
        self
    }

    /// The character that replaces censored characters.
    ///
    /// The default is `'*'`.
    pub fn with_replace_with(&mut self, replace_with: char) -> &mut Self {
        self.replace_with = replace_with;
        self
    }

    /// Censor every character, e.g. `******`, instead of all but the first and last, e.g.
    /// `a****g`.
    ///
    /// The default is `true`.
    pub fn with_full_word_censor(&mut self, full_word_censor: bool) -> &mut Self {
        self.full_word_censor = full_word_censor;
        self
    }

    /// Censor with random characters from `#@$%&!` instead of [`Self::replace_with`].
    ///
    /// The default is `false`.
    pub fn with_use_random_grawlix(&mut self, use_random_grawlix: bool) -> &mut Self {
        self.use_random_grawlix = use_random_grawlix;
        self
    }

    pub fn word_list(&self) -> Option<&[String]> {
        self.word_list.as_deref()
    }

    pub fn whitelist(&self) -> &[String] {
        &self.whitelist
    }

    pub fn categories(&self) -> Option<&[Category]> {
        self.categories.as_deref()
    }

    pub fn regions(&self) -> Option<&[Region]> {
        self.regions.as_deref()
    }

    pub fn severity_threshold(&self) -> f32 {
        self.severity_threshold
    }

    pub fn detect_leet_speak(&self) -> bool {
        self.detect_leet_speak
    }

    pub fn indonesian_variation(&self) -> bool {
        self.indonesian_variation
    }

    pub fn detect_split(&self) -> bool {
        self.detect_split
    }

    pub fn detect_masked(&self) -> bool {
        self.detect_masked
    }

    pub fn detect_similarity(&self) -> bool {
        self.detect_similarity
    }

    pub fn use_levenshtein(&self) -> bool {
        self.use_levenshtein
    }

    pub fn similarity_threshold(&self) -> f32 {
        self.similarity_threshold
    }

    pub fn max_levenshtein_distance(&self) -> usize {
        self.max_levenshtein_distance
    }

    pub fn check_substring(&self) -> bool {
        self.check_substring
    }

    pub fn replace_with(&self) -> char {
        self.replace_with
    }

    pub fn full_word_censor(&self) -> bool {
        self.full_word_censor
    }

    pub fn use_random_grawlix(&self) -> bool {
        self.use_random_grawlix
    }

    /// Whether an entry satisfies every category, region and severity filter that is set.
    pub fn passes_filters(&self, entry: &LexiconEntry) -> bool {
        self.categories
            .as_ref()
            .map_or(true, |c| c.contains(&entry.category))
            && self
                .regions
                .as_ref()
                .map_or(true, |r| r.contains(&entry.region))
            && entry.severity >= self.severity_threshold
    }

    /// Lowercased whitelist.
    pub(crate) fn whitelist_set(&self) -> Set<String> {
        self.whitelist
            .iter()
            .map(|w| w.trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect()
    }
}

impl From<Preset> for Options {
    fn from(preset: Preset) -> Self {
        Self::from_preset(preset)
    }
}

/// Named starting points for [`Options`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Preset {
    /// Substrings and leetspeak.
    Strict,
    /// Severity of at least 0.5.
    Moderate,
    /// Severity of at least 0.7, and only sexual words, slurs and blasphemy.
    Light,
    /// Substrings and leetspeak, censoring whole words.
    ChildSafe,
    Sexual,
    Insults,
    Profanity,
    General,
    Jawa,
    Sunda,
    Betawi,
    Batak,
}

impl Preset {
    pub const ALL: [Self; 12] = [
        Self::Strict,
        Self::Moderate,
        Self::Light,
        Self::ChildSafe,
        Self::Sexual,
        Self::Insults,
        Self::Profanity,
        Self::General,
        Self::Jawa,
        Self::Sunda,
        Self::Betawi,
        Self::Batak,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Moderate => "moderate",
            Self::Light => "light",
            Self::ChildSafe => "child_safe",
            Self::Sexual => "sexual",
            Self::Insults => "insults",
            Self::Profanity => "profanity",
            Self::General => "general",
            Self::Jawa => "jawa",
            Self::Sunda => "sunda",
            Self::Betawi => "betawi",
            Self::Batak => "batak",
        }
    }
}

impl FromStr for Preset {
    type Err = Error;

    /// Accepts `child_safe`, `childSafe` and `child-safe` alike.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().replace('_', "") == normalized)
            .ok_or_else(|| Error::UnknownPreset(s.to_owned()))
    }
}
