use crate::error::{Error, Result};
use crate::Map;
use lazy_static::lazy_static;
use std::fmt::{self, Display, Formatter};
use std::io;
use std::ops::Deref;
use std::str::FromStr;

lazy_static! {
    pub(crate) static ref LEXICON: Lexicon =
        Lexicon::from_csv(include_str!("lexicon.csv").as_bytes()).unwrap();
}

/// What kind of inappropriateness a word carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Category {
    Sexual,
    Insult,
    Profanity,
    Slur,
    Drugs,
    Disgusting,
    Blasphemy,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Sexual,
        Self::Insult,
        Self::Profanity,
        Self::Slur,
        Self::Drugs,
        Self::Disgusting,
        Self::Blasphemy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sexual => "sexual",
            Self::Insult => "insult",
            Self::Profanity => "profanity",
            Self::Slur => "slur",
            Self::Drugs => "drugs",
            Self::Disgusting => "disgusting",
            Self::Blasphemy => "blasphemy",
        }
    }

    /// How much a word of this category contributes to a severity score.
    pub fn weight(self) -> f32 {
        match self {
            Self::Sexual | Self::Blasphemy => 0.9,
            Self::Slur => 0.8,
            Self::Profanity => 0.7,
            Self::Insult => 0.6,
            Self::Drugs | Self::Disgusting => 0.5,
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownCategory(s.to_owned()))
    }
}

/// Where a word is used. `General` words are understood throughout Indonesia.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Region {
    General,
    Jawa,
    Sunda,
    Betawi,
    Batak,
    Minang,
    Bali,
    Madura,
    Bugis,
    Aceh,
    Ambon,
    Papua,
    Manado,
    Banjar,
    Palembang,
    Lampung,
    Ntt,
    Ntb,
}

impl Region {
    pub const ALL: [Self; 18] = [
        Self::General,
        Self::Jawa,
        Self::Sunda,
        Self::Betawi,
        Self::Batak,
        Self::Minang,
        Self::Bali,
        Self::Madura,
        Self::Bugis,
        Self::Aceh,
        Self::Ambon,
        Self::Papua,
        Self::Manado,
        Self::Banjar,
        Self::Palembang,
        Self::Lampung,
        Self::Ntt,
        Self::Ntb,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Jawa => "jawa",
            Self::Sunda => "sunda",
            Self::Betawi => "betawi",
            Self::Batak => "batak",
            Self::Minang => "minang",
            Self::Bali => "bali",
            Self::Madura => "madura",
            Self::Bugis => "bugis",
            Self::Aceh => "aceh",
            Self::Ambon => "ambon",
            Self::Papua => "papua",
            Self::Manado => "manado",
            Self::Banjar => "banjar",
            Self::Palembang => "palembang",
            Self::Lampung => "lampung",
            Self::Ntt => "ntt",
            Self::Ntb => "ntb",
        }
    }
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownRegion(s.to_owned()))
    }
}

/// One profane word and everything known about it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexiconEntry {
    /// Canonical spelling, lowercase. Unique within a [`Lexicon`].
    pub word: String,
    pub category: Category,
    pub region: Region,
    /// Intensity from 0 (harmless) to 1 (cover your eyes).
    pub severity: f32,
    /// Alternate spellings that resolve to `word`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub aliases: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub context: Option<String>,
}

impl LexiconEntry {
    pub fn new(word: &str, category: Category, region: Region, severity: f32) -> Self {
        Self {
            word: word.to_owned(),
            category,
            region,
            severity,
            aliases: Vec::new(),
            description: None,
            context: None,
        }
    }

    pub fn with_aliases<'a>(mut self, aliases: impl IntoIterator<Item = &'a str>) -> Self {
        self.aliases.extend(aliases.into_iter().map(str::to_owned));
        self
    }
}

/// An immutable, ordered collection of [`LexiconEntry`]s with alias resolution.
#[derive(Clone, Debug)]
pub struct Lexicon {
    entries: Vec<LexiconEntry>,
    /// Canonical word -> index into entries.
    words: Map<String, usize>,
    /// Alias -> index into entries. Never contains a canonical word.
    aliases: Map<String, usize>,
}

impl Lexicon {
    /// Words and aliases are lowercased. Later duplicates of a canonical word are dropped.
    ///
    /// If two entries register the same alias, the last one wins. An alias that is spelled like
    /// a canonical word is ignored, so canonical words always resolve to themselves.
    pub fn new(entries: impl IntoIterator<Item = LexiconEntry>) -> Self {
        let mut ret = Self {
            entries: Vec::new(),
            words: Map::default(),
            aliases: Map::default(),
        };

        for mut entry in entries {
            entry.word = entry.word.trim().to_lowercase();
            if entry.word.is_empty() {
                continue;
            }
            if ret.words.contains_key(&entry.word) {
                log::debug!("dropping duplicate lexicon word {:?}", entry.word);
                continue;
            }
            let mut aliases: Vec<String> = Vec::with_capacity(entry.aliases.len());
            for alias in entry.aliases.drain(..) {
                let alias = alias.trim().to_lowercase();
                if !alias.is_empty() && alias != entry.word && !aliases.contains(&alias) {
                    aliases.push(alias);
                }
            }
            entry.aliases = aliases;
            ret.words.insert(entry.word.clone(), ret.entries.len());
            ret.entries.push(entry);
        }

        for (idx, entry) in ret.entries.iter().enumerate() {
            for alias in &entry.aliases {
                if ret.words.contains_key(alias) {
                    continue;
                }
                if let Some(previous) = ret.aliases.insert(alias.clone(), idx) {
                    if previous != idx {
                        log::debug!(
                            "alias {:?} moved from {:?} to {:?}",
                            alias,
                            ret.entries[previous].word,
                            entry.word
                        );
                    }
                }
            }
        }

        log::debug!(
            "loaded lexicon with {} words and {} aliases",
            ret.entries.len(),
            ret.aliases.len()
        );

        ret
    }

    /// Reads a lexicon from CSV with the header `word,category,region,severity,aliases,description,context`.
    ///
    /// Aliases are separated by `|`. Empty descriptions and contexts become `None`.
    pub fn from_csv<R: io::Read>(reader: R) -> Result<Self> {
        let mut csv = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for record in csv.records() {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            let field = |i: usize, name: &str| {
                record.get(i).ok_or_else(|| Error::InvalidRecord {
                    line,
                    reason: format!("missing {}", name),
                })
            };
            let optional = |i: usize| {
                record
                    .get(i)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            };

            let word = field(0, "word")?;
            let severity: f32 = field(3, "severity")?
                .parse()
                .map_err(|_| Error::InvalidRecord {
                    line,
                    reason: format!("severity of {:?} is not a number", word),
                })?;
            if !(0.0..=1.0).contains(&severity) {
                return Err(Error::InvalidSeverity {
                    word: word.to_owned(),
                    severity,
                });
            }

            entries.push(LexiconEntry {
                word: word.to_owned(),
                category: field(1, "category")?.parse()?,
                region: field(2, "region")?.parse()?,
                severity,
                aliases: record
                    .get(4)
                    .unwrap_or("")
                    .split('|')
                    .filter(|a| !a.trim().is_empty())
                    .map(str::to_owned)
                    .collect(),
                description: optional(5),
                context: optional(6),
            });
        }

        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[LexiconEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a canonical word (case-insensitive).
    pub fn get(&self, word: &str) -> Option<&LexiconEntry> {
        self.index_of_word(&word.to_lowercase())
            .map(|idx| &self.entries[idx])
    }

    /// Looks up a canonical word or an alias (case-insensitive).
    pub fn resolve(&self, word_or_alias: &str) -> Option<&LexiconEntry> {
        self.resolve_index(&word_or_alias.to_lowercase())
            .map(|idx| &self.entries[idx])
    }

    /// The canonical word that `word_or_alias` stands for, if any.
    pub fn canonical(&self, word_or_alias: &str) -> Option<&str> {
        self.resolve(word_or_alias).map(|e| e.word.as_str())
    }

    /// Canonical words, optionally restricted to a category and/or region.
    pub fn words_by(&self, category: Option<Category>, region: Option<Region>) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| category.map_or(true, |c| e.category == c))
            .filter(|e| region.map_or(true, |r| e.region == r))
            .map(|e| e.word.as_str())
            .collect()
    }

    /// Canonical words with a severity of at least 0.8.
    pub fn severe_words(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.severity >= 0.8)
            .map(|e| e.word.as_str())
            .collect()
    }

    /// Which entry an alias belongs to, after duplicate resolution.
    pub(crate) fn alias_owner(&self, alias: &str) -> Option<usize> {
        self.aliases.get(alias).copied()
    }

    pub(crate) fn index_of_word(&self, lowercase_word: &str) -> Option<usize> {
        self.words.get(lowercase_word).copied()
    }

    pub(crate) fn resolve_index(&self, lowercase: &str) -> Option<usize> {
        self.index_of_word(lowercase)
            .or_else(|| self.alias_owner(lowercase))
    }
}

impl Default for Lexicon {
    /// The bundled Indonesian lexicon.
    fn default() -> Self {
        LEXICON.deref().clone()
    }
}

impl FromIterator<LexiconEntry> for Lexicon {
    fn from_iter<T: IntoIterator<Item = LexiconEntry>>(iter: T) -> Self {
        Self::new(iter)
    }
}
