use thiserror::Error;

/// Errors raised while assembling a lexicon, an automaton, substitution tables or options.
///
/// Matching itself never fails; only misuse of the building blocks does.
#[derive(Debug, Error)]
pub enum Error {
    /// A pattern was added after [`crate::Automaton::build`].
    #[error("cannot add pattern {pattern:?} after the automaton is built")]
    AutomatonBuilt { pattern: String },
    /// Empty patterns would match at every position.
    #[error("cannot add an empty pattern")]
    EmptyPattern,
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
    #[error("unknown region {0:?}")]
    UnknownRegion(String),
    #[error("alternate {dst:?} for {src:?} is longer than 4 bytes")]
    AlternateTooLong { src: char, dst: String },
    #[error("{src:?} already has 4 alternates")]
    TooManyAlternates { src: char },
    #[error("unknown preset {0:?}")]
    UnknownPreset(String),
    #[error("severity {severity} of {word:?} is outside of [0, 1]")]
    InvalidSeverity { word: String, severity: f32 },
    #[error("lexicon record on line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
