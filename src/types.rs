// Gematria Finder Type Definitions
// Core types shared by the index, the search engine and the anagram decomposer

use std::fmt;
use std::ops::{Add, AddAssign};
use thiserror::Error;

/// Number of weighting schemes evaluated side by side
pub const SCHEME_COUNT: usize = 4;

/// The four weighting scheme slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scheme {
    /// Ordinal table: a=1 … z=26 ("simple")
    Primary,
    /// Ordinal × 6: a=6 … z=156 ("english")
    Secondary,
    /// Reverse ordinal: a=26 … z=1 ("reverse")
    Tertiary,
    /// Latin-alphabet Jewish gematria ("jewish")
    Quaternary,
}

impl Scheme {
    /// All schemes in slot order
    pub const ALL: [Scheme; SCHEME_COUNT] = [
        Scheme::Primary,
        Scheme::Secondary,
        Scheme::Tertiary,
        Scheme::Quaternary,
    ];

    /// Position of this scheme inside a [`WeightVector`]
    #[inline]
    pub fn slot(self) -> usize {
        self as usize
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            Scheme::Primary => "primary",
            Scheme::Secondary => "secondary",
            Scheme::Tertiary => "tertiary",
            Scheme::Quaternary => "quaternary",
        }
    }

    /// Name of the standard table that fills this slot
    pub fn alias(self) -> &'static str {
        match self {
            Scheme::Primary => "simple",
            Scheme::Secondary => "english",
            Scheme::Tertiary => "reverse",
            Scheme::Quaternary => "jewish",
        }
    }

    /// Resolve a canonical name, an alias or a one-letter shorthand
    pub fn from_name(name: &str) -> Option<Scheme> {
        let name = name.trim().to_ascii_lowercase();
        Scheme::ALL.into_iter().find(|scheme| {
            name == scheme.name()
                || name == scheme.alias()
                || name.len() == 1 && scheme.name().starts_with(name.as_str())
        })
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Primary => write!(f, "Primary"),
            Scheme::Secondary => write!(f, "Secondary"),
            Scheme::Tertiary => write!(f, "Tertiary"),
            Scheme::Quaternary => write!(f, "Quaternary"),
        }
    }
}

/// One integer total per scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WeightVector(pub [u64; SCHEME_COUNT]);

impl WeightVector {
    /// The all-zero vector
    pub const fn zero() -> Self {
        Self([0; SCHEME_COUNT])
    }

    /// Total for one scheme
    #[inline]
    pub fn get(&self, scheme: Scheme) -> u64 {
        self.0[scheme.slot()]
    }
}

impl Add for WeightVector {
    type Output = WeightVector;

    fn add(mut self, rhs: WeightVector) -> WeightVector {
        self += rhs;
        self
    }
}

impl AddAssign for WeightVector {
    fn add_assign(&mut self, rhs: WeightVector) {
        for (lhs, rhs) in self.0.iter_mut().zip(rhs.0) {
            *lhs += rhs;
        }
    }
}

impl fmt::Display for WeightVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [p, s, t, q] = self.0;
        write!(f, "[{}, {}, {}, {}]", p, s, t, q)
    }
}

/// Requested totals plus a per-scheme enable flag
///
/// Disabled components are ignored by matching and distance logic; their
/// value is kept but never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetVector {
    pub values: [u64; SCHEME_COUNT],
    pub enabled: [bool; SCHEME_COUNT],
}

impl TargetVector {
    /// Create a target with every scheme disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable a scheme with the given target value
    pub fn with(mut self, scheme: Scheme, value: u64) -> Self {
        self.values[scheme.slot()] = value;
        self.enabled[scheme.slot()] = true;
        self
    }

    /// Whether a scheme takes part in matching
    #[inline]
    pub fn is_enabled(&self, scheme: Scheme) -> bool {
        self.enabled[scheme.slot()]
    }

    /// Target value for a scheme, if enabled
    pub fn value(&self, scheme: Scheme) -> Option<u64> {
        self.is_enabled(scheme).then(|| self.values[scheme.slot()])
    }

    /// Iterate over enabled schemes in slot order
    pub fn enabled_schemes(&self) -> impl Iterator<Item = Scheme> + '_ {
        Scheme::ALL.into_iter().filter(|s| self.is_enabled(*s))
    }

    /// True when no scheme is enabled
    pub fn is_empty(&self) -> bool {
        !self.enabled.iter().any(|e| *e)
    }

    /// Mean of the enabled target values (0.0 when nothing is enabled)
    pub fn mean(&self) -> f64 {
        let (sum, count) = self
            .enabled_schemes()
            .fold((0f64, 0u32), |(sum, count), s| {
                (sum + self.values[s.slot()] as f64, count + 1)
            });
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// Every enabled component equals the corresponding weight
    pub fn matches(&self, weights: &WeightVector) -> bool {
        self.enabled_schemes()
            .all(|s| weights.get(s) == self.values[s.slot()])
    }

    /// No enabled component of `weights` exceeds its target
    pub fn fits(&self, weights: &WeightVector) -> bool {
        self.enabled_schemes()
            .all(|s| weights.get(s) <= self.values[s.slot()])
    }

    /// Sum of absolute differences over enabled schemes, saturating at `u64::MAX`
    pub fn distance(&self, weights: &WeightVector) -> u64 {
        self.enabled_schemes()
            .map(|s| self.values[s.slot()].abs_diff(weights.get(s)))
            .fold(0u64, u64::saturating_add)
    }

    /// What is still missing after `achieved`, as a target with the same flags
    ///
    /// Returns `None` when an enabled component is already overshot.
    pub fn residual(&self, achieved: &WeightVector) -> Option<TargetVector> {
        let mut rest = TargetVector {
            values: [0; SCHEME_COUNT],
            enabled: self.enabled,
        };
        for s in self.enabled_schemes() {
            rest.values[s.slot()] = self.values[s.slot()].checked_sub(achieved.get(s))?;
        }
        Some(rest)
    }
}

impl fmt::Display for TargetVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for s in self.enabled_schemes() {
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}={}", s.name(), self.values[s.slot()])?;
            first = false;
        }
        Ok(())
    }
}

/// A corpus word with its precomputed weights
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRecord {
    pub text: String,
    pub weights: WeightVector,
}

/// An ordered word sequence and the sum of its weights
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Phrase {
    pub words: Vec<String>,
    pub weights: WeightVector,
}

impl Phrase {
    /// Words joined by single spaces
    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// Closest phrase found by a search that did not hit its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approximation {
    pub phrase: Phrase,
    /// Sum of absolute differences over enabled schemes
    pub distance: u64,
}

/// Result of a composition search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Every enabled target was hit exactly
    Matched(Phrase),
    /// The wall-clock budget ran out
    TimedOut(Approximation),
    /// All attempts were used
    Exhausted(Approximation),
}

impl SearchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, SearchOutcome::Matched(_))
    }

    /// The matched phrase or the best approximation
    pub fn phrase(&self) -> &Phrase {
        match self {
            SearchOutcome::Matched(phrase) => phrase,
            SearchOutcome::TimedOut(best) | SearchOutcome::Exhausted(best) => &best.phrase,
        }
    }

    /// Deviation from the target (0 for a match)
    pub fn distance(&self) -> u64 {
        match self {
            SearchOutcome::Matched(_) => 0,
            SearchOutcome::TimedOut(best) | SearchOutcome::Exhausted(best) => best.distance,
        }
    }
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Matched(_) => write!(f, "Matched"),
            SearchOutcome::TimedOut(_) => write!(f, "TimedOut"),
            SearchOutcome::Exhausted(_) => write!(f, "Exhausted"),
        }
    }
}

/// Search outcome plus the number of attempts it took
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub attempts: usize,
}

/// Words assembled from a letter multiset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub phrase: Vec<String>,
    /// Letters of the input that no word consumed
    pub leftover: usize,
}

/// Errors returned by the search and anagram operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FinderError {
    #[error("Corpus is empty: load a word list before searching")]
    EmptyCorpus,

    #[error("Input has no letters")]
    EmptyInput,

    #[error("Target enables no scheme")]
    NoEnabledScheme,

    #[error("No corpus word can be formed from the {letters} input letters")]
    NoDecomposition { letters: usize },
}

/// Target expression parsing errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetError {
    #[error("Invalid target: empty")]
    EmptyTarget,

    #[error("Invalid target pair '{pair}': expected scheme=value")]
    MalformedPair { pair: String },

    #[error("Unknown scheme '{name}'")]
    UnknownScheme { name: String },

    #[error("Scheme {scheme} given more than once")]
    DuplicateScheme { scheme: Scheme },

    #[error("Invalid value '{value}' for scheme {scheme}")]
    InvalidValue { scheme: Scheme, value: String },

    #[error("Regex compilation failed: {0}")]
    RegexError(String),
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value '{value}' for {key}")]
    InvalidEnv { key: String, value: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}
