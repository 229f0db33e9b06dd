// Gematria Finder Configuration
// Tuning knobs for the search and anagram heuristics

use crate::types::{ConfigError, SCHEME_COUNT};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Word-count range used for targets whose mean is at most `upper`
///
/// The last band usually leaves `upper` unset to catch everything above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBand {
    #[serde(default)]
    pub upper: Option<u64>,
    pub min_words: usize,
    pub max_words: usize,
}

impl LengthBand {
    pub const fn new(upper: Option<u64>, min_words: usize, max_words: usize) -> Self {
        Self {
            upper,
            min_words,
            max_words,
        }
    }

    fn covers(&self, mean: f64) -> bool {
        self.upper.map_or(true, |upper| mean <= upper as f64)
    }
}

fn default_length_bands() -> Vec<LengthBand> {
    vec![
        LengthBand::new(Some(60), 1, 2),
        LengthBand::new(Some(200), 1, 3),
        LengthBand::new(Some(600), 2, 4),
        LengthBand::new(Some(1500), 2, 5),
        LengthBand::new(None, 3, 6),
    ]
}

/// Composition search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Attempts before giving up with `Exhausted`
    pub max_attempts: usize,
    /// Wall-clock budget in milliseconds
    pub timeout_ms: u64,
    /// Attempts between timeout checks (and scheduler yields)
    pub check_interval: usize,
    /// Random draws per interior word before relaxing the pace rule
    pub retry_budget: usize,
    /// Minimum fraction of the ideal running total per scheme
    pub pace_floor: [f64; SCHEME_COUNT],
    /// Buckets up to this size are scanned completely
    pub exhaustive_scan_limit: usize,
    /// Entries visited in larger buckets, from a random offset
    pub scan_window: usize,
    /// First-word candidates visited by the two-word closing
    pub pair_window: usize,
    /// Chance of honoring the random initial letter for a lone word
    pub first_letter_bias: f64,
    /// Chance of drawing interior words from their grammatical role pool
    pub shape_bias: f64,
    /// Mean-target bands, ascending
    pub length_bands: Vec<LengthBand>,
    /// Fixed RNG seed for reproducible runs
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 2_000_000,
            timeout_ms: 20_000,
            check_interval: 10_000,
            retry_budget: 100,
            // quaternary totals jump in steps of hundreds
            pace_floor: [0.5, 0.5, 0.5, 0.3],
            exhaustive_scan_limit: 500,
            scan_window: 500,
            pair_window: 200,
            first_letter_bias: 0.7,
            shape_bias: 0.6,
            length_bands: default_length_bands(),
            seed: None,
        }
    }
}

impl SearchConfig {
    /// Band for a mean target value; the last band catches everything above
    pub fn band_for(&self, mean: f64) -> LengthBand {
        self.length_bands
            .iter()
            .find(|band| band.covers(mean))
            .or_else(|| self.length_bands.last())
            .copied()
            .unwrap_or(LengthBand::new(None, 1, 1))
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.check_interval == 0 {
            return Err(ConfigError::Invalid("check_interval must be at least 1".into()));
        }
        if self.retry_budget == 0 || self.scan_window == 0 {
            return Err(ConfigError::Invalid(
                "retry_budget and scan_window must be at least 1".into(),
            ));
        }
        for p in [self.first_letter_bias, self.shape_bias] {
            if !(0.0..=1.0).contains(&p) {
                return Err(ConfigError::Invalid(format!("probability {} out of range", p)));
            }
        }
        if self.pace_floor.iter().any(|f| !(0.0..=1.0).contains(f)) {
            return Err(ConfigError::Invalid("pace_floor values must lie in [0, 1]".into()));
        }
        if self.length_bands.is_empty() {
            return Err(ConfigError::Invalid("length_bands is empty".into()));
        }

        let mut previous: Option<&LengthBand> = None;
        for band in &self.length_bands {
            if band.min_words == 0 || band.min_words > band.max_words {
                return Err(ConfigError::Invalid(format!(
                    "band {:?} needs 1 <= min_words <= max_words",
                    band
                )));
            }
            if let Some(prev) = previous {
                let ascending = match (prev.upper, band.upper) {
                    (Some(a), Some(b)) => a < b,
                    (Some(_), None) => true,
                    (None, _) => false,
                };
                if !ascending || band.min_words < prev.min_words || band.max_words < prev.max_words {
                    return Err(ConfigError::Invalid(
                        "length_bands must grow with magnitude".into(),
                    ));
                }
            }
            previous = Some(band);
        }
        Ok(())
    }
}

/// Anagram decomposition settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnagramConfig {
    pub max_attempts: usize,
    /// Pick weight is `word_length ^ length_exponent`
    pub length_exponent: f64,
    pub seed: Option<u64>,
}

impl Default for AnagramConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1000,
            length_exponent: 1.5,
            seed: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub search: SearchConfig,
    pub anagram: AnagramConfig,
}

impl FinderConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: FinderConfig = serde_json::from_str(&raw)?;
        config.search.validate()?;
        Ok(config)
    }

    /// Pretty-printed JSON, loadable again with [`FinderConfig::from_json_file`]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Defaults overridden by `GF_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup
    ///
    /// Recognized keys: `GF_MAX_ATTEMPTS`, `GF_TIMEOUT_MS`, `GF_CHECK_INTERVAL`,
    /// `GF_SEED` (both engines), `GF_ANAGRAM_ATTEMPTS`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = parse_var(&lookup, "GF_MAX_ATTEMPTS")? {
            self.search.max_attempts = v;
        }
        if let Some(v) = parse_var(&lookup, "GF_TIMEOUT_MS")? {
            self.search.timeout_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "GF_CHECK_INTERVAL")? {
            self.search.check_interval = v;
        }
        if let Some(v) = parse_var(&lookup, "GF_SEED")? {
            self.search.seed = Some(v);
            self.anagram.seed = Some(v);
        }
        if let Some(v) = parse_var(&lookup, "GF_ANAGRAM_ATTEMPTS")? {
            self.anagram.max_attempts = v;
        }
        self.search.validate()?;
        Ok(self)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                key: key.to_string(),
                value: raw,
            }),
    }
}
