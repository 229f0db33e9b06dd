//! # Gematria Finder: Multi-Scheme Phrase Search
//!
//! Computes letter-weight sums of text under several schemes at once and
//! searches a word corpus for short phrases whose sums hit chosen targets.
//!
//! ## Weighting Schemes
//!
//! 1. **Primary** ("simple") - ordinal, `a=1 … z=26`
//! 2. **Secondary** ("english") - ordinal × 6
//! 3. **Tertiary** ("reverse") - `a=26 … z=1`
//! 4. **Quaternary** ("jewish") - Latin-alphabet Jewish gematria
//!
//! ## Target Syntax
//!
//! - Comma-separated `scheme=value` pairs: `primary=74,quaternary=1000`
//! - Names, aliases (`simple`, `english`, ...) or first letters (`p`, `q`)
//! - Schemes left out are ignored by the search
//!
//! ## Example Usage
//!
//! ```
//! use gematria_finder::{parse_target, CorpusIndex, PhraseSearch, SchemeSet};
//!
//! let index = CorpusIndex::build(["cab", "abc"], &SchemeSet::standard());
//! let target = parse_target("primary=6")?;
//!
//! let engine = PhraseSearch::default();
//! let runtime = tokio::runtime::Builder::new_current_thread().build()?;
//! let report = runtime.block_on(engine.search(&target, &index, 1000, 1000))?;
//! assert!(report.outcome.is_match());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Weight Calculator** - Per-scheme letter sums with breakdowns
//! - **Corpus Index** - Weight buckets per scheme, cached by fingerprint
//! - **Phrase Search** - Paced interior picks plus exact bucket closing
//! - **Anagram Decomposer** - Weighted random restarts over a letter bag
//! - **Category Classifier** - Role pools for loose phrase shaping

pub mod anagram;
pub mod category;
pub mod config;
pub mod data;
pub mod index;
pub mod scheme;
pub mod search;
pub mod target;
pub mod types;
pub mod weight;

// Re-export main types and functions for convenience
pub use anagram::{AnagramDecomposer, LetterBag};
pub use category::{CategoryClassifier, WordCategory};
pub use config::{AnagramConfig, FinderConfig, LengthBand, SearchConfig};
pub use data::{DataInfo, DataLoader};
pub use index::{CorpusIndex, CorpusStore};
pub use scheme::{SchemeSet, SchemeTable};
pub use search::PhraseSearch;
pub use target::parse_target;
pub use types::{
    ConfigError, Decomposition, FinderError, Phrase, Scheme, SearchOutcome, SearchReport,
    TargetError, TargetVector, WeightVector, WordRecord,
};
pub use weight::{weigh, Weighing};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
