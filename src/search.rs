// Gematria Finder Search Engine
// Composes word sequences whose weights hit the requested targets

use crate::category::WordCategory;
use crate::config::SearchConfig;
use crate::index::{CorpusIndex, RecordId};
use crate::types::{
    Approximation, ConfigError, FinderError, Phrase, SearchOutcome, SearchReport, TargetVector,
    WeightVector, SCHEME_COUNT,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::time::{Duration, Instant};
use tracing::{debug, info, trace};

/// Roles for the opening word of a phrase with three or more words
const OPENING: &[WordCategory] = &[
    WordCategory::Article,
    WordCategory::Pronoun,
    WordCategory::Adjective,
];

/// Roles for odd interior positions
const CONTENT: &[WordCategory] = &[WordCategory::Noun, WordCategory::Verb];

/// Roles for the remaining interior positions
const LINKING: &[WordCategory] = &[
    WordCategory::Adjective,
    WordCategory::Noun,
    WordCategory::Preposition,
    WordCategory::Conjunction,
];

/// Multi-scheme phrase search engine
///
/// Each attempt picks a phrase length from the target's magnitude band, lays
/// down interior words on pace towards the target, then tries to close the
/// remaining gap exactly with one or two indexed lookups.
pub struct PhraseSearch {
    config: SearchConfig,
}

/// What a single attempt produced
enum Attempt {
    Matched(Phrase),
    Missed(Approximation),
}

/// Role pools resolved against one index
struct PhraseShape {
    opening: Vec<RecordId>,
    content: Vec<RecordId>,
    linking: Vec<RecordId>,
}

impl PhraseShape {
    fn from_index(index: &CorpusIndex) -> Self {
        let pools = index.pools();
        Self {
            opening: pools.union(OPENING),
            content: pools.union(CONTENT),
            linking: pools.union(LINKING),
        }
    }

    fn pool_for(&self, position: usize, words: usize) -> &[RecordId] {
        if position == 0 && words > 2 {
            &self.opening
        } else if position % 2 == 1 {
            &self.content
        } else {
            &self.linking
        }
    }
}

impl PhraseSearch {
    /// Create an engine after checking the configuration
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `index` for a phrase hitting every enabled target exactly
    ///
    /// Yields to the async runtime every `check_interval` attempts, which is
    /// also when the timeout is checked. Dropping the future between those
    /// points cancels the search.
    ///
    /// # Errors
    /// - [`FinderError::EmptyCorpus`] if the index has no records
    /// - [`FinderError::NoEnabledScheme`] if the target enables nothing
    ///
    /// Not finding a match is not an error: the report then carries
    /// `TimedOut` or `Exhausted` with the closest phrase seen.
    pub async fn search(
        &self,
        target: &TargetVector,
        index: &CorpusIndex,
        max_attempts: usize,
        timeout_ms: u64,
    ) -> Result<SearchReport, FinderError> {
        if index.is_empty() {
            return Err(FinderError::EmptyCorpus);
        }
        if target.is_empty() {
            return Err(FinderError::NoEnabledScheme);
        }

        let max_attempts = max_attempts.max(1);
        let timeout = Duration::from_millis(timeout_ms);
        let started = Instant::now();
        let mut rng = self.rng();
        let band = self.config.band_for(target.mean());
        let shape = PhraseShape::from_index(index);

        debug!(
            target = %target,
            min_words = band.min_words,
            max_words = band.max_words,
            max_attempts,
            timeout_ms,
            "search started"
        );

        let words = rng.gen_range(band.min_words..=band.max_words);
        let mut best = match self.attempt(target, index, &shape, words, &mut rng) {
            Attempt::Matched(phrase) => return Ok(matched(phrase, 1, started)),
            Attempt::Missed(approx) => approx,
        };

        for attempt in 1..max_attempts {
            if attempt % self.config.check_interval == 0 {
                if started.elapsed() >= timeout {
                    debug!(attempts = attempt, distance = best.distance, "search timed out");
                    return Ok(SearchReport {
                        outcome: SearchOutcome::TimedOut(best),
                        attempts: attempt,
                    });
                }
                tokio::task::yield_now().await;
            }

            let words = rng.gen_range(band.min_words..=band.max_words);
            match self.attempt(target, index, &shape, words, &mut rng) {
                Attempt::Matched(phrase) => return Ok(matched(phrase, attempt + 1, started)),
                Attempt::Missed(approx) => {
                    if approx.distance < best.distance {
                        trace!(attempt, distance = approx.distance, "closer approximation");
                        best = approx;
                    }
                }
            }
        }

        debug!(attempts = max_attempts, distance = best.distance, "search exhausted");
        Ok(SearchReport {
            outcome: SearchOutcome::Exhausted(best),
            attempts: max_attempts,
        })
    }

    fn rng(&self) -> ChaCha20Rng {
        match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        }
    }

    /// Build one phrase of `words` words (or `words + 1` with a pair closing)
    fn attempt(
        &self,
        target: &TargetVector,
        index: &CorpusIndex,
        shape: &PhraseShape,
        words: usize,
        rng: &mut ChaCha20Rng,
    ) -> Attempt {
        let mut chosen: Vec<RecordId> = Vec::with_capacity(words + 1);
        let mut sum = WeightVector::zero();

        for position in 0..words.saturating_sub(1) {
            let id = self.pick_interior(target, index, shape, &sum, position, words, rng);
            sum += index.record(id).weights;
            chosen.push(id);
        }

        if let Some(residual) = target.residual(&sum) {
            if let Some(id) = self.close_single(index, &residual, rng) {
                chosen.push(id);
                return Attempt::Matched(index.phrase(&chosen));
            }
            if let Some((first, second)) = self.close_pair(index, &residual, rng) {
                chosen.push(first);
                chosen.push(second);
                return Attempt::Matched(index.phrase(&chosen));
            }
        }

        let id = self.pick_any(index, chosen.is_empty(), rng);
        chosen.push(id);
        let phrase = index.phrase(&chosen);
        let distance = target.distance(&phrase.weights);
        if distance == 0 {
            return Attempt::Matched(phrase);
        }
        Attempt::Missed(Approximation { phrase, distance })
    }

    /// Choose a non-final word that keeps the running total on pace
    #[allow(clippy::too_many_arguments)]
    fn pick_interior(
        &self,
        target: &TargetVector,
        index: &CorpusIndex,
        shape: &PhraseShape,
        sum: &WeightVector,
        position: usize,
        words: usize,
        rng: &mut ChaCha20Rng,
    ) -> RecordId {
        let shaped = shape.pool_for(position, words);
        let pool = if !shaped.is_empty() && rng.gen_bool(self.config.shape_bias) {
            Some(shaped)
        } else {
            None
        };

        let share = (position + 1) as f64 / words as f64;
        let mut ideal = [0f64; SCHEME_COUNT];
        for scheme in target.enabled_schemes() {
            ideal[scheme.slot()] = target.values[scheme.slot()] as f64 * share;
        }

        for _ in 0..self.config.retry_budget {
            let id = sample(pool, index.len(), rng);
            let next = *sum + index.record(id).weights;
            if target.fits(&next) && self.on_pace(target, &next, &ideal) {
                return id;
            }
        }

        for _ in 0..self.config.retry_budget {
            let id = sample(pool, index.len(), rng);
            if target.fits(&(*sum + index.record(id).weights)) {
                return id;
            }
        }

        // the closing step will reject the overshoot
        rng.gen_range(0..index.len())
    }

    fn on_pace(&self, target: &TargetVector, next: &WeightVector, ideal: &[f64; SCHEME_COUNT]) -> bool {
        target.enabled_schemes().all(|scheme| {
            let slot = scheme.slot();
            next.0[slot] as f64 >= self.config.pace_floor[slot] * ideal[slot]
        })
    }

    /// Find one record whose weights equal every enabled residual
    fn close_single(
        &self,
        index: &CorpusIndex,
        residual: &TargetVector,
        rng: &mut ChaCha20Rng,
    ) -> Option<RecordId> {
        let bucket = index.smallest_bucket(residual)?;
        let hit = |id: &RecordId| residual.matches(&index.record(*id).weights);

        if bucket.len() <= self.config.exhaustive_scan_limit {
            return bucket.iter().copied().find(hit);
        }

        let start = rng.gen_range(0..bucket.len());
        (0..self.config.scan_window.min(bucket.len()))
            .map(|k| bucket[(start + k) % bucket.len()])
            .find(hit)
    }

    /// Find two records that together close every enabled residual
    ///
    /// First-word candidates come from a window over the corpus starting at a
    /// random offset; each one that fits under the residual gets a single-word
    /// lookup for what is left.
    fn close_pair(
        &self,
        index: &CorpusIndex,
        residual: &TargetVector,
        rng: &mut ChaCha20Rng,
    ) -> Option<(RecordId, RecordId)> {
        let len = index.len();
        let start = rng.gen_range(0..len);

        for k in 0..self.config.pair_window.min(len) {
            let first = (start + k) % len;
            let Some(rest) = residual.residual(&index.record(first).weights) else {
                continue;
            };
            if let Some(second) = self.close_single(index, &rest, rng) {
                return Some((first, second));
            }
        }
        None
    }

    /// Any word, preferring a random initial letter when the phrase is empty
    fn pick_any(&self, index: &CorpusIndex, first: bool, rng: &mut ChaCha20Rng) -> RecordId {
        if first && rng.gen_bool(self.config.first_letter_bias) {
            let letter = rng.gen_range(b'a'..=b'z') as char;
            if let Some(&id) = index.starting_with(letter).choose(rng) {
                return id;
            }
        }
        rng.gen_range(0..index.len())
    }
}

impl Default for PhraseSearch {
    fn default() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }
}

/// Uniform draw from `pool`, or from the whole corpus when there is none
fn sample(pool: Option<&[RecordId]>, len: usize, rng: &mut ChaCha20Rng) -> RecordId {
    match pool.and_then(|p| p.choose(rng)) {
        Some(&id) => id,
        None => rng.gen_range(0..len),
    }
}

fn matched(phrase: Phrase, attempts: usize, started: Instant) -> SearchReport {
    info!(
        phrase = %phrase,
        attempts,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "target matched"
    );
    SearchReport {
        outcome: SearchOutcome::Matched(phrase),
        attempts,
    }
}
