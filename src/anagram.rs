// Gematria Finder Anagram Decomposer
// Splits a fixed letter multiset into corpus words

use crate::config::AnagramConfig;
use crate::types::{Decomposition, FinderError, WordRecord};
use crate::weight::letters;
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Multiset of the letters `a`-`z`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LetterBag {
    counts: [u32; 26],
    len: usize,
}

impl LetterBag {
    /// Letters of `text` after normalization
    pub fn from_text(text: &str) -> Self {
        let mut bag = Self::default();
        for ch in letters(text) {
            bag.counts[(ch as u8 - b'a') as usize] += 1;
            bag.len += 1;
        }
        bag
    }

    /// Total number of letters
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Multiplicity of one letter
    pub fn count(&self, letter: char) -> u32 {
        if letter.is_ascii_lowercase() {
            self.counts[(letter as u8 - b'a') as usize]
        } else {
            0
        }
    }

    /// Every letter of `other` is available here, with multiplicity
    pub fn contains(&self, other: &LetterBag) -> bool {
        self.counts.iter().zip(&other.counts).all(|(have, need)| have >= need)
    }

    /// Take the letters of `other` out; `None` if they are not all present
    pub fn take(&self, other: &LetterBag) -> Option<LetterBag> {
        let mut rest = *self;
        for (have, need) in rest.counts.iter_mut().zip(&other.counts) {
            *have = have.checked_sub(*need)?;
        }
        rest.len -= other.len;
        Some(rest)
    }
}

/// Randomized greedy anagram search with weighted restarts
pub struct AnagramDecomposer {
    config: AnagramConfig,
}

impl AnagramDecomposer {
    pub fn new(config: AnagramConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnagramConfig {
        &self.config
    }

    /// Assemble corpus words that use up the letters of `letters`
    ///
    /// Each attempt keeps drawing consumable words, weighted by
    /// `length ^ length_exponent`, until none fits. The first attempt that
    /// uses every letter is returned; otherwise the one with the fewest
    /// leftover letters.
    ///
    /// # Errors
    /// - [`FinderError::EmptyInput`] if `letters` holds no letters
    /// - [`FinderError::NoDecomposition`] if no corpus word fits at all
    ///
    /// # Example
    /// ```
    /// # use gematria_finder::anagram::AnagramDecomposer;
    /// # use gematria_finder::config::AnagramConfig;
    /// # use gematria_finder::index::CorpusIndex;
    /// # use gematria_finder::scheme::SchemeSet;
    /// let index = CorpusIndex::build(["cat"], &SchemeSet::standard());
    /// let decomposer = AnagramDecomposer::new(AnagramConfig::default());
    /// let result = decomposer.decompose("tac", index.records(), 1000).unwrap();
    /// assert_eq!(result.phrase, vec!["cat"]);
    /// assert_eq!(result.leftover, 0);
    /// ```
    pub fn decompose(
        &self,
        letters: &str,
        corpus: &[WordRecord],
        max_attempts: usize,
    ) -> Result<Decomposition, FinderError> {
        let bag = LetterBag::from_text(letters);
        if bag.is_empty() {
            return Err(FinderError::EmptyInput);
        }

        // only words formable from the full bag can ever be drawn
        let candidates: Vec<(&str, LetterBag)> = corpus
            .iter()
            .map(|record| (record.text.as_str(), LetterBag::from_text(&record.text)))
            .filter(|(_, word)| !word.is_empty() && bag.contains(word))
            .collect();
        if candidates.is_empty() {
            return Err(FinderError::NoDecomposition { letters: bag.len() });
        }

        let mut rng = match self.config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_entropy(),
        };
        let mut best: Option<Decomposition> = None;

        for attempt in 0..max_attempts.max(1) {
            let mut remaining = bag;
            let mut phrase = Vec::new();

            while !remaining.is_empty() {
                let consumable: Vec<&(&str, LetterBag)> = candidates
                    .iter()
                    .filter(|(_, word)| remaining.contains(word))
                    .collect();
                let weights = consumable
                    .iter()
                    .map(|(_, word)| (word.len() as f64).powf(self.config.length_exponent));
                let Ok(dist) = WeightedIndex::new(weights) else {
                    break;
                };

                let (text, word) = consumable[dist.sample(&mut rng)];
                let Some(rest) = remaining.take(word) else {
                    break;
                };
                remaining = rest;
                phrase.push(text.to_string());
            }

            let leftover = remaining.len();
            if leftover == 0 {
                debug!(attempts = attempt + 1, words = phrase.len(), "anagram complete");
                return Ok(Decomposition { phrase, leftover });
            }
            if best.as_ref().map_or(true, |b| leftover < b.leftover) {
                best = Some(Decomposition { phrase, leftover });
            }
        }

        debug!(leftover = best.as_ref().map(|b| b.leftover), "anagram attempts used up");
        best.ok_or(FinderError::NoDecomposition { letters: bag.len() })
    }
}

impl Default for AnagramDecomposer {
    fn default() -> Self {
        Self::new(AnagramConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::CorpusIndex;
    use crate::scheme::SchemeSet;

    fn records(words: &[&str]) -> Vec<WordRecord> {
        CorpusIndex::build(words, &SchemeSet::standard())
            .records()
            .to_vec()
    }

    fn seeded(seed: u64) -> AnagramDecomposer {
        AnagramDecomposer::new(AnagramConfig {
            seed: Some(seed),
            ..AnagramConfig::default()
        })
    }

    #[test]
    fn test_letter_bag() {
        let bag = LetterBag::from_text("Hello!");
        assert_eq!(bag.len(), 5);
        assert_eq!(bag.count('l'), 2);
        assert_eq!(bag.count('z'), 0);

        let he = LetterBag::from_text("he");
        assert!(bag.contains(&he));
        let rest = bag.take(&he).unwrap();
        assert_eq!(rest, LetterBag::from_text("llo"));
        assert!(rest.take(&he).is_none());
    }

    #[test]
    fn test_cat() {
        let corpus = records(&["cat"]);
        let result = seeded(1).decompose("cat", &corpus, 1000).unwrap();
        assert_eq!(result.phrase, vec!["cat"]);
        assert_eq!(result.leftover, 0);
    }

    #[test]
    fn test_exact_multiset() {
        let corpus = records(&["dormitory", "dirty", "room", "dirt", "my", "or", "to"]);
        let input = "dirty room";
        let result = seeded(7).decompose(input, &corpus, 1000).unwrap();
        assert_eq!(result.leftover, 0);

        let used = LetterBag::from_text(&result.phrase.concat());
        assert_eq!(used, LetterBag::from_text(input));
    }

    #[test]
    fn test_partial_returns_fewest_leftover() {
        let corpus = records(&["cat", "ca"]);
        let result = seeded(2).decompose("catz", &corpus, 50).unwrap();
        assert_eq!(result.phrase, vec!["cat"]);
        assert_eq!(result.leftover, 1);
    }

    #[test]
    fn test_empty_input() {
        let corpus = records(&["cat"]);
        assert_eq!(
            seeded(1).decompose(" 12 ", &corpus, 10),
            Err(FinderError::EmptyInput)
        );
    }

    #[test]
    fn test_nothing_consumable() {
        let corpus = records(&["dog"]);
        assert_eq!(
            seeded(1).decompose("cat", &corpus, 10),
            Err(FinderError::NoDecomposition { letters: 3 })
        );
    }
}
