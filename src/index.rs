// Gematria Finder Corpus Index
// Precomputes word weights and buckets words by weight value per scheme

use crate::category::{CategoryClassifier, CategoryPools};
use crate::scheme::SchemeSet;
use crate::types::{Phrase, Scheme, TargetVector, WordRecord, SCHEME_COUNT};
use crate::weight::normalize;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::{debug, info};

/// Position of a record inside [`CorpusIndex::records`]
pub type RecordId = usize;

/// Immutable index over one corpus
///
/// Every record sits in exactly one bucket per scheme, keyed by its weight
/// under that scheme. The index is never updated in place; a new corpus means
/// a new index.
#[derive(Debug, Clone)]
pub struct CorpusIndex {
    /// Distinct normalized words with their weights
    records: Vec<WordRecord>,

    /// Per scheme: weight value → records with that weight
    buckets: [FxHashMap<u64, Vec<RecordId>>; SCHEME_COUNT],

    /// Records grouped by initial letter (a..=z)
    initials: [Vec<RecordId>; 26],

    /// Grammatical role pools for phrase shaping
    pools: CategoryPools,

    /// Hash of the word sequence the index was built from
    fingerprint: u64,
}

impl CorpusIndex {
    /// Build an index from a word list
    ///
    /// Words are normalized (lowercase `a`-`z` only). Entries that normalize to
    /// nothing and repeated words are skipped.
    ///
    /// # Example
    /// ```
    /// # use gematria_finder::index::CorpusIndex;
    /// # use gematria_finder::scheme::SchemeSet;
    /// # use gematria_finder::types::Scheme;
    /// let index = CorpusIndex::build(["cab", "abc"], &SchemeSet::standard());
    /// assert_eq!(index.bucket(Scheme::Primary, 6).len(), 2);
    /// ```
    pub fn build<I, S>(words: I, schemes: &SchemeSet) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hasher = FxHasher::default();
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut records = Vec::new();

        for word in words {
            let word = word.as_ref();
            word.hash(&mut hasher);

            let text = normalize(word);
            if text.is_empty() || !seen.insert(text.clone()) {
                continue;
            }
            let weights = schemes.weight_vector(&text);
            records.push(WordRecord { text, weights });
        }

        let mut buckets: [FxHashMap<u64, Vec<RecordId>>; SCHEME_COUNT] =
            std::array::from_fn(|_| FxHashMap::default());
        let mut initials: [Vec<RecordId>; 26] = std::array::from_fn(|_| Vec::new());

        for (id, record) in records.iter().enumerate() {
            for scheme in Scheme::ALL {
                buckets[scheme.slot()]
                    .entry(record.weights.get(scheme))
                    .or_default()
                    .push(id);
            }
            if let Some(first) = record.text.bytes().next() {
                initials[(first - b'a') as usize].push(id);
            }
        }

        let pools = CategoryClassifier::new().pools(&records);

        debug!(
            records = records.len(),
            primary_buckets = buckets[0].len(),
            quaternary_buckets = buckets[3].len(),
            "corpus index built"
        );

        Self {
            records,
            buckets,
            initials,
            pools,
            fingerprint: hasher.finish(),
        }
    }

    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    #[inline]
    pub fn record(&self, id: RecordId) -> &WordRecord {
        &self.records[id]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records whose weight under `scheme` equals `value`
    pub fn bucket(&self, scheme: Scheme, value: u64) -> &[RecordId] {
        self.buckets[scheme.slot()]
            .get(&value)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All buckets of one scheme
    pub fn buckets(&self, scheme: Scheme) -> impl Iterator<Item = (u64, &[RecordId])> + '_ {
        self.buckets[scheme.slot()]
            .iter()
            .map(|(value, ids)| (*value, ids.as_slice()))
    }

    /// Number of distinct weight values under one scheme
    pub fn bucket_count(&self, scheme: Scheme) -> usize {
        self.buckets[scheme.slot()].len()
    }

    /// Smallest bucket keyed by an enabled component of `target`
    ///
    /// Returns `None` when nothing is enabled or when some enabled component
    /// has no bucket at all, since no record could then match every component.
    pub fn smallest_bucket(&self, target: &TargetVector) -> Option<&[RecordId]> {
        let mut smallest: Option<&[RecordId]> = None;
        for scheme in target.enabled_schemes() {
            let bucket = self.bucket(scheme, target.values[scheme.slot()]);
            if bucket.is_empty() {
                return None;
            }
            if smallest.map_or(true, |s| bucket.len() < s.len()) {
                smallest = Some(bucket);
            }
        }
        smallest
    }

    /// Records starting with `letter`
    pub fn starting_with(&self, letter: char) -> &[RecordId] {
        if letter.is_ascii_lowercase() {
            &self.initials[(letter as u8 - b'a') as usize]
        } else {
            &[]
        }
    }

    pub fn pools(&self) -> &CategoryPools {
        &self.pools
    }

    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Assemble a phrase from record ids, summing their weights
    pub fn phrase(&self, ids: &[RecordId]) -> Phrase {
        let mut phrase = Phrase::default();
        for &id in ids {
            let record = self.record(id);
            phrase.words.push(record.text.clone());
            phrase.weights += record.weights;
        }
        phrase
    }

    /// Count of records per weight value under one scheme, sorted by value
    pub fn distribution(&self, scheme: Scheme) -> Vec<(u64, usize)> {
        let mut counts: Vec<(u64, usize)> = self
            .buckets(scheme)
            .map(|(value, ids)| (value, ids.len()))
            .collect();
        counts.sort_unstable();
        counts
    }
}

/// Order-sensitive hash of a word sequence, matching [`CorpusIndex::fingerprint`]
pub fn fingerprint<S: AsRef<str>>(words: &[S]) -> u64 {
    let mut hasher = FxHasher::default();
    for word in words {
        word.as_ref().hash(&mut hasher);
    }
    hasher.finish()
}

/// Holds the current index and rebuilds it only when the corpus changes
///
/// Readers receive an `Arc<CorpusIndex>`; a rebuild swaps the whole value and
/// leaves indices already handed out untouched. The fingerprint is only a fast
/// reject: a matching fingerprint is confirmed against the stored word list.
#[derive(Debug, Default)]
pub struct CorpusStore {
    schemes: SchemeSet,
    current: Option<Arc<CorpusIndex>>,
    /// Word list the current index was built from
    words: Vec<String>,
    rebuilds: usize,
}

impl CorpusStore {
    pub fn new(schemes: SchemeSet) -> Self {
        Self {
            schemes,
            current: None,
            words: Vec::new(),
            rebuilds: 0,
        }
    }

    /// Index for `words`, building it if the corpus differs from the last one
    pub fn load<S: AsRef<str>>(&mut self, words: &[S]) -> Arc<CorpusIndex> {
        let key = fingerprint(words);
        if let Some(current) = &self.current {
            if current.fingerprint() == key && self.same_words(words) {
                return Arc::clone(current);
            }
        }

        let index = Arc::new(CorpusIndex::build(words, &self.schemes));
        self.words = words.iter().map(|w| w.as_ref().to_string()).collect();
        self.rebuilds += 1;
        info!(
            words = words.len(),
            records = index.len(),
            rebuilds = self.rebuilds,
            "corpus index rebuilt"
        );
        self.current = Some(Arc::clone(&index));
        index
    }

    fn same_words<S: AsRef<str>>(&self, words: &[S]) -> bool {
        self.words.len() == words.len()
            && self.words.iter().zip(words).all(|(kept, w)| kept == w.as_ref())
    }

    /// Most recently built index, if any
    pub fn current(&self) -> Option<Arc<CorpusIndex>> {
        self.current.clone()
    }

    /// Number of builds performed so far
    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(words: &[&str]) -> CorpusIndex {
        CorpusIndex::build(words, &SchemeSet::standard())
    }

    #[test]
    fn test_index_creation() {
        let index = build(&["cab", "abc", "moon"]);
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }

    #[test]
    fn test_same_bucket_for_anagrams() {
        let index = build(&["cab", "abc"]);
        let bucket = index.bucket(Scheme::Primary, 6);
        assert_eq!(bucket.len(), 2);
        assert!(index.bucket(Scheme::Primary, 7).is_empty());
    }

    #[test]
    fn test_normalizes_and_dedups() {
        let index = build(&["Cab", "cab!", "", "42", "Moon"]);
        let texts: Vec<&str> = index.records().iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["cab", "moon"]);
    }

    #[test]
    fn test_every_record_in_one_bucket_per_scheme() {
        let index = build(&["the", "quiet", "moon", "rises", "over", "cab", "abc"]);
        for scheme in Scheme::ALL {
            let mut seen = vec![0usize; index.len()];
            for (value, ids) in index.buckets(scheme) {
                for &id in ids {
                    assert_eq!(index.record(id).weights.get(scheme), value);
                    seen[id] += 1;
                }
            }
            assert!(seen.iter().all(|count| *count == 1));
        }
    }

    #[test]
    fn test_smallest_bucket() {
        let index = build(&["cab", "abc", "ae"]);
        // "ae" shares the primary bucket but weighs 48 under reverse
        assert_eq!(index.bucket(Scheme::Primary, 6).len(), 3);
        let target = TargetVector::new()
            .with(Scheme::Primary, 6)
            .with(Scheme::Tertiary, 75);
        let bucket = index.smallest_bucket(&target).unwrap();
        assert_eq!(bucket.len(), 2);

        let missing = TargetVector::new().with(Scheme::Primary, 6).with(Scheme::Tertiary, 1);
        assert!(index.smallest_bucket(&missing).is_none());
        assert!(index.smallest_bucket(&TargetVector::new()).is_none());
    }

    #[test]
    fn test_starting_with() {
        let index = build(&["moon", "mist", "sun"]);
        assert_eq!(index.starting_with('m').len(), 2);
        assert_eq!(index.starting_with('s').len(), 1);
        assert!(index.starting_with('q').is_empty());
        assert!(index.starting_with('?').is_empty());
    }

    #[test]
    fn test_phrase_sums_weights() {
        let index = build(&["cab", "moon"]);
        let phrase = index.phrase(&[0, 1]);
        assert_eq!(phrase.text(), "cab moon");
        assert_eq!(phrase.weights, index.record(0).weights + index.record(1).weights);
    }

    #[test]
    fn test_store_rebuilds_on_change_only() {
        let mut store = CorpusStore::new(SchemeSet::standard());
        let first = store.load(&["cab", "abc"]);
        let again = store.load(&["cab", "abc"]);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(store.rebuilds(), 1);

        let other = store.load(&["moon"]);
        assert!(!Arc::ptr_eq(&first, &other));
        assert_eq!(store.rebuilds(), 2);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_store_rebuilds_on_fingerprint_collision() {
        let mut store = CorpusStore::new(SchemeSet::standard());
        let mut stale = build(&["moon"]);
        stale.fingerprint = fingerprint(&["cab", "abc"]);
        store.current = Some(Arc::new(stale));
        store.words = vec!["moon".to_string()];

        let index = store.load(&["cab", "abc"]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.record(0).text, "cab");
        assert_eq!(store.rebuilds(), 1);
    }
}
