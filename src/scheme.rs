// Gematria Finder Scheme Tables
// Maps the 26 lowercase letters to integer weights, one table per scheme

use crate::types::{Scheme, WeightVector, SCHEME_COUNT};

/// Letter-to-weight table for a single scheme
///
/// Only `a`-`z` carry weight; every other character weighs 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeTable {
    weights: [u32; 26],
}

impl SchemeTable {
    /// Build a table from explicit weights for `a`..=`z`
    pub const fn from_weights(weights: [u32; 26]) -> Self {
        Self { weights }
    }

    /// a=1, b=2, …, z=26
    pub fn ordinal() -> Self {
        Self::from_fn(|idx| idx + 1)
    }

    /// a=6, b=12, …, z=156
    pub fn english() -> Self {
        Self::from_fn(|idx| (idx + 1) * 6)
    }

    /// a=26, b=25, …, z=1
    pub fn reverse() -> Self {
        Self::from_fn(|idx| 26 - idx)
    }

    /// Latin-alphabet Jewish gematria
    ///
    /// - a..i → 1..9
    /// - k..s → 10..90
    /// - t, u, x, y, z → 100..500
    /// - j=600, v=700, w=900
    pub fn jewish() -> Self {
        Self::from_weights([
            1, 2, 3, 4, 5, 6, 7, 8, 9, // a-i
            600, // j
            10, 20, 30, 40, 50, 60, 70, 80, 90, // k-s
            100, 200, // t-u
            700, 900, // v-w
            300, 400, 500, // x-z
        ])
    }

    /// The standard table that fills a scheme slot
    pub fn standard(scheme: Scheme) -> Self {
        match scheme {
            Scheme::Primary => Self::ordinal(),
            Scheme::Secondary => Self::english(),
            Scheme::Tertiary => Self::reverse(),
            Scheme::Quaternary => Self::jewish(),
        }
    }

    fn from_fn(f: impl Fn(u32) -> u32) -> Self {
        let mut weights = [0u32; 26];
        for (idx, weight) in weights.iter_mut().enumerate() {
            *weight = f(idx as u32);
        }
        Self { weights }
    }

    /// Weight of a character; 0 unless it is `a`-`z`
    #[inline]
    pub fn weight_of(&self, ch: char) -> u32 {
        if ch.is_ascii_lowercase() {
            self.weights[(ch as u8 - b'a') as usize]
        } else {
            0
        }
    }

    /// Raw weights for `a`..=`z`
    pub fn weights(&self) -> &[u32; 26] {
        &self.weights
    }
}

/// One table per scheme slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeSet {
    tables: [SchemeTable; SCHEME_COUNT],
}

impl SchemeSet {
    /// Ordinal, english, reverse and jewish tables
    pub fn standard() -> Self {
        Self {
            tables: Scheme::ALL.map(SchemeTable::standard),
        }
    }

    /// Replace the table in one slot
    pub fn with_table(mut self, scheme: Scheme, table: SchemeTable) -> Self {
        self.tables[scheme.slot()] = table;
        self
    }

    pub fn table(&self, scheme: Scheme) -> &SchemeTable {
        &self.tables[scheme.slot()]
    }

    /// Totals of `text` under every scheme
    ///
    /// Same normalization as [`crate::weight::weigh`].
    pub fn weight_vector(&self, text: &str) -> WeightVector {
        let mut totals = [0u64; SCHEME_COUNT];
        for ch in crate::weight::letters(text) {
            for (total, table) in totals.iter_mut().zip(&self.tables) {
                *total += table.weight_of(ch) as u64;
            }
        }
        WeightVector(totals)
    }
}

impl Default for SchemeSet {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordinal_table() {
        let table = SchemeTable::ordinal();
        assert_eq!(table.weight_of('a'), 1);
        assert_eq!(table.weight_of('m'), 13);
        assert_eq!(table.weight_of('z'), 26);
    }

    #[test]
    fn test_english_and_reverse_tables() {
        assert_eq!(SchemeTable::english().weight_of('a'), 6);
        assert_eq!(SchemeTable::english().weight_of('z'), 156);
        assert_eq!(SchemeTable::reverse().weight_of('a'), 26);
        assert_eq!(SchemeTable::reverse().weight_of('z'), 1);
    }

    #[test]
    fn test_jewish_table() {
        let table = SchemeTable::jewish();
        assert_eq!(table.weight_of('i'), 9);
        assert_eq!(table.weight_of('j'), 600);
        assert_eq!(table.weight_of('k'), 10);
        assert_eq!(table.weight_of('s'), 90);
        assert_eq!(table.weight_of('t'), 100);
        assert_eq!(table.weight_of('v'), 700);
        assert_eq!(table.weight_of('w'), 900);
        assert_eq!(table.weight_of('z'), 500);
    }

    #[test]
    fn test_non_letters_weigh_nothing() {
        let table = SchemeTable::ordinal();
        assert_eq!(table.weight_of('A'), 0);
        assert_eq!(table.weight_of('7'), 0);
        assert_eq!(table.weight_of('é'), 0);
    }

    #[test]
    fn test_weight_vector() {
        let set = SchemeSet::standard();
        let weights = set.weight_vector("Cab!");
        assert_eq!(weights, WeightVector([6, 36, 75, 6]));
    }

    #[test]
    fn test_custom_table_slot() {
        let set = SchemeSet::standard().with_table(Scheme::Tertiary, SchemeTable::from_weights([1; 26]));
        assert_eq!(set.weight_vector("hello").get(Scheme::Tertiary), 5);
    }
}
