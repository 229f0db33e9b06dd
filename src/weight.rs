// Gematria Finder Weight Calculator
// Reduces text to a per-letter breakdown and total under one scheme

use crate::scheme::SchemeTable;

/// Total weight of a text and the value of each letter that contributed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Weighing {
    pub total: u64,
    /// One entry per surviving letter, in input order
    pub breakdown: Vec<(char, u32)>,
}

/// Lowercased `a`-`z` letters of `text`, in order
///
/// Digits, punctuation, whitespace and non-ASCII letters are dropped.
pub fn letters(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
}

/// Normalized form of `text`: lowercase `a`-`z` only
pub fn normalize(text: &str) -> String {
    letters(text).collect()
}

/// Weigh `text` under a single scheme
///
/// Never fails; the empty string (or one without letters) weighs 0.
///
/// # Example
/// ```
/// # use gematria_finder::scheme::SchemeTable;
/// # use gematria_finder::weight::weigh;
/// let weighing = weigh("Cab", &SchemeTable::ordinal());
/// assert_eq!(weighing.total, 6);
/// assert_eq!(weighing.breakdown, vec![('c', 3), ('a', 1), ('b', 2)]);
/// ```
pub fn weigh(text: &str, table: &SchemeTable) -> Weighing {
    let breakdown: Vec<(char, u32)> = letters(text).map(|ch| (ch, table.weight_of(ch))).collect();
    let total = breakdown.iter().map(|(_, value)| *value as u64).sum();
    Weighing { total, breakdown }
}

/// Total only, without building the breakdown
pub fn total(text: &str, table: &SchemeTable) -> u64 {
    letters(text).map(|ch| table.weight_of(ch) as u64).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weigh_cab() {
        let weighing = weigh("cab", &SchemeTable::ordinal());
        assert_eq!(weighing.total, 6);
        assert_eq!(weighing.breakdown, vec![('c', 3), ('a', 1), ('b', 2)]);
    }

    #[test]
    fn test_non_letters_vanish() {
        let weighing = weigh("C-a b 42!", &SchemeTable::ordinal());
        assert_eq!(weighing.total, 6);
        assert_eq!(weighing.breakdown.len(), 3);
    }

    #[test]
    fn test_empty_text() {
        let weighing = weigh("", &SchemeTable::jewish());
        assert_eq!(weighing.total, 0);
        assert!(weighing.breakdown.is_empty());

        assert_eq!(weigh("123 ?!", &SchemeTable::ordinal()).total, 0);
    }

    #[test]
    fn test_total_matches_breakdown_sum() {
        let table = SchemeTable::jewish();
        for text in ["Hello, World", "zebra", "Quiet JAZZ", "x"] {
            let weighing = weigh(text, &table);
            let sum: u64 = weighing.breakdown.iter().map(|(_, v)| *v as u64).sum();
            assert_eq!(weighing.total, sum);
            assert_eq!(total(text, &table), sum);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("Don't Stop-2"), "dontstop");
        assert_eq!(normalize("Ünïcode"), "ncode");
    }
}
