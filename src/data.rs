// Data loader for the embedded corpus
// The built-in word list is compiled into the binary

use std::path::Path;

/// Embedded word list, one word per line
pub const WORDS_DATA: &str = include_str!("../data/words.txt");

/// Data loader utility
pub struct DataLoader;

impl DataLoader {
    /// Words of the built-in corpus, in file order
    pub fn words() -> Vec<&'static str> {
        parse_word_list(WORDS_DATA)
    }

    /// Read a word list from disk using the same line rules as the built-in one
    pub fn words_from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Vec<String>> {
        let raw = std::fs::read_to_string(path)?;
        Ok(parse_word_list(&raw).into_iter().map(str::to_string).collect())
    }

    /// Get embedded data info
    pub fn info() -> DataInfo {
        DataInfo {
            word_count: Self::words().len(),
            bytes: WORDS_DATA.len(),
        }
    }
}

/// Trimmed non-empty lines, skipping `#` comments
fn parse_word_list(raw: &str) -> Vec<&str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
}

/// Information about embedded data
#[derive(Debug, Clone)]
pub struct DataInfo {
    /// Number of words in the built-in list
    pub word_count: usize,
    /// Size of the embedded file in bytes
    pub bytes: usize,
}
