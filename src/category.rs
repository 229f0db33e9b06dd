// Gematria Finder Category Classifier
// Sorts words into coarse grammatical roles for phrase shaping

use crate::index::RecordId;
use crate::types::WordRecord;
use rustc_hash::FxHashSet;
use std::fmt;

/// Coarse grammatical role of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordCategory {
    Article,
    Conjunction,
    Preposition,
    Pronoun,
    Noun,
    Verb,
    Adjective,
}

impl WordCategory {
    pub const ALL: [WordCategory; 7] = [
        WordCategory::Article,
        WordCategory::Conjunction,
        WordCategory::Preposition,
        WordCategory::Pronoun,
        WordCategory::Noun,
        WordCategory::Verb,
        WordCategory::Adjective,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }

    /// Curated member list
    fn members(self) -> &'static [&'static str] {
        match self {
            WordCategory::Article => ARTICLES,
            WordCategory::Conjunction => CONJUNCTIONS,
            WordCategory::Preposition => PREPOSITIONS,
            WordCategory::Pronoun => PRONOUNS,
            WordCategory::Noun => NOUNS,
            WordCategory::Verb => VERBS,
            WordCategory::Adjective => ADJECTIVES,
        }
    }
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WordCategory::Article => write!(f, "Article"),
            WordCategory::Conjunction => write!(f, "Conjunction"),
            WordCategory::Preposition => write!(f, "Preposition"),
            WordCategory::Pronoun => write!(f, "Pronoun"),
            WordCategory::Noun => write!(f, "Noun"),
            WordCategory::Verb => write!(f, "Verb"),
            WordCategory::Adjective => write!(f, "Adjective"),
        }
    }
}

const ARTICLES: &[&str] = &["a", "an", "the"];

const CONJUNCTIONS: &[&str] = &[
    "and", "but", "or", "nor", "for", "yet", "so", "because", "although", "while", "if", "when",
    "as", "since", "unless", "until", "though", "whereas", "once",
];

const PREPOSITIONS: &[&str] = &[
    "about", "above", "across", "after", "against", "along", "among", "around", "at", "before",
    "behind", "below", "beneath", "beside", "between", "beyond", "by", "down", "during", "from",
    "in", "inside", "into", "near", "of", "off", "on", "onto", "out", "over", "past", "through",
    "to", "toward", "under", "up", "upon", "with", "within", "without",
];

const PRONOUNS: &[&str] = &[
    "i", "me", "my", "mine", "you", "your", "yours", "he", "him", "his", "she", "her", "hers",
    "it", "its", "we", "us", "our", "ours", "they", "them", "their", "this", "that", "these",
    "those", "who", "whom", "whose", "which", "what", "someone", "everyone", "nobody", "nothing",
    "something", "everything",
];

const NOUNS: &[&str] = &[
    "angel", "apple", "arrow", "autumn", "bird", "blood", "boat", "bone", "bread", "bridge",
    "candle", "castle", "child", "city", "cloud", "crown", "dawn", "desert", "door", "dream",
    "earth", "echo", "field", "fire", "flame", "flower", "forest", "garden", "ghost", "gold",
    "heart", "home", "horse", "island", "key", "king", "lamp", "light", "lion", "mirror",
    "moon", "mountain", "music", "night", "ocean", "palace", "path", "queen", "rain", "river",
    "road", "rose", "sea", "shadow", "silver", "sky", "snow", "song", "soul", "star", "stone",
    "storm", "stream", "sun", "sword", "temple", "thunder", "tower", "tree", "truth", "valley",
    "voice", "water", "wind", "window", "wing", "winter", "wolf", "word", "world",
];

const VERBS: &[&str] = &[
    "awaken", "become", "begin", "bend", "bless", "break", "breathe", "bring", "build", "burn",
    "call", "carry", "climb", "come", "dance", "dive", "draw", "drift", "drink", "fall", "fly",
    "follow", "gather", "give", "glow", "grow", "guard", "hear", "hide", "hold", "hunt", "keep",
    "know", "laugh", "lead", "learn", "listen", "live", "love", "make", "move", "open", "pray",
    "reach", "remember", "return", "rise", "run", "see", "seek", "shine", "sing", "sleep",
    "speak", "stand", "stay", "swim", "take", "teach", "tell", "travel", "turn", "wait", "wake",
    "walk", "wander", "watch", "weave", "whisper", "write",
];

const ADJECTIVES: &[&str] = &[
    "ancient", "blue", "bold", "brave", "bright", "broken", "calm", "clear", "cold", "dark",
    "deep", "distant", "divine", "early", "empty", "endless", "eternal", "faint", "free", "gentle",
    "golden", "great", "green", "hidden", "holy", "hollow", "kind", "last", "light", "little",
    "lonely", "lost", "loud", "lucky", "mighty", "new", "noble", "old", "pale", "proud", "pure", "quick",
    "quiet", "rare", "red", "sacred", "secret", "silent", "simple", "small", "soft", "strange",
    "strong", "sweet", "swift", "tall", "tender", "true", "warm", "white", "wild", "wise",
    "young",
];

/// Words of a list sorted by role; a word may appear under several roles
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Categories {
    pub articles: Vec<String>,
    pub conjunctions: Vec<String>,
    pub prepositions: Vec<String>,
    pub pronouns: Vec<String>,
    pub nouns: Vec<String>,
    pub verbs: Vec<String>,
    pub adjectives: Vec<String>,
}

impl Categories {
    /// Words filed under one role
    pub fn get(&self, category: WordCategory) -> &[String] {
        match category {
            WordCategory::Article => &self.articles,
            WordCategory::Conjunction => &self.conjunctions,
            WordCategory::Preposition => &self.prepositions,
            WordCategory::Pronoun => &self.pronouns,
            WordCategory::Noun => &self.nouns,
            WordCategory::Verb => &self.verbs,
            WordCategory::Adjective => &self.adjectives,
        }
    }

    fn get_mut(&mut self, category: WordCategory) -> &mut Vec<String> {
        match category {
            WordCategory::Article => &mut self.articles,
            WordCategory::Conjunction => &mut self.conjunctions,
            WordCategory::Preposition => &mut self.prepositions,
            WordCategory::Pronoun => &mut self.pronouns,
            WordCategory::Noun => &mut self.nouns,
            WordCategory::Verb => &mut self.verbs,
            WordCategory::Adjective => &mut self.adjectives,
        }
    }
}

/// Record positions per role, computed once per corpus index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPools {
    pools: [Vec<RecordId>; 7],
}

impl CategoryPools {
    /// Records filed under one role
    pub fn get(&self, category: WordCategory) -> &[RecordId] {
        &self.pools[category.slot()]
    }

    /// Sorted, deduplicated union of several roles
    pub fn union(&self, categories: &[WordCategory]) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = categories
            .iter()
            .flat_map(|c| self.get(*c).iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Static role lookup against curated word lists
///
/// Membership is fixed; the corpus only decides which members are present.
#[derive(Debug, Clone)]
pub struct CategoryClassifier {
    sets: [FxHashSet<&'static str>; 7],
}

impl CategoryClassifier {
    /// Create a classifier over the curated lists
    pub fn new() -> Self {
        Self {
            sets: WordCategory::ALL.map(|c| c.members().iter().copied().collect()),
        }
    }

    /// Whether `word` belongs to `category`
    pub fn is(&self, word: &str, category: WordCategory) -> bool {
        self.sets[category.slot()].contains(word)
    }

    /// Every role of a single word, in declaration order
    pub fn categories_of(&self, word: &str) -> Vec<WordCategory> {
        WordCategory::ALL
            .into_iter()
            .filter(|c| self.is(word, *c))
            .collect()
    }

    /// Sort a word list into roles; unknown words are left out
    pub fn classify<I, S>(&self, words: I) -> Categories
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut categories = Categories::default();
        for word in words {
            let word = word.as_ref();
            for category in WordCategory::ALL {
                if self.is(word, category) {
                    categories.get_mut(category).push(word.to_string());
                }
            }
        }
        categories
    }

    /// Role pools over index records
    pub fn pools(&self, records: &[WordRecord]) -> CategoryPools {
        let mut pools = CategoryPools::default();
        for (id, record) in records.iter().enumerate() {
            for category in WordCategory::ALL {
                if self.is(&record.text, category) {
                    pools.pools[category.slot()].push(id);
                }
            }
        }
        pools
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
