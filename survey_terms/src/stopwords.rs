use std::collections::HashSet;

use lazy_static::lazy_static;

/// General English stopwords, as written (some with apostrophes).
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "can't", "cannot", "com", "could", "couldn't", "did", "didn't", "do",
    "does", "doesn't", "doing", "don", "don't", "down", "during", "each", "else", "ever", "etc",
    "few", "for", "from", "further", "had", "hadn't", "has", "hasn't", "have", "haven't", "having",
    "he", "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself", "him", "himself",
    "his", "how", "how's", "http", "i", "i'd", "i'll", "i'm", "i've", "if", "in", "into", "is",
    "isn't", "it", "it's", "its", "itself", "just", "k", "let's", "like", "me", "more", "most",
    "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "r", "same", "shall",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "whats", "when", "when's",
    "where", "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "www", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

/// Organisation name fragments and filler verbs that dominate event feedback.
const DOMAIN: &[&str] = &[
    "helps", "feel", "canary", "wharf", "plus", "know", "also", "keeps", "make", "let", "lot",
    "lots",
];

/// Contraction endings whose letters-only form is not an ordinary word.
/// `'ll` and `'d` are left out: `we'll` and `she'd` would fold to `well` and `shed`.
const FOLDED_SUFFIXES: &[&str] = &["n't", "'s", "'re", "'ve", "'m"];

lazy_static! {
    static ref DEFAULT_STOPWORDS: StopwordSet = StopwordSet::default_set();
}

/// A case-insensitive set of words excluded from the frequency table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn default_set() -> StopwordSet {
        let mut words: HashSet<String> = HashSet::new();
        for w in ENGLISH.iter().chain(DOMAIN.iter()) {
            words.insert(w.to_string());
            if FOLDED_SUFFIXES.iter().any(|suffix| w.ends_with(suffix)) {
                words.insert(fold(w));
            }
        }
        StopwordSet { words }
    }

    pub fn with_extra(mut self, extra: &[String]) -> StopwordSet {
        for w in extra {
            let w = w.trim().to_lowercase();
            if !w.is_empty() {
                insert_word(&mut self.words, w);
            }
        }
        self
    }

    /// Expects a lowercase word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn insert_word(words: &mut HashSet<String>, w: String) {
    let folded = fold(&w);
    if folded != w && !folded.is_empty() {
        words.insert(folded);
    }
    words.insert(w);
}

fn fold(word: &str) -> String {
    word.chars().filter(|c| c.is_ascii_lowercase()).collect()
}

/// The process-wide default set.
pub fn default_stopwords() -> &'static StopwordSet {
    &*DEFAULT_STOPWORDS
}

pub fn is_stopword(word: &str) -> bool {
    DEFAULT_STOPWORDS.contains(&word.to_lowercase())
}
