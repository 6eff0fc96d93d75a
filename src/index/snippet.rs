//! Extractive snippets: pick the window of a document's raw text that
//! covers the most distinct query words, via a greedy sliding-window scan.
//! Raw text is read from disk lazily and cached behind a reader/writer
//! lock, since the same document is frequently re-shown across queries in
//! one search session.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::RwLock;

use super::IndexError;

/// Returns the sub-slice of `words` (as a joined string) that covers the
/// most distinct entries of `query_words`, scanning windows of
/// `window_size` words. Ties keep the earliest window. Falls back to the
/// first `window_size` words if no window covers anything.
pub fn select_snippet(doc_text: &str, query_words: &[String], window_size: usize) -> String {
    let words: Vec<&str> = doc_text.split_whitespace().collect();
    if words.is_empty() {
        return String::new();
    }
    if query_words.is_empty() || words.len() <= window_size {
        return words.join(" ");
    }

    let query_set: HashSet<&str> = query_words.iter().map(|s| s.as_str()).collect();

    let mut best_start = 0;
    let mut best_coverage = 0usize;

    for start in 0..=(words.len() - window_size) {
        let window = &words[start..start + window_size];
        let covered: HashSet<&str> = window
            .iter()
            .copied()
            .filter(|w| query_set.contains(w))
            .collect();

        if covered.len() > best_coverage {
            best_coverage = covered.len();
            best_start = start;
        }
    }

    words[best_start..best_start + window_size].join(" ")
}

/// Lazily-loaded cache of a document's raw text, read from
/// `<raw_dir>/<doc_id>.txt`.
pub struct DocCache {
    raw_dir: PathBuf,
    cache: RwLock<HashMap<u64, String>>,
}

impl DocCache {
    pub fn new(raw_dir: impl AsRef<std::path::Path>) -> Self {
        DocCache {
            raw_dir: raw_dir.as_ref().to_path_buf(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, doc_id: u64) -> Result<String, IndexError> {
        if let Some(text) = self.cache.read().unwrap().get(&doc_id) {
            return Ok(text.clone());
        }

        let path = self.doc_path(doc_id);
        let text = std::fs::read_to_string(&path)?;
        self.cache.write().unwrap().insert(doc_id, text.clone());
        Ok(text)
    }

    fn doc_path(&self, doc_id: u64) -> PathBuf {
        self.raw_dir.join(format!("{doc_id}.txt"))
    }
}

/// Predicate used by the terminal highlighter: a displayed word should be
/// highlighted if it equals a query word, or either one properly contains
/// the other and the containing comparison is long enough (>3 chars) to
/// avoid highlighting on short, noisy substrings.
pub fn should_highlight(word: &str, query_word: &str) -> bool {
    word == query_word
        || (query_word.len() > 3 && word.contains(query_word))
        || (word.len() > 3 && query_word.contains(word))
}
