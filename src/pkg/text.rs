//! Normalization pipeline shared by the crawler's normalizer stage and the
//! query parser: lowercase, extract Cyrillic word runs, drop Russian
//! stop-words, stem with a Russian Snowball stemmer.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

static CYRILLIC_WORD: OnceLock<Regex> = OnceLock::new();
static STOP_WORDS: OnceLock<HashSet<String>> = OnceLock::new();

fn cyrillic_word_regex() -> &'static Regex {
    CYRILLIC_WORD.get_or_init(|| Regex::new(r"[а-яА-ЯёЁ]+").expect("static regex is valid"))
}

fn stop_words() -> &'static HashSet<String> {
    STOP_WORDS.get_or_init(|| {
        stop_words::get(stop_words::LANGUAGE::Russian)
            .into_iter()
            .collect()
    })
}

/// Extracts lowercase Cyrillic word runs from `text`, in order.
pub fn tokenize_cyrillic(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    cyrillic_word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Drops Russian stop-words from an already-tokenized word stream.
pub fn remove_stopwords(words: Vec<String>) -> Vec<String> {
    let stop = stop_words();
    words.into_iter().filter(|w| !stop.contains(w)).collect()
}

/// Stems each word with the Russian Snowball algorithm.
pub fn stem_words(words: Vec<String>) -> Vec<String> {
    let stemmer = Stemmer::create(Algorithm::Russian);
    words
        .into_iter()
        .map(|w| stemmer.stem(&w).into_owned())
        .collect()
}

/// Full normalization pipeline: tokenize, drop stop-words, stem, rejoin
/// with single spaces. Used identically by the normalizer stage (on
/// document text) and the query parser (on each `TEXT` token).
pub fn normalize_string(s: &str) -> String {
    let words = tokenize_cyrillic(s);
    let words = remove_stopwords(words);
    let words = stem_words(words);
    words.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_extracts_only_cyrillic_runs() {
        let words = tokenize_cyrillic("Hello Авито — интернет-магазин 2024!");
        assert_eq!(words, vec!["авито", "интернет", "магазин"]);
    }

    #[test]
    fn normalize_string_is_idempotent_on_already_normalized_input() {
        let once = normalize_string("авито и французский язык");
        let twice = normalize_string(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn remove_stopwords_drops_common_conjunctions() {
        let words = tokenize_cyrillic("кошка и собака");
        let filtered = remove_stopwords(words);
        assert!(!filtered.contains(&"и".to_string()));
        assert!(filtered.contains(&"кошка".to_string()));
    }
}
