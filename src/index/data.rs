//! The inverted index's raw storage: postings lists, per-document term
//! counts and lengths, plus JSON persistence in the layout a reader of the
//! snapshot file would expect (`word2doc_ids`, `word2doc_counts`,
//! `doc_lengths`, `total_docs`).

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::IndexError;

/// Accumulated postings for one corpus. Built incrementally via [`add`],
/// snapshotted to disk via [`save`]/[`load`].
#[derive(Debug, Default)]
pub struct IndexData {
    word_to_doc_ids: HashMap<String, HashSet<u64>>,
    word_to_doc_counts: HashMap<String, HashMap<u64, u64>>,
    doc_lengths: HashMap<u64, u64>,
    doc_ids: HashSet<u64>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    word2doc_ids: HashMap<String, Vec<u64>>,
    word2doc_counts: HashMap<String, HashMap<u64, u64>>,
    doc_lengths: HashMap<u64, u64>,
    total_docs: usize,
}

impl IndexData {
    pub fn new() -> Self {
        IndexData::default()
    }

    /// Indexes the already-normalized `text` of document `doc_id`. A
    /// document added twice contributes its word counts again but is only
    /// counted once towards `total_docs`.
    pub fn add(&mut self, doc_id: u64, text: &str) {
        let words: Vec<&str> = text.split_whitespace().collect();
        self.doc_ids.insert(doc_id);
        self.doc_lengths.insert(doc_id, words.len() as u64);

        let mut counts: HashMap<&str, u64> = HashMap::new();
        for word in &words {
            *counts.entry(word).or_insert(0) += 1;
        }

        for (word, count) in counts {
            self.word_to_doc_ids
                .entry(word.to_string())
                .or_default()
                .insert(doc_id);
            self.word_to_doc_counts
                .entry(word.to_string())
                .or_default()
                .insert(doc_id, count);
        }
    }

    pub fn total_docs(&self) -> usize {
        self.doc_ids.len()
    }

    pub fn doc_ids(&self) -> &HashSet<u64> {
        &self.doc_ids
    }

    pub fn doc_length(&self, doc_id: u64) -> u64 {
        self.doc_lengths.get(&doc_id).copied().unwrap_or(0)
    }

    pub fn postings(&self, word: &str) -> Option<&HashSet<u64>> {
        self.word_to_doc_ids.get(word)
    }

    pub fn doc_count_for(&self, word: &str) -> usize {
        self.word_to_doc_ids.get(word).map_or(0, |s| s.len())
    }

    pub fn term_count(&self, word: &str, doc_id: u64) -> u64 {
        self.word_to_doc_counts
            .get(word)
            .and_then(|m| m.get(&doc_id))
            .copied()
            .unwrap_or(0)
    }

    pub fn words(&self) -> impl Iterator<Item = &String> {
        self.word_to_doc_ids.keys()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), IndexError> {
        let word2doc_ids = self
            .word_to_doc_ids
            .iter()
            .map(|(word, ids)| {
                let mut ids: Vec<u64> = ids.iter().copied().collect();
                ids.sort_unstable();
                (word.clone(), ids)
            })
            .collect();

        let snapshot = Snapshot {
            word2doc_ids,
            word2doc_counts: self.word_to_doc_counts.clone(),
            doc_lengths: self.doc_lengths.clone(),
            total_docs: self.doc_ids.len(),
        };

        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &snapshot)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, IndexError> {
        let file = std::fs::File::open(path)?;
        let snapshot: Snapshot = serde_json::from_reader(file)?;

        let word_to_doc_ids = snapshot
            .word2doc_ids
            .into_iter()
            .map(|(word, ids)| (word, ids.into_iter().collect()))
            .collect();

        let doc_ids = snapshot.doc_lengths.keys().copied().collect();

        Ok(IndexData {
            word_to_doc_ids,
            word_to_doc_counts: snapshot.word2doc_counts,
            doc_lengths: snapshot.doc_lengths,
            doc_ids,
        })
    }
}
