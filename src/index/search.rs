//! Ranks documents by TF-IDF cosine similarity to a query, optionally
//! restricted to the document IDs a boolean query selects.

use std::collections::HashMap;
use std::sync::Mutex;

use super::boolean;
use super::data::IndexData;
use super::query;
use super::snippet::{self, DocCache};
use super::tfidf;

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub doc_id: u64,
    pub score: f64,
    pub snippet: String,
}

/// Precomputed TF-IDF vectors and norms for every document in an
/// [`IndexData`], built once and reused across searches.
pub struct SearchEngine {
    data: IndexData,
    doc_vectors: HashMap<u64, HashMap<String, f64>>,
    doc_norms: HashMap<u64, f64>,
}

impl SearchEngine {
    pub fn build(data: IndexData) -> Self {
        let mut doc_vectors: HashMap<u64, HashMap<String, f64>> = HashMap::new();

        for word in data.words().cloned().collect::<Vec<_>>() {
            if let Some(doc_ids) = data.postings(&word) {
                for &doc_id in doc_ids {
                    let weight = tfidf::tfidf(&data, &word, doc_id);
                    doc_vectors
                        .entry(doc_id)
                        .or_default()
                        .insert(word.clone(), weight);
                }
            }
        }

        let doc_norms = doc_vectors
            .iter()
            .map(|(&doc_id, weights)| {
                let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
                (doc_id, norm)
            })
            .collect();

        SearchEngine {
            data,
            doc_vectors,
            doc_norms,
        }
    }

    pub fn data(&self) -> &IndexData {
        &self.data
    }

    fn vectorize_query(&self, words: &[String]) -> HashMap<String, f64> {
        let mut counts: HashMap<&str, u64> = HashMap::new();
        for w in words {
            *counts.entry(w.as_str()).or_insert(0) += 1;
        }

        let mut vector = HashMap::new();
        for (word, count) in counts {
            if self.data.doc_count_for(word) == 0 {
                continue;
            }
            let tf = count as f64 / words.len() as f64;
            let idf = (self.data.total_docs() as f64 / self.data.doc_count_for(word) as f64).ln();
            vector.insert(word.to_string(), tf * idf);
        }
        vector
    }

    fn cosine_similarity(&self, query_vector: &HashMap<String, f64>, doc_id: u64) -> f64 {
        let empty = HashMap::new();
        let doc_vector = self.doc_vectors.get(&doc_id).unwrap_or(&empty);

        let mut dot_product = 0.0;
        let mut query_norm = 0.0;
        for (word, &query_weight) in query_vector {
            let doc_weight = doc_vector.get(word).copied().unwrap_or(0.0);
            dot_product += query_weight * doc_weight;
            query_norm += query_weight * query_weight;
        }
        query_norm = query_norm.sqrt();

        let doc_norm = self.doc_norms.get(&doc_id).copied().unwrap_or(0.0);
        if query_norm == 0.0 || doc_norm == 0.0 {
            return 0.0;
        }
        dot_product / (query_norm * doc_norm)
    }

    /// Parses `query_text` as a boolean expression to select candidate
    /// documents, then ranks those candidates by cosine similarity to the
    /// bag of query words and returns the top `num_results`, each carrying
    /// a snippet pulled from `docs` windowed to `window_size` words.
    /// Scoring runs concurrently across candidates; a mutex guards the
    /// shared result buffer.
    pub fn search(
        &self,
        query_text: &str,
        num_results: usize,
        window_size: usize,
        docs: &DocCache,
    ) -> Vec<SearchResult> {
        let parsed = query::parse(query_text);
        let candidates = boolean::evaluate(&self.data, &parsed);

        let words: Vec<String> = parsed
            .tokens
            .iter()
            .filter(|t| t.kind == query::TokenType::Text)
            .map(|t| t.text.clone())
            .collect();

        if words.is_empty() {
            return Vec::new();
        }

        let query_vector = self.vectorize_query(&words);
        let results = Mutex::new(Vec::new());

        std::thread::scope(|scope| {
            for &doc_id in &candidates {
                let results = &results;
                let query_vector = &query_vector;
                scope.spawn(move || {
                    let score = self.cosine_similarity(query_vector, doc_id);
                    if score > 0.0 {
                        results.lock().unwrap().push((doc_id, score));
                    }
                });
            }
        });

        let mut results = results.into_inner().unwrap();
        results.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap());
        results.truncate(num_results);

        results
            .into_iter()
            .map(|(doc_id, score)| {
                let text = docs.get(doc_id).unwrap_or_default();
                let snippet = snippet::select_snippet(&text, &words, window_size);
                SearchResult {
                    doc_id,
                    score,
                    snippet,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_engine() -> (SearchEngine, DocCache, std::path::PathBuf) {
        let mut data = IndexData::new();
        data.add(1, "кошк собак");
        data.add(2, "собак собак кошк");
        data.add(3, "птиц");

        let dir = std::env::temp_dir().join(format!(
            "itis-search-test-{}-{}",
            std::process::id(),
            rand_suffix()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("1.txt"), "кошк собак").unwrap();
        std::fs::write(dir.join("2.txt"), "собак собак кошк").unwrap();
        std::fs::write(dir.join("3.txt"), "птиц").unwrap();

        let docs = DocCache::new(&dir);
        (SearchEngine::build(data), docs, dir)
    }

    fn rand_suffix() -> u64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.subsec_nanos() as u64)
            .unwrap_or(0)
    }

    #[test]
    fn search_ranks_by_similarity_descending() {
        let (engine, docs, dir) = sample_engine();
        let results = engine.search("кошк", 10, 5, &docs);
        assert!(!results.is_empty());
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn search_respects_result_limit() {
        let (engine, docs, dir) = sample_engine();
        let results = engine.search("собак | кошк | птиц", 1, 5, &docs);
        assert_eq!(results.len(), 1);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_query_yields_no_results() {
        let (engine, docs, dir) = sample_engine();
        assert!(engine.search("и", 10, 5, &docs).is_empty());
        std::fs::remove_dir_all(&dir).ok();
    }
}
