//! TF / IDF / TF-IDF arithmetic over an [`IndexData`] snapshot, with no
//! smoothing: `idf(word) = ln(total_docs / doc_freq(word))`.

use super::data::IndexData;

pub fn term_frequency(data: &IndexData, word: &str, doc_id: u64) -> f64 {
    let length = data.doc_length(doc_id);
    if length == 0 {
        return 0.0;
    }
    data.term_count(word, doc_id) as f64 / length as f64
}

pub fn inverse_doc_frequency(data: &IndexData, word: &str) -> f64 {
    let doc_freq = data.doc_count_for(word);
    if doc_freq == 0 {
        return 0.0;
    }
    (data.total_docs() as f64 / doc_freq as f64).ln()
}

pub fn tfidf(data: &IndexData, word: &str, doc_id: u64) -> f64 {
    term_frequency(data, word, doc_id) * inverse_doc_frequency(data, word)
}
