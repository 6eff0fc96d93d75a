//! Inverted index, TF-IDF ranking, boolean query evaluation and snippet
//! extraction.

pub mod boolean;
pub mod data;
pub mod query;
pub mod search;
pub mod snippet;
pub mod tfidf;

pub use data::IndexData;
pub use query::{Query, Token, TokenType};
pub use search::{SearchEngine, SearchResult};
pub use snippet::{DocCache, should_highlight};

/// Errors from loading, saving, or reading index-related files.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("index I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("index snapshot is malformed: {0}")]
    Serde(#[from] serde_json::Error),
}
