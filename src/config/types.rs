//! Configuration type definitions, deserialised from TOML.

use std::path::PathBuf;

use serde::Deserialize;

/// Filesystem layout the crawler writes its output under.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct CrawlPaths {
    /// Directory raw fetched HTML is written to, one file per document ID.
    pub raw_dir: PathBuf,
    /// Directory normalized document text is written to.
    pub processed_dir: PathBuf,
    /// JSON snapshot of the built inverted index.
    pub index_file: PathBuf,
    /// `<id> <url>` per line, used to resume a crawl from stored documents.
    pub id_map_file: PathBuf,
}

/// Settings for the `crawl` subcommand.
#[derive(Clone, Debug, Deserialize)]
pub struct CrawlConfig {
    /// Links the generator seeds the frontier with.
    #[serde(default)]
    pub seed_urls: Vec<String>,

    /// Crawl stops once this many documents have been accepted.
    pub max_documents: u64,

    /// Documents with fewer whitespace-separated words than this are
    /// marked failed by the size filter.
    #[serde(default = "default_min_words")]
    pub min_words: usize,

    /// Minimum fraction of Cyrillic characters a document's extracted text
    /// must have to pass the language filter.
    #[serde(default = "default_min_cyrillic_ratio")]
    pub min_cyrillic_ratio: f64,

    /// Bounded channel capacity used between every pair of pipeline stages.
    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    /// Number of concurrent fetch workers.
    #[serde(default = "default_fetch_workers")]
    pub fetch_workers: usize,

    pub paths: CrawlPaths,
}

/// Settings for the `search` subcommand.
#[derive(Clone, Debug, Deserialize)]
pub struct SearchConfig {
    /// JSON snapshot written by a prior crawl.
    pub index_file: PathBuf,
    /// Directory holding each document's raw text, for snippet extraction.
    pub raw_dir: PathBuf,

    #[serde(default = "default_top")]
    pub top: usize,
    #[serde(default = "default_window")]
    pub window: usize,

    /// Readline history file. Defaults to a path under the OS temp dir.
    pub history_file: Option<PathBuf>,
}

const fn default_min_words() -> usize {
    20
}

const fn default_min_cyrillic_ratio() -> f64 {
    0.5
}

const fn default_channel_capacity() -> usize {
    128
}

const fn default_fetch_workers() -> usize {
    8
}

const fn default_top() -> usize {
    5
}

const fn default_window() -> usize {
    20
}
