//! A concurrent crawl-and-search pipeline for a Russian-language document
//! corpus: a staged pipeline runtime (`core`), the crawler built on top of
//! it (`crawl`), the inverted-index/TF-IDF search engine (`index`), text
//! and URL normalization helpers (`pkg`), and configuration loading
//! (`config`).

pub mod config;
pub mod core;
pub mod crawl;
pub mod index;
pub mod logging;
pub mod pkg;
pub mod repl;
