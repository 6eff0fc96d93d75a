//! A fetched page: its raw/processed text, outgoing links, and source URI.

use std::fmt;

/// A single crawled page at some point in its processing lifetime. `text`
/// starts as raw HTML bytes from the fetcher, becomes extracted plain text
/// after parsing, and becomes normalized (stemmed, stop-word free) text
/// after the normalizer stage.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub text: String,
    pub links: Vec<String>,
    pub uri: String,
}

impl Document {
    pub fn new(uri: impl Into<String>) -> Self {
        Document {
            text: String::new(),
            links: Vec::new(),
            uri: uri.into(),
        }
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Document: {{uri: {}, links: {}, text length: {}}}",
            self.uri,
            self.links.len(),
            self.text.len()
        )
    }
}
