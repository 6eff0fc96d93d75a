//! Loading `CrawlConfig`/`SearchConfig` from TOML files.

use std::path::Path;

use super::types::{CrawlConfig, SearchConfig};
use super::{ConfigError, validation};

pub fn load_crawl_config<P: AsRef<Path>>(path: P) -> Result<CrawlConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: CrawlConfig = toml::from_str(&content)?;
    validation::validate_crawl_config(&config)?;
    Ok(config)
}

pub fn load_search_config<P: AsRef<Path>>(path: P) -> Result<SearchConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: SearchConfig = toml::from_str(&content)?;
    validation::validate_search_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_a_minimal_crawl_config() {
        let toml = r#"
            max_documents = 100
            seed_urls = ["https://ru.wikipedia.org/wiki/Заглавная_страница"]

            [paths]
            raw_dir = "./data/raw"
            processed_dir = "./data/processed"
            index_file = "./index.json"
            id_map_file = "./index.txt"
        "#;

        let config: CrawlConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.max_documents, 100);
        assert_eq!(config.min_words, 20);
        validation::validate_crawl_config(&config).unwrap();
    }
}
