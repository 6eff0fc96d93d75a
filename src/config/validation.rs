//! Structural checks run after parsing, before a config is handed to the
//! pipeline or search engine.

use super::ConfigError;
use super::types::{CrawlConfig, SearchConfig};

pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.max_documents == 0 {
        return Err(ConfigError::Invalid(
            "max_documents must be greater than zero".into(),
        ));
    }

    if config.seed_urls.is_empty() {
        return Err(ConfigError::Invalid(
            "seed_urls must contain at least one URL".into(),
        ));
    }

    if !(0.0..=1.0).contains(&config.min_cyrillic_ratio) {
        return Err(ConfigError::Invalid(
            "min_cyrillic_ratio must be between 0.0 and 1.0".into(),
        ));
    }

    if config.fetch_workers == 0 {
        return Err(ConfigError::Invalid(
            "fetch_workers must be greater than zero".into(),
        ));
    }

    Ok(())
}

pub fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.top == 0 {
        return Err(ConfigError::Invalid("top must be greater than zero".into()));
    }

    if config.window == 0 {
        return Err(ConfigError::Invalid(
            "window must be greater than zero".into(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::CrawlPaths;

    fn base_config() -> CrawlConfig {
        CrawlConfig {
            seed_urls: vec!["https://ru.wikipedia.org".to_string()],
            max_documents: 10,
            min_words: 20,
            min_cyrillic_ratio: 0.5,
            channel_capacity: 128,
            fetch_workers: 4,
            paths: CrawlPaths {
                raw_dir: "./data/raw".into(),
                processed_dir: "./data/processed".into(),
                index_file: "./index.json".into(),
                id_map_file: "./index.txt".into(),
            },
        }
    }

    #[test]
    fn rejects_zero_max_documents() {
        let mut config = base_config();
        config.max_documents = 0;
        assert!(validate_crawl_config(&config).is_err());
    }

    #[test]
    fn rejects_out_of_range_cyrillic_ratio() {
        let mut config = base_config();
        config.min_cyrillic_ratio = 1.5;
        assert!(validate_crawl_config(&config).is_err());
    }

    #[test]
    fn accepts_a_well_formed_config() {
        assert!(validate_crawl_config(&base_config()).is_ok());
    }
}
