//! Configuration types and loading for both subcommands.

pub mod loader;
pub mod types;
pub mod validation;

pub use loader::{load_crawl_config, load_search_config};
pub use types::{CrawlConfig, CrawlPaths, SearchConfig};
pub use validation::{validate_crawl_config, validate_search_config};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
