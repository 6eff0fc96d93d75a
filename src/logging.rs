//! Tracing setup shared by both the `crawl` and `search` subcommands.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

pub fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .compact()
        .init();
}
