use clap::{Parser, Subcommand};

use itis_search::config::{load_crawl_config, load_search_config};
use itis_search::index::{IndexData, SearchEngine};
use itis_search::repl::SearchApp;
use itis_search::{crawl, logging};

/// A concurrent crawl-and-search pipeline for a Russian-language document
/// corpus.
#[derive(Parser)]
#[command(name = "itis-search")]
#[command(version)]
#[command(about = "Crawl Russian-language web pages and search the resulting corpus")]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Crawl from a seed list and build a search index.
    Crawl {
        /// Path to the crawl configuration TOML file.
        #[arg(short, long, default_value = "./config/crawl.toml")]
        config: String,
    },
    /// Load a previously built index and search it interactively.
    Search {
        /// Path to the search configuration TOML file.
        #[arg(short, long, default_value = "./config/search.toml")]
        config: String,
    },
}

#[tokio::main(flavor = "multi_thread", worker_threads = 32)]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level);

    match cli.command {
        Command::Crawl { config } => run_crawl(&config).await,
        Command::Search { config } => run_search(&config),
    }
}

async fn run_crawl(config_path: &str) -> anyhow::Result<()> {
    let config = load_crawl_config(config_path)?;
    tracing::info!(seeds = config.seed_urls.len(), max = config.max_documents, "starting crawl");

    let index_data = crawl::run(&config).await?;
    tracing::info!(documents = index_data.total_docs(), "crawl finished");
    Ok(())
}

fn run_search(config_path: &str) -> anyhow::Result<()> {
    let config = load_search_config(config_path)?;
    let index_data = IndexData::load(&config.index_file)?;
    tracing::info!(documents = index_data.total_docs(), "index loaded");

    let engine = SearchEngine::build(index_data);
    let mut app = SearchApp::new(engine, &config);
    app.run()
}
