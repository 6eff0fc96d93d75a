//! Assembles the ten crawl stages into one pipeline run: generator →
//! fetcher → parser → size/language filters → counter-with-stop →
//! normalizer → link-feedback tee → indexer tee → disk writer → logger tee
//! → drain.
//!
//! The link-feedback tee closes a cycle back into the generator's input
//! channel: two independent tasks share one bounded channel, with the tee
//! side writing non-blocking so a saturated frontier drops excess links
//! instead of stalling the crawl.

use std::sync::Arc;

use reqwest::Client;

use crate::config::CrawlConfig;
use crate::core::cancel::CancelScope;
use crate::core::channel;
use crate::core::stage;
use crate::index::IndexData;

use super::indexer::{self, Indexer};
use super::writer::Writer;
use super::{feedback, filters, fetcher, generator, logger, normalizer, parser, task::Task};

/// Runs a full crawl to completion and returns the index it built.
pub async fn run(config: &CrawlConfig) -> anyhow::Result<IndexData> {
    let scope = CancelScope::new();
    let capacity = config.channel_capacity;

    let (links_tx, links_rx) = channel::bounded::<String>(capacity);
    for url in &config.seed_urls {
        let _ = links_tx.send_async(url.clone()).await;
    }

    let client = Client::builder().build()?;

    let tasks: channel::Receiver<Task> = generator::generate(links_rx, capacity);
    let tasks = fetcher::fetch(scope.clone(), tasks, capacity, config.fetch_workers, client);
    let tasks = parser::parse(scope.clone(), tasks, capacity);
    let tasks = filters::size_filter(scope.clone(), tasks, capacity, config.min_words);
    let tasks = filters::cyrillic_ratio_filter(
        scope.clone(),
        tasks,
        capacity,
        config.min_cyrillic_ratio,
    );
    let tasks = filters::counter_filter(scope.clone(), tasks, capacity, config.max_documents);
    let tasks = normalizer::normalize(scope.clone(), tasks, capacity);

    let feedback_links_tx = links_tx.clone();
    let tasks = stage::tee(scope.clone(), tasks, capacity, move |side_rx| {
        feedback::feed_links(side_rx, feedback_links_tx)
    });
    drop(links_tx);

    let idx = Arc::new(Indexer::new(&config.paths.id_map_file)?);
    let idx_for_tee = idx.clone();
    let tasks = stage::tee(scope.clone(), tasks, capacity, move |side_rx| {
        indexer::index_side(side_rx, idx_for_tee)
    });

    let writer = Arc::new(Writer::new(&config.paths.raw_dir, &config.paths.processed_dir)?);
    let tasks = writer::write_stage(scope.clone(), tasks, capacity, writer);

    let tasks = stage::tee(scope.clone(), tasks, capacity, logger::log_tasks);

    stage::wait(scope.clone(), tasks).await;

    let idx = Arc::try_unwrap(idx)
        .unwrap_or_else(|_| unreachable!("every tee side task has joined by the time wait() returns"));
    let index_data = idx.into_data();
    index_data.save(&config.paths.index_file)?;

    Ok(index_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrawlPaths;

    #[tokio::test]
    async fn run_produces_an_index_from_an_empty_seed_list() {
        let dir = std::env::temp_dir().join(format!("itis-pipeline-test-{}", std::process::id()));
        let config = CrawlConfig {
            seed_urls: vec![],
            max_documents: 1,
            min_words: 1,
            min_cyrillic_ratio: 0.0,
            channel_capacity: 8,
            fetch_workers: 1,
            paths: CrawlPaths {
                raw_dir: dir.join("raw"),
                processed_dir: dir.join("processed"),
                index_file: dir.join("index.json"),
                id_map_file: dir.join("index.txt"),
            },
        };

        let index = tokio::time::timeout(std::time::Duration::from_secs(5), run(&config))
            .await
            .expect("pipeline should finish promptly with no seed links")
            .unwrap();

        assert_eq!(index.total_docs(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }
}
