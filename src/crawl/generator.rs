//! The pipeline's source: turns a stream of raw link strings into
//! deduplicated [`Task`]s with freshly assigned IDs, and a resume mode that
//! replays tasks from a previous crawl's on-disk storage instead.

use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::core::channel::{self, Receiver};
use crate::pkg::{is_valid_link, prepare_link};

use super::task::Task;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::SeqCst)
}

/// Spawns a task that drains `links`, canonicalizing and deduplicating
/// each one, and emits a fresh [`Task`] per distinct valid link.
pub fn generate(links: Receiver<String>, capacity: usize) -> Receiver<Task> {
    let (tx, rx) = channel::bounded(capacity);

    tokio::spawn(async move {
        let mut seen = HashSet::new();

        while let Ok(link) = links.recv_async().await {
            if !is_valid_link(&link) {
                continue;
            }

            let link = prepare_link(&link);
            if !seen.insert(link.clone()) {
                continue;
            }

            let task = Task::new(next_id(), link);
            if tx.send_async(task).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Resume mode: instead of fetching, replays every `<id>.txt` file under
/// `storage_dir` as an already-finished task whose document text is the
/// file's contents, with the link recovered from `id_map_file`
/// (`<id> <url>` per line, as written by the indexer stage).
pub fn generate_from_storage(
    storage_dir: impl AsRef<Path>,
    id_map_file: impl AsRef<Path>,
    capacity: usize,
) -> std::io::Result<Receiver<Task>> {
    let storage_dir = storage_dir.as_ref().to_path_buf();
    let id_map_contents = std::fs::read_to_string(id_map_file)?;

    let mut id_to_link = std::collections::HashMap::new();
    for line in id_map_contents.lines() {
        let Some((id_str, link)) = line.split_once(' ') else {
            continue;
        };
        if let Ok(id) = id_str.parse::<u64>() {
            id_to_link.insert(id, link.to_string());
        }
    }

    let (tx, rx) = channel::bounded(capacity);

    tokio::spawn(async move {
        let Ok(entries) = std::fs::read_dir(&storage_dir) else {
            warn!("could not read storage dir {storage_dir:?}");
            return;
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            else {
                continue;
            };

            let Ok(text) = std::fs::read_to_string(&path) else {
                continue;
            };

            let link = id_to_link.get(&id).cloned().unwrap_or_default();
            let mut task = Task::new(id, link);
            task.document.text = text;

            if tx.send_async(task).await.is_err() {
                break;
            }
        }
    });

    Ok(rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deduplicates_equivalent_links() {
        let (links_tx, links_rx) = channel::bounded(8);
        links_tx
            .send_async("https://example.org/a?x=1".to_string())
            .await
            .unwrap();
        links_tx
            .send_async("https://example.org/a?x=2".to_string())
            .await
            .unwrap();
        links_tx
            .send_async("not a link".to_string())
            .await
            .unwrap();
        drop(links_tx);

        let out = generate(links_rx, 8);
        let mut tasks = Vec::new();
        while let Ok(t) = out.recv_async().await {
            tasks.push(t);
        }

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].link, "https://example.org/a");
    }
}
