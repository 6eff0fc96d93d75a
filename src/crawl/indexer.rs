//! Indexer stage: feeds each accepted document's normalized text into the
//! in-memory [`IndexData`] under construction, and appends its
//! `<id> <url>` line to the resume index map.

use std::sync::Mutex;

use tracing::warn;

use crate::core::channel::Receiver;
use crate::index::IndexData;

use super::task::Task;

pub struct Indexer {
    data: Mutex<IndexData>,
    id_map_file: std::path::PathBuf,
}

impl Indexer {
    pub fn new(id_map_file: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let id_map_file = id_map_file.as_ref().to_path_buf();
        std::fs::write(&id_map_file, "")?;
        Ok(Indexer {
            data: Mutex::new(IndexData::new()),
            id_map_file,
        })
    }

    fn add(&self, id: u64, uri: &str, text: &str) -> std::io::Result<()> {
        self.data.lock().unwrap().add(id, text);

        use std::io::Write;
        let mut file = std::fs::OpenOptions::new()
            .append(true)
            .open(&self.id_map_file)?;
        writeln!(file, "{id} {uri}")
    }

    /// Consumes this indexer and returns the accumulated index, once every
    /// upstream task has been processed.
    pub fn into_data(self) -> IndexData {
        self.data.into_inner().unwrap()
    }
}

/// Side-consumer for [`crate::core::stage::tee`]: indexes every unfinished
/// task without affecting the main path, so an index write failure never
/// fails the task itself.
pub async fn index_side(input: Receiver<Task>, indexer: std::sync::Arc<Indexer>) {
    while let Ok(task) = input.recv_async().await {
        if task.finished {
            continue;
        }

        if let Err(e) = indexer.add(task.id, &task.link, &task.document.text) {
            warn!(id = task.id, "failed to append to index id map: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_into_index_data_and_id_map() {
        let dir = std::env::temp_dir().join(format!("itis-indexer-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let map_path = dir.join("index.txt");

        let indexer = Indexer::new(&map_path).unwrap();
        indexer.add(1, "https://example.org", "кошк собак").unwrap();
        indexer.add(2, "https://example.org/2", "собак").unwrap();

        let data = indexer.into_data();
        assert_eq!(data.total_docs(), 2);

        let map_contents = std::fs::read_to_string(&map_path).unwrap();
        assert!(map_contents.contains("1 https://example.org"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
