//! Writes each accepted document's raw and processed text to disk as
//! `<id>.txt` under two directories. Both directories are emptied and
//! recreated once, at construction, so a fresh crawl never sees a previous
//! run's leftovers.

use std::path::{Path, PathBuf};

use crate::core::cancel::CancelScope;
use crate::core::channel::Receiver;
use crate::core::stage;

use super::task::Task;

pub struct Writer {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

impl Writer {
    pub fn new(raw_dir: impl AsRef<Path>, processed_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let raw_dir = raw_dir.as_ref().to_path_buf();
        let processed_dir = processed_dir.as_ref().to_path_buf();

        reset_dir(&raw_dir)?;
        reset_dir(&processed_dir)?;

        Ok(Writer {
            raw_dir,
            processed_dir,
        })
    }

    /// Writes `task`'s raw document text (expected to hold the pre-parse
    /// HTML snapshot the caller stashed aside) and its current, normalized
    /// text. Call this with `raw_text` captured right after fetching, since
    /// by the writer stage `task.document.text` has already been through
    /// parsing and normalization.
    pub fn write(&self, id: u64, raw_text: &str, processed_text: &str) -> std::io::Result<()> {
        std::fs::write(doc_path(&self.raw_dir, id), raw_text)?;
        std::fs::write(doc_path(&self.processed_dir, id), processed_text)?;
        Ok(())
    }
}

fn doc_path(dir: &Path, id: u64) -> PathBuf {
    dir.join(format!("{id}.txt"))
}

fn reset_dir(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        std::fs::remove_dir_all(dir)?;
    }
    std::fs::create_dir_all(dir)
}

/// Stage wrapper around [`Writer`]. Since the writer needs the raw HTML the
/// fetch stage produced, this expects to run over tasks carrying both the
/// raw snapshot (in `task.raw_snapshot`) and the normalized text (in
/// `task.document.text`).
pub fn write_stage(
    scope: CancelScope,
    input: Receiver<Task>,
    capacity: usize,
    writer: std::sync::Arc<Writer>,
) -> Receiver<Task> {
    stage::map(scope, input, capacity, move |task| {
        let writer = writer.clone();
        async move {
            if task.finished {
                return task;
            }

            let result = writer.write(task.id, &task.raw_snapshot, &task.document.text);
            match result {
                Ok(()) => task,
                Err(e) => task.fail([format!("crawl.writer: {e}")]),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_dir_clears_previous_contents() {
        let dir = std::env::temp_dir().join(format!("itis-writer-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("stale.txt"), "old").unwrap();

        reset_dir(&dir).unwrap();

        assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn write_creates_raw_and_processed_files() {
        let base = std::env::temp_dir().join(format!("itis-writer-test2-{}", std::process::id()));
        let raw = base.join("raw");
        let processed = base.join("processed");

        let writer = Writer::new(&raw, &processed).unwrap();
        writer.write(7, "<html>raw</html>", "обработан текст").unwrap();

        assert_eq!(std::fs::read_to_string(raw.join("7.txt")).unwrap(), "<html>raw</html>");
        assert_eq!(
            std::fs::read_to_string(processed.join("7.txt")).unwrap(),
            "обработан текст"
        );

        std::fs::remove_dir_all(&base).ok();
    }
}
