//! Predicate stages that mark tasks failed without removing them from the
//! stream: a Cyrillic-ratio language filter, a minimum-word-count filter,
//! and a document-count stop filter that fires the pipeline's cancellation
//! once enough documents have been accepted.

use crate::core::cancel::{CancelScope, StopLatch};
use crate::core::channel::Receiver;
use crate::core::stage;

use super::task::Task;

/// Passes through tasks whose extracted text is at least
/// `min_cyrillic_ratio` Cyrillic by character count. Already-finished
/// tasks pass through untouched, matching every other filter here.
pub fn cyrillic_ratio_filter(
    scope: CancelScope,
    input: Receiver<Task>,
    capacity: usize,
    min_cyrillic_ratio: f64,
) -> Receiver<Task> {
    stage::map(scope, input, capacity, move |task| async move {
        if task.finished {
            return task;
        }

        if cyrillic_ratio(&task.document.text) < min_cyrillic_ratio {
            task.fail(["document is not predominantly Cyrillic"])
        } else {
            task
        }
    })
}

fn cyrillic_ratio(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return 0.0;
    }

    let cyrillic = chars
        .iter()
        .filter(|c| matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё'))
        .count();

    cyrillic as f64 / chars.len() as f64
}

/// Marks tasks with fewer than `min_words` whitespace-separated words as
/// failed.
pub fn size_filter(
    scope: CancelScope,
    input: Receiver<Task>,
    capacity: usize,
    min_words: usize,
) -> Receiver<Task> {
    stage::map(scope, input, capacity, move |task| async move {
        if task.finished {
            return task;
        }

        if task.document.text.split_whitespace().count() < min_words {
            task.fail(["document is too small"])
        } else {
            task
        }
    })
}

/// Counts accepted (not-yet-failed) tasks as they pass through, and fires
/// `scope`'s cancellation exactly once, the first time the running count
/// reaches `required`. Tasks beyond that point are dropped rather than
/// marked failed, since the pipeline is winding down.
pub fn counter_filter(
    scope: CancelScope,
    input: Receiver<Task>,
    capacity: usize,
    required: u64,
) -> Receiver<Task> {
    let counter = std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0));
    let latch = StopLatch::new();

    stage::filter(scope.clone(), input, capacity, move |task| {
        let counter = counter.clone();
        let latch = latch.clone();
        let scope = scope.clone();
        async move {
            if task.finished {
                return (task, true);
            }

            let count = counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;

            if count >= required {
                latch.fire_once(|| scope.cancel());
            }

            (task, count <= required)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::channel;

    #[test]
    fn cyrillic_ratio_counts_cyrillic_characters() {
        assert!(cyrillic_ratio("привет мир") > 0.9);
        assert!(cyrillic_ratio("hello world") < 0.1);
        assert_eq!(cyrillic_ratio(""), 0.0);
    }

    #[tokio::test]
    async fn size_filter_fails_short_documents() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded(4);
        let mut short = Task::new(1, "https://example.org");
        short.document.text = "один два".to_string();
        tx.send_async(short).await.unwrap();
        drop(tx);

        let out = size_filter(scope, rx, 4, 5);
        let task = out.recv_async().await.unwrap();
        assert!(!task.result.is_successful());
    }

    #[tokio::test]
    async fn counter_filter_cancels_scope_once_quota_reached() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded(8);
        for i in 1..=5 {
            tx.send_async(Task::new(i, "https://example.org"))
                .await
                .unwrap();
        }
        drop(tx);

        let out = counter_filter(scope.clone(), rx, 8, 3);
        let mut count = 0;
        while let Ok(_task) = out.recv_async().await {
            count += 1;
        }

        assert_eq!(count, 3);
        assert!(scope.is_cancelled());
    }
}
