//! Feeds a task's outgoing links back into the frontier, non-blocking: once
//! the link channel is full, remaining links for that task are dropped
//! rather than stalling the crawl.

use crate::core::channel::{self, Sender};

use super::task::Task;

/// Side-consumer for [`crate::core::stage::tee`]: drains `input` and
/// attempts to push every link of every unfinished task into `links`,
/// stopping early for a task as soon as the channel is full.
pub async fn feed_links(input: channel::Receiver<Task>, links: Sender<String>) {
    while let Ok(task) = input.recv_async().await {
        if task.finished {
            continue;
        }

        for link in &task.document.links {
            if !channel::try_fill(&links, link.clone()) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn feeds_links_until_channel_is_full() {
        let (links_tx, links_rx) = channel::bounded::<String>(2);
        let (tasks_tx, tasks_rx) = channel::bounded::<Task>(4);

        let mut task = Task::new(1, "https://example.org");
        task.document.links = vec![
            "https://a.org".to_string(),
            "https://b.org".to_string(),
            "https://c.org".to_string(),
        ];
        tasks_tx.send_async(task).await.unwrap();
        drop(tasks_tx);

        feed_links(tasks_rx, links_tx).await;

        let mut received = Vec::new();
        while let Ok(link) = links_rx.try_recv() {
            received.push(link);
        }
        assert_eq!(received.len(), 2);
    }
}
