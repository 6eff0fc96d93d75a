//! Terminal sink that logs one line per task as it finishes the pipeline.

use tracing::{info, warn};

use crate::core::channel::Receiver;

use super::task::Task;

/// Side-consumer for [`crate::core::stage::tee`]: logs one line per task.
/// Runs until the main path closes this side channel.
pub async fn log_tasks(input: Receiver<Task>) {
    while let Ok(task) = input.recv_async().await {
        if task.result.is_successful() {
            info!(id = task.id, link = %task.link, "crawled");
        } else {
            warn!(id = task.id, link = %task.link, reason = %task.result.message(", "), "rejected");
        }
    }
}
