//! Fetch stage: GETs each task's link and stores the response body as the
//! document's (as yet unparsed) text. Runs as a fixed pool of concurrent
//! workers sharing one HTTP client.

use std::sync::Arc;

use reqwest::Client;

use crate::core::cancel::CancelScope;
use crate::core::channel::Receiver;
use crate::core::stage;

use super::task::Task;

pub fn fetch(
    scope: CancelScope,
    input: Receiver<Task>,
    capacity: usize,
    workers: usize,
    client: Client,
) -> Receiver<Task> {
    let client = Arc::new(client);

    stage::parallelize(scope, input, capacity, workers, move |task| {
        let client = client.clone();
        async move { fetch_one(&client, task).await }
    })
}

async fn fetch_one(client: &Client, task: Task) -> Task {
    if task.finished {
        return task;
    }

    match fetch_body(client, &task.link).await {
        Ok(body) => {
            let mut task = task;
            task.raw_snapshot = body.clone();
            task.document.text = body;
            task
        }
        Err(e) => task.fail([format!("crawl.fetch: {e}")]),
    }
}

async fn fetch_body(client: &Client, link: &str) -> Result<String, reqwest::Error> {
    let response = client.get(link).send().await?.error_for_status()?;
    response.text().await
}
