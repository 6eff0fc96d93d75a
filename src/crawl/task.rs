//! The unit of work flowing through the crawl pipeline: a page to fetch,
//! its document once fetched, and an outcome record describing what each
//! stage did to it.

use std::time::{Duration, Instant};

use super::document::Document;

/// Outcome of a task, as data rather than an exception: every stage
/// attaches a verdict and optional messages instead of aborting the
/// pipeline on a single page's failure.
#[derive(Debug, Clone)]
pub struct TaskResult {
    successful: bool,
    messages: Vec<String>,
}

impl TaskResult {
    pub fn ok() -> Self {
        TaskResult {
            successful: true,
            messages: Vec::new(),
        }
    }

    pub fn failed() -> Self {
        TaskResult {
            successful: false,
            messages: Vec::new(),
        }
    }

    /// Returns a copy with `messages` appended.
    pub fn with_messages(&self, messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        let mut all = self.messages.clone();
        all.extend(messages.into_iter().map(Into::into));
        TaskResult {
            successful: self.successful,
            messages: all,
        }
    }

    pub fn is_successful(&self) -> bool {
        self.successful
    }

    pub fn message(&self, delimiter: &str) -> String {
        self.messages.join(delimiter)
    }
}

/// A single page moving through the crawl pipeline.
#[derive(Debug, Clone)]
pub struct Task {
    pub id: u64,
    pub link: String,
    pub document: Document,
    /// The fetch stage's raw HTML response, kept aside so the writer stage
    /// can persist it even after parsing and normalization have replaced
    /// `document.text` with extracted, then stemmed, text.
    pub raw_snapshot: String,
    pub created_at: Instant,
    pub finished: bool,
    pub finish_elapsed: Option<Duration>,
    pub result: TaskResult,
}

impl Task {
    pub fn new(id: u64, link: impl Into<String>) -> Self {
        let link = link.into();
        Task {
            id,
            document: Document::new(link.clone()),
            link,
            raw_snapshot: String::new(),
            created_at: Instant::now(),
            finished: false,
            finish_elapsed: None,
            result: TaskResult::ok().with_messages(["just created"]),
        }
    }

    /// Marks the task finished with the given result. A no-op if the task
    /// was already finished; the first verdict sticks.
    pub fn finish(mut self, result: TaskResult) -> Self {
        if self.finished {
            return self;
        }
        self.result = result;
        self.finished = true;
        self.finish_elapsed = Some(self.created_at.elapsed());
        self
    }

    pub fn fail(self, messages: impl IntoIterator<Item = impl Into<String>>) -> Self {
        if self.finished {
            return self;
        }
        let result = TaskResult::failed().with_messages(messages);
        self.finish(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_unfinished_and_successful() {
        let task = Task::new(1, "https://example.org");
        assert!(!task.finished);
        assert!(task.result.is_successful());
    }

    #[test]
    fn fail_marks_unsuccessful_and_finished() {
        let task = Task::new(1, "https://example.org").fail(["too small"]);
        assert!(task.finished);
        assert!(!task.result.is_successful());
        assert_eq!(task.result.message(", "), "too small");
    }

    #[test]
    fn finish_is_idempotent_first_verdict_wins() {
        let task = Task::new(1, "https://example.org")
            .fail(["first"])
            .fail(["second"]);
        assert_eq!(task.result.message(", "), "first");
    }
}
