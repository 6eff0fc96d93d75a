//! Normalizer stage: replaces a document's extracted text with the
//! tokenized, stop-word-free, stemmed form the index and query parser both
//! expect.

use crate::core::cancel::CancelScope;
use crate::core::channel::Receiver;
use crate::core::stage;
use crate::pkg::normalize_string;

use super::task::Task;

pub fn normalize(scope: CancelScope, input: Receiver<Task>, capacity: usize) -> Receiver<Task> {
    stage::map(scope, input, capacity, |task| async move {
        if task.finished {
            return task;
        }

        let mut task = task;
        task.document.text = normalize_string(&task.document.text);
        task
    })
}
