//! Bounded FIFO used for every inter-stage edge.
//!
//! The crawl pipeline only ever needs a single producer/single consumer
//! edge, or a single producer fanning in from several parallel workers, so
//! a plain bounded `flume` channel (the teacher's `FlumeChannel` variant)
//! covers every case without the broadcast/mpsc/fanout machinery the
//! teacher carries for its sensor-fusion use cases.

pub use flume::{Receiver, Sender};

/// Creates a bounded channel of the given capacity - the back-pressure
/// window between two adjacent stages.
pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
    flume::bounded(capacity)
}

/// Non-blocking "fill until full" send used by the link-feedback tee and the
/// seed loader: never awaits, drops the value on a full or disconnected
/// channel instead of stalling the caller.
pub fn try_fill<T>(tx: &Sender<T>, item: T) -> bool {
    tx.try_send(item).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_fill_drops_on_full_channel() {
        let (tx, _rx) = bounded::<u32>(1);
        assert!(try_fill(&tx, 1));
        assert!(!try_fill(&tx, 2));
    }
}
