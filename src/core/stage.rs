//! The five stage factories that cover all pipeline composition needs:
//! [`map`], [`filter`], [`parallelize`], [`tee`], and the terminal sinks
//! [`discard`]/[`wait`].
//!
//! Every factory takes ownership of its input [`Receiver`] and returns a
//! fresh output `Receiver`, so stages compose by threading the return value
//! of one call into the next - see [`super::pipeline::run_pipeline`].

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::cancel::CancelScope;
use super::channel::{self, Receiver};

/// Applies `h` to every item and forwards the result. Preserves order.
pub fn map<T, F, Fut>(scope: CancelScope, input: Receiver<T>, capacity: usize, h: F) -> Receiver<T>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let (tx, rx) = channel::bounded(capacity);

    tokio::spawn(async move {
        while let Ok(item) = input.recv_async().await {
            if scope.is_cancelled() {
                break;
            }

            let item = h(item).await;

            if scope.is_cancelled() {
                break;
            }

            if tx.send_async(item).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Forwards items for which `p` returns true; drops the rest. Preserves
/// order.
pub fn filter<T, F, Fut>(scope: CancelScope, input: Receiver<T>, capacity: usize, p: F) -> Receiver<T>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (T, bool)> + Send + 'static,
{
    let (tx, rx) = channel::bounded(capacity);

    tokio::spawn(async move {
        while let Ok(item) = input.recv_async().await {
            if scope.is_cancelled() {
                break;
            }

            let (item, keep) = p(item).await;

            if !keep {
                continue;
            }

            if scope.is_cancelled() {
                break;
            }

            if tx.send_async(item).await.is_err() {
                break;
            }
        }
    });

    rx
}

/// Runs `n` concurrent copies of a stage, all pulling from the same input
/// and writing to one shared output. Order is **not** preserved; the output
/// closes only once every worker has drained the input and terminated.
pub fn parallelize<T, F, Fut>(
    scope: CancelScope,
    input: Receiver<T>,
    capacity: usize,
    workers: usize,
    h: F,
) -> Receiver<T>
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = T> + Send + 'static,
{
    let (tx, rx) = channel::bounded(capacity);
    let h = Arc::new(h);
    let remaining = Arc::new(AtomicUsize::new(workers));

    for _ in 0..workers.max(1) {
        let input = input.clone();
        let tx = tx.clone();
        let scope = scope.clone();
        let h = h.clone();
        let remaining = remaining.clone();

        tokio::spawn(async move {
            while let Ok(item) = input.recv_async().await {
                if scope.is_cancelled() {
                    break;
                }

                let item = h(item).await;

                if scope.is_cancelled() {
                    break;
                }

                if tx.send_async(item).await.is_err() {
                    break;
                }
            }

            // last worker out drops the final sender handle, closing `rx`.
            remaining.fetch_sub(1, Ordering::SeqCst);
        });
    }

    rx
}

/// Forwards every item downstream unchanged and additionally feeds it to a
/// side consumer `side` that produces no output. The side consumer is
/// joined before the stage's own task completes, on every exit path
/// (including cancellation), so the caller never observes the main path
/// close before the side path has drained.
pub fn tee<T, F, Fut>(scope: CancelScope, input: Receiver<T>, capacity: usize, side: F) -> Receiver<T>
where
    T: Clone + Send + 'static,
    F: FnOnce(Receiver<T>) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let (tx, rx) = channel::bounded(capacity);
    let (side_tx, side_rx) = channel::bounded(capacity);

    tokio::spawn(async move {
        let side_handle = tokio::spawn(side(side_rx));

        loop {
            let item = match input.recv_async().await {
                Ok(item) => item,
                Err(_) => break,
            };

            if scope.is_cancelled() {
                break;
            }

            let _ = side_tx.send_async(item.clone()).await;

            if tx.send_async(item).await.is_err() {
                break;
            }
        }

        drop(side_tx);
        let _ = side_handle.await;
    });

    rx
}

/// Terminal sink: drops everything.
pub fn discard<T>(scope: CancelScope, input: Receiver<T>)
where
    T: Send + 'static,
{
    tokio::spawn(async move {
        while let Ok(_item) = input.recv_async().await {
            if scope.is_cancelled() {
                break;
            }
        }
    });
}

/// Terminal sink: blocks until the upstream closes (or the scope is
/// cancelled), then resolves. Used to park the calling task until a
/// pipeline has fully drained.
pub async fn wait<T>(scope: CancelScope, input: Receiver<T>)
where
    T: Send + 'static,
{
    loop {
        match input.recv_async().await {
            Ok(_item) => {
                if scope.is_cancelled() {
                    break;
                }
            }
            Err(_) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn map_preserves_order_and_transforms() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded::<i32>(8);
        for v in 1..=5 {
            tx.send_async(v).await.unwrap();
        }
        drop(tx);

        let out = map(scope, rx, 8, |v| async move { v * 2 });

        let mut collected = Vec::new();
        while let Ok(v) = out.recv_async().await {
            collected.push(v);
        }

        assert_eq!(collected, vec![2, 4, 6, 8, 10]);
    }

    #[tokio::test]
    async fn filter_drops_rejected_items_in_order() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded::<i32>(8);
        for v in 1..=6 {
            tx.send_async(v).await.unwrap();
        }
        drop(tx);

        let out = filter(scope, rx, 8, |v| async move { (v, v % 2 == 0) });

        let mut collected = Vec::new();
        while let Ok(v) = out.recv_async().await {
            collected.push(v);
        }

        assert_eq!(collected, vec![2, 4, 6]);
    }

    #[tokio::test]
    async fn parallelize_delivers_every_item_regardless_of_order() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded::<i32>(32);
        for v in 0..20 {
            tx.send_async(v).await.unwrap();
        }
        drop(tx);

        let out = parallelize(scope, rx, 32, 4, |v| async move { v });

        let mut collected = Vec::new();
        while let Ok(v) = out.recv_async().await {
            collected.push(v);
        }
        collected.sort();

        assert_eq!(collected, (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn tee_mirrors_every_item_to_the_side_consumer() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded::<i32>(8);
        for v in 1..=4 {
            tx.send_async(v).await.unwrap();
        }
        drop(tx);

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let seen_side = seen.clone();

        let out = tee(scope, rx, 8, move |side_rx: Receiver<i32>| async move {
            while let Ok(v) = side_rx.recv_async().await {
                seen_side.lock().unwrap().push(v);
            }
        });

        let mut main_path = Vec::new();
        while let Ok(v) = out.recv_async().await {
            main_path.push(v);
        }

        assert_eq!(main_path, vec![1, 2, 3, 4]);
        assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn wait_resolves_once_upstream_closes() {
        let scope = CancelScope::new();
        let (tx, rx) = channel::bounded::<i32>(4);
        tx.send_async(1).await.unwrap();
        drop(tx);

        wait(scope, rx).await;
    }
}
