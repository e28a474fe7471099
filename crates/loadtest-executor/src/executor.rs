//! Pull-based bounded worker pool.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Execute every item in `items` with at most `concurrency` operations in
/// flight, returning the item count once all of them have reached a terminal
/// outcome.
///
/// Items go into a shared queue up front and exactly `concurrency` worker
/// tasks are spawned. Each worker loops: pull the next item, await `op` on
/// it, repeat; it exits when the queue is empty. Compared to spawning one
/// task per item behind a semaphore, this bounds concurrent task existence
/// as well as concurrent execution, so memory stays predictable when the
/// item count is in the tens of thousands.
///
/// `op` owns outcome classification and counter recording; the executor is
/// outcome-agnostic. Items may complete in any order. `op` is not expected
/// to panic - a worker that does panic is logged and the remaining workers
/// keep draining the queue.
pub async fn run_bounded<T, F, Fut>(items: Vec<T>, concurrency: usize, op: F) -> u64
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    let total = items.len() as u64;
    let queue = Arc::new(Mutex::new(VecDeque::from(items)));
    let workers = concurrency.max(1);

    let mut handles = Vec::with_capacity(workers);
    for _ in 0..workers {
        let queue = Arc::clone(&queue);
        let op = op.clone();
        handles.push(tokio::spawn(async move {
            loop {
                let item = queue.lock().await.pop_front();
                match item {
                    Some(item) => op(item).await,
                    None => break,
                }
            }
        }));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!("executor worker terminated abnormally: {e}");
        }
    }

    total
}
