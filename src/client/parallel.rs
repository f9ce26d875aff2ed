//! Bounded parallel execution for independent per-item lookups.

use std::future::Future;
use std::pin::Pin;

use futures::stream::{FuturesUnordered, StreamExt};
use log::debug;

/// Type alias for boxed futures tagged with their input position
type TaskFuture<R> = Pin<Box<dyn Future<Output = (usize, R)> + Send>>;

/// Run `task` over every item with at most `max_concurrent` in flight.
///
/// Results come back in input order regardless of completion order. A task
/// cannot fail the batch: failures are part of `R`.
///
/// # Example
///
/// ```ignore
/// let verdicts = run_bounded(names, |name| {
///     let checker = checker.clone();
///     async move { checker.classify(&name, 730).await }
/// }, 8).await;
/// ```
pub async fn run_bounded<T, R, F, Fut>(items: Vec<T>, task: F, max_concurrent: usize) -> Vec<R>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut,
    Fut: Future<Output = R> + Send + 'static,
{
    if items.is_empty() {
        return Vec::new();
    }

    let total = items.len();
    let max_concurrent = max_concurrent.max(1);
    debug!("Running {} tasks with max {} concurrent", total, max_concurrent);

    let mut results: Vec<Option<R>> = (0..total).map(|_| None).collect();
    let mut futures: FuturesUnordered<TaskFuture<R>> = FuturesUnordered::new();
    let mut pending = items.into_iter().enumerate();

    let make_future = |index: usize, item: T, f: &F| -> TaskFuture<R> {
        let fut = f(item);
        Box::pin(async move { (index, fut.await) })
    };

    // Seed initial batch up to max_concurrent
    for (index, item) in pending.by_ref().take(max_concurrent) {
        futures.push(make_future(index, item, &task));
    }

    // Refill as tasks finish to keep the pool full
    while let Some((index, result)) = futures.next().await {
        results[index] = Some(result);

        if let Some((next, item)) = pending.next() {
            futures.push(make_future(next, item, &task));
        }
    }

    debug!("Completed {} tasks", total);
    results.into_iter().flatten().collect()
}
