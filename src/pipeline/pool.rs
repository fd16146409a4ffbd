//! Bounded worker pool
//!
//! Fans a batch of independent futures out over a fixed number of concurrent
//! slots, modeled as a tokio semaphore. Results are collected in submission
//! order; a slot whose task dies yields `None` rather than poisoning the
//! batch.

use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Runs the given futures with at most `width` executing concurrently
///
/// Each future is spawned as its own task gated behind a semaphore permit,
/// so the permit count bounds how many futures make progress at once
/// regardless of batch size. The returned vector preserves submission
/// order, not completion order; a panicked task leaves `None` in its slot.
///
/// # Arguments
///
/// * `width` - Maximum number of futures in flight simultaneously
/// * `futures` - The batch to execute, in submission order
pub async fn run_bounded<F, T>(width: usize, futures: Vec<F>) -> Vec<Option<T>>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(width));

    let handles: Vec<_> = futures
        .into_iter()
        .map(|future| {
            let semaphore = Arc::clone(&semaphore);
            tokio::spawn(async move {
                match semaphore.acquire_owned().await {
                    Ok(_permit) => Some(future.await),
                    // The semaphore is never closed while handles are live.
                    Err(_) => None,
                }
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(result) => results.push(result),
            Err(e) => {
                tracing::error!("Worker task failed: {}", e);
                results.push(None);
            }
        }
    }

    results
}
