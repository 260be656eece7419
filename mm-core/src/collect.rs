use anyhow::Result;
use futures::future;
use std::fmt::Debug;
use std::future::Future;
use tracing::{trace, trace_span, Instrument};

/// Runs `f` for every item concurrently. The first error aborts the whole collection.
/// Results keep the order of `collection`, regardless of completion order.
pub async fn collect_results<T, U, F, Fut>(collection: impl IntoIterator<Item = T>, f: F) -> Result<Vec<U>>
where
    F: Fn(T) -> Fut + Clone,
    Fut: Future<Output = Result<U>>,
    T: Debug,
{
    let (total, requests) = numbered_requests(collection, f);

    async move {
        let results = future::try_join_all(requests).await?;
        trace!("All {} requests succeeded", total);
        Ok(results)
    }
    .instrument(trace_span!("collect_results", total))
    .await
}

/// Like [`collect_results`], but every item settles on its own: a failing item doesn't cancel the others.
pub async fn collect_settled<T, U, F, Fut>(collection: impl IntoIterator<Item = T>, f: F) -> Vec<Result<U>>
where
    F: Fn(T) -> Fut + Clone,
    Fut: Future<Output = Result<U>>,
    T: Debug,
{
    let (total, requests) = numbered_requests(collection, f);

    async move {
        let results = future::join_all(requests).await;
        let failed = results.iter().filter(|result| result.is_err()).count();
        trace!("Settled all {} requests, {} failed", total, failed);
        results
    }
    .instrument(trace_span!("collect_settled", total))
    .await
}

fn numbered_requests<T, U, F, Fut>(collection: impl IntoIterator<Item = T>, f: F) -> (usize, Vec<impl Future<Output = Result<U>>>)
where
    F: Fn(T) -> Fut + Clone,
    Fut: Future<Output = Result<U>>,
    T: Debug,
{
    let collection: Vec<T> = collection.into_iter().collect();
    let total = collection.len();

    let requests = collection
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let f = f.clone();
            async move {
                trace!("Request {}/{} for {:?}", index + 1, total, item);
                f(item).await
            }
        })
        .collect();

    (total, requests)
}
