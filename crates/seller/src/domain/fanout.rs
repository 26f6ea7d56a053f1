//! Concurrent bid collection bounded by a deadline.

use {
    super::{BidCandidate, BidResponse},
    crate::infra::{buyer::BidTransport, observe},
    futures::{StreamExt, stream::FuturesUnordered},
    std::{collections::BTreeMap, time::Duration},
};

/// Requests a bid from every candidate at once and returns the responses that
/// arrived before the timeout, in candidate order. Requests still in flight at
/// the deadline are dropped, which cancels them.
///
/// A zero timeout returns no responses at all.
pub async fn collect(
    transport: &dyn BidTransport,
    candidates: &[BidCandidate],
    signals: &BTreeMap<String, String>,
    timeout: Duration,
) -> Vec<BidResponse> {
    if candidates.is_empty() || timeout.is_zero() {
        return Vec::new();
    }
    let auction_id = &candidates[0].auction_id;
    observe::fanout_started(auction_id, candidates.len(), timeout);
    let started = tokio::time::Instant::now();

    let mut pending = candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| async move {
            (index, transport.request_bid(candidate, signals).await)
        })
        .collect::<FuturesUnordered<_>>();
    let deadline = tokio::time::sleep_until(started + timeout);
    tokio::pin!(deadline);

    let mut responses = Vec::with_capacity(candidates.len());
    loop {
        tokio::select! {
            // The deadline is checked first so a response that completes in
            // the same poll as the deadline is discarded.
            biased;
            _ = &mut deadline => {
                observe::fanout_deadline(auction_id, responses.len(), candidates.len());
                break;
            }
            next = pending.next() => match next {
                Some(response) => responses.push(response),
                None => break,
            },
        }
    }
    drop(pending);

    responses.sort_unstable_by_key(|(index, _)| *index);
    observe::fanout_completed(
        auction_id,
        responses.len(),
        candidates.len(),
        started.elapsed(),
    );
    responses.into_iter().map(|(_, response)| response).collect()
}
