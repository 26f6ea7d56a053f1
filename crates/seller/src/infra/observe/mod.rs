//! This module implements the observability for the seller. It exposes
//! functions which represent events that are meaningful to the system. These
//! functions are called when the corresponding events occur. They log the event
//! and update the metrics, if the event is worth measuring.

use {
    crate::{
        domain::{
            AuctionConfig,
            AuctionId,
            BidCandidate,
            BidResponse,
            Context,
            Origin,
            sequential::State,
        },
        infra::{buyer, mailbox, signal_store},
        util::http,
    },
    std::time::Duration,
};

pub mod metrics;

/// Setup the observability. The log argument configures the tokio tracing
/// framework.
pub fn init(log: &str, stderr_threshold: Option<tracing::Level>, use_json_logs: bool) {
    observe::tracing::initialize(&observe::Config::new(
        log,
        stderr_threshold,
        use_json_logs,
    ));
    metrics::init();
}

/// Renders the collected metrics in the prometheus text format.
pub fn encode_metrics() -> String {
    observe::metrics::encode(observe::metrics::get_registry())
}

/// Observe that a contextual auction is starting.
pub fn auction(seller: &Origin, context: &Context) {
    tracing::info!(
        %seller,
        auction_id = %context.auction_id,
        ad_type = %context.ad_type,
        fenced_frame = context.fenced_frame,
        "contextual auction"
    );
}

/// Observe that bids are about to be collected from the candidates.
pub fn fanout_started(auction_id: &AuctionId, candidates: usize, timeout: Duration) {
    tracing::debug!(%auction_id, candidates, ?timeout, "collecting contextual bids");
}

/// Observe that the bid collection deadline passed before every candidate
/// answered.
pub fn fanout_deadline(auction_id: &AuctionId, received: usize, candidates: usize) {
    tracing::info!(
        %auction_id,
        received,
        candidates,
        "bid collection deadline reached"
    );
    metrics::get().fanout_deadlines.inc();
}

/// Observe the end of a bid collection.
pub fn fanout_completed(
    auction_id: &AuctionId,
    received: usize,
    candidates: usize,
    elapsed: Duration,
) {
    tracing::debug!(%auction_id, received, candidates, ?elapsed, "collected contextual bids");
    metrics::get().fanout_seconds.observe(elapsed.as_secs_f64());
}

/// Observe a bid request to a buyer.
pub fn buyer_request(candidate: &BidCandidate) {
    tracing::trace!(
        buyer = %candidate.buyer,
        endpoint = %candidate.endpoint,
        auction_id = %candidate.auction_id,
        "requesting contextual bid"
    );
}

/// Observe the raw response of a buyer.
pub fn buyer_response(candidate: &BidCandidate, res: Result<&str, &http::Error>) {
    match res {
        Ok(res) => {
            tracing::trace!(buyer = %candidate.buyer, %res, "buyer response");
        }
        Err(err) => {
            tracing::debug!(buyer = %candidate.buyer, ?err, "buyer request failed");
        }
    }
}

/// Observe a parsed contextual bid.
pub fn bid(response: &BidResponse) {
    tracing::debug!(
        buyer = %response.buyer,
        auction_id = %response.auction_id,
        amount = %response.amount,
        "contextual bid"
    );
    let result = if response.is_bid() { "bid" } else { "no_bid" };
    metrics::get()
        .bids
        .with_label_values(&[response.buyer.as_str(), result])
        .inc();
}

/// Observe that a buyer failed to bid. The buyer is treated as bidding zero.
pub fn bid_failed(candidate: &BidCandidate, err: &buyer::Error) {
    tracing::warn!(
        buyer = %candidate.buyer,
        auction_id = %candidate.auction_id,
        ?err,
        "contextual bid failed"
    );
    metrics::get()
        .bids
        .with_label_values(&[candidate.buyer.as_str(), err.kind()])
        .inc();
}

/// Observe the winner of a contextual auction.
pub fn winner(auction_id: &AuctionId, winner: Option<&BidResponse>) {
    match winner {
        Some(winner) => tracing::info!(
            %auction_id,
            buyer = %winner.buyer,
            amount = %winner.amount,
            "contextual winner"
        ),
        None => tracing::info!(%auction_id, "no contextual winner"),
    }
    metrics::get()
        .auctions
        .with_label_values(&["contextual", result(winner)])
        .inc();
}

/// Observe a composed auction configuration.
pub fn composed(auction_id: &AuctionId, config: &AuctionConfig) {
    tracing::debug!(
        %auction_id,
        bid_floor = ?config.bid_floor(),
        ?config,
        "composed auction config"
    );
}

/// Observe that the signal store couldn't be read.
pub fn signal_store_failed(err: &signal_store::Error) {
    tracing::warn!(?err, "failed to read seller signals");
}

/// Observe a state transition of a sequential auction.
pub fn sequential_state(auction_id: &AuctionId, state: State) {
    tracing::debug!(%auction_id, %state, "sequential auction");
}

/// Observe that the coordinator waits for the next auction context.
pub fn awaiting_context() {
    tracing::trace!(state = %State::AwaitingContext, "sequential auction");
}

/// Observe that a requested seller isn't configured.
pub fn unknown_seller(auction_id: &AuctionId, seller: &Origin) {
    tracing::warn!(%auction_id, %seller, "skipping unknown seller");
}

/// Observe that a remote seller answered with an unusable component auction.
pub fn invalid_component(seller: &Origin, err: &serde_json::Error) {
    tracing::warn!(%seller, ?err, "discarded component auction config");
}

/// Observe the winner of a sequential auction.
pub fn sequential_winner(auction_id: &AuctionId, winner: Option<&BidResponse>) {
    match winner {
        Some(winner) => tracing::info!(
            %auction_id,
            buyer = %winner.buyer,
            amount = %winner.amount,
            "sequential auction winner"
        ),
        None => tracing::info!(%auction_id, "sequential auction without contextual winner"),
    }
    metrics::get()
        .auctions
        .with_label_values(&["sequential", result(winner)])
        .inc();
}

/// Observe that no seller had anything to offer.
pub fn no_eligible_ads(auction_id: &AuctionId) {
    tracing::info!(%auction_id, "no eligible ads");
    metrics::get()
        .auctions
        .with_label_values(&["sequential", "no_eligible_ads"])
        .inc();
}

/// Observe that a cross-context message was dropped.
pub fn message_rejected(envelope: &mailbox::Envelope, err: &mailbox::Error) {
    tracing::warn!(origin = %envelope.origin, ?err, "rejected message");
    metrics::get()
        .rejected_messages
        .with_label_values(&[err.reason()])
        .inc();
}

/// Observe that the result of an auction couldn't be encoded.
pub fn encoding_failed(auction_id: &AuctionId, err: &serde_json::Error) {
    tracing::error!(%auction_id, ?err, "failed to encode auction result");
}

/// Observe that nobody listens for the results of an auction anymore.
pub fn outbox_closed(auction_id: &AuctionId) {
    tracing::debug!(%auction_id, "outbox closed, dropping result");
}

fn result(winner: Option<&BidResponse>) -> &'static str {
    if winner.is_some() { "winner" } else { "no_winner" }
}
