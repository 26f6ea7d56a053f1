/// Metrics for the seller.
#[derive(Debug, Clone, prometheus_metric_storage::MetricStorage)]
pub struct Metrics {
    /// The results of contextual bid requests.
    #[metric(labels("buyer", "result"))]
    pub bids: prometheus::IntCounterVec,
    /// Bid collections cut short by their deadline.
    pub fanout_deadlines: prometheus::IntCounter,
    /// Time spent collecting contextual bids.
    #[metric(buckets(0.01, 0.05, 0.1, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0, 5.0, 10.0))]
    pub fanout_seconds: prometheus::Histogram,
    /// The results of auctions.
    #[metric(labels("kind", "result"))]
    pub auctions: prometheus::IntCounterVec,
    /// Cross-context messages that were dropped.
    #[metric(labels("reason"))]
    pub rejected_messages: prometheus::IntCounterVec,
}

/// Prefix of all metric names.
pub const PREFIX: &str = "seller";

/// Setup the metrics registry. Must be called once, before any metric is
/// recorded.
pub fn init() {
    observe::metrics::setup_registry(Some(PREFIX.to_owned()), None);
}

/// Get the metrics instance.
pub fn get() -> &'static Metrics {
    Metrics::instance(observe::metrics::get_storage_registry())
        .expect("unexpected error getting metrics instance")
}
