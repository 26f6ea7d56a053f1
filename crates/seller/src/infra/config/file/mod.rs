pub use load::load;
use {
    serde::Deserialize,
    std::{collections::BTreeMap, time::Duration},
    url::Url,
};

mod load;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct Config {
    /// How long buyers get to answer a contextual bid request.
    #[serde(
        with = "humantime_serde",
        default = "default_contextual_auction_timeout"
    )]
    contextual_auction_timeout: Duration,

    /// Bid responses larger than this many bytes are treated as failures.
    #[serde(default = "default_response_size_limit")]
    response_size_limit: usize,

    seller: SellerConfig,

    /// The buyers asked for contextual bids, in tie-break order.
    #[serde(default, rename = "buyer")]
    buyers: Vec<BuyerConfig>,

    /// Where the seller reads its own signals from.
    signal_store: Option<SignalStoreConfig>,

    /// Enables the sequential auction coordinator.
    sequential: Option<SequentialConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SellerConfig {
    origin: String,
    decision_logic_url: Url,
    trusted_scoring_signals_url: Option<Url>,
    #[serde(default = "default_currency")]
    currency: String,
    requested_size: Option<SizeConfig>,
    /// Substituted for the VAST macros of render URLs.
    vast_url: Option<Url>,
    #[serde(default)]
    real_time_reporting: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SizeConfig {
    width: String,
    height: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct BuyerConfig {
    origin: String,
    bid_endpoint: Url,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
enum SignalStoreConfig {
    Static {
        #[serde(default)]
        signals: BTreeMap<String, serde_json::Value>,
        /// Defaults to all configured signals.
        keys: Option<Vec<String>>,
    },
    Http {
        url: Url,
        #[serde(default)]
        keys: Vec<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct SequentialConfig {
    /// Messages from origins not starting with this prefix are dropped.
    allowed_origin_prefix: String,
    /// Decision logic of the top-level auction. Defaults to the one of the
    /// seller.
    decision_logic_url: Option<Url>,
    trusted_scoring_signals_url: Option<Url>,
    #[serde(default, rename = "seller")]
    sellers: Vec<RemoteSellerConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RemoteSellerConfig {
    origin: String,
    contextual_bid_endpoint: Url,
}

fn default_contextual_auction_timeout() -> Duration {
    Duration::from_secs(5)
}

fn default_response_size_limit() -> usize {
    1_000_000
}

fn default_currency() -> String {
    "USD".to_owned()
}
