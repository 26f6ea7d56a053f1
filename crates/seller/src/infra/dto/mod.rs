//! Wire formats of the documents the seller hands out.

use std::collections::BTreeMap;

pub mod auction_config;
pub mod contextual_bid;

pub use {
    auction_config::{AuctionConfig, ComponentAuctionConfig},
    contextual_bid::ContextualBid,
};

/// Flattens a JSON object into request signals. Strings are kept as they
/// are, other values are kept as JSON text and nulls are dropped.
pub fn flatten_signals(
    object: serde_json::Map<String, serde_json::Value>,
) -> BTreeMap<String, String> {
    object
        .into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::Null => None,
            serde_json::Value::String(value) => Some((key, value)),
            value => Some((key, value.to_string())),
        })
        .collect()
}
