use {
    super::{ComponentAuctionConfig, Origin, auction::IS_FENCED_FRAME},
    std::collections::BTreeMap,
};

/// Opaque key/value signals forwarded to the auction worklets.
pub type Signals = BTreeMap<String, serde_json::Value>;

/// Signals addressed to individual buyers.
pub type PerBuyerSignals = BTreeMap<Origin, Signals>;

/// Lifts flat request signals into JSON signals. `isFencedFrame` is left
/// out, configurations carry it as a boolean derived from the context.
pub fn from_request(signals: &BTreeMap<String, String>) -> Signals {
    signals
        .iter()
        .filter(|(key, _)| key.as_str() != IS_FENCED_FRAME)
        .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
        .collect()
}

/// Signals to merge into auction configuration fragments. On key collisions
/// the decoration wins.
#[derive(Debug, Clone, Default)]
pub struct Decoration {
    pub auction: Signals,
    pub seller: Signals,
    pub per_buyer: PerBuyerSignals,
}

impl Decoration {
    pub fn apply(&self, fragment: &mut ComponentAuctionConfig) {
        merge(&mut fragment.auction_signals, &self.auction);
        merge(&mut fragment.seller_signals, &self.seller);
        for (buyer, signals) in &self.per_buyer {
            merge(
                fragment.per_buyer_signals.entry(buyer.clone()).or_default(),
                signals,
            );
        }
    }
}

/// Decorates every fragment. The result has as many fragments as the input,
/// in the same order, and keys a decoration doesn't mention are untouched.
pub fn decorate(
    mut fragments: Vec<ComponentAuctionConfig>,
    decoration: &Decoration,
) -> Vec<ComponentAuctionConfig> {
    for fragment in &mut fragments {
        decoration.apply(fragment);
    }
    fragments
}

fn merge(into: &mut Signals, from: &Signals) {
    into.extend(from.iter().map(|(key, value)| (key.clone(), value.clone())));
}
