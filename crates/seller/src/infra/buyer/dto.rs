use {
    crate::domain::{self, BidCandidate, Cpm},
    rust_decimal::Decimal,
    serde::Deserialize,
    serde_with::{DisplayFromStr, PickFirst, serde_as},
};

/// A contextual bid as sent by buyers. Sellers taking part in a sequential
/// auction answer with the same document and add their component auction.
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BidResponse {
    /// Buyers send the amount either as a string or as a number.
    #[serde_as(as = "Option<PickFirst<(DisplayFromStr, _)>>")]
    #[serde(default)]
    bid: Option<Decimal>,
    #[serde(default, rename = "renderURL")]
    render_url: Option<String>,
    #[serde(default)]
    buyer_signals: Option<domain::Signals>,
    #[serde(default)]
    component_auction_config: Option<serde_json::Value>,
}

impl BidResponse {
    /// The identity of the bid is the one the seller solicited, whatever the
    /// buyer claims to be.
    pub fn into_domain(self, candidate: &BidCandidate) -> domain::BidResponse {
        domain::BidResponse {
            buyer: candidate.buyer.clone(),
            auction_id: candidate.auction_id.clone(),
            amount: self.bid.map(Cpm::new).unwrap_or(Cpm::ZERO),
            render_url: self.render_url,
            buyer_signals: self.buyer_signals,
            component_auction: self.component_auction_config,
        }
    }
}
