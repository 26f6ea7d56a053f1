use {
    super::ComponentAuctionConfig,
    crate::domain,
    serde::Serialize,
};

/// What a seller answers when a top-level seller asks it to take part in a
/// sequential auction: its contextual winner, if any, together with its
/// component auction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextualBid {
    bidder_origin: String,
    auction_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bid: Option<String>,
    #[serde(rename = "renderURL", skip_serializing_if = "Option::is_none")]
    render_url: Option<String>,
    /// The buyer behind the contextual winner.
    #[serde(skip_serializing_if = "Option::is_none")]
    buyer_origin: Option<String>,
    component_auction_config: ComponentAuctionConfig,
}

impl ContextualBid {
    pub fn new(context: &domain::Context, config: &domain::AuctionConfig) -> Self {
        let winner = config.contextual_winner.as_ref();
        Self {
            bidder_origin: config.top_level.seller.to_string(),
            auction_id: context.auction_id.to_string(),
            bid: winner.map(|winner| winner.amount.to_string()),
            render_url: winner.and_then(|winner| winner.render_url.clone()),
            buyer_origin: winner.map(|winner| winner.buyer.to_string()),
            component_auction_config: ComponentAuctionConfig::from_domain(&config.top_level),
        }
    }
}
