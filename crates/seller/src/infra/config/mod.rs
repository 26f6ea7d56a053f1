use {
    crate::{
        domain::{Origin, SellerMetadata, seller::Buyer},
        infra::signal_store,
    },
    std::time::Duration,
    url::Url,
};

pub mod file;

/// Configuration of infrastructural components.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long buyers and remote sellers get to answer.
    pub contextual_auction_timeout: Duration,
    pub response_size_limit: usize,
    pub seller: SellerMetadata,
    pub buyers: Vec<Buyer>,
    pub signal_store: Option<signal_store::Config>,
    pub sequential: Option<Sequential>,
}

/// Configuration of the seller acting as the top-level seller of sequential
/// auctions.
#[derive(Debug, Clone)]
pub struct Sequential {
    pub allowed_origin_prefix: String,
    pub top_level: SellerMetadata,
    pub sellers: Vec<RemoteSeller>,
}

#[derive(Debug, Clone)]
pub struct RemoteSeller {
    pub origin: Origin,
    pub contextual_bid_endpoint: Url,
}
