//! Shared setup of the tests: in-process fakes and HTTP mocks of buyers and
//! sellers.

use {
    crate::{
        domain::{SellerMetadata, seller::Buyer},
        infra::{self, config},
    },
    std::time::Duration,
};

pub mod bidder;
pub mod fake;

pub const SELLER: &str = "https://ssp-a.example";
pub const PUBLISHER: &str = "https://news.example";

pub fn metadata(origin: &str) -> SellerMetadata {
    SellerMetadata {
        seller: origin.into(),
        decision_logic_url: format!("{origin}/js/ssp/decision-logic.js").parse().unwrap(),
        trusted_scoring_signals_url: Some(format!("{origin}/ssp/scoring-signals").parse().unwrap()),
        currency: "USD".to_owned(),
        requested_size: None,
        vast_url: None,
        real_time_reporting: false,
    }
}

/// Configuration of a seller asking the given mock bidders for bids.
pub fn config(buyers: &[&bidder::Bidder]) -> infra::Config {
    infra::Config {
        contextual_auction_timeout: Duration::from_secs(2),
        response_size_limit: 100_000,
        seller: metadata(SELLER),
        buyers: buyers
            .iter()
            .map(|bidder| Buyer {
                origin: bidder.origin.clone(),
                bid_endpoint: bidder.endpoint(),
            })
            .collect(),
        signal_store: None,
        sequential: None,
    }
}

/// Makes the seller of the configuration the top-level seller of sequential
/// auctions together with the given mock sellers.
pub fn sequential(mut config: infra::Config, sellers: &[&bidder::Bidder]) -> infra::Config {
    config.sequential = Some(config::Sequential {
        allowed_origin_prefix: PUBLISHER.to_owned(),
        top_level: SellerMetadata {
            decision_logic_url: format!("{SELLER}/js/ssp/top-level-decision-logic.js")
                .parse()
                .unwrap(),
            ..config.seller.clone()
        },
        sellers: sellers
            .iter()
            .map(|bidder| config::RemoteSeller {
                origin: bidder.origin.clone(),
                contextual_bid_endpoint: bidder.endpoint(),
            })
            .collect(),
    });
    config
}
