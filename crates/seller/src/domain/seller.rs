use {
    super::{
        AuctionConfig,
        BidCandidate,
        BidResponse,
        ComponentAuctionConfig,
        Composer,
        Context,
        Origin,
        SellerMetadata,
        Signals,
        fanout,
        signals::{self, Decoration},
        winner,
    },
    crate::infra::{buyer::BidTransport, observe, signal_store::SignalStore},
    std::{sync::Arc, time::Duration},
    url::Url,
};

/// Prefix of auction IDs generated by the seller.
pub const AUCTION_ID_PREFIX: &str = "SSP";

/// A buyer registered with the seller.
#[derive(Debug, Clone)]
pub struct Buyer {
    pub origin: Origin,
    pub bid_endpoint: Url,
}

/// What a seller contributes to a sequential auction.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// The seller's contextual winner, if any buyer bid.
    pub winner: Option<BidResponse>,
    pub component: Option<ComponentAuctionConfig>,
}

/// A seller that can run its contextual auction on behalf of a top-level
/// seller.
#[async_trait::async_trait]
pub trait SellerAuction: Send + Sync {
    fn origin(&self) -> &Origin;

    async fn contextual_auction(&self, context: &Context) -> Outcome;
}

/// Signals the seller reads from its key/value store for every auction.
pub struct SellerSignals {
    pub store: Arc<dyn SignalStore>,
    pub keys: Vec<String>,
}

/// The local seller. Collects contextual bids from its buyers, picks the
/// winner and composes the auction configuration.
pub struct Seller {
    metadata: SellerMetadata,
    buyers: Vec<Buyer>,
    transport: Arc<dyn BidTransport>,
    signals: Option<SellerSignals>,
    timeout: Duration,
}

impl Seller {
    pub fn new(
        metadata: SellerMetadata,
        buyers: Vec<Buyer>,
        transport: Arc<dyn BidTransport>,
        signals: Option<SellerSignals>,
        timeout: Duration,
    ) -> Self {
        Self {
            metadata,
            buyers,
            transport,
            signals,
            timeout,
        }
    }

    /// Runs a contextual auction and composes a single-seller auction
    /// configuration from its result.
    pub async fn auction(&self, context: &Context) -> AuctionConfig {
        observe::auction(&self.metadata.seller, context);
        let candidates = self
            .buyers
            .iter()
            .map(|buyer| BidCandidate {
                buyer: buyer.origin.clone(),
                endpoint: buyer.bid_endpoint.clone(),
                auction_id: context.auction_id.clone(),
            })
            .collect::<Vec<_>>();

        let (responses, seller_signals) = tokio::join!(
            fanout::collect(
                self.transport.as_ref(),
                &candidates,
                &context.signals,
                self.timeout
            ),
            self.seller_signals(),
        );
        let winner = winner::select(&responses);
        observe::winner(&context.auction_id, winner);

        let decoration = Decoration {
            auction: signals::from_request(&context.signals),
            seller: seller_signals,
            per_buyer: responses
                .iter()
                .filter_map(|response| {
                    Some((response.buyer.clone(), response.buyer_signals.clone()?))
                })
                .collect(),
        };
        let composer = Composer::new(&self.metadata, context);
        let buyers = self
            .buyers
            .iter()
            .map(|buyer| buyer.origin.clone())
            .collect::<Vec<_>>();
        let mut fragment = composer.fragment(&buyers);
        decoration.apply(&mut fragment);
        let config = composer.single_seller(winner, fragment);
        observe::composed(&context.auction_id, &config);
        config
    }

    /// A failing store degrades to no store signals at all.
    async fn seller_signals(&self) -> Signals {
        let Some(signals) = &self.signals else {
            return Signals::new();
        };
        match signals.store.get(&signals.keys).await {
            Ok(values) => values,
            Err(err) => {
                observe::signal_store_failed(&err);
                Signals::new()
            }
        }
    }
}

#[async_trait::async_trait]
impl SellerAuction for Seller {
    fn origin(&self) -> &Origin {
        &self.metadata.seller
    }

    /// A seller without buyers and without a contextual winner has nothing
    /// to auction on device and contributes no component.
    async fn contextual_auction(&self, context: &Context) -> Outcome {
        let config = self.auction(context).await;
        let winner = config.contextual_winner.clone();
        let has_buyers = !config.top_level.interest_group_buyers.is_empty();
        let component = (winner.is_some() || has_buyers).then(|| config.into_component());
        Outcome { winner, component }
    }
}
