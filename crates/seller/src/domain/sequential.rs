//! The top-level seller of a sequential auction. It runs its own contextual
//! auction alongside the ones of the other participating sellers, waits for
//! all of them and combines their results into a multi-seller auction
//! configuration.

use {
    super::{
        AuctionConfig,
        ComponentAuctionConfig,
        Composer,
        Context,
        Origin,
        PerBuyerSignals,
        SellerMetadata,
        seller::SellerAuction,
        signals::{self, Decoration},
        winner,
    },
    crate::infra::observe,
    itertools::Itertools,
    serde_json::json,
    std::{collections::HashMap, fmt, sync::Arc},
};

/// The phases of a sequential auction. Transitions only go forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    AwaitingContext,
    RunningPerSellerAuctions,
    Complete,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::AwaitingContext => "awaiting_context",
            Self::RunningPerSellerAuctions => "running_per_seller_auctions",
            Self::Complete => "complete",
        })
    }
}

/// The context of a sequential auction as handed over by the publisher page.
#[derive(Debug, Clone)]
pub struct Request {
    pub context: Context,
    /// Additional sellers to include, in order.
    pub other_sellers: Vec<Origin>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Config(Box<AuctionConfig>),
    /// No seller produced a contextual winner or a component auction.
    NoEligibleAds,
}

pub struct Coordinator {
    metadata: SellerMetadata,
    local: Arc<dyn SellerAuction>,
    sellers: HashMap<Origin, Arc<dyn SellerAuction>>,
}

impl Coordinator {
    /// `metadata` describes the top-level seller, `local` is its own
    /// contextual auction and `sellers` are the remote sellers that may be
    /// asked to take part.
    pub fn new(
        metadata: SellerMetadata,
        local: Arc<dyn SellerAuction>,
        sellers: impl IntoIterator<Item = Arc<dyn SellerAuction>>,
    ) -> Self {
        Self {
            metadata,
            local,
            sellers: sellers
                .into_iter()
                .map(|seller| (seller.origin().clone(), seller))
                .collect(),
        }
    }

    pub fn origin(&self) -> &Origin {
        &self.metadata.seller
    }

    pub async fn run(&self, request: Request) -> Outcome {
        let context = &request.context;
        let participants = self.participants(&request);
        observe::sequential_state(&context.auction_id, State::RunningPerSellerAuctions);

        // Every seller runs concurrently. Nothing is combined before the
        // slowest one has finished.
        let outcomes = futures::future::join_all(
            participants
                .iter()
                .map(|seller| seller.contextual_auction(context)),
        )
        .await;
        observe::sequential_state(&context.auction_id, State::Complete);

        let winners = outcomes
            .iter()
            .filter_map(|outcome| outcome.winner.clone())
            .collect::<Vec<_>>();
        let components = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.component)
            .collect::<Vec<_>>();
        let winner = winner::select(&winners);
        if winner.is_none() && components.is_empty() {
            observe::no_eligible_ads(&context.auction_id);
            return Outcome::NoEligibleAds;
        }

        let decoration = self.decoration(context, &components);
        let components = signals::decorate(components, &decoration);
        let config = Composer::new(&self.metadata, context).multi_seller(winner, components);
        observe::sequential_winner(&context.auction_id, winner);
        Outcome::Config(Box::new(config))
    }

    /// The local seller first, then the requested sellers in request order.
    /// Sellers that aren't configured are skipped.
    fn participants(&self, request: &Request) -> Vec<Arc<dyn SellerAuction>> {
        let others = request
            .other_sellers
            .iter()
            .unique()
            .filter(|origin| *origin != self.local.origin())
            .filter_map(|origin| {
                let seller = self.sellers.get(origin).cloned();
                if seller.is_none() {
                    observe::unknown_seller(&request.context.auction_id, origin);
                }
                seller
            });
        std::iter::once(self.local.clone()).chain(others).collect()
    }

    fn decoration(&self, context: &Context, components: &[ComponentAuctionConfig]) -> Decoration {
        let auction_id = json!(context.auction_id.as_str());
        let per_buyer: PerBuyerSignals = components
            .iter()
            .flat_map(|component| &component.interest_group_buyers)
            .map(|buyer| {
                (
                    buyer.clone(),
                    [("auctionId".to_owned(), auction_id.clone())].into(),
                )
            })
            .collect();
        Decoration {
            auction: [
                (
                    "adType".to_owned(),
                    json!(context.ad_type.to_string()),
                ),
                ("auctionId".to_owned(), auction_id),
            ]
            .into(),
            seller: [(
                "topLevelSeller".to_owned(),
                json!(self.metadata.seller.as_str()),
            )]
            .into(),
            per_buyer,
        }
    }
}
