//! Composes the auction configuration handed to the on-device auction.

use {
    super::{AdType, BidResponse, Context, Origin, PerBuyerSignals, Signals, signals},
    serde_json::json,
    std::collections::BTreeMap,
    url::Url,
};

/// Seller-scoped signal carrying the winning contextual bid as a price floor.
pub const BID_FLOOR: &str = "bidFloor";
/// Seller-scoped signal describing the winning contextual bid.
pub const WINNING_CONTEXTUAL_BID: &str = "winningContextualBid";

/// Render URL macros substituted with the seller's VAST URL.
const VAST_MACROS: [&str; 2] = ["${SSP_VAST}", "%%SSP_VAST%%"];

/// How the on-device auction hands out its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvePolicy {
    /// An opaque handle for a fenced frame.
    Config,
    /// A plain URL.
    Url,
}

impl ResolvePolicy {
    /// Video ads always resolve to a URL because the player has to fetch the
    /// creative. Everything else follows the caller's preference.
    pub fn for_context(context: &Context) -> Self {
        match context.ad_type {
            AdType::Video => Self::Url,
            _ if context.fenced_frame => Self::Config,
            _ => Self::Url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Size {
    pub width: String,
    pub height: String,
}

/// Static description of a seller that ends up in its auction
/// configurations.
#[derive(Debug, Clone)]
pub struct SellerMetadata {
    pub seller: Origin,
    pub decision_logic_url: Url,
    pub trusted_scoring_signals_url: Option<Url>,
    pub currency: String,
    pub requested_size: Option<Size>,
    pub vast_url: Option<Url>,
    pub real_time_reporting: bool,
}

/// The configuration of a single seller's part of the on-device auction.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentAuctionConfig {
    pub seller: Origin,
    pub decision_logic_url: Url,
    pub trusted_scoring_signals_url: Option<Url>,
    pub interest_group_buyers: Vec<Origin>,
    pub auction_signals: Signals,
    pub seller_signals: Signals,
    pub per_buyer_signals: PerBuyerSignals,
    pub resolve_policy: ResolvePolicy,
    pub currency: Option<String>,
    pub requested_size: Option<Size>,
    pub render_url_replacements: BTreeMap<String, String>,
    pub real_time_reporting: bool,
}

/// The full configuration of an on-device auction.
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionConfig {
    /// The top-level seller. It shares the layout of a component auction.
    pub top_level: ComponentAuctionConfig,
    /// Empty for single-seller auctions.
    pub component_auctions: Vec<ComponentAuctionConfig>,
    pub contextual_winner: Option<BidResponse>,
}

impl AuctionConfig {
    pub fn bid_floor(&self) -> Option<&serde_json::Value> {
        self.top_level.seller_signals.get(BID_FLOOR)
    }

    /// The configuration as seen by a top-level seller that includes this
    /// seller in a sequential auction.
    pub fn into_component(self) -> ComponentAuctionConfig {
        self.top_level
    }
}

pub struct Composer<'a> {
    metadata: &'a SellerMetadata,
    context: &'a Context,
}

impl<'a> Composer<'a> {
    pub fn new(metadata: &'a SellerMetadata, context: &'a Context) -> Self {
        Self { metadata, context }
    }

    /// The undecorated configuration of this seller for the given buyers.
    pub fn fragment(&self, buyers: &[Origin]) -> ComponentAuctionConfig {
        let render_url_replacements = match &self.metadata.vast_url {
            Some(vast) => VAST_MACROS
                .iter()
                .map(|r#macro| (r#macro.to_string(), vast.to_string()))
                .collect(),
            None => Default::default(),
        };
        ComponentAuctionConfig {
            seller: self.metadata.seller.clone(),
            decision_logic_url: self.metadata.decision_logic_url.clone(),
            trusted_scoring_signals_url: self.metadata.trusted_scoring_signals_url.clone(),
            interest_group_buyers: buyers.to_vec(),
            auction_signals: [(
                super::auction::IS_FENCED_FRAME.to_owned(),
                json!(self.context.fenced_frame),
            )]
            .into(),
            seller_signals: Default::default(),
            per_buyer_signals: Default::default(),
            resolve_policy: ResolvePolicy::for_context(self.context),
            currency: Some(self.metadata.currency.clone()),
            requested_size: self.metadata.requested_size.clone(),
            render_url_replacements,
            real_time_reporting: self.metadata.real_time_reporting,
        }
    }

    /// Promotes a decorated fragment to the top level of a single-seller
    /// auction.
    pub fn single_seller(
        &self,
        winner: Option<&BidResponse>,
        fragment: ComponentAuctionConfig,
    ) -> AuctionConfig {
        let mut top_level = fragment;
        self.seed(&mut top_level, winner);
        AuctionConfig {
            top_level,
            component_auctions: Vec::new(),
            contextual_winner: winner.cloned(),
        }
    }

    /// Builds a multi-seller auction with this seller on top and the given
    /// decorated component auctions below it.
    pub fn multi_seller(
        &self,
        winner: Option<&BidResponse>,
        components: Vec<ComponentAuctionConfig>,
    ) -> AuctionConfig {
        let mut top_level = self.fragment(&[]);
        top_level.auction_signals.extend(signals::from_request(&self.context.signals));
        self.seed(&mut top_level, winner);
        AuctionConfig {
            top_level,
            component_auctions: components,
            contextual_winner: winner.cloned(),
        }
    }

    fn seed(&self, config: &mut ComponentAuctionConfig, winner: Option<&BidResponse>) {
        config.resolve_policy = ResolvePolicy::for_context(self.context);
        let Some(winner) = winner else {
            return;
        };
        config
            .seller_signals
            .insert(BID_FLOOR.to_owned(), json!(winner.amount.to_string()));
        config.seller_signals.insert(
            WINNING_CONTEXTUAL_BID.to_owned(),
            json!({
                "bidder": winner.buyer.as_str(),
                "auctionId": winner.auction_id.as_str(),
                "bid": winner.amount.to_string(),
                "renderURL": winner.render_url,
            }),
        );
    }
}
