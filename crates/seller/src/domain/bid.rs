use {
    super::{AuctionId, Origin, Signals},
    rust_decimal::Decimal,
    std::{fmt, str::FromStr},
    url::Url,
};

/// A bid price in CPM. Bids are compared on their value rounded to two
/// decimals, the same precision they are displayed with. A sub-cent bid
/// rounds to zero and therefore counts as no bid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cpm(Decimal);

impl Cpm {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value.round_dp(2))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl From<Decimal> for Cpm {
    fn from(value: Decimal) -> Self {
        Self::new(value)
    }
}

impl FromStr for Cpm {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self::new)
    }
}

impl fmt::Display for Cpm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// A buyer the seller solicits a contextual bid from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidCandidate {
    pub buyer: Origin,
    pub endpoint: Url,
    pub auction_id: AuctionId,
}

/// The answer of a buyer, or the zero bid standing in for a buyer that failed
/// to answer.
#[derive(Debug, Clone, PartialEq)]
pub struct BidResponse {
    pub buyer: Origin,
    pub auction_id: AuctionId,
    pub amount: Cpm,
    /// Propagated unchanged, macros included.
    pub render_url: Option<String>,
    pub buyer_signals: Option<Signals>,
    /// Present only when the bidder is itself a seller answering for a
    /// sequential auction.
    pub component_auction: Option<serde_json::Value>,
}

impl BidResponse {
    pub fn no_bid(candidate: &BidCandidate) -> Self {
        Self {
            buyer: candidate.buyer.clone(),
            auction_id: candidate.auction_id.clone(),
            amount: Cpm::ZERO,
            render_url: None,
            buyer_signals: None,
            component_auction: None,
        }
    }

    /// Only bids with a positive amount take part in winner selection.
    pub fn is_bid(&self) -> bool {
        self.amount.is_positive()
    }
}
