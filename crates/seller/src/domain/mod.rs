//! Auction logic of a seller: contextual bid collection, winner selection and
//! composition of the auction configuration consumed by the on-device
//! auction.

pub mod auction;
pub mod bid;
pub mod composer;
pub mod fanout;
pub mod seller;
pub mod sequential;
pub mod signals;
pub mod winner;

pub use {
    auction::{AdType, AuctionId, Context, Origin},
    bid::{BidCandidate, BidResponse, Cpm},
    composer::{AuctionConfig, ComponentAuctionConfig, Composer, ResolvePolicy, SellerMetadata},
    seller::Seller,
    signals::{PerBuyerSignals, Signals},
};
