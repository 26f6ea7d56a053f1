pub mod buyer;
pub mod cli;
pub mod config;
pub mod dto;
pub mod mailbox;
pub mod observe;
pub mod seller;
pub mod signal_store;

pub use {buyer::BidTransport, config::Config, signal_store::SignalStore};
