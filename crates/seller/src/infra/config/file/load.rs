use {
    crate::{
        domain::{SellerMetadata, composer::Size, seller::Buyer},
        infra::{self, config::file, signal_store},
    },
    std::path::Path,
    tokio::fs,
};

/// Load the seller configuration from a TOML file.
///
/// # Panics
///
/// This method panics if the config is invalid or on I/O errors.
pub async fn load(path: &Path) -> infra::Config {
    let data = fs::read_to_string(path)
        .await
        .unwrap_or_else(|e| panic!("I/O error while reading {path:?}: {e:?}"));
    let config: file::Config = toml::de::from_str(&data)
        .unwrap_or_else(|e| panic!("TOML syntax error while reading {path:?}: {e}"));

    let seller = SellerMetadata {
        seller: config.seller.origin.into(),
        decision_logic_url: config.seller.decision_logic_url,
        trusted_scoring_signals_url: config.seller.trusted_scoring_signals_url,
        currency: config.seller.currency,
        requested_size: config.seller.requested_size.map(|size| Size {
            width: size.width,
            height: size.height,
        }),
        vast_url: config.seller.vast_url,
        real_time_reporting: config.seller.real_time_reporting,
    };

    infra::Config {
        contextual_auction_timeout: config.contextual_auction_timeout,
        response_size_limit: config.response_size_limit,
        buyers: config
            .buyers
            .into_iter()
            .map(|buyer| Buyer {
                origin: buyer.origin.into(),
                bid_endpoint: buyer.bid_endpoint,
            })
            .collect(),
        signal_store: config.signal_store.map(|store| match store {
            file::SignalStoreConfig::Static { signals, keys } => signal_store::Config::Static {
                keys: keys.unwrap_or_else(|| signals.keys().cloned().collect()),
                signals,
            },
            file::SignalStoreConfig::Http { url, keys } => {
                signal_store::Config::Http { url, keys }
            }
        }),
        sequential: config.sequential.map(|sequential| infra::config::Sequential {
            allowed_origin_prefix: sequential.allowed_origin_prefix,
            top_level: SellerMetadata {
                decision_logic_url: sequential
                    .decision_logic_url
                    .unwrap_or_else(|| seller.decision_logic_url.clone()),
                trusted_scoring_signals_url: sequential
                    .trusted_scoring_signals_url
                    .or_else(|| seller.trusted_scoring_signals_url.clone()),
                ..seller.clone()
            },
            sellers: sequential
                .sellers
                .into_iter()
                .map(|seller| infra::config::RemoteSeller {
                    origin: seller.origin.into(),
                    contextual_bid_endpoint: seller.contextual_bid_endpoint,
                })
                .collect(),
        }),
        seller,
    }
}
