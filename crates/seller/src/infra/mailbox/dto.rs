use {
    super::Error,
    crate::{
        domain::{
            AuctionConfig,
            AuctionId,
            Context,
            Origin,
            auction::{AD_TYPE, AUCTION_ID},
            sequential::Request,
        },
        infra::dto,
    },
    serde::{Deserialize, Serialize},
};

/// The only message the coordinator acts on.
pub const RUN_AD_AUCTION: &str = "RUN_AD_AUCTION";
/// Prefix of auction IDs generated by the coordinator.
pub const AUCTION_ID_PREFIX: &str = "HB";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunAdAuction {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    auction_id: Option<String>,
    ad_unit: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    other_sellers: Vec<String>,
}

/// Parses the data of an inbound message into an auction request.
pub fn request(data: &str) -> Result<Request, Error> {
    let message: RunAdAuction = serde_json::from_str(data)?;
    if let Some(kind) = message.message.filter(|kind| kind != RUN_AD_AUCTION) {
        return Err(Error::UnexpectedMessage(kind));
    }
    let mut signals = dto::flatten_signals(message.ad_unit);
    if !signals.get(AD_TYPE).is_some_and(|ad_type| !ad_type.is_empty()) {
        return Err(Error::MissingAdType);
    }
    // The envelope's auction ID is echoed back, so it takes precedence over
    // the one of the ad unit.
    if let Some(auction_id) = message.auction_id {
        signals.insert(AUCTION_ID.to_owned(), auction_id);
    }
    Ok(Request {
        context: Context::from_signals(signals, AUCTION_ID_PREFIX),
        other_sellers: message.other_sellers.into_iter().map(Origin).collect(),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config<'a> {
    auction_id: &'a str,
    auction_config: dto::AuctionConfig,
}

impl<'a> Config<'a> {
    pub fn new(auction_id: &'a AuctionId, config: &AuctionConfig) -> Self {
        Self {
            auction_id: auction_id.as_str(),
            auction_config: dto::AuctionConfig::from_domain(config),
        }
    }
}

/// Tells the page which seller ran the auction.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ack<'a> {
    auction_id: &'a str,
    seller: &'a str,
}

impl<'a> Ack<'a> {
    pub fn new(auction_id: &'a AuctionId, seller: &'a Origin) -> Self {
        Self {
            auction_id: auction_id.as_str(),
            seller: seller.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoEligibleAds<'a> {
    auction_id: &'a str,
    no_eligible_ads: bool,
}

impl<'a> NoEligibleAds<'a> {
    pub fn new(auction_id: &'a AuctionId) -> Self {
        Self {
            auction_id: auction_id.as_str(),
            no_eligible_ads: true,
        }
    }
}
