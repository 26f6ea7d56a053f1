//! The auction configuration in the layout the on-device auction API expects.

use {
    crate::domain::{self, Origin, ResolvePolicy, Signals},
    serde::{Deserialize, Serialize},
    std::collections::BTreeMap,
    url::Url,
};

const DEFAULT_LOCAL_REPORTING: &str = "default-local-reporting";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuctionConfig {
    #[serde(flatten)]
    top_level: ComponentAuctionConfig,
    component_auctions: Vec<ComponentAuctionConfig>,
}

impl AuctionConfig {
    pub fn from_domain(config: &domain::AuctionConfig) -> Self {
        Self {
            top_level: ComponentAuctionConfig::from_domain(&config.top_level),
            component_auctions: config
                .component_auctions
                .iter()
                .map(ComponentAuctionConfig::from_domain)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentAuctionConfig {
    seller: String,
    #[serde(rename = "decisionLogicURL")]
    decision_logic_url: Url,
    #[serde(
        rename = "trustedScoringSignalsURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    trusted_scoring_signals_url: Option<Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    interest_group_buyers: Vec<String>,
    #[serde(default)]
    auction_signals: Signals,
    #[serde(default)]
    seller_signals: Signals,
    #[serde(default)]
    per_buyer_signals: BTreeMap<String, Signals>,
    #[serde(default)]
    resolve_to_config: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seller_currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    requested_size: Option<Size>,
    #[serde(
        rename = "deprecatedRenderURLReplacements",
        default,
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    render_url_replacements: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seller_real_time_reporting_config: Option<RealTimeReporting>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    per_buyer_real_time_reporting_config: BTreeMap<String, RealTimeReporting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Size {
    width: String,
    height: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct RealTimeReporting {
    #[serde(rename = "type")]
    kind: String,
}

impl RealTimeReporting {
    fn default_local() -> Self {
        Self {
            kind: DEFAULT_LOCAL_REPORTING.to_owned(),
        }
    }
}

impl ComponentAuctionConfig {
    pub fn from_domain(config: &domain::ComponentAuctionConfig) -> Self {
        let reporting = config.real_time_reporting;
        Self {
            seller: config.seller.to_string(),
            decision_logic_url: config.decision_logic_url.clone(),
            trusted_scoring_signals_url: config.trusted_scoring_signals_url.clone(),
            interest_group_buyers: config
                .interest_group_buyers
                .iter()
                .map(ToString::to_string)
                .collect(),
            auction_signals: config.auction_signals.clone(),
            seller_signals: config.seller_signals.clone(),
            per_buyer_signals: config
                .per_buyer_signals
                .iter()
                .map(|(buyer, signals)| (buyer.to_string(), signals.clone()))
                .collect(),
            resolve_to_config: config.resolve_policy == ResolvePolicy::Config,
            seller_currency: config.currency.clone(),
            requested_size: config.requested_size.as_ref().map(|size| Size {
                width: size.width.clone(),
                height: size.height.clone(),
            }),
            render_url_replacements: config.render_url_replacements.clone(),
            seller_real_time_reporting_config: reporting.then(RealTimeReporting::default_local),
            per_buyer_real_time_reporting_config: if reporting {
                config
                    .interest_group_buyers
                    .iter()
                    .map(|buyer| (buyer.to_string(), RealTimeReporting::default_local()))
                    .collect()
            } else {
                Default::default()
            },
        }
    }

    pub fn into_domain(self) -> domain::ComponentAuctionConfig {
        domain::ComponentAuctionConfig {
            seller: Origin(self.seller),
            decision_logic_url: self.decision_logic_url,
            trusted_scoring_signals_url: self.trusted_scoring_signals_url,
            interest_group_buyers: self.interest_group_buyers.into_iter().map(Origin).collect(),
            auction_signals: self.auction_signals,
            seller_signals: self.seller_signals,
            per_buyer_signals: self
                .per_buyer_signals
                .into_iter()
                .map(|(buyer, signals)| (Origin(buyer), signals))
                .collect(),
            resolve_policy: if self.resolve_to_config {
                ResolvePolicy::Config
            } else {
                ResolvePolicy::Url
            },
            currency: self.seller_currency,
            requested_size: self.requested_size.map(|size| domain::composer::Size {
                width: size.width,
                height: size.height,
            }),
            render_url_replacements: self.render_url_replacements,
            real_time_reporting: self.seller_real_time_reporting_config.is_some(),
        }
    }
}
