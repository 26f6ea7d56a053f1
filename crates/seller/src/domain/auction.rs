use {
    std::{collections::BTreeMap, fmt},
    uuid::Uuid,
};

/// Key of the auction ID in the flat request signals.
pub const AUCTION_ID: &str = "auctionId";
/// Key of the ad type in the flat request signals.
pub const AD_TYPE: &str = "adType";
/// Key of the fenced frame preference in the flat request signals.
pub const IS_FENCED_FRAME: &str = "isFencedFrame";

/// A buyer or seller, identified by its origin, e.g. `https://dsp.example`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Origin(pub String);

impl Origin {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Origin {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Origin {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Correlates every bid request, bid response and auction configuration that
/// belong to one ad request. It is never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuctionId(String);

impl AuctionId {
    /// Generates a fresh ID of the form `<prefix>-<uuid>`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuctionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdType {
    #[default]
    Display,
    Video,
    Multipiece,
}

impl AdType {
    /// Case insensitive, unknown ad types yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "display" => Some(Self::Display),
            "video" => Some(Self::Video),
            "multipiece" => Some(Self::Multipiece),
            _ => None,
        }
    }
}

impl fmt::Display for AdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Display => "display",
            Self::Video => "video",
            Self::Multipiece => "multipiece",
        })
    }
}

/// The publisher side context of a single ad request.
#[derive(Debug, Clone)]
pub struct Context {
    pub auction_id: AuctionId,
    pub ad_type: AdType,
    /// The caller asked for an opaque result handle suitable for a fenced
    /// frame.
    pub fenced_frame: bool,
    /// The flat request signals forwarded to every bidder. Always carries the
    /// auction ID under [`AUCTION_ID`].
    pub signals: BTreeMap<String, String>,
}

impl Context {
    /// Interprets flat request signals. A missing or empty auction ID is
    /// generated with the given prefix and written back into the signals.
    pub fn from_signals(mut signals: BTreeMap<String, String>, id_prefix: &str) -> Self {
        let auction_id = match signals.get(AUCTION_ID).filter(|id| !id.is_empty()) {
            Some(id) => AuctionId::from(id.clone()),
            None => AuctionId::generate(id_prefix),
        };
        signals.insert(AUCTION_ID.to_owned(), auction_id.to_string());
        let ad_type = signals
            .get(AD_TYPE)
            .and_then(|ad_type| AdType::parse(ad_type))
            .unwrap_or_default();
        let fenced_frame = signals
            .get(IS_FENCED_FRAME)
            .is_some_and(|value| value == "true");
        Self {
            auction_id,
            ad_type,
            fenced_frame,
            signals,
        }
    }
}
