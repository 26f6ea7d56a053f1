use {
    super::observe,
    crate::{
        domain::{BidCandidate, BidResponse},
        util,
    },
    std::collections::BTreeMap,
    thiserror::Error,
};

pub mod dto;

/// Asks a single buyer for a contextual bid.
#[async_trait::async_trait]
pub trait BidTransport: Send + Sync {
    /// Never fails. A buyer that can't be reached, answers with an error or
    /// sends garbage yields a zero bid carrying its identity.
    async fn request_bid(
        &self,
        candidate: &BidCandidate,
        signals: &BTreeMap<String, String>,
    ) -> BidResponse;
}

/// Requests bids with `GET <endpoint>?<signals>` and expects a JSON bid
/// response.
#[derive(Debug, Clone)]
pub struct Http {
    client: reqwest::Client,
    response_size_limit: usize,
}

impl Http {
    pub fn new(response_size_limit: usize) -> Result<Self, reqwest::Error> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        Ok(Self {
            client: reqwest::ClientBuilder::new()
                .default_headers(headers)
                .build()?,
            response_size_limit,
        })
    }

    async fn try_request_bid(
        &self,
        candidate: &BidCandidate,
        signals: &BTreeMap<String, String>,
    ) -> Result<BidResponse, Error> {
        let req = self.client.get(candidate.endpoint.clone()).query(signals);
        let res = util::http::send(self.response_size_limit, req).await;
        observe::buyer_response(candidate, res.as_deref());
        let res: dto::BidResponse = serde_json::from_str(&res?)?;
        Ok(res.into_domain(candidate))
    }
}

#[async_trait::async_trait]
impl BidTransport for Http {
    async fn request_bid(
        &self,
        candidate: &BidCandidate,
        signals: &BTreeMap<String, String>,
    ) -> BidResponse {
        observe::buyer_request(candidate);
        match self.try_request_bid(candidate, signals).await {
            Ok(response) => {
                observe::bid(&response);
                response
            }
            Err(err) => {
                observe::bid_failed(candidate, &err);
                BidResponse::no_bid(candidate)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0:?}")]
    Http(#[from] util::http::Error),
    #[error("JSON deserialization error: {0:?}")]
    Deserialize(#[from] serde_json::Error),
}

impl Error {
    /// Label of the error in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(err) => err.kind(),
            Self::Deserialize(_) => "malformed",
        }
    }
}
