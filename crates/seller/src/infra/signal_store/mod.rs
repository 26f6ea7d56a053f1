//! Read access to the key/value store holding the seller's own signals.

use {
    crate::{domain::Signals, util},
    thiserror::Error,
    url::Url,
};

#[derive(Debug, Clone)]
pub enum Config {
    /// Signals fixed in the configuration file.
    Static { signals: Signals, keys: Vec<String> },
    /// Signals served by `GET <url>?keys=<key>,<key>`.
    Http { url: Url, keys: Vec<String> },
}

impl Config {
    pub fn keys(&self) -> &[String] {
        match self {
            Self::Static { keys, .. } | Self::Http { keys, .. } => keys,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SignalStore: Send + Sync {
    /// Fetches the values of the given keys. Unknown keys are absent from the
    /// result.
    async fn get(&self, keys: &[String]) -> Result<Signals, Error>;
}

pub struct Static(Signals);

impl Static {
    pub fn new(signals: Signals) -> Self {
        Self(signals)
    }
}

#[async_trait::async_trait]
impl SignalStore for Static {
    async fn get(&self, keys: &[String]) -> Result<Signals, Error> {
        Ok(keys
            .iter()
            .filter_map(|key| Some((key.clone(), self.0.get(key)?.clone())))
            .collect())
    }
}

pub struct Http {
    client: reqwest::Client,
    url: Url,
    response_size_limit: usize,
}

impl Http {
    pub fn new(client: reqwest::Client, url: Url, response_size_limit: usize) -> Self {
        Self {
            client,
            url,
            response_size_limit,
        }
    }
}

#[async_trait::async_trait]
impl SignalStore for Http {
    async fn get(&self, keys: &[String]) -> Result<Signals, Error> {
        let req = self
            .client
            .get(self.url.clone())
            .query(&[("keys", keys.join(","))]);
        let res = util::http::send(self.response_size_limit, req).await?;
        let signals: Signals = serde_json::from_str(&res)?;
        Ok(signals
            .into_iter()
            .filter(|(key, _)| keys.contains(key))
            .collect())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0:?}")]
    Http(#[from] util::http::Error),
    #[error("JSON deserialization error: {0:?}")]
    Deserialize(#[from] serde_json::Error),
}
