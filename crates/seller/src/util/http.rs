//! Size-limited HTTP exchanges shared by buyers, remote sellers and signal
//! stores.

use thiserror::Error;

/// Sends the request and reads the response body. Non-success status codes
/// are errors, so are bodies larger than `limit_bytes`. A declared content
/// length over the limit fails before anything is read.
pub async fn send(limit_bytes: usize, req: reqwest::RequestBuilder) -> Result<String, Error> {
    let mut res = req.send().await?;
    let status = res.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }
    if res
        .content_length()
        .is_some_and(|len| len > limit_bytes as u64)
    {
        return Err(Error::ResponseTooLarge { limit_bytes });
    }

    let mut body = Vec::new();
    while let Some(chunk) = res.chunk().await? {
        if body.len() + chunk.len() > limit_bytes {
            return Err(Error::ResponseTooLarge { limit_bytes });
        }
        body.extend_from_slice(&chunk);
    }
    Ok(String::from_utf8(body)?)
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0:?}")]
    Response(#[from] reqwest::Error),
    #[error("unexpected status code {0}")]
    Status(reqwest::StatusCode),
    #[error("the response was too large, the limit was {limit_bytes} bytes")]
    ResponseTooLarge { limit_bytes: usize },
    #[error("the response is not UTF-8: {0:?}")]
    NotUtf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    /// Label of the error in metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Response(err) if err.is_timeout() => "timeout",
            Self::Response(_) => "unreachable",
            Self::Status(_) => "status",
            Self::ResponseTooLarge { .. } => "too_large",
            Self::NotUtf8(_) => "malformed",
        }
    }
}
