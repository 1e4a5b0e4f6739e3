use crate::error::Result;
use async_trait::async_trait;
use tracing::warn;

/// Minimal text-over-HTTP seam so acquisition logic can run against fakes
#[async_trait]
pub trait HttpFetch: Send + Sync {
    /// GET `url` and return the body on HTTP 200.
    ///
    /// Any other status is logged and yields `None`; transport failures are errors.
    async fn fetch_text(&self, url: &str) -> Result<Option<String>>;
}

pub struct ReqwestFetcher(reqwest::Client);

impl ReqwestFetcher {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self(client))
    }
}

#[async_trait]
impl HttpFetch for ReqwestFetcher {
    async fn fetch_text(&self, url: &str) -> Result<Option<String>> {
        let response = self.0.get(url).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::OK {
            Ok(Some(response.text().await?))
        } else {
            warn!(%url, status = status.as_u16(), "Failed to fetch data");
            Ok(None)
        }
    }
}
