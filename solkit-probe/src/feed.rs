//! Remote chain metadata feeds.
//!
//! Fetches the public chain list and the TVL ranking concurrently. Either
//! feed failing aborts aggregation; there is no retry at this layer.

use serde::de::DeserializeOwned;
use solkit_core::{aggregate, ChainDescriptor, ChainInfo, LlamaTvl, LocalDatasets};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ProbeError, Result};

/// Public chain list.
pub const DEFAULT_CHAINS_URL: &str = "https://chainid.network/chains.json";

/// DefiLlama chain TVL ranking.
pub const DEFAULT_TVL_URL: &str = "https://api.llama.fi/chains";

/// Upper bound for a single feed download.
const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the chain list and TVL feeds.
#[derive(Debug, Clone)]
pub struct FeedClient {
    client: reqwest::Client,
    chains_url: String,
    tvl_url: String,
}

impl FeedClient {
    /// Create a client for explicit feed URLs.
    pub fn new(chains_url: impl Into<String>, tvl_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(FEED_TIMEOUT)
            .build()
            .map_err(|e| ProbeError::RpcError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            chains_url: chains_url.into(),
            tvl_url: tvl_url.into(),
        })
    }

    /// Default feed URLs, overridable via `SOLKIT_CHAINS_URL` and `SOLKIT_TVL_URL`.
    pub fn from_env() -> Result<Self> {
        let chains_url =
            std::env::var("SOLKIT_CHAINS_URL").unwrap_or_else(|_| DEFAULT_CHAINS_URL.to_string());
        let tvl_url = std::env::var("SOLKIT_TVL_URL").unwrap_or_else(|_| DEFAULT_TVL_URL.to_string());
        Self::new(chains_url, tvl_url)
    }

    pub fn chains_url(&self) -> &str {
        &self.chains_url
    }

    pub fn tvl_url(&self) -> &str {
        &self.tvl_url
    }

    /// Fetch the remote chain list.
    pub async fn fetch_chain_infos(&self) -> Result<Vec<ChainInfo>> {
        self.fetch_json("chain list", &self.chains_url).await
    }

    /// Fetch the TVL ranking feed.
    pub async fn fetch_tvls(&self) -> Result<Vec<LlamaTvl>> {
        self.fetch_json("TVL", &self.tvl_url).await
    }

    /// Fetch both feeds concurrently and merge them with local data.
    pub async fn aggregate(&self, local: &LocalDatasets) -> Result<Vec<ChainDescriptor>> {
        let (chains, tvls) = tokio::try_join!(self.fetch_chain_infos(), self.fetch_tvls())?;
        info!(
            "Fetched {} chains and {} TVL entries",
            chains.len(),
            tvls.len()
        );
        Ok(aggregate(chains, &tvls, local))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, feed: &'static str, url: &str) -> Result<T> {
        let failed = |reason: String| ProbeError::Feed {
            feed,
            url: url.to_string(),
            reason,
        };

        debug!("Fetching {} feed from {}", feed, url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(failed(format!("HTTP {}", status.as_u16())));
        }

        response.json::<T>().await.map_err(|e| failed(e.to_string()))
    }
}
