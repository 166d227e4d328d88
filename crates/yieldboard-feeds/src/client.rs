use std::collections::HashMap;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use yieldboard_types::{LendBorrowEntry, MedianApyPoint, Pool, YieldConfig};

use crate::{error::FeedError, traits::YieldFeeds};

/// Base endpoints for the yield dashboard feeds.
#[derive(Debug, Clone)]
pub struct FeedEndpoints {
    pub pools: String,
    pub config: String,
    pub project_urls: String,
    pub chains: String,
    pub median: String,
    pub lend_borrow: String,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            pools: "https://yields.llama.fi/pools".to_string(),
            config: "https://api.llama.fi/config/yields".to_string(),
            project_urls: "https://yields.llama.fi/url".to_string(),
            chains: "https://api.llama.fi/chains".to_string(),
            median: "https://yields.llama.fi/median".to_string(),
            lend_borrow: "https://yields.llama.fi/lendBorrow".to_string(),
        }
    }
}

/// HTTP implementation of [`YieldFeeds`] over the public feed endpoints.
pub struct HttpYieldFeeds {
    http_client: Client,
    endpoints: FeedEndpoints,
}

#[derive(Debug, Deserialize)]
struct PoolsEnvelope {
    #[serde(default)]
    data: Vec<Pool>,
}

#[derive(Debug, Deserialize)]
struct ChainRef {
    name: String,
}

impl HttpYieldFeeds {
    pub fn new(endpoints: FeedEndpoints) -> Result<Self, FeedError> {
        Ok(Self {
            http_client: http_client()?,
            endpoints,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FeedError> {
        let response = self.http_client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::UpstreamStatus {
                status: response.status(),
                url: url.to_string(),
            });
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait::async_trait]
impl YieldFeeds for HttpYieldFeeds {
    async fn pools(&self) -> Result<Vec<Pool>, FeedError> {
        let envelope: PoolsEnvelope = self.get_json(&self.endpoints.pools).await?;
        Ok(envelope.data)
    }

    async fn config(&self) -> Result<YieldConfig, FeedError> {
        self.get_json(&self.endpoints.config).await
    }

    async fn project_urls(&self) -> Result<HashMap<String, String>, FeedError> {
        self.get_json(&self.endpoints.project_urls).await
    }

    async fn chains(&self) -> Result<Vec<String>, FeedError> {
        let chains: Vec<ChainRef> = self.get_json(&self.endpoints.chains).await?;
        Ok(chains.into_iter().map(|chain| chain.name).collect())
    }

    async fn median_series(&self) -> Result<Vec<MedianApyPoint>, FeedError> {
        self.get_json(&self.endpoints.median).await
    }

    async fn lend_borrow(&self) -> Result<Vec<LendBorrowEntry>, FeedError> {
        self.get_json(&self.endpoints.lend_borrow).await
    }
}

pub fn http_client() -> Result<Client, FeedError> {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(FeedError::from)
}
