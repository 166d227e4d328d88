use std::collections::HashMap;

use yieldboard_types::{LendBorrowEntry, MedianApyPoint, Pool, PriceMap, YieldConfig};

use crate::error::FeedError;

/// The upstream feeds backing the yield dashboard datasets.
///
/// The aggregation layer talks to this trait, not to HTTP; tests swap in
/// in-memory implementations.
#[async_trait::async_trait]
pub trait YieldFeeds: Send + Sync {
    async fn pools(&self) -> Result<Vec<Pool>, FeedError>;

    async fn config(&self) -> Result<YieldConfig, FeedError>;

    /// Project slug → project site URL.
    async fn project_urls(&self) -> Result<HashMap<String, String>, FeedError>;

    /// Reference list of chain display names, in upstream order.
    async fn chains(&self) -> Result<Vec<String>, FeedError>;

    async fn median_series(&self) -> Result<Vec<MedianApyPoint>, FeedError>;

    async fn lend_borrow(&self) -> Result<Vec<LendBorrowEntry>, FeedError>;
}

/// Batched price-quote lookups against the price oracle.
#[async_trait::async_trait]
pub trait PriceOracle: Send + Sync {
    /// Resolve quotes for the given price-feed keys. Implementations own
    /// request chunking; keys that fail to resolve are simply absent from
    /// the returned map.
    async fn prices(&self, keys: &[String]) -> Result<PriceMap, FeedError>;
}
