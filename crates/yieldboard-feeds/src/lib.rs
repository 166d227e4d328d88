pub mod client;
pub mod error;
pub mod prices;
pub mod traits;

pub use client::{FeedEndpoints, HttpYieldFeeds, http_client};
pub use error::FeedError;
pub use prices::{HttpPriceOracle, PriceOracleConfig, chunk_keys};
pub use traits::{PriceOracle, YieldFeeds};
