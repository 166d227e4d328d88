use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use yieldboard_types::PriceMap;

use crate::{client::http_client, error::FeedError, traits::PriceOracle};

/// Price oracle request shaping.
#[derive(Debug, Clone)]
pub struct PriceOracleConfig {
    pub base_url: String,
    /// Maximum keys per request. The upstream endpoint degrades beyond
    /// roughly this many tokens in one query string, so the limit is an
    /// observed tolerance rather than a documented contract.
    pub batch_size: usize,
}

impl Default for PriceOracleConfig {
    fn default() -> Self {
        Self {
            base_url: "https://coins.llama.fi/prices/current".to_string(),
            batch_size: 150,
        }
    }
}

/// HTTP implementation of [`PriceOracle`] with chunked, concurrent
/// requests merged into one flat quote map.
pub struct HttpPriceOracle {
    http_client: Client,
    config: PriceOracleConfig,
}

#[derive(Debug, Deserialize)]
struct PricesEnvelope {
    #[serde(default)]
    coins: PriceMap,
}

impl HttpPriceOracle {
    pub fn new(config: PriceOracleConfig) -> Result<Self, FeedError> {
        Ok(Self {
            http_client: http_client()?,
            config,
        })
    }

    async fn fetch_chunk(&self, keys: &[String]) -> Result<PriceMap, FeedError> {
        let url = format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            keys.join(",")
        );
        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(FeedError::UpstreamStatus {
                status: response.status(),
                url,
            });
        }
        let body = response.text().await?;
        let envelope: PricesEnvelope = serde_json::from_str(&body)?;
        Ok(envelope.coins)
    }
}

#[async_trait::async_trait]
impl PriceOracle for HttpPriceOracle {
    async fn prices(&self, keys: &[String]) -> Result<PriceMap, FeedError> {
        if keys.is_empty() {
            return Ok(PriceMap::new());
        }

        let chunks = chunk_keys(keys, self.config.batch_size);
        let results = join_all(chunks.iter().map(|chunk| self.fetch_chunk(chunk))).await;

        // Merge by key. Keys are disjoint across chunks by construction;
        // should a duplicate ever appear, last write wins.
        let mut merged = PriceMap::new();
        for (chunk, result) in chunks.iter().zip(results) {
            match result {
                Ok(coins) => merged.extend(coins),
                Err(err) => {
                    // A dead chunk degrades to missing quotes for its keys;
                    // symbol back-fill handles the gaps downstream.
                    tracing::warn!(
                        keys = chunk.len(),
                        error = %err,
                        "price chunk failed, continuing without its quotes"
                    );
                }
            }
        }
        Ok(merged)
    }
}

/// Split a key list into oracle-sized request chunks, preserving order.
/// The concatenation of the returned chunks is exactly the input.
pub fn chunk_keys(keys: &[String], batch_size: usize) -> Vec<Vec<String>> {
    keys.chunks(batch_size.max(1))
        .map(<[String]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("ethereum:0x{i:040x}")).collect()
    }

    #[test]
    fn test_chunk_count_is_ceiling_of_key_count() {
        assert_eq!(chunk_keys(&keys(0), 150).len(), 0);
        assert_eq!(chunk_keys(&keys(1), 150).len(), 1);
        assert_eq!(chunk_keys(&keys(150), 150).len(), 1);
        assert_eq!(chunk_keys(&keys(151), 150).len(), 2);
        assert_eq!(chunk_keys(&keys(450), 150).len(), 3);
        assert_eq!(chunk_keys(&keys(451), 150).len(), 4);
    }

    #[test]
    fn test_chunks_cover_input_exactly() {
        let input = keys(337);
        let chunks = chunk_keys(&input, 150);
        let recombined: Vec<String> = chunks.into_iter().flatten().collect();
        assert_eq!(recombined, input);
    }

    #[test]
    fn test_prices_envelope_parses_oracle_shape() {
        let envelope: PricesEnvelope = serde_json::from_str(
            r#"{"coins": {
                "bsc:0xaaa": {"symbol": "cake", "price": 1.62, "decimals": 18},
                "coingecko:flamingo-finance": {"symbol": "flm", "price": 0.05}
            }}"#,
        )
        .unwrap();
        assert_eq!(envelope.coins.len(), 2);
        assert_eq!(envelope.coins["bsc:0xaaa"].symbol, "cake");

        let empty: PricesEnvelope = serde_json::from_str("{}").unwrap();
        assert!(empty.coins.is_empty());
    }
}
