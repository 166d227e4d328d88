use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One quote from the price oracle, keyed externally by
/// `"<chain>:<tokenAddress>"` or `"coingecko:<projectSlug>"`.
///
/// Only `symbol` is consumed by enrichment; the remaining fields are kept
/// so the record round-trips untouched for callers that want them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinPrice {
    pub symbol: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

/// Flat key → quote map merged across all oracle request chunks.
pub type PriceMap = HashMap<String, CoinPrice>;
