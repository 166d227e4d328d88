use serde::{Deserialize, Serialize};

/// One point of a historical per-section TVL series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainTvlPoint {
    #[serde(default)]
    pub date: i64,
    #[serde(rename = "totalLiquidityUSD", default)]
    pub total_liquidity_usd: f64,
}

/// Historical series for one breakdown section, used as the fallback input
/// when a protocol reports no flat breakdown map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChainTvlHistory {
    #[serde(default)]
    pub tvl: Vec<ChainTvlPoint>,
}

/// Per-chain row of the composed TVL detail table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainTvl {
    pub chain: String,
    pub tvl: f64,
}

/// One extra-TVL toggle row: a liquidity category the caller may include
/// in or exclude from the headline total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraTvlRow {
    pub option: String,
    pub tvl: f64,
}

/// Composed protocol TVL: the headline total plus its display tables.
#[derive(Debug, Clone, Serialize)]
pub struct ProtocolTvl {
    pub total: f64,
    /// Chains by USD value descending.
    pub chains: Vec<ChainTvl>,
    /// Recognized extra-TVL sections by option name.
    pub extras: Vec<ExtraTvlRow>,
}
