use serde::{Deserialize, Deserializer, Serialize};

/// One yield-bearing position as reported by the pool feed.
///
/// `underlying_tokens` and `reward_tokens` arrive as `null` or are missing
/// entirely for a fair share of upstream records; both are normalized to
/// empty vectors at deserialization so downstream code never sees an absent
/// array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    /// Unique pool identifier.
    pub pool: String,
    /// Project slug, e.g. "aave-v3".
    pub project: String,
    /// Chain name in display form, e.g. "Binance".
    pub chain: String,
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub apy: f64,
    #[serde(default)]
    pub apy_base: Option<f64>,
    #[serde(default)]
    pub apy_reward: Option<f64>,
    #[serde(default)]
    pub tvl_usd: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub underlying_tokens: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reward_tokens: Vec<String>,
    /// Filled by price enrichment. `None` marks a reward token whose price
    /// quote did not resolve to a symbol.
    #[serde(default)]
    pub reward_tokens_symbols: Vec<Option<String>>,
    /// Filled by price enrichment; symbols without a display name are
    /// dropped rather than carried as placeholders.
    #[serde(default)]
    pub reward_tokens_names: Vec<String>,
}

/// Per-pool borrow-side metrics from the lend/borrow overlay feed.
///
/// The overlay covers a subset of the pool feed; records join 1:1 on the
/// pool identifier and unmatched pools are simply absent from the lending
/// view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LendBorrowEntry {
    pub pool: String,
    #[serde(default)]
    pub apy_base_borrow: f64,
    #[serde(default)]
    pub apy_reward_borrow: f64,
    #[serde(default)]
    pub total_supply_usd: f64,
    #[serde(default)]
    pub total_borrow_usd: f64,
    #[serde(default)]
    pub ltv: f64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub reward_tokens: Vec<String>,
}

/// A lending-category pool joined with its borrow-side overlay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LendBorrowPool {
    #[serde(flatten)]
    pub pool: Pool,
    /// Borrow-side base APY, sign-flipped into a cost.
    pub apy_base_borrow: f64,
    pub apy_reward_borrow: f64,
    pub total_supply_usd: f64,
    pub total_borrow_usd: f64,
    pub ltv: f64,
    /// Supply minus borrow. `None` when the figure is not meaningful for
    /// the project and is suppressed instead of shown negative.
    pub total_available_usd: Option<f64>,
    /// Net borrow APY: borrow-side reward minus the raw base cost.
    pub apy_borrow: f64,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tokens: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(tokens.unwrap_or_default())
}
