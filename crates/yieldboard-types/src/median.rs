use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One observation of the pool-wide median APY series, as fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedianApyPoint {
    /// Raw upstream timestamp, RFC3339 with a midnight time component.
    pub timestamp: String,
    #[serde(rename = "medianAPY")]
    pub median_apy: f64,
    #[serde(default)]
    pub unique_pools: Option<u64>,
}

/// A median observation reduced to its calendar day, with the trailing
/// seven-day average attached once enough history exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SmoothedMedianPoint {
    pub timestamp: NaiveDate,
    #[serde(rename = "medianAPY")]
    pub median_apy: f64,
    pub unique_pools: Option<u64>,
    /// `None` for the first six days of the series.
    #[serde(rename = "avg7day")]
    pub avg_7day: Option<f64>,
}
