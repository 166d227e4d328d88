use serde::Serialize;
use yieldboard_types::{LendBorrowPool, Pool, TokenNameMapping};

/// One entry of the project filter facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    pub name: String,
    pub slug: String,
    pub url: Option<String>,
}

/// Display-ready yield page dataset: the enriched pool collection plus the
/// filter facets the table UI renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldPage {
    pub pools: Vec<Pool>,
    pub chain_list: Vec<String>,
    pub project_list: Vec<ProjectInfo>,
    pub category_list: Vec<String>,
    /// The mapping enrichment resolved display names against; passed on so
    /// the caller can label symbols it encounters on its own.
    pub token_name_mapping: TokenNameMapping,
}

/// Lending view dataset: borrow-joined pools with facets recomputed over
/// the surviving subset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LendBorrowPage {
    pub pools: Vec<LendBorrowPool>,
    pub chain_list: Vec<String>,
    pub project_list: Vec<ProjectInfo>,
    pub category_list: Vec<String>,
    pub token_name_mapping: TokenNameMapping,
}

/// Pool count and average APY for one project, as shown on the protocol
/// page header.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectYieldSummary {
    pub pool_count: usize,
    pub average_apy: f64,
}
