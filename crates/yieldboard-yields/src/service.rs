use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;
use yieldboard_feeds::{FeedError, PriceOracle, YieldFeeds};
use yieldboard_kpi::median;
use yieldboard_types::{
    ChainAliases, LendBorrowEntry, LendBorrowPool, Pool, SmoothedMedianPoint, SymbolUnwraps,
    TokenNameMapping, YieldConfig,
};

use crate::{
    dto::{LendBorrowPage, ProjectInfo, ProjectYieldSummary, YieldPage},
    enrich,
};

const LENDING_CATEGORY: &str = "Lending";

/// Available liquidity is suppressed for this project: excess borrows are
/// routed through the pools it builds on top of, so supply minus borrow
/// reads negative or misleading for its markets.
const SUPPRESSED_LIQUIDITY_PROJECT: &str = "morpho";

/// Immutable lookup tables shared by the aggregation operations.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub chain_aliases: ChainAliases,
    pub symbol_unwraps: SymbolUnwraps,
}

/// Stateless orchestrator over the upstream feeds and the price oracle.
/// Every operation fetches fresh and returns a display-ready dataset.
pub struct YieldAggregator {
    feeds: Arc<dyn YieldFeeds>,
    oracle: Arc<dyn PriceOracle>,
    tables: ReferenceTables,
}

impl YieldAggregator {
    pub fn new(
        feeds: Arc<dyn YieldFeeds>,
        oracle: Arc<dyn PriceOracle>,
        tables: ReferenceTables,
    ) -> Self {
        Self {
            feeds,
            oracle,
            tables,
        }
    }

    /// Assemble the main yield page: enriched pools plus filter facets.
    pub async fn yield_page(&self) -> Result<YieldPage, FeedError> {
        let (mut pools, config, urls, chains) = tokio::try_join!(
            self.feeds.pools(),
            self.feeds.config(),
            self.feeds.project_urls(),
            self.feeds.chains(),
        )?;

        let token_name_mapping = token_names_from_config(&config);

        let keys = enrich::derive_price_keys(&pools, &self.tables.chain_aliases);
        debug!(
            pools = pools.len(),
            price_keys = keys.len(),
            "assembling yield page"
        );
        let prices = self.oracle.prices(&keys).await?;
        enrich::backfill_symbols(&mut pools, &prices, &self.tables.chain_aliases);
        enrich::backfill_names(&mut pools, &token_name_mapping, &self.tables.symbol_unwraps);

        let chain_list = chain_facet(pools.iter().map(|pool| pool.chain.as_str()), &chains);
        let project_list = project_facet(&pools, &config, &urls);
        let category_list = category_facet(&pools);

        Ok(YieldPage {
            pools,
            chain_list,
            project_list,
            category_list,
            token_name_mapping,
        })
    }

    /// The smoothed median-APY series for the overview chart.
    pub async fn median_series(&self) -> Result<Vec<SmoothedMedianPoint>, FeedError> {
        let raw = self.feeds.median_series().await?;
        Ok(median::smooth(raw))
    }

    /// The lending view: lending-category pools joined with their
    /// borrow-side overlay, sorted by supplied value.
    pub async fn lend_borrow(&self) -> Result<LendBorrowPage, FeedError> {
        let page = self.yield_page().await?;

        let overlay: HashMap<String, LendBorrowEntry> = self
            .feeds
            .lend_borrow()
            .await?
            .into_iter()
            .map(|entry| (entry.pool.clone(), entry))
            .collect();

        // The overlay feed trails the pool feed; pools it does not cover
        // yet are dropped from this view rather than reported as errors.
        let mut pools: Vec<LendBorrowPool> = page
            .pools
            .into_iter()
            .filter(|pool| pool.category == LENDING_CATEGORY)
            .filter_map(|pool| {
                overlay
                    .get(&pool.pool)
                    .map(|entry| join_borrow_overlay(pool, entry))
            })
            .collect();
        pools.sort_by(|a, b| b.total_supply_usd.total_cmp(&a.total_supply_usd));
        debug!(pools = pools.len(), "assembled lend/borrow view");

        let chain_list = unique_in_order(pools.iter().map(|p| p.pool.chain.as_str()));
        let surviving: HashSet<&str> = pools.iter().map(|p| p.pool.project.as_str()).collect();
        let project_list = page
            .project_list
            .into_iter()
            .filter(|project| surviving.contains(project.slug.as_str()))
            .collect();

        Ok(LendBorrowPage {
            pools,
            chain_list,
            project_list,
            category_list: vec![LENDING_CATEGORY.to_string()],
            token_name_mapping: page.token_name_mapping,
        })
    }
}

fn join_borrow_overlay(mut pool: Pool, entry: &LendBorrowEntry) -> LendBorrowPool {
    // The overlay knows the borrow-side incentives; prefer its reward
    // tokens whenever either side reports live rewards.
    if pool.apy_reward.unwrap_or(0.0) > 0.0 || entry.apy_reward_borrow > 0.0 {
        pool.reward_tokens = entry.reward_tokens.clone();
    }

    let total_available_usd = if pool.project == SUPPRESSED_LIQUIDITY_PROJECT {
        None
    } else {
        Some(entry.total_supply_usd - entry.total_borrow_usd)
    };

    LendBorrowPool {
        apy_base_borrow: -entry.apy_base_borrow,
        apy_reward_borrow: entry.apy_reward_borrow,
        total_supply_usd: entry.total_supply_usd,
        total_borrow_usd: entry.total_borrow_usd,
        ltv: entry.ltv,
        total_available_usd,
        apy_borrow: entry.apy_reward_borrow - entry.apy_base_borrow,
        pool,
    }
}

/// Pool count and average APY for one project across an enriched pool
/// set; `None` when the project has no tracked pools.
pub fn project_yield_summary(pools: &[Pool], project: &str) -> Option<ProjectYieldSummary> {
    let apys: Vec<f64> = pools
        .iter()
        .filter(|pool| pool.project == project)
        .map(|pool| pool.apy)
        .collect();
    if apys.is_empty() {
        return None;
    }
    Some(ProjectYieldSummary {
        pool_count: apys.len(),
        average_apy: apys.iter().sum::<f64>() / apys.len() as f64,
    })
}

fn token_names_from_config(config: &YieldConfig) -> TokenNameMapping {
    config
        .protocols
        .iter()
        .filter(|protocol| !protocol.symbol.is_empty() && protocol.symbol != "-")
        .map(|protocol| (protocol.symbol.to_uppercase(), protocol.name.clone()))
        .collect()
}

/// Chains present in the pool set, in reference-feed order with unknown
/// chains appended alphabetically.
fn chain_facet<'a>(present: impl Iterator<Item = &'a str>, reference: &[String]) -> Vec<String> {
    let present: HashSet<&str> = present.collect();
    let referenced: HashSet<&str> = reference.iter().map(String::as_str).collect();

    let mut list: Vec<String> = reference
        .iter()
        .filter(|chain| present.contains(chain.as_str()))
        .cloned()
        .collect();
    let mut unknown: Vec<String> = present
        .iter()
        .filter(|chain| !referenced.contains(**chain))
        .map(|chain| (*chain).to_string())
        .collect();
    unknown.sort_unstable();
    list.extend(unknown);
    list
}

fn project_facet(
    pools: &[Pool],
    config: &YieldConfig,
    urls: &HashMap<String, String>,
) -> Vec<ProjectInfo> {
    let present: HashSet<&str> = pools.iter().map(|pool| pool.project.as_str()).collect();
    let mut list: Vec<ProjectInfo> = config
        .protocols
        .iter()
        .filter(|protocol| present.contains(protocol.slug().as_str()))
        .map(|protocol| {
            let slug = protocol.slug();
            let url = urls.get(&slug).cloned().or_else(|| protocol.url.clone());
            ProjectInfo {
                name: protocol.name.clone(),
                slug,
                url,
            }
        })
        .collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

fn category_facet(pools: &[Pool]) -> Vec<String> {
    let mut categories: Vec<String> = pools
        .iter()
        .filter(|pool| !pool.category.is_empty())
        .map(|pool| pool.category.clone())
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    categories.sort_unstable();
    categories
}

fn unique_in_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}
