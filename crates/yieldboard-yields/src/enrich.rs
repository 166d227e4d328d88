use std::collections::HashSet;

use yieldboard_types::{ChainAliases, Pool, PriceMap, SymbolUnwraps, TokenNameMapping};

/// Chain whose projects are priced through coingecko project ids instead
/// of per-token contract addresses.
const COINGECKO_CHAIN: &str = "Neo";

/// Derive the ordered, de-duplicated price-feed key list for a pool set.
///
/// Pools without reward tokens contribute nothing. A pool on the
/// coingecko-priced chain contributes one project key; every other pool
/// contributes one key per reward token.
pub fn derive_price_keys(pools: &[Pool], aliases: &ChainAliases) -> Vec<String> {
    let mut keys = Vec::new();
    let mut seen = HashSet::new();
    for pool in pools {
        if pool.reward_tokens.is_empty() {
            continue;
        }
        if pool.chain == COINGECKO_CHAIN {
            push_unique(&mut keys, &mut seen, coingecko_key(&pool.project));
        } else {
            let chain = aliases.normalize(&pool.chain);
            for token in &pool.reward_tokens {
                push_unique(&mut keys, &mut seen, token_key(&chain, token));
            }
        }
    }
    keys
}

/// Back-fill `reward_tokens_symbols` on every pool from the merged price
/// map. Unresolved keys become the `None` sentinel; repeats collapse while
/// preserving first-seen order.
pub fn backfill_symbols(pools: &mut [Pool], prices: &PriceMap, aliases: &ChainAliases) {
    for pool in pools.iter_mut() {
        let symbols: Vec<Option<String>> = if pool.chain == COINGECKO_CHAIN {
            let symbol = prices
                .get(&coingecko_key(&pool.project))
                .map(|quote| quote.symbol.to_uppercase());
            pool.reward_tokens.iter().map(|_| symbol.clone()).collect()
        } else {
            let chain = aliases.normalize(&pool.chain);
            pool.reward_tokens
                .iter()
                .map(|token| {
                    prices
                        .get(&token_key(&chain, token))
                        .map(|quote| quote.symbol.to_uppercase())
                })
                .collect()
        };
        pool.reward_tokens_symbols = dedup_preserving_order(symbols);
    }
}

/// Resolve display names for the back-filled symbols. Wrapped symbols map
/// to their native entry first; symbols without a name entry are dropped.
pub fn backfill_names(pools: &mut [Pool], names: &TokenNameMapping, unwraps: &SymbolUnwraps) {
    for pool in pools.iter_mut() {
        pool.reward_tokens_names = pool
            .reward_tokens_symbols
            .iter()
            .flatten()
            .filter_map(|symbol| names.get(unwraps.resolve(symbol)).map(str::to_string))
            .collect();
    }
}

fn coingecko_key(project: &str) -> String {
    format!("coingecko:{project}")
}

fn token_key(normalized_chain: &str, token: &str) -> String {
    format!("{normalized_chain}:{}", token.to_lowercase())
}

fn push_unique(keys: &mut Vec<String>, seen: &mut HashSet<String>, key: String) {
    if seen.insert(key.clone()) {
        keys.push(key);
    }
}

fn dedup_preserving_order(symbols: Vec<Option<String>>) -> Vec<Option<String>> {
    let mut seen = HashSet::new();
    symbols
        .into_iter()
        .filter(|symbol| seen.insert(symbol.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use yieldboard_types::CoinPrice;

    use super::*;

    fn pool(id: &str, project: &str, chain: &str, reward_tokens: &[&str]) -> Pool {
        Pool {
            pool: id.to_string(),
            project: project.to_string(),
            chain: chain.to_string(),
            symbol: String::new(),
            category: String::new(),
            apy: 0.0,
            apy_base: None,
            apy_reward: None,
            tvl_usd: 0.0,
            underlying_tokens: vec![],
            reward_tokens: reward_tokens.iter().map(|t| t.to_string()).collect(),
            reward_tokens_symbols: vec![],
            reward_tokens_names: vec![],
        }
    }

    fn quote(symbol: &str) -> CoinPrice {
        CoinPrice {
            symbol: symbol.to_string(),
            price: 1.0,
            decimals: None,
            timestamp: None,
            confidence: None,
        }
    }

    #[test]
    fn test_key_derivation_normalizes_chain_and_case() {
        let pools = vec![pool("p1", "venus", "Binance", &["AAA", "BBB"])];
        let keys = derive_price_keys(&pools, &ChainAliases::default());
        assert_eq!(keys, vec!["bsc:aaa".to_string(), "bsc:bbb".to_string()]);
    }

    #[test]
    fn test_key_derivation_dedups_across_pools() {
        let pools = vec![
            pool("p1", "venus", "Binance", &["AAA"]),
            pool("p2", "alpaca", "Binance", &["aaa", "CCC"]),
            pool("p3", "flamingo", "Neo", &["FLM"]),
            pool("p4", "flamingo", "Neo", &["NEO"]),
            pool("p5", "idle", "Ethereum", &[]),
        ];
        let keys = derive_price_keys(&pools, &ChainAliases::default());
        assert_eq!(
            keys,
            vec![
                "bsc:aaa".to_string(),
                "bsc:ccc".to_string(),
                "coingecko:flamingo".to_string(),
            ]
        );
    }

    #[test]
    fn test_backfill_keeps_null_sentinel_for_missing_quotes() {
        let mut pools = vec![pool("p1", "venus", "Binance", &["AAA", "BBB"])];
        let prices: PriceMap = [("bsc:aaa".to_string(), quote("x"))].into_iter().collect();

        backfill_symbols(&mut pools, &prices, &ChainAliases::default());
        assert_eq!(
            pools[0].reward_tokens_symbols,
            vec![Some("X".to_string()), None]
        );
    }

    #[test]
    fn test_backfill_dedups_repeated_symbols() {
        let mut pools = vec![pool("p1", "venus", "Binance", &["AAA", "aAa", "BBB"])];
        let prices: PriceMap = [
            ("bsc:aaa".to_string(), quote("x")),
            ("bsc:bbb".to_string(), quote("y")),
        ]
        .into_iter()
        .collect();

        backfill_symbols(&mut pools, &prices, &ChainAliases::default());
        assert_eq!(
            pools[0].reward_tokens_symbols,
            vec![Some("X".to_string()), Some("Y".to_string())]
        );
    }

    #[test]
    fn test_neo_broadcasts_project_symbol() {
        let mut pools = vec![pool("p1", "flamingo-finance", "Neo", &["0xf1", "0xf2"])];
        let prices: PriceMap = [("coingecko:flamingo-finance".to_string(), quote("flm"))]
            .into_iter()
            .collect();

        backfill_symbols(&mut pools, &prices, &ChainAliases::default());
        // Broadcast then collapsed to the single resolved symbol.
        assert_eq!(
            pools[0].reward_tokens_symbols,
            vec![Some("FLM".to_string())]
        );
    }

    #[test]
    fn test_names_unwrap_wrapped_tokens_and_drop_unknowns() {
        let mut pools = vec![pool("p1", "pangolin", "Avalanche", &["0xa", "0xb", "0xc"])];
        pools[0].reward_tokens_symbols = vec![
            Some("WAVAX".to_string()),
            Some("WFTM".to_string()),
            Some("ZZZ".to_string()),
            None,
        ];
        let names: TokenNameMapping = [
            ("AVAX".to_string(), "Avalanche".to_string()),
            ("FTM".to_string(), "Fantom".to_string()),
        ]
        .into_iter()
        .collect();

        backfill_names(&mut pools, &names, &SymbolUnwraps::default());
        assert_eq!(
            pools[0].reward_tokens_names,
            vec!["Avalanche".to_string(), "Fantom".to_string()]
        );
    }
}
