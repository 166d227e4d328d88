use std::collections::HashMap;

use yieldboard_types::{
    ChainTvl, ChainTvlHistory, ExtraTvlRegistry, ExtraTvlRow, ExtraTvlSettings, ProtocolTvl,
};

/// Section names that never count toward TVL under any configuration.
const ALWAYS_EXCLUDED: [&str; 2] = ["masterchef", "offers"];

/// Value already counted in another protocol's liquidity figure; always
/// subtracted from the total so aggregates do not inflate.
const DOUBLE_COUNTED: &str = "doublecounted";

/// Reduce a protocol's TVL breakdown to a headline total, a per-chain
/// detail table, and the extra-TVL toggle table.
///
/// Falls back to the last observation of each historical per-section
/// series when the flat breakdown is completely empty.
pub fn compose(
    breakdown: &HashMap<String, f64>,
    historical: &HashMap<String, ChainTvlHistory>,
    settings: &ExtraTvlSettings,
    registry: &ExtraTvlRegistry,
) -> ProtocolTvl {
    let sections: Vec<(String, f64)> = if breakdown.is_empty() {
        latest_section_values(historical)
    } else {
        breakdown
            .iter()
            .map(|(name, value)| (name.clone(), *value))
            .collect()
    };

    let mut total = 0.0;
    let mut chains: HashMap<String, f64> = HashMap::new();
    let mut extras: Vec<ExtraTvlRow> = Vec::new();

    for (name, value) in sections {
        if ALWAYS_EXCLUDED.contains(&name.as_str()) {
            continue;
        }

        if name == DOUBLE_COUNTED {
            extras.push(ExtraTvlRow {
                option: name,
                tvl: value,
            });
            total -= value;
            continue;
        }

        if is_extra_section(&name, registry) {
            extras.push(ExtraTvlRow {
                option: name.clone(),
                tvl: value,
            });
            // Untouched toggles include the section in the total.
            if settings.enabled_or(&name, true) {
                total += value;
            }
            continue;
        }

        match name.split_once('-') {
            // A whole-chain total.
            None => {
                if settings.enabled_or(&name, true) {
                    total += value;
                }
                *chains.entry(name).or_insert(0.0) += value;
            }
            // A "<chain>-<extraType>" sub-entry: counted once, into the
            // chain bucket and the total, and only on explicit opt-in.
            Some((chain, extra)) => {
                if settings.enabled_or(extra, false) {
                    total += value;
                    *chains.entry(chain.to_string()).or_insert(0.0) += value;
                }
            }
        }
    }

    let mut chains: Vec<ChainTvl> = chains
        .into_iter()
        .map(|(chain, tvl)| ChainTvl { chain, tvl })
        .collect();
    chains.sort_by(|a, b| b.tvl.total_cmp(&a.tvl).then_with(|| a.chain.cmp(&b.chain)));
    extras.sort_by(|a, b| a.option.cmp(&b.option));

    ProtocolTvl {
        total,
        chains,
        extras,
    }
}

/// Most recent observation of each historical per-section series; an empty
/// series reads as zero, never as a hole.
pub fn latest_section_values(
    historical: &HashMap<String, ChainTvlHistory>,
) -> Vec<(String, f64)> {
    historical
        .iter()
        .map(|(name, series)| {
            let last = series
                .tvl
                .last()
                .map_or(0.0, |point| point.total_liquidity_usd);
            (name.clone(), last)
        })
        .collect()
}

fn is_extra_section(name: &str, registry: &ExtraTvlRegistry) -> bool {
    name.chars().next().is_some_and(char::is_lowercase) && registry.contains(name)
}

#[cfg(test)]
mod tests {
    use yieldboard_types::ChainTvlPoint;

    use super::*;

    fn breakdown(entries: &[(&str, f64)]) -> HashMap<String, f64> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    fn settings(entries: &[(&str, bool)]) -> ExtraTvlSettings {
        entries
            .iter()
            .map(|(option, enabled)| (option.to_string(), *enabled))
            .collect()
    }

    fn chain_value(tvl: &ProtocolTvl, chain: &str) -> Option<f64> {
        tvl.chains
            .iter()
            .find(|row| row.chain == chain)
            .map(|row| row.tvl)
    }

    #[test]
    fn test_doublecounted_always_subtracts() {
        let registry = ExtraTvlRegistry::default();
        let sections = breakdown(&[
            ("tvl", 100.0),
            ("ethereum-staking", 20.0),
            ("doublecounted", 10.0),
        ]);

        let off = compose(
            &sections,
            &HashMap::new(),
            &settings(&[("staking", false)]),
            &registry,
        );
        assert_eq!(off.total, 90.0);

        let on = compose(
            &sections,
            &HashMap::new(),
            &settings(&[("staking", true)]),
            &registry,
        );
        assert_eq!(on.total, 110.0);
        // The sub-entry lands in the ethereum bucket, not the plain one.
        assert_eq!(chain_value(&on, "ethereum"), Some(20.0));
        assert_eq!(chain_value(&on, "tvl"), Some(100.0));
    }

    #[test]
    fn test_masterchef_and_offers_never_count() {
        let registry = ExtraTvlRegistry::default();
        let sections = breakdown(&[
            ("Ethereum", 50.0),
            ("masterchef", 40.0),
            ("offers", 30.0),
        ]);
        let tvl = compose(
            &sections,
            &HashMap::new(),
            &ExtraTvlSettings::default(),
            &registry,
        );
        assert_eq!(tvl.total, 50.0);
        assert_eq!(tvl.chains.len(), 1);
        assert!(tvl.extras.is_empty());
    }

    #[test]
    fn test_extra_sections_default_to_included() {
        let registry = ExtraTvlRegistry::default();
        let sections = breakdown(&[("Ethereum", 50.0), ("staking", 25.0)]);
        let tvl = compose(
            &sections,
            &HashMap::new(),
            &ExtraTvlSettings::default(),
            &registry,
        );
        assert_eq!(tvl.total, 75.0);
        assert_eq!(
            tvl.extras,
            vec![ExtraTvlRow {
                option: "staking".to_string(),
                tvl: 25.0
            }]
        );
        // Extra sections are not chains.
        assert_eq!(chain_value(&tvl, "staking"), None);
    }

    #[test]
    fn test_composite_requires_explicit_opt_in() {
        let registry = ExtraTvlRegistry::default();
        let sections = breakdown(&[("Avalanche", 80.0), ("Avalanche-pool2", 15.0)]);
        let untouched = compose(
            &sections,
            &HashMap::new(),
            &ExtraTvlSettings::default(),
            &registry,
        );
        assert_eq!(untouched.total, 80.0);
        assert_eq!(chain_value(&untouched, "Avalanche"), Some(80.0));

        let opted_in = compose(
            &sections,
            &HashMap::new(),
            &settings(&[("pool2", true)]),
            &registry,
        );
        assert_eq!(opted_in.total, 95.0);
        assert_eq!(chain_value(&opted_in, "Avalanche"), Some(95.0));
    }

    #[test]
    fn test_chains_sorted_by_value_descending() {
        let registry = ExtraTvlRegistry::default();
        let sections = breakdown(&[("Polygon", 10.0), ("Ethereum", 90.0), ("Arbitrum", 40.0)]);
        let tvl = compose(
            &sections,
            &HashMap::new(),
            &ExtraTvlSettings::default(),
            &registry,
        );
        let order: Vec<&str> = tvl.chains.iter().map(|row| row.chain.as_str()).collect();
        assert_eq!(order, vec!["Ethereum", "Arbitrum", "Polygon"]);
    }

    #[test]
    fn test_fallback_reads_last_historical_observation() {
        let registry = ExtraTvlRegistry::default();
        let mut historical = HashMap::new();
        historical.insert(
            "Ethereum".to_string(),
            ChainTvlHistory {
                tvl: vec![
                    ChainTvlPoint {
                        date: 1,
                        total_liquidity_usd: 70.0,
                    },
                    ChainTvlPoint {
                        date: 2,
                        total_liquidity_usd: 100.0,
                    },
                ],
            },
        );
        historical.insert(
            "doublecounted".to_string(),
            ChainTvlHistory {
                tvl: vec![ChainTvlPoint {
                    date: 2,
                    total_liquidity_usd: 10.0,
                }],
            },
        );
        // An empty series reads as zero.
        historical.insert("Polygon".to_string(), ChainTvlHistory::default());

        let tvl = compose(
            &HashMap::new(),
            &historical,
            &ExtraTvlSettings::default(),
            &registry,
        );
        assert_eq!(tvl.total, 90.0);
        assert_eq!(chain_value(&tvl, "Ethereum"), Some(100.0));
        assert_eq!(chain_value(&tvl, "Polygon"), Some(0.0));
    }

    #[test]
    fn test_fallback_ignored_when_breakdown_present() {
        let registry = ExtraTvlRegistry::default();
        let mut historical = HashMap::new();
        historical.insert(
            "Ethereum".to_string(),
            ChainTvlHistory {
                tvl: vec![ChainTvlPoint {
                    date: 1,
                    total_liquidity_usd: 999.0,
                }],
            },
        );
        let tvl = compose(
            &breakdown(&[("Ethereum", 5.0)]),
            &historical,
            &ExtraTvlSettings::default(),
            &registry,
        );
        assert_eq!(tvl.total, 5.0);
    }
}
