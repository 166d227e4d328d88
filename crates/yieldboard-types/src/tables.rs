use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Liquidity categories a user may include in or exclude from TVL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ExtraTvlOption {
    Staking,
    Pool2,
    Borrowed,
    Vesting,
    Liquidstaking,
    Gov,
    Doublecounted,
}

/// Maps display chain names to the identifiers the price feed keys on.
///
/// Total over strings: unknown names pass through unchanged after
/// lowercasing. A single instance is shared by every component that
/// derives feed keys, so lookups always agree.
#[derive(Debug, Clone)]
pub struct ChainAliases {
    aliases: HashMap<String, String>,
}

impl Default for ChainAliases {
    fn default() -> Self {
        Self::from_pairs([
            ("binance", "bsc"),
            ("avalanche", "avax"),
            ("gnosis", "xdai"),
        ])
    }
}

impl ChainAliases {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            aliases: pairs
                .into_iter()
                .map(|(display, feed)| (display.to_lowercase(), feed.to_string()))
                .collect(),
        }
    }

    pub fn normalize(&self, display: &str) -> String {
        let lower = display.to_lowercase();
        self.aliases.get(&lower).cloned().unwrap_or(lower)
    }
}

/// Wrapped-token symbols whose display name resolves to the native asset
/// entry of the token-name mapping.
#[derive(Debug, Clone)]
pub struct SymbolUnwraps {
    unwraps: HashMap<String, String>,
}

impl Default for SymbolUnwraps {
    fn default() -> Self {
        Self::from_pairs([("WAVAX", "AVAX"), ("WFTM", "FTM")])
    }
}

impl SymbolUnwraps {
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            unwraps: pairs
                .into_iter()
                .map(|(wrapped, native)| (wrapped.to_string(), native.to_string()))
                .collect(),
        }
    }

    pub fn resolve<'a>(&'a self, symbol: &'a str) -> &'a str {
        self.unwraps.get(symbol).map_or(symbol, String::as_str)
    }
}

/// Symbol → human-readable name table, built from the config feed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenNameMapping(HashMap<String, String>);

impl TokenNameMapping {
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.0.get(symbol).map(String::as_str)
    }

    pub fn insert(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        self.0.insert(symbol.into(), name.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for TokenNameMapping {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The set of extra-TVL section names the composer recognizes.
#[derive(Debug, Clone)]
pub struct ExtraTvlRegistry {
    options: HashSet<String>,
}

impl Default for ExtraTvlRegistry {
    fn default() -> Self {
        Self {
            options: ExtraTvlOption::iter()
                .map(|option| option.as_ref().to_string())
                .collect(),
        }
    }
}

impl ExtraTvlRegistry {
    pub fn contains(&self, name: &str) -> bool {
        self.options.contains(name)
    }
}

/// User toggle state per extra-TVL option, keyed lowercase. Supplied by
/// the caller and read-only inside the core.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtraTvlSettings(HashMap<String, bool>);

impl ExtraTvlSettings {
    pub fn set(&mut self, option: &str, enabled: bool) {
        self.0.insert(option.to_lowercase(), enabled);
    }

    /// Explicit toggle state, if the user ever touched this option.
    pub fn get(&self, option: &str) -> Option<bool> {
        self.0.get(&option.to_lowercase()).copied()
    }

    /// Toggle state with the caller-chosen default for untouched options.
    pub fn enabled_or(&self, option: &str, default: bool) -> bool {
        self.get(option).unwrap_or(default)
    }
}

impl FromIterator<(String, bool)> for ExtraTvlSettings {
    fn from_iter<I: IntoIterator<Item = (String, bool)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(option, enabled)| (option.to_lowercase(), enabled))
                .collect(),
        )
    }
}
