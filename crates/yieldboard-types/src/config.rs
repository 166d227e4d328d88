use serde::{Deserialize, Serialize};

/// Project reference metadata from the config feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolConfig {
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// Governance/reward token ticker; "-" when the project has none.
    #[serde(default)]
    pub symbol: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub audits: Option<String>,
}

impl ProtocolConfig {
    /// Slug as reported upstream, or derived from the name when the feed
    /// leaves it empty.
    pub fn slug(&self) -> String {
        if self.slug.is_empty() {
            self.name.trim().to_lowercase().replace(' ', "-")
        } else {
            self.slug.clone()
        }
    }
}

/// Config feed payload: the project registry backing the token-name
/// mapping and the project facet list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldConfig {
    #[serde(default)]
    pub protocols: Vec<ProtocolConfig>,
}
