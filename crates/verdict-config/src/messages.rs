use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// Where message templates come from
///
/// The built-in catalog is always the base layer, then `catalog`, then
/// `entries`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessagesConfig {
    /// Extra catalog file (flat or nested TOML table of templates)
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Inline templates keyed by message key
    #[serde(default)]
    pub entries: IndexMap<String, String>,
}
