//! Module config as read from `config/featured_products.json` and host overrides.

use crate::model::ModuleSettings;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ModuleConfig {
    /// Key under which per-store settings are stored.
    pub slug: String,
    /// Admin route prefix; must start with `/`.
    pub route_prefix: String,
    /// Front-end component that renders the settings page.
    pub page_component: String,
    /// `is_enabled` reported for stores that never saved settings.
    #[serde(default)]
    pub default_is_enabled: bool,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default)]
    pub defaults: ModuleSettings,
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl ModuleConfig {
    pub fn settings_path(&self) -> String {
        format!("{}/settings", self.route_prefix)
    }
}
