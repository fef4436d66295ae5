//! Load module config: bundled defaults merged with an optional host file.

use crate::config::{validate, ModuleConfig};
use crate::error::ConfigError;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Module config shipped with the crate.
pub const BUNDLED_CONFIG: &str = include_str!("../../config/featured_products.json");

/// Env var naming the host override file.
pub const CONFIG_PATH_ENV: &str = "FEATURED_PRODUCTS_CONFIG";

/// Bundled config only, validated.
pub fn bundled_config() -> Result<ModuleConfig, ConfigError> {
    let base: Value = serde_json::from_str(BUNDLED_CONFIG)?;
    finish(base)
}

/// Bundled config with `overrides` merged over it (objects merge key by key, other values replace).
pub fn load_with_overrides(overrides: Value) -> Result<ModuleConfig, ConfigError> {
    let mut base: Value = serde_json::from_str(BUNDLED_CONFIG)?;
    if !overrides.is_object() {
        return Err(ConfigError::Validation("config override must be a JSON object".into()));
    }
    merge(&mut base, overrides);
    finish(base)
}

/// Bundled config merged with the JSON file at `path`.
pub async fn load_from_file(path: &Path) -> Result<ModuleConfig, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ConfigError::Load(format!("{}: {}", path.display(), e)))?;
    let overrides: Value = serde_json::from_str(&raw)?;
    let config = load_with_overrides(overrides)?;
    tracing::info!("module config loaded from {}", path.display());
    Ok(config)
}

/// Reads `FEATURED_PRODUCTS_CONFIG` when set, else the bundled config.
pub async fn load_from_env() -> Result<ModuleConfig, ConfigError> {
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(p) if !p.trim().is_empty() => load_from_file(&PathBuf::from(p)).await,
        _ => {
            tracing::info!("no {} set, using bundled module config", CONFIG_PATH_ENV);
            bundled_config()
        }
    }
}

fn finish(merged: Value) -> Result<ModuleConfig, ConfigError> {
    let config: ModuleConfig = serde_json::from_value(merged)?;
    validate(&config)?;
    Ok(config)
}

fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(b), Value::Object(o)) => {
            for (k, v) in o {
                let nested = v.is_object() && b.get(&k).map_or(false, Value::is_object);
                if nested {
                    if let Some(existing) = b.get_mut(&k) {
                        merge(existing, v);
                    }
                } else {
                    b.insert(k, v);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundled_config_is_valid() {
        let config = bundled_config().unwrap();
        assert_eq!(config.slug, "featured-product-general");
        assert_eq!(config.route_prefix, "/modules/general/featured-product-general");
        assert_eq!(config.defaults.max_products, 12);
        assert_eq!(config.defaults.title, "Featured Products");
        assert!(config.defaults.enabled);
        assert!(!config.default_is_enabled);
    }

    #[test]
    fn host_override_wins_per_key() {
        let config = load_with_overrides(json!({
            "default_is_enabled": true,
            "defaults": { "title": "Staff picks" }
        }))
        .unwrap();
        assert!(config.default_is_enabled);
        assert_eq!(config.defaults.title, "Staff picks");
        assert_eq!(config.defaults.max_products, 12);
        assert_eq!(config.page_component, "FeaturedProductGeneral::Admin/Settings");
    }

    #[test]
    fn out_of_range_defaults_are_rejected() {
        let err = load_with_overrides(json!({ "defaults": { "max_products": 80 } })).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn prefix_without_slash_is_rejected() {
        let err = load_with_overrides(json!({ "route_prefix": "modules/featured" })).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn non_object_override_is_rejected() {
        assert!(load_with_overrides(json!([1, 2])).is_err());
    }

    #[test]
    fn trailing_slash_prefix_is_rejected() {
        assert!(load_with_overrides(json!({ "route_prefix": "/admin/featured/" })).is_err());
    }

    #[test]
    fn settings_path_joins_prefix() {
        let config = load_with_overrides(json!({ "route_prefix": "/admin/featured" })).unwrap();
        assert_eq!(config.settings_path(), "/admin/featured/settings");
    }
}
