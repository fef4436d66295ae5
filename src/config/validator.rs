//! Config validation: route prefix shape and default settings bounds.

use crate::config::ModuleConfig;
use crate::error::ConfigError;
use crate::service::validation::{settings_rules, RequestValidator};

pub fn validate(config: &ModuleConfig) -> Result<(), ConfigError> {
    if config.slug.trim().is_empty() {
        return Err(ConfigError::Validation("slug must not be empty".into()));
    }
    let prefix = &config.route_prefix;
    if !prefix.starts_with('/') || prefix.len() < 2 || prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "route_prefix must start with '/', name a path and not end with '/': {}",
            config.route_prefix
        )));
    }
    if config.max_body_bytes == 0 {
        return Err(ConfigError::Validation("max_body_bytes must be positive".into()));
    }

    // Defaults must be something an admin could have saved.
    let doc = serde_json::json!({ "settings": config.defaults });
    RequestValidator::validate(&doc, &settings_rules())
        .map_err(|e| ConfigError::Validation(format!("defaults: {}", e)))?;
    Ok(())
}
