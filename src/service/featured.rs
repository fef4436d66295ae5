//! FeaturedService: validation plus orchestration of the three repositories.

use crate::config::ModuleConfig;
use crate::error::{AppError, FieldErrors};
use crate::model::{FeaturedProduct, FeaturedProductView, ModuleSettings, ProductSummary, Store};
use crate::repository::{CatalogRepository, FeaturedProductRepository, ModuleSettingsRepository};
use crate::service::validation::{
    coerce_int, lookup, parse_add_product, parse_reorder, update_settings_rules, RequestValidator, SettingsUpdate,
};
use serde::Serialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use utoipa::ToSchema;

/// Admin page payload: the component to render and its props.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct SettingsPage {
    pub component: String,
    pub props: SettingsProps,
}

#[derive(Clone, Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SettingsProps {
    pub module_slug: String,
    pub stores: Vec<Store>,
    pub current_store_id: Option<i64>,
    pub is_enabled: bool,
    pub settings: ModuleSettings,
    pub default_settings: ModuleSettings,
    pub store_settings: Vec<StoreSettingsView>,
    pub featured_products: Vec<FeaturedProductView>,
    pub products: Vec<ProductSummary>,
}

/// Effective settings of one store (stored values merged over defaults).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct StoreSettingsView {
    pub store_id: i64,
    pub store_name: Option<String>,
    pub is_enabled: bool,
    pub settings: ModuleSettings,
}

/// What a storefront renders for the featured block.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct StorefrontBlock {
    pub store_id: i64,
    pub enabled: bool,
    pub title: String,
    pub products: Vec<FeaturedProductView>,
}

pub struct FeaturedService {
    featured: Arc<dyn FeaturedProductRepository>,
    settings: Arc<dyn ModuleSettingsRepository>,
    catalog: Arc<dyn CatalogRepository>,
    config: Arc<ModuleConfig>,
}

impl FeaturedService {
    pub fn new(
        featured: Arc<dyn FeaturedProductRepository>,
        settings: Arc<dyn ModuleSettingsRepository>,
        catalog: Arc<dyn CatalogRepository>,
        config: Arc<ModuleConfig>,
    ) -> Self {
        Self {
            featured,
            settings,
            catalog,
            config,
        }
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.featured.ping().await
    }

    /// Settings page for `store_hint` when it names a known store, else the first store.
    pub async fn settings_page(&self, store_hint: Option<i64>) -> Result<SettingsPage, AppError> {
        let stores = self.catalog.list_stores().await?;
        let current_store_id = store_hint
            .filter(|id| stores.iter().any(|s| s.id == *id))
            .or_else(|| stores.first().map(|s| s.id));

        let stored: HashMap<i64, (bool, Value)> = self
            .settings
            .list(&self.config.slug)
            .await?
            .into_iter()
            .map(|r| (r.store_id, (r.is_enabled, r.settings)))
            .collect();
        let store_settings: Vec<StoreSettingsView> = stores
            .iter()
            .map(|store| {
                let (is_enabled, settings) = match stored.get(&store.id) {
                    Some((is_enabled, doc)) => (*is_enabled, self.merge_with_defaults(doc)),
                    None => (self.config.default_is_enabled, self.config.defaults.clone()),
                };
                StoreSettingsView {
                    store_id: store.id,
                    store_name: Some(store.name.clone()),
                    is_enabled,
                    settings,
                }
            })
            .collect();

        let (is_enabled, settings) = current_store_id
            .and_then(|id| store_settings.iter().find(|s| s.store_id == id))
            .map(|s| (s.is_enabled, s.settings.clone()))
            .unwrap_or_else(|| (self.config.default_is_enabled, self.config.defaults.clone()));

        let featured_rows = self.featured.list_ordered().await?;
        let featured_products = self.with_products(featured_rows).await?;
        let products = self.catalog.active_products().await?;

        Ok(SettingsPage {
            component: self.config.page_component.clone(),
            props: SettingsProps {
                module_slug: self.config.slug.clone(),
                stores,
                current_store_id,
                is_enabled,
                settings,
                default_settings: self.config.defaults.clone(),
                store_settings,
                featured_products,
                products,
            },
        })
    }

    /// Validate and persist one store's settings. Absent optional fields keep their value.
    pub async fn update_settings(&self, body: &Value) -> Result<StoreSettingsView, AppError> {
        let mut errors = RequestValidator::collect(body, &update_settings_rules());
        if !errors.contains("store_id") {
            if let Some(store_id) = lookup(body, "store_id").and_then(coerce_int) {
                if !self.catalog.store_exists(store_id).await? {
                    errors.add("store_id", "store_id does not reference an existing store");
                }
            }
        }
        errors.into_result()?;
        let update = SettingsUpdate::from_checked(body)?;

        let current = self.store_settings(update.store_id).await?;
        let settings = ModuleSettings {
            enabled: update.enabled.unwrap_or(current.settings.enabled),
            title: update.title,
            max_products: update.max_products,
            sort_order: update.sort_order.unwrap_or(current.settings.sort_order),
        };
        let is_enabled = update.is_enabled.unwrap_or(current.is_enabled);
        let doc = serde_json::to_value(&settings)?;
        self.settings
            .save(update.store_id, &self.config.slug, is_enabled, &doc)
            .await?;
        tracing::info!(
            store_id = update.store_id,
            is_enabled,
            max_products = settings.max_products,
            "featured products settings saved"
        );
        Ok(StoreSettingsView {
            store_id: update.store_id,
            store_name: None,
            is_enabled,
            settings,
        })
    }

    pub async fn add_product(&self, body: &Value) -> Result<FeaturedProduct, AppError> {
        let product_id = parse_add_product(body)?;
        if !self.catalog.product_exists(product_id).await? {
            return Err(AppError::invalid(
                "product_id",
                "product_id does not reference an existing product",
            ));
        }
        let row = self.featured.add_or_reactivate(product_id).await?;
        tracing::info!(
            featured_id = row.id,
            product_id,
            sort_order = row.sort_order,
            "product added to featured"
        );
        Ok(row)
    }

    pub async fn remove_product(&self, id: i64) -> Result<(), AppError> {
        if !self.featured.delete(id).await? {
            return Err(AppError::NotFound(format!("featured product {}", id)));
        }
        tracing::info!(featured_id = id, "product removed from featured");
        Ok(())
    }

    /// Returns the number of rows updated.
    pub async fn reorder(&self, body: &Value) -> Result<usize, AppError> {
        let items = parse_reorder(body)?;
        let ids: Vec<i64> = items.iter().map(|i| i.id).collect();
        let existing: HashSet<i64> = self.featured.existing_ids(&ids).await?.into_iter().collect();
        let mut errors = FieldErrors::new();
        for (i, item) in items.iter().enumerate() {
            if !existing.contains(&item.id) {
                let field = format!("products.{}.id", i);
                let message = format!("{} does not reference an existing featured product", field);
                errors.add(field, message);
            }
        }
        errors.into_result()?;

        self.featured.reorder(&items).await?;
        tracing::info!(count = items.len(), "featured products reordered");
        Ok(items.len())
    }

    pub async fn toggle(&self, id: i64) -> Result<FeaturedProduct, AppError> {
        let row = self
            .featured
            .toggle(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("featured product {}", id)))?;
        tracing::info!(featured_id = id, is_active = row.is_active, "featured product toggled");
        Ok(row)
    }

    /// Active rows in display order, capped at the store's `max_products`. Empty when the
    /// module or the block is switched off for the store.
    pub async fn storefront(&self, store_id: i64) -> Result<StorefrontBlock, AppError> {
        if !self.catalog.store_exists(store_id).await? {
            return Err(AppError::NotFound(format!("store {}", store_id)));
        }
        let current = self.store_settings(store_id).await?;
        let enabled = current.is_enabled && current.settings.enabled;
        let products = if enabled {
            let rows = self.featured.list_active_ordered().await?;
            let limit = usize::try_from(current.settings.max_products).unwrap_or(0);
            let mut views: Vec<FeaturedProductView> = self
                .with_products(rows)
                .await?
                .into_iter()
                .filter(|v| v.product.is_some())
                .collect();
            views.truncate(limit);
            views
        } else {
            Vec::new()
        };
        Ok(StorefrontBlock {
            store_id,
            enabled,
            title: current.settings.title,
            products,
        })
    }

    /// Effective settings for one store.
    pub async fn store_settings(&self, store_id: i64) -> Result<StoreSettingsView, AppError> {
        let record = self.settings.get(store_id, &self.config.slug).await?;
        let (is_enabled, settings) = match record {
            Some(r) => (r.is_enabled, self.merge_with_defaults(&r.settings)),
            None => (self.config.default_is_enabled, self.config.defaults.clone()),
        };
        Ok(StoreSettingsView {
            store_id,
            store_name: None,
            is_enabled,
            settings,
        })
    }

    /// Stored keys override defaults one by one; an undecodable document yields the defaults.
    fn merge_with_defaults(&self, stored: &Value) -> ModuleSettings {
        let mut merged = match serde_json::to_value(&self.config.defaults) {
            Ok(v) => v,
            Err(_) => return self.config.defaults.clone(),
        };
        if let (Value::Object(base), Value::Object(over)) = (&mut merged, stored) {
            for (k, v) in over {
                base.insert(k.clone(), v.clone());
            }
        }
        serde_json::from_value(merged).unwrap_or_else(|e| {
            tracing::warn!("stored settings for {} are invalid, using defaults: {}", self.config.slug, e);
            self.config.defaults.clone()
        })
    }

    async fn with_products(&self, rows: Vec<FeaturedProduct>) -> Result<Vec<FeaturedProductView>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.product_id).collect();
        let mut by_id: HashMap<i64, ProductSummary> = self
            .catalog
            .products_by_ids(&ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();
        Ok(rows
            .into_iter()
            .map(|featured| {
                let product = by_id.remove(&featured.product_id);
                FeaturedProductView { featured, product }
            })
            .collect())
    }
}
