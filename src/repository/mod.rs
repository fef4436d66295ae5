//! Repository traits for the module's tables and the host catalog.
//!
//! PostgreSQL implementations live in [`postgres`]; [`memory`] holds process-local
//! implementations used by tests and the demo server.

pub mod memory;
pub mod postgres;

use crate::error::AppError;
use crate::model::{FeaturedProduct, ProductSummary, ReorderItem, Store, StoreModuleSettings};
use async_trait::async_trait;

/// No room left above the highest `sort_order`.
pub(crate) fn sort_order_exhausted() -> AppError {
    AppError::Conflict(format!(
        "featured products already use sort_order {}; reorder the list before adding",
        i32::MAX
    ))
}

/// Rows of `featured_products`.
#[async_trait]
pub trait FeaturedProductRepository: Send + Sync {
    /// All rows, ascending `sort_order` (ties by id).
    async fn list_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError>;

    /// Active rows only, same ordering.
    async fn list_active_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError>;

    /// Upsert by `product_id`: the row gets `sort_order = max(sort_order) + 1` (0 + 1 on an
    /// empty table) and `is_active = true`, whether it is new or already present. The max is
    /// taken over all rows, including the product's own row. Fails with `Conflict` when the
    /// max is already `i32::MAX`.
    async fn add_or_reactivate(&self, product_id: i64) -> Result<FeaturedProduct, AppError>;

    /// Permanent delete. `false` when no such row.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Flip `is_active`. `None` when no such row.
    async fn toggle(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError>;

    /// Apply every `sort_order` or none. Fails with `NotFound` if any id is missing.
    async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError>;

    /// Subset of `ids` that exist.
    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError>;

    /// Storage reachability, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Per-store module settings shared by admin modules, keyed by `(store_id, module_slug)`.
#[async_trait]
pub trait ModuleSettingsRepository: Send + Sync {
    async fn get(&self, store_id: i64, module_slug: &str) -> Result<Option<StoreModuleSettings>, AppError>;

    /// Records for every store that saved settings for this module.
    async fn list(&self, module_slug: &str) -> Result<Vec<StoreModuleSettings>, AppError>;

    /// Insert or replace the record for one store.
    async fn save(
        &self,
        store_id: i64,
        module_slug: &str,
        is_enabled: bool,
        settings: &serde_json::Value,
    ) -> Result<StoreModuleSettings, AppError>;
}

/// Read-only view of host-owned stores and products.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// All stores by id.
    async fn list_stores(&self) -> Result<Vec<Store>, AppError>;

    async fn store_exists(&self, store_id: i64) -> Result<bool, AppError>;

    async fn product_exists(&self, product_id: i64) -> Result<bool, AppError>;

    /// Active products with translations, ascending SKU.
    async fn active_products(&self) -> Result<Vec<ProductSummary>, AppError>;

    /// Products (active or not) with translations for the given ids, in no particular order.
    async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>, AppError>;
}
