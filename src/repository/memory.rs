//! Process-local repositories with the same contracts as the PostgreSQL ones.

use crate::error::AppError;
use crate::model::{FeaturedProduct, ProductSummary, ReorderItem, Store, StoreModuleSettings};
use crate::repository::{sort_order_exhausted, CatalogRepository, FeaturedProductRepository, ModuleSettingsRepository};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct FeaturedRows {
    next_id: i64,
    rows: BTreeMap<i64, FeaturedProduct>,
}

#[derive(Default)]
pub struct MemoryFeaturedProducts {
    inner: RwLock<FeaturedRows>,
}

impl MemoryFeaturedProducts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().rows.is_empty()
    }
}

fn ordered(rows: impl Iterator<Item = FeaturedProduct>) -> Vec<FeaturedProduct> {
    let mut out: Vec<FeaturedProduct> = rows.collect();
    out.sort_by_key(|r| (r.sort_order, r.id));
    out
}

#[async_trait]
impl FeaturedProductRepository for MemoryFeaturedProducts {
    async fn list_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError> {
        Ok(ordered(self.inner.read().rows.values().cloned()))
    }

    async fn list_active_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError> {
        Ok(ordered(self.inner.read().rows.values().filter(|r| r.is_active).cloned()))
    }

    async fn find(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError> {
        Ok(self.inner.read().rows.get(&id).cloned())
    }

    async fn add_or_reactivate(&self, product_id: i64) -> Result<FeaturedProduct, AppError> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        let next_order = inner
            .rows
            .values()
            .map(|r| r.sort_order)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(sort_order_exhausted)?;
        let now = Utc::now();
        if let Some(row) = inner.rows.values_mut().find(|r| r.product_id == product_id) {
            row.sort_order = next_order;
            row.is_active = true;
            row.updated_at = now;
            return Ok(row.clone());
        }
        inner.next_id += 1;
        let row = FeaturedProduct {
            id: inner.next_id,
            product_id,
            sort_order: next_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.inner.write().rows.remove(&id).is_some())
    }

    async fn toggle(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError> {
        let mut inner = self.inner.write();
        Ok(inner.rows.get_mut(&id).map(|row| {
            row.is_active = !row.is_active;
            row.updated_at = Utc::now();
            row.clone()
        }))
    }

    async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError> {
        let mut inner = self.inner.write();
        if let Some(missing) = items.iter().find(|i| !inner.rows.contains_key(&i.id)) {
            return Err(AppError::NotFound(format!("featured product {}", missing.id)));
        }
        let now = Utc::now();
        for item in items {
            if let Some(row) = inner.rows.get_mut(&item.id) {
                row.sort_order = item.sort_order;
                row.updated_at = now;
            }
        }
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let inner = self.inner.read();
        Ok(ids.iter().copied().filter(|id| inner.rows.contains_key(id)).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryModuleSettings {
    records: RwLock<HashMap<(i64, String), StoreModuleSettings>>,
}

impl MemoryModuleSettings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ModuleSettingsRepository for MemoryModuleSettings {
    async fn get(&self, store_id: i64, module_slug: &str) -> Result<Option<StoreModuleSettings>, AppError> {
        Ok(self.records.read().get(&(store_id, module_slug.to_string())).cloned())
    }

    async fn list(&self, module_slug: &str) -> Result<Vec<StoreModuleSettings>, AppError> {
        let mut out: Vec<StoreModuleSettings> = self
            .records
            .read()
            .values()
            .filter(|r| r.module_slug == module_slug)
            .cloned()
            .collect();
        out.sort_by_key(|r| r.store_id);
        Ok(out)
    }

    async fn save(
        &self,
        store_id: i64,
        module_slug: &str,
        is_enabled: bool,
        settings: &Value,
    ) -> Result<StoreModuleSettings, AppError> {
        let record = StoreModuleSettings {
            store_id,
            module_slug: module_slug.to_string(),
            is_enabled,
            settings: settings.clone(),
            updated_at: Utc::now(),
        };
        self.records
            .write()
            .insert((store_id, module_slug.to_string()), record.clone());
        Ok(record)
    }
}

/// Catalog seeded up front. `is_active` is kept beside each product.
#[derive(Default)]
pub struct MemoryCatalog {
    stores: RwLock<Vec<Store>>,
    products: RwLock<Vec<(ProductSummary, bool)>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_store(&self, store: Store) {
        let mut stores = self.stores.write();
        stores.push(store);
        stores.sort_by_key(|s| s.id);
    }

    pub fn add_product(&self, product: ProductSummary, is_active: bool) {
        self.products.write().push((product, is_active));
    }
}

#[async_trait]
impl CatalogRepository for MemoryCatalog {
    async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        Ok(self.stores.read().clone())
    }

    async fn store_exists(&self, store_id: i64) -> Result<bool, AppError> {
        Ok(self.stores.read().iter().any(|s| s.id == store_id))
    }

    async fn product_exists(&self, product_id: i64) -> Result<bool, AppError> {
        Ok(self.products.read().iter().any(|(p, _)| p.id == product_id))
    }

    async fn active_products(&self) -> Result<Vec<ProductSummary>, AppError> {
        let mut out: Vec<ProductSummary> = self
            .products
            .read()
            .iter()
            .filter(|(_, active)| *active)
            .map(|(p, _)| p.clone())
            .collect();
        out.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(out)
    }

    async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>, AppError> {
        Ok(self
            .products
            .read()
            .iter()
            .filter(|(p, _)| ids.contains(&p.id))
            .map(|(p, _)| p.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_add_gets_order_one() {
        let repo = MemoryFeaturedProducts::new();
        let row = repo.add_or_reactivate(10).await.unwrap();
        assert_eq!(row.sort_order, 1);
        assert!(row.is_active);
    }

    #[tokio::test]
    async fn re_add_moves_row_to_end_without_duplicating() {
        let repo = MemoryFeaturedProducts::new();
        let a = repo.add_or_reactivate(10).await.unwrap();
        repo.add_or_reactivate(20).await.unwrap();
        repo.toggle(a.id).await.unwrap();

        let again = repo.add_or_reactivate(10).await.unwrap();
        assert_eq!(again.id, a.id);
        assert_eq!(again.sort_order, 3);
        assert!(again.is_active);
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn re_adding_the_last_row_still_bumps_it() {
        let repo = MemoryFeaturedProducts::new();
        repo.add_or_reactivate(10).await.unwrap();
        let last = repo.add_or_reactivate(20).await.unwrap();
        assert_eq!(last.sort_order, 2);
        let again = repo.add_or_reactivate(20).await.unwrap();
        assert_eq!(again.sort_order, 3);
    }

    #[tokio::test]
    async fn add_at_highest_sort_order_is_a_conflict() {
        let repo = MemoryFeaturedProducts::new();
        let a = repo.add_or_reactivate(10).await.unwrap();
        repo.reorder(&[ReorderItem { id: a.id, sort_order: i32::MAX }])
            .await
            .unwrap();

        let err = repo.add_or_reactivate(20).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let err = repo.add_or_reactivate(10).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.len(), 1);
        assert_eq!(repo.find(a.id).await.unwrap().unwrap().sort_order, i32::MAX);
    }

    #[tokio::test]
    async fn reorder_with_unknown_id_changes_nothing() {
        let repo = MemoryFeaturedProducts::new();
        let a = repo.add_or_reactivate(10).await.unwrap();
        let err = repo
            .reorder(&[
                ReorderItem { id: a.id, sort_order: 9 },
                ReorderItem { id: 999, sort_order: 1 },
            ])
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(repo.find(a.id).await.unwrap().unwrap().sort_order, 1);
    }

    #[tokio::test]
    async fn ordering_breaks_ties_by_id() {
        let repo = MemoryFeaturedProducts::new();
        let a = repo.add_or_reactivate(10).await.unwrap();
        let b = repo.add_or_reactivate(20).await.unwrap();
        repo.reorder(&[
            ReorderItem { id: a.id, sort_order: 4 },
            ReorderItem { id: b.id, sort_order: 4 },
        ])
        .await
        .unwrap();
        let ids: Vec<i64> = repo.list_ordered().await.unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let repo = MemoryFeaturedProducts::new();
        let a = repo.add_or_reactivate(10).await.unwrap();
        assert!(repo.delete(a.id).await.unwrap());
        assert!(!repo.delete(a.id).await.unwrap());
        assert!(repo.is_empty());
    }

    #[tokio::test]
    async fn settings_are_keyed_by_store_and_slug() {
        let repo = MemoryModuleSettings::new();
        repo.save(1, "featured", true, &serde_json::json!({ "title": "A" }))
            .await
            .unwrap();
        repo.save(2, "featured", false, &serde_json::json!({ "title": "B" }))
            .await
            .unwrap();
        repo.save(1, "other", true, &serde_json::json!({})).await.unwrap();

        let listed = repo.list("featured").await.unwrap();
        assert_eq!(listed.iter().map(|r| r.store_id).collect::<Vec<_>>(), vec![1, 2]);
        let one = repo.get(2, "featured").await.unwrap().unwrap();
        assert!(!one.is_enabled);
        assert_eq!(one.settings["title"], "B");
        assert!(repo.get(3, "featured").await.unwrap().is_none());
    }
}
