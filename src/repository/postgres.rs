//! PostgreSQL repositories. `featured_products` and `module_store_settings` come from the
//! module migrations; `stores`, `products` and `product_translations` belong to the host.

use crate::error::AppError;
use crate::model::{FeaturedProduct, ProductSummary, ProductTranslation, ReorderItem, Store, StoreModuleSettings};
use crate::repository::{sort_order_exhausted, CatalogRepository, FeaturedProductRepository, ModuleSettingsRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use std::collections::HashMap;

const FEATURED_COLUMNS: &str = "id, product_id, sort_order, is_active, created_at, updated_at";

#[derive(Clone)]
pub struct PgFeaturedProductRepository {
    pool: PgPool,
}

impl PgFeaturedProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeaturedProductRepository for PgFeaturedProductRepository {
    async fn list_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError> {
        let sql = format!("SELECT {} FROM featured_products ORDER BY sort_order, id", FEATURED_COLUMNS);
        let rows = sqlx::query_as::<_, FeaturedProduct>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn list_active_ordered(&self) -> Result<Vec<FeaturedProduct>, AppError> {
        let sql = format!(
            "SELECT {} FROM featured_products WHERE is_active ORDER BY sort_order, id",
            FEATURED_COLUMNS
        );
        let rows = sqlx::query_as::<_, FeaturedProduct>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError> {
        let sql = format!("SELECT {} FROM featured_products WHERE id = $1", FEATURED_COLUMNS);
        let row = sqlx::query_as::<_, FeaturedProduct>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add_or_reactivate(&self, product_id: i64) -> Result<FeaturedProduct, AppError> {
        // One statement: the max is read and the row written under the same snapshot. The
        // next value is computed as BIGINT; nothing is written when it no longer fits INTEGER.
        let sql = format!(
            r#"
            WITH next AS (
                SELECT COALESCE(MAX(sort_order), 0)::bigint + 1 AS sort_order FROM featured_products
            )
            INSERT INTO featured_products (product_id, sort_order, is_active, created_at, updated_at)
            SELECT $1, next.sort_order::integer, TRUE, NOW(), NOW() FROM next
            WHERE next.sort_order <= 2147483647
            ON CONFLICT (product_id)
            DO UPDATE SET sort_order = EXCLUDED.sort_order, is_active = TRUE, updated_at = NOW()
            RETURNING {}
            "#,
            FEATURED_COLUMNS
        );
        sqlx::query_as::<_, FeaturedProduct>(&sql)
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(sort_order_exhausted)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM featured_products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn toggle(&self, id: i64) -> Result<Option<FeaturedProduct>, AppError> {
        let sql = format!(
            "UPDATE featured_products SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1 RETURNING {}",
            FEATURED_COLUMNS
        );
        let row = sqlx::query_as::<_, FeaturedProduct>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn reorder(&self, items: &[ReorderItem]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        for item in items {
            let result = sqlx::query(
                "UPDATE featured_products SET sort_order = $2, updated_at = NOW() WHERE id = $1",
            )
            .bind(item.id)
            .bind(item.sort_order)
            .execute(&mut *tx)
            .await?;
            if result.rows_affected() == 0 {
                // Dropping tx rolls back the rows already updated.
                return Err(AppError::NotFound(format!("featured product {}", item.id)));
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn existing_ids(&self, ids: &[i64]) -> Result<Vec<i64>, AppError> {
        let rows = sqlx::query_scalar::<_, i64>("SELECT id FROM featured_products WHERE id = ANY($1)")
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgModuleSettingsRepository {
    pool: PgPool,
}

impl PgModuleSettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type SettingsRow = (i64, String, bool, Value, DateTime<Utc>);

fn settings_from_row((store_id, module_slug, is_enabled, settings, updated_at): SettingsRow) -> StoreModuleSettings {
    StoreModuleSettings {
        store_id,
        module_slug,
        is_enabled,
        settings,
        updated_at,
    }
}

#[async_trait]
impl ModuleSettingsRepository for PgModuleSettingsRepository {
    async fn get(&self, store_id: i64, module_slug: &str) -> Result<Option<StoreModuleSettings>, AppError> {
        let row: Option<SettingsRow> = sqlx::query_as(
            r#"
            SELECT store_id, module_slug, is_enabled, settings, updated_at
            FROM module_store_settings
            WHERE store_id = $1 AND module_slug = $2
            "#,
        )
        .bind(store_id)
        .bind(module_slug)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(settings_from_row))
    }

    async fn list(&self, module_slug: &str) -> Result<Vec<StoreModuleSettings>, AppError> {
        let rows: Vec<SettingsRow> = sqlx::query_as(
            r#"
            SELECT store_id, module_slug, is_enabled, settings, updated_at
            FROM module_store_settings
            WHERE module_slug = $1
            ORDER BY store_id
            "#,
        )
        .bind(module_slug)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(settings_from_row).collect())
    }

    async fn save(
        &self,
        store_id: i64,
        module_slug: &str,
        is_enabled: bool,
        settings: &Value,
    ) -> Result<StoreModuleSettings, AppError> {
        let row: SettingsRow = sqlx::query_as(
            r#"
            INSERT INTO module_store_settings (store_id, module_slug, is_enabled, settings, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (store_id, module_slug)
            DO UPDATE SET is_enabled = $3, settings = $4, updated_at = NOW()
            RETURNING store_id, module_slug, is_enabled, settings, updated_at
            "#,
        )
        .bind(store_id)
        .bind(module_slug)
        .bind(is_enabled)
        .bind(settings)
        .fetch_one(&self.pool)
        .await?;
        Ok(settings_from_row(row))
    }
}

/// Host catalog. Ids are cast to BIGINT since hosts may use INTEGER keys; price is NUMERIC
/// read as text.
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn translations_for(&self, ids: &[i64]) -> Result<HashMap<i64, Vec<ProductTranslation>>, AppError> {
        let rows: Vec<(i64, String, String, Option<String>)> = sqlx::query_as(
            r#"
            SELECT product_id::bigint, locale, name, description
            FROM product_translations
            WHERE product_id = ANY($1)
            ORDER BY product_id, locale
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        let mut by_product: HashMap<i64, Vec<ProductTranslation>> = HashMap::new();
        for (product_id, locale, name, description) in rows {
            by_product.entry(product_id).or_default().push(ProductTranslation {
                locale,
                name,
                description,
            });
        }
        Ok(by_product)
    }

    async fn with_translations(
        &self,
        rows: Vec<(i64, String, String, Option<String>)>,
    ) -> Result<Vec<ProductSummary>, AppError> {
        let ids: Vec<i64> = rows.iter().map(|r| r.0).collect();
        let mut translations = self.translations_for(&ids).await?;
        Ok(rows
            .into_iter()
            .map(|(id, sku, price, image)| ProductSummary {
                id,
                sku,
                price,
                image,
                translations: translations.remove(&id).unwrap_or_default(),
            })
            .collect())
    }
}

#[async_trait]
impl CatalogRepository for PgCatalogRepository {
    async fn list_stores(&self) -> Result<Vec<Store>, AppError> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id::bigint, name FROM stores ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|(id, name)| Store { id, name }).collect())
    }

    async fn store_exists(&self, store_id: i64) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)")
            .bind(store_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn product_exists(&self, product_id: i64) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(product_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists.0)
    }

    async fn active_products(&self) -> Result<Vec<ProductSummary>, AppError> {
        let rows: Vec<(i64, String, String, Option<String>)> = sqlx::query_as(
            "SELECT id::bigint, sku, price::text, image FROM products WHERE is_active ORDER BY sku",
        )
        .fetch_all(&self.pool)
        .await?;
        self.with_translations(rows).await
    }

    async fn products_by_ids(&self, ids: &[i64]) -> Result<Vec<ProductSummary>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let rows: Vec<(i64, String, String, Option<String>)> = sqlx::query_as(
            "SELECT id::bigint, sku, price::text, image FROM products WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;
        self.with_translations(rows).await
    }
}
