//! Records owned or read by the module.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A product pinned to the featured list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct FeaturedProduct {
    pub id: i64,
    pub product_id: i64,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Display settings for one store. Unknown keys in a stored document are ignored;
/// missing keys are filled from the module defaults before decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ModuleSettings {
    pub enabled: bool,
    pub title: String,
    pub max_products: i32,
    pub sort_order: i32,
}

impl Default for ModuleSettings {
    fn default() -> Self {
        ModuleSettings {
            enabled: true,
            title: "Featured Products".into(),
            max_products: 12,
            sort_order: 0,
        }
    }
}

/// Raw per-store record as kept by the settings repository.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoreModuleSettings {
    pub store_id: i64,
    pub module_slug: String,
    pub is_enabled: bool,
    pub settings: serde_json::Value,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Store {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductTranslation {
    pub locale: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Catalog columns shown in the admin page. `price` is the decimal rendered as text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: i64,
    pub sku: String,
    pub price: String,
    pub image: Option<String>,
    #[serde(default)]
    pub translations: Vec<ProductTranslation>,
}

/// Featured row joined with its product. `product` is `None` when the catalog row is gone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct FeaturedProductView {
    #[serde(flatten)]
    pub featured: FeaturedProduct,
    pub product: Option<ProductSummary>,
}

/// One `{id, sort_order}` pair of a reorder request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReorderItem {
    pub id: i64,
    pub sort_order: i32,
}
