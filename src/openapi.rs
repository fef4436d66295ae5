//! OpenAPI document describing the payloads served by the module.

use crate::model::{
    FeaturedProduct, FeaturedProductView, ModuleSettings, ProductSummary, ProductTranslation, ReorderItem, Store,
};
use crate::service::{SettingsPage, SettingsProps, StoreSettingsView, StorefrontBlock};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Featured products",
        description = "Per-store featured product settings and the ordered featured list"
    ),
    components(schemas(
        FeaturedProduct,
        FeaturedProductView,
        ModuleSettings,
        ProductSummary,
        ProductTranslation,
        ReorderItem,
        Store,
        SettingsPage,
        SettingsProps,
        StoreSettingsView,
        StorefrontBlock
    ))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_payload_schemas() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let schemas = &doc["components"]["schemas"];
        for name in ["FeaturedProduct", "ModuleSettings", "SettingsPage", "StorefrontBlock"] {
            assert!(schemas.get(name).is_some(), "missing schema {}", name);
        }
    }
}
