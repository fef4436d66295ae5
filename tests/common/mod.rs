//! Router harness over in-memory repositories and a small seeded catalog.
//!
//! Stores: 1 "Main store", 2 "Outlet".
//! Products: 1 TEE-010, 2 MUG-001, 3 CAP-003 (active), 4 ZZZ-404 (inactive).

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use featured_products::repository::memory::{MemoryCatalog, MemoryFeaturedProducts, MemoryModuleSettings};
use featured_products::{
    bundled_config, ops_routes, FeaturedProductsModule, ModuleConfig, ProductSummary,
    ProductTranslation, Store,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const PREFIX: &str = "/modules/general/featured-product-general";
pub const SLUG: &str = "featured-product-general";

pub struct TestApp {
    pub router: Router,
    pub featured: Arc<MemoryFeaturedProducts>,
    pub settings: Arc<MemoryModuleSettings>,
    pub catalog: Arc<MemoryCatalog>,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(bundled_config().expect("bundled config"))
    }

    pub fn with_config(config: ModuleConfig) -> Self {
        let featured = Arc::new(MemoryFeaturedProducts::new());
        let settings = Arc::new(MemoryModuleSettings::new());
        let catalog = Arc::new(seed_catalog());
        let module = FeaturedProductsModule::new(config, featured.clone(), settings.clone(), catalog.clone());
        let router = Router::new()
            .merge(ops_routes(module.state()))
            .merge(module.router());
        TestApp {
            router,
            featured,
            settings,
            catalog,
        }
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>, headers: &[(&str, &str)]) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        TestResponse { status, headers, body }
    }

    /// Admin request with a verbatim body and an optional content type.
    pub async fn admin_raw(&self, method: Method, path: &str, body: &str, content_type: Option<&str>) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(format!("{}{}", PREFIX, path));
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();
        self.dispatch(request).await
    }

    pub async fn get(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.send(Method::GET, path, None, headers).await
    }

    pub async fn admin(&self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        self.send(method, &format!("{}{}", PREFIX, path), body, &[]).await
    }

    /// Adds `product_id` through the API and returns the featured row id.
    pub async fn feature(&self, product_id: i64) -> i64 {
        let resp = self
            .admin(Method::POST, "/products", Some(serde_json::json!({ "product_id": product_id })))
            .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "add failed: {}", resp.body);
        use featured_products::repository::FeaturedProductRepository;
        self.featured
            .list_ordered()
            .await
            .unwrap()
            .into_iter()
            .find(|r| r.product_id == product_id)
            .map(|r| r.id)
            .expect("featured row")
    }
}

fn product(id: i64, sku: &str, name: &str) -> ProductSummary {
    ProductSummary {
        id,
        sku: sku.into(),
        price: "10.00".into(),
        image: Some(format!("/img/{}.png", sku.to_lowercase())),
        translations: vec![ProductTranslation {
            locale: "en".into(),
            name: name.into(),
            description: None,
        }],
    }
}

fn seed_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    catalog.add_store(Store { id: 2, name: "Outlet".into() });
    catalog.add_store(Store { id: 1, name: "Main store".into() });
    catalog.add_product(product(1, "TEE-010", "Logo tee"), true);
    catalog.add_product(product(2, "MUG-001", "Enamel mug"), true);
    catalog.add_product(product(3, "CAP-003", "Canvas cap"), true);
    catalog.add_product(product(4, "ZZZ-404", "Retired sticker"), false);
    catalog
}
