//! Demo server. With `DATABASE_URL` set it boots the PostgreSQL-backed module (running
//! migrations); without it, it serves an in-memory catalog seeded with two stores and a
//! few products.

use axum::Router;
use featured_products::repository::memory::{MemoryCatalog, MemoryFeaturedProducts, MemoryModuleSettings};
use featured_products::{ops_routes, load_from_env, FeaturedProductsModule, ProductSummary, ProductTranslation, Store};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("featured_products=info,tower_http=info")),
        )
        .init();

    let config = load_from_env().await?;
    let module = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;
            FeaturedProductsModule::boot(pool, config).await?
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, serving in-memory demo data");
            FeaturedProductsModule::new(
                config,
                Arc::new(MemoryFeaturedProducts::new()),
                Arc::new(MemoryModuleSettings::new()),
                Arc::new(demo_catalog()),
            )
        }
    };

    let app = Router::new()
        .merge(ops_routes(module.state()))
        .merge(module.router());

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".into());
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

fn demo_catalog() -> MemoryCatalog {
    let catalog = MemoryCatalog::new();
    catalog.add_store(Store { id: 1, name: "Main store".into() });
    catalog.add_store(Store { id: 2, name: "Outlet".into() });
    for (id, sku, price, name, active) in [
        (1, "MUG-001", "12.50", "Enamel mug", true),
        (2, "TEE-010", "24.00", "Logo tee", true),
        (3, "CAP-003", "18.00", "Canvas cap", true),
        (4, "OLD-999", "5.00", "Discontinued sticker", false),
    ] {
        catalog.add_product(
            ProductSummary {
                id,
                sku: sku.into(),
                price: price.into(),
                image: None,
                translations: vec![ProductTranslation {
                    locale: "en".into(),
                    name: name.into(),
                    description: None,
                }],
            },
            active,
        );
    }
    catalog
}
