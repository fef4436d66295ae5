//! Module bootstrap: wires repositories, runs migrations and builds the router.

use crate::config::ModuleConfig;
use crate::error::AppError;
use crate::migration::apply_bundled_migrations;
use crate::repository::postgres::{PgCatalogRepository, PgFeaturedProductRepository, PgModuleSettingsRepository};
use crate::repository::{CatalogRepository, FeaturedProductRepository, ModuleSettingsRepository};
use crate::routes::{admin_routes, storefront_routes};
use crate::service::FeaturedService;
use crate::state::AppState;
use axum::Router;
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

pub struct FeaturedProductsModule {
    config: Arc<ModuleConfig>,
    state: AppState,
}

impl FeaturedProductsModule {
    pub fn new(
        config: ModuleConfig,
        featured: Arc<dyn FeaturedProductRepository>,
        settings: Arc<dyn ModuleSettingsRepository>,
        catalog: Arc<dyn CatalogRepository>,
    ) -> Self {
        let config = Arc::new(config);
        let service = Arc::new(FeaturedService::new(featured, settings, catalog, config.clone()));
        FeaturedProductsModule {
            config,
            state: AppState::new(service),
        }
    }

    /// PostgreSQL-backed module. Does not touch the schema; see [`Self::boot`].
    pub fn with_postgres(pool: PgPool, config: ModuleConfig) -> Self {
        Self::new(
            config,
            Arc::new(PgFeaturedProductRepository::new(pool.clone())),
            Arc::new(PgModuleSettingsRepository::new(pool.clone())),
            Arc::new(PgCatalogRepository::new(pool)),
        )
    }

    /// Run the bundled migrations, then build the PostgreSQL-backed module.
    pub async fn boot(pool: PgPool, config: ModuleConfig) -> Result<Self, AppError> {
        apply_bundled_migrations(&pool).await?;
        tracing::info!("featured products module '{}' booted", config.slug);
        Ok(Self::with_postgres(pool, config))
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }

    pub fn state(&self) -> AppState {
        self.state.clone()
    }

    /// Admin routes nested under the configured prefix plus the storefront route, with
    /// request tracing and a body size limit.
    pub fn router(&self) -> Router {
        tracing::info!("registering featured products routes under {}", self.config.route_prefix);
        Router::new()
            .nest(&self.config.route_prefix, admin_routes(self.state()))
            .merge(storefront_routes(self.state()))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(RequestBodyLimitLayer::new(self.config.max_body_bytes)),
            )
    }
}
