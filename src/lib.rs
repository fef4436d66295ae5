//! Featured products: per-store settings and an ordered, activatable featured list for a
//! multi-store admin panel.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod module;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{bundled_config, load_from_env, load_from_file, load_with_overrides, ModuleConfig};
pub use error::{AppError, ConfigError, FieldErrors};
pub use migration::{apply_bundled_migrations, apply_migrations, bundled_migrator};
pub use model::{FeaturedProduct, FeaturedProductView, ModuleSettings, ProductSummary, ProductTranslation, ReorderItem, Store};
pub use module::FeaturedProductsModule;
pub use routes::{admin_routes, ops_routes, storefront_routes};
pub use service::FeaturedService;
pub use state::AppState;
