//! Admin routes (mounted under the module prefix) and the storefront route.

use crate::handlers::{
    add_product, remove_product, reorder_products, settings_index, settings_update, storefront_block,
    toggle_product,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post},
    Router,
};

/// Admin routes relative to the module prefix. `/products/reorder` is static so it wins
/// over `/products/:id`.
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/settings", get(settings_index).put(settings_update))
        .route("/products", post(add_product))
        .route("/products/reorder", post(reorder_products))
        .route("/products/:id", delete(remove_product))
        .route("/products/:id/toggle", post(toggle_product))
        .with_state(state)
}

pub fn storefront_routes(state: AppState) -> Router {
    Router::new()
        .route("/featured-products", get(storefront_block))
        .with_state(state)
}
