//! Featured product writes: add, remove, reorder, toggle.

use crate::error::AppError;
use crate::extractors::{JsonBody, Referer};
use crate::response::Back;
use crate::state::AppState;
use axum::extract::{Path, State};

/// Path ids that are not integers cannot name a row.
fn parse_featured_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::NotFound(format!("featured product {}", id_str)))
}

/// POST {prefix}/products
pub async fn add_product(
    Referer(referer): Referer,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Back, AppError> {
    state.service.add_product(&body).await?;
    Ok(Back::to(referer, &state.service.config().settings_path(), "Product added to featured."))
}

/// DELETE {prefix}/products/:id
pub async fn remove_product(
    Referer(referer): Referer,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Back, AppError> {
    let id = parse_featured_id(&id_str)?;
    state.service.remove_product(id).await?;
    Ok(Back::to(referer, &state.service.config().settings_path(), "Product removed from featured."))
}

/// POST {prefix}/products/reorder
pub async fn reorder_products(
    Referer(referer): Referer,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Back, AppError> {
    state.service.reorder(&body).await?;
    Ok(Back::to(referer, &state.service.config().settings_path(), "Order updated."))
}

/// POST {prefix}/products/:id/toggle
pub async fn toggle_product(
    Referer(referer): Referer,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Back, AppError> {
    let id = parse_featured_id(&id_str)?;
    state.service.toggle(id).await?;
    Ok(Back::to(referer, &state.service.config().settings_path(), "Status updated."))
}
