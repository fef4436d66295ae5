//! Settings page and per-store settings update.

use crate::error::AppError;
use crate::extractors::{JsonBody, Referer, StoreId};
use crate::response::{success_one_ok, Back};
use crate::state::AppState;
use axum::extract::State;

/// GET {prefix}/settings: page payload for the admin settings screen.
pub async fn settings_index(
    StoreId(store_hint): StoreId,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let page = state.service.settings_page(store_hint).await?;
    Ok(success_one_ok(page))
}

/// PUT {prefix}/settings: validate and save one store's settings.
pub async fn settings_update(
    Referer(referer): Referer,
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Back, AppError> {
    state.service.update_settings(&body).await?;
    Ok(Back::to(referer, &state.service.config().settings_path(), "Settings saved."))
}
