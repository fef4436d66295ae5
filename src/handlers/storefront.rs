use crate::error::AppError;
use crate::extractors::store::{StoreId, STORE_ID_HEADER};
use crate::response::success_one_ok;
use crate::state::AppState;
use axum::extract::State;

/// GET /featured-products: the featured block for the store in `X-Store-ID`.
pub async fn storefront_block(
    StoreId(store_id): StoreId,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, AppError> {
    let store_id = store_id.ok_or_else(|| AppError::BadRequest(format!("{} header is required", STORE_ID_HEADER)))?;
    let block = state.service.storefront(store_id).await?;
    Ok(success_one_ok(block))
}
