//! Extract store context from request (`X-Store-ID` header).

use crate::error::AppError;
use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header name for store id.
pub const STORE_ID_HEADER: &str = "X-Store-ID";

/// Optional store id from `X-Store-ID`. A header that is not an integer is rejected.
#[derive(Clone, Copy, Debug)]
pub struct StoreId(pub Option<i64>);

#[async_trait]
impl<S> FromRequestParts<S> for StoreId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(STORE_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty());
        match raw {
            None => Ok(StoreId(None)),
            Some(s) => s
                .parse()
                .map(|id| StoreId(Some(id)))
                .map_err(|_| AppError::BadRequest(format!("{} must be an integer", STORE_ID_HEADER))),
        }
    }
}
