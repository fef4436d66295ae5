//! The `Referer` header, used to send admins back where they came from.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::REFERER, request::Parts, HeaderValue},
};

#[derive(Clone, Debug)]
pub struct Referer(pub Option<HeaderValue>);

#[async_trait]
impl<S> FromRequestParts<S> for Referer
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(REFERER)
            .filter(|v| !v.as_bytes().is_empty())
            .cloned();
        Ok(Referer(value))
    }
}
