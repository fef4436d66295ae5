//! Standard response envelope helpers and the redirect-back response used by admin writes.

use axum::{
    http::{header::LOCATION, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Header carrying the flash message of a redirect-back response.
pub const FLASH_SUCCESS_HEADER: HeaderName = HeaderName::from_static("x-flash-success");

#[derive(Serialize)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            data,
            meta: None,
        }),
    )
}

#[derive(Serialize)]
pub struct Flash {
    pub success: &'static str,
}

/// `303 See Other` to the referring page (or a fallback) with a success flash message.
pub struct Back {
    location: HeaderValue,
    message: &'static str,
}

impl Back {
    pub fn to(referer: Option<HeaderValue>, fallback: &str, message: &'static str) -> Self {
        let location = referer
            .or_else(|| HeaderValue::from_str(fallback).ok())
            .unwrap_or_else(|| HeaderValue::from_static("/"));
        Back { location, message }
    }
}

impl IntoResponse for Back {
    fn into_response(self) -> Response {
        (
            StatusCode::SEE_OTHER,
            [
                (LOCATION, self.location),
                (FLASH_SUCCESS_HEADER, HeaderValue::from_static(self.message)),
            ],
            Json(SuccessOne {
                data: Flash {
                    success: self.message,
                },
                meta: None,
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_prefers_referer() {
        let resp = Back::to(
            Some(HeaderValue::from_static("/admin/page?tab=2")),
            "/fallback",
            "Status updated.",
        )
        .into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[LOCATION], "/admin/page?tab=2");
        assert_eq!(resp.headers()[FLASH_SUCCESS_HEADER], "Status updated.");
    }

    #[test]
    fn back_falls_back_without_referer() {
        let resp = Back::to(None, "/modules/x/settings", "Order updated.").into_response();
        assert_eq!(resp.headers()[LOCATION], "/modules/x/settings");
    }
}
