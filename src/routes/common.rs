//! Operational routes served beside the module: liveness, readiness, version, OpenAPI.

use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

#[derive(Serialize)]
struct Liveness {
    status: &'static str,
}

#[derive(Serialize)]
struct Readiness {
    status: &'static str,
    module: String,
    storage: &'static str,
}

#[derive(Serialize)]
struct VersionInfo {
    name: &'static str,
    version: &'static str,
    module: String,
    route_prefix: String,
}

async fn health() -> Json<Liveness> {
    Json(Liveness { status: "ok" })
}

/// 503 while the featured product storage cannot be reached.
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let module = state.service.config().slug.clone();
    match state.service.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Readiness {
                status: "ok",
                module,
                storage: "ok",
            }),
        ),
        Err(e) => {
            tracing::warn!("readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Readiness {
                    status: "degraded",
                    module,
                    storage: "unavailable",
                }),
            )
        }
    }
}

async fn version(State(state): State<AppState>) -> Json<VersionInfo> {
    let config = state.service.config();
    Json(VersionInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        module: config.slug.clone(),
        route_prefix: config.route_prefix.clone(),
    })
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /health, /ready, /version and /openapi.json.
pub fn ops_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
