use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;

use crate::{
    model::api::{ApiResponse, BannerDto, HealthDto},
    server::state::AppState,
};

/// Tag for grouping service endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// GET / - Service name and where to find the API document
#[utoipa::path(
    get,
    path = "/",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service banner", body = BannerDto)
    ),
)]
pub async fn banner() -> impl IntoResponse {
    Json(BannerDto {
        name: "PollStraw API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs: "/api/openapi.json".to_string(),
    })
}

/// GET /api/health - Liveness with database and cache status
///
/// Always answers 200; `status` reads `degraded` when the database does not
/// answer a ping.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service health", body = ApiResponse<HealthDto>)
    ),
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.db.ping().await {
        Ok(()) => "connected",
        Err(err) => {
            tracing::warn!("Database ping failed: {}", err);
            "disconnected"
        }
    };
    let status = if database == "connected" {
        "healthy"
    } else {
        "degraded"
    };

    (
        StatusCode::OK,
        Json(ApiResponse::data(HealthDto {
            status: status.to_string(),
            timestamp: Utc::now(),
            database: database.to_string(),
            cache: state.cache.status().await.to_string(),
        })),
    )
}
