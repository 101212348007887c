use crate::app::CatalogError;
use crate::storage::RecordStore;
use crate::transport::http::handlers::common::run_blocking;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy (catalog document readable)", body = ApiResponse),
        (status = 503, description = "Service is unhealthy (catalog document unreadable)", body = ApiResponse)
    )
)]
pub async fn healthcheck_handler(State(state): State<AppState>) -> impl IntoResponse {
    let probe = run_blocking(&state, |catalog| {
        catalog
            .store()
            .load_all()
            .map(|products| products.len())
            .map_err(CatalogError::from)
    })
    .await;

    match probe {
        Ok(count) => (
            StatusCode::OK,
            Json(ApiResponse::ok(
                serde_json::json!({ "status": "ok", "products": count }),
            )),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ApiResponse {
                success: false,
                data: Some(serde_json::json!({ "status": "unhealthy" })),
                error: Some(format!("Catalog document check failed: {}", e)),
            }),
        ),
    }
}
