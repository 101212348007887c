use crate::app::{CatalogError, CatalogResult, CatalogService};
use crate::storage::JsonFileStore;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::PathRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Runs a catalog call on the blocking pool; every call does synchronous file I/O.
pub async fn run_blocking<T, F>(state: &AppState, f: F) -> CatalogResult<T>
where
    F: FnOnce(&CatalogService<JsonFileStore>) -> CatalogResult<T> + Send + 'static,
    T: Send + 'static,
{
    let catalog = state.catalog.clone();
    tokio::task::spawn_blocking(move || f(&catalog))
        .await
        .map_err(|e| CatalogError::Storage {
            message: format!("catalog task failed: {}", e),
        })?
}

pub fn status_for(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::InvalidFilter { .. } | CatalogError::InvalidInput { .. } => {
            StatusCode::BAD_REQUEST
        }
        CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
        CatalogError::Retrieval { .. } | CatalogError::Storage { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub fn error_response(err: CatalogError) -> Response {
    let status = status_for(&err);
    if status.is_server_error() {
        tracing::error!(error = %err, "catalog operation failed");
    } else {
        tracing::debug!(error = %err, status = status.as_u16(), "catalog request rejected");
    }
    (status, Json(ApiResponse::err(err.to_string()))).into_response()
}

/// Maps a catalog result to the response envelope, using `status` on success.
pub fn respond<T: Serialize>(status: StatusCode, result: CatalogResult<T>) -> Response {
    match result {
        Ok(value) => match serde_json::to_value(value) {
            Ok(data) => (status, Json(ApiResponse::ok(data))).into_response(),
            Err(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::err(format!("Failed to encode response: {}", e))),
            )
                .into_response(),
        },
        Err(e) => error_response(e),
    }
}

pub fn path_400(err: PathRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::err(format!("Invalid product id: {}", err))),
    )
        .into_response()
}
