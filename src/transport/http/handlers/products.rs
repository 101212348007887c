use crate::app::CatalogError;
use crate::domain::filter::FilterCriterion;
use crate::domain::model::ProductInput;
use crate::transport::http::handlers::common::{error_response, path_400, respond, run_blocking};
use crate::transport::http::types::{json_422, ApiResponse, AppState, DeletedResponse};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

#[utoipa::path(
    get,
    path = "/product",
    responses(
        (status = 200, description = "All products, in stored order", body = ApiResponse),
        (status = 500, description = "Catalog could not be read", body = ApiResponse)
    )
)]
pub async fn list_products_handler(State(state): State<AppState>) -> Response {
    let result = run_blocking(&state, |catalog| catalog.list_all()).await;
    respond(StatusCode::OK, result)
}

#[utoipa::path(
    post,
    path = "/product/filter",
    request_body = [FilterCriterion],
    responses(
        (status = 200, description = "Products matching every filter", body = ApiResponse),
        (status = 400, description = "Empty or unknown filter field, or non-numeric value for a numeric field", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn filter_products_handler(
    State(state): State<AppState>,
    request: Result<Json<Vec<FilterCriterion>>, JsonRejection>,
) -> Response {
    let Json(criteria) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "[{\"key\": ..., \"value\": ...}]").into_response(),
    };

    let result = run_blocking(&state, move |catalog| catalog.filter(&criteria)).await;
    respond(StatusCode::OK, result)
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "The product", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse)
    )
)]
pub async fn get_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };

    let result = run_blocking(&state, move |catalog| catalog.get_by_id(id)).await;
    respond(StatusCode::OK, result)
}

#[utoipa::path(
    post,
    path = "/product",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Product created with the next identifier", body = ApiResponse),
        (status = 400, description = "Missing or malformed product", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_product_handler(
    State(state): State<AppState>,
    request: Result<Json<Option<ProductInput>>, JsonRejection>,
) -> Response {
    let input = match request {
        Ok(Json(input)) => input,
        Err(e) => return error_response(CatalogError::invalid_input(e.body_text())),
    };

    let result = run_blocking(&state, move |catalog| catalog.create(input)).await;
    respond(StatusCode::CREATED, result)
}

#[utoipa::path(
    put,
    path = "/product/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Product replaced; id preserved", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    request: Result<Json<ProductInput>, JsonRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };
    let Json(input) = match request {
        Ok(v) => v,
        Err(e) => return json_422(e, "{\"name\": ..., \"price\": ..., ...}").into_response(),
    };

    let result = run_blocking(&state, move |catalog| catalog.update(id, input)).await;
    respond(StatusCode::OK, result)
}

#[utoipa::path(
    delete,
    path = "/product/{id}",
    params(
        ("id" = i64, Path, description = "Product id")
    ),
    responses(
        (status = 200, description = "Product deleted", body = ApiResponse),
        (status = 404, description = "Not found", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_product_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Response {
    let Path(id) = match id {
        Ok(v) => v,
        Err(e) => return path_400(e),
    };

    let result = run_blocking(&state, move |catalog| catalog.delete(id))
        .await
        .map(|id| DeletedResponse { id });
    respond(StatusCode::OK, result)
}
