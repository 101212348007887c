use crate::domain::filter::FilterCriterion;
use crate::domain::model::{Product, ProductInput};
use crate::transport::http::handlers::{health, products};
use crate::transport::http::types::{ApiResponse, DeletedResponse};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        products::list_products_handler,
        products::filter_products_handler,
        products::get_product_handler,
        products::create_product_handler,
        products::update_product_handler,
        products::delete_product_handler
    ),
    components(schemas(ApiResponse, DeletedResponse, Product, ProductInput, FilterCriterion))
)]
pub struct ApiDoc;

pub fn create_router(app_state: crate::transport::http::types::AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route(
            "/product",
            get(products::list_products_handler).post(products::create_product_handler),
        )
        .route("/product/filter", post(products::filter_products_handler))
        .route(
            "/product/:id",
            get(products::get_product_handler)
                .put(products::update_product_handler)
                .delete(products::delete_product_handler),
        )
        .with_state(app_state)
}
