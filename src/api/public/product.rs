use axum::{
    extract::{
        rejection::PathRejection,
        Extension, Path,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::api::error::ApiError;
use crate::catalog::CatalogService;

pub fn product_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/products/:id", get(get_product))
        .route("/products/:id/availability", get(get_availability))
        .layer(Extension(catalog))
}

async fn get_product(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let product = catalog.product(id).await?;
    Ok((StatusCode::OK, Json(product)))
}

async fn get_availability(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let dates = catalog.availability(id).await?;
    Ok((StatusCode::OK, Json(dates)))
}
