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

pub fn category_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/categories", get(get_categories))
        .route("/categories/:id/products", get(get_category_products))
        .layer(Extension(catalog))
}

async fn get_categories(
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let categories = catalog.list_categories().await?;
    Ok((StatusCode::OK, Json(categories)))
}

async fn get_category_products(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let products = catalog.products_by_category(id).await?;
    Ok((StatusCode::OK, Json(products)))
}
