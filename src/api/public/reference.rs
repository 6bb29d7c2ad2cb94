use axum::{extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router};

use crate::api::error::ApiError;
use crate::catalog::CatalogService;

pub fn reference_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/cities", get(get_cities))
        .route("/features", get(get_features))
        .layer(Extension(catalog))
}

async fn get_cities(
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    Ok((StatusCode::OK, Json(catalog.list_cities().await?)))
}

async fn get_features(
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    Ok((StatusCode::OK, Json(catalog.list_features().await?)))
}
