use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::api::error::ApiError;
use crate::catalog::{CatalogService, NewCity, NewFeature};

pub fn admin_reference_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/cities", post(create_city))
        .route("/features", post(create_feature))
        .layer(Extension(catalog))
}

async fn create_city(
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<NewCity>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    Ok((StatusCode::CREATED, Json(catalog.create_city(payload).await?)))
}

async fn create_feature(
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<NewFeature>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    Ok((StatusCode::CREATED, Json(catalog.create_feature(payload).await?)))
}
