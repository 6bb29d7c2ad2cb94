use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path,
    },
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};
use serde_json::json;

use crate::api::error::ApiError;
use crate::catalog::{CatalogService, NewCategory};

//ROUTERS
pub fn admin_category_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/categories", post(create_category))
        .route("/categories/:id", delete(delete_category))
        .route(
            "/categories/:id/assign/:category_id",
            post(assign_category),
        )
        .layer(Extension(catalog))
}

//ROUTES
async fn create_category(
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<NewCategory>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    let category = catalog.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn assign_category(
    path: Result<Path<(i32, i32)>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((product_id, category_id)) = path?;
    let product = catalog.assign_category(product_id, category_id).await?;
    Ok((StatusCode::OK, Json(product)))
}

async fn delete_category(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let detached = catalog.delete_category(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Category deleted successfully",
            "detached_products": detached
        })),
    ))
}
