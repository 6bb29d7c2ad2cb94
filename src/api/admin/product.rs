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
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::catalog::{CatalogService, ProductSpec};

//ROUTERS
pub fn admin_product_router(catalog: CatalogService) -> Router {
    Router::new()
        .route("/products", post(create_product))
        .route("/products/:id", delete(delete_product))
        .route("/products/:id/availability", post(add_availability))
        .route(
            "/products/:id/availability/:date",
            delete(remove_availability),
        )
        .layer(Extension(catalog))
}

//ROUTES
async fn create_product(
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<ProductSpec>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    let product = catalog.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn delete_product(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    catalog.delete_product(id).await?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Product deleted successfully"
        })),
    ))
}

async fn add_availability(
    path: Result<Path<i32>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
    body: Result<Json<AddAvailability>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(id) = path?;
    let Json(payload) = body?;
    let dates = catalog.add_availability(id, payload.dates).await?;
    Ok((StatusCode::OK, Json(dates)))
}

async fn remove_availability(
    path: Result<Path<(i32, NaiveDate)>, PathRejection>,
    Extension(catalog): Extension<CatalogService>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((id, date)) = path?;
    let removed = catalog.remove_availability(id, date).await?;
    Ok((StatusCode::OK, Json(json!({ "removed": removed }))))
}

//Structs
#[derive(Deserialize)]
struct AddAvailability {
    dates: Vec<NaiveDate>,
}
