use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::api::error::ApiError;
use crate::catalog::{CatalogError, CatalogService};
use crate::entities::user::{self, Entity as UserEntity};
use crate::middleware::auth::{generate_token, TokenSettings};

pub fn auth_router(catalog: CatalogService, tokens: TokenSettings) -> Router {
    Router::new()
        .route("/login", post(login))
        .layer(Extension(catalog))
        .layer(Extension(tokens))
}

async fn login(
    Extension(catalog): Extension<CatalogService>,
    Extension(tokens): Extension<TokenSettings>,
    body: Result<Json<UserLogin>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    let found = UserEntity::find()
        .filter(user::Column::Email.eq(&*payload.email))
        .one(catalog.db())
        .await
        .map_err(CatalogError::from)?;

    let Some(model) = found else {
        return Err(ApiError::InvalidCredentials);
    };
    model
        .check_hash(&payload.password)
        .map_err(|_| ApiError::InvalidCredentials)?;

    let token = generate_token(&tokens, model.id, model.role)?;
    info!(user_id = model.id, role = %model.role, "User logged in");

    Ok((StatusCode::OK, Json(json!({ "token": token }))))
}

#[derive(Deserialize)]
struct UserLogin {
    email: String,
    password: String,
}
