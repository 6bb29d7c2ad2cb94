use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::middleware::auth::AuthMiddlewareError;
use crate::middleware::logging::{to_response, RequestFailure};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Auth(#[from] AuthMiddlewareError),
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Invalid request body: {}", .0.body_text())]
    Body(#[from] JsonRejection),
    #[error("Invalid path: {}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(err) => match err {
                CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                CatalogError::Conflict(_) => StatusCode::CONFLICT,
                CatalogError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CatalogError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Auth(err) => match err {
                AuthMiddlewareError::Forbidden => StatusCode::FORBIDDEN,
                AuthMiddlewareError::GenerationFail | AuthMiddlewareError::Database(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::UNAUTHORIZED,
            },
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Body(rejection) => rejection.status(),
            ApiError::Path(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let reason = self.to_string();
        // Storage details stay in the logs.
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error".to_string()
        } else {
            reason.clone()
        };

        to_response(
            (status, Json(json!({ "error": message }))),
            Some(RequestFailure(reason)),
        )
    }
}
