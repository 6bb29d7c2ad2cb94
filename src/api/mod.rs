pub mod admin;
pub mod error;
pub mod public;

use axum::{middleware::from_fn, Router};
use tower_http::trace::TraceLayer;

use admin::admin_api_router;
use public::public_api_router;

use crate::catalog::CatalogService;
use crate::middleware::{auth::TokenSettings, logging::logging_middleware};

pub fn create_api_router(catalog: CatalogService, tokens: TokenSettings) -> Router {
    Router::new()
        .nest("/api", public_api_router(catalog.clone(), tokens.clone()))
        .nest("/api/admin", admin_api_router(catalog, tokens))
        .layer(from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
