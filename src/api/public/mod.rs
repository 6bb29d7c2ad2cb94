pub mod auth;
pub mod category;
pub mod product;
pub mod reference;

use axum::Router;

use crate::catalog::CatalogService;
use crate::middleware::auth::TokenSettings;

use auth::auth_router;
use category::category_router;
use product::product_router;
use reference::reference_router;

pub fn public_api_router(catalog: CatalogService, tokens: TokenSettings) -> Router {
    Router::new()
        .merge(auth_router(catalog.clone(), tokens))
        .merge(category_router(catalog.clone()))
        .merge(product_router(catalog.clone()))
        .merge(reference_router(catalog))
}
