pub mod category;
pub mod product;
pub mod reference;

use axum::{middleware::from_fn_with_state, Router};

use category::admin_category_router;
use product::admin_product_router;
use reference::admin_reference_router;

use crate::catalog::CatalogService;
use crate::entities::user::Role;
use crate::middleware::auth::{auth_middleware, AuthState, TokenSettings};

/// Catalog curation routes, open to ADMIN and SUPERADMIN only.
pub fn admin_api_router(catalog: CatalogService, tokens: TokenSettings) -> Router {
    let db = catalog.shared_db();

    Router::new()
        .merge(admin_category_router(catalog.clone()))
        .merge(admin_product_router(catalog.clone()))
        .merge(admin_reference_router(catalog))
        .layer(from_fn_with_state(
            AuthState {
                db,
                tokens,
                roles: Role::CURATORS,
            },
            auth_middleware,
        ))
}
