use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tour_catalog::{
    api::create_api_router,
    catalog::CatalogService,
    config::Config,
    connect,
    entities::setup_schema,
    middleware::auth::TokenSettings,
    seed::bootstrap,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let db = connect(&config.database_url).await?;
    setup_schema(&db).await?;

    let catalog = CatalogService::new(Arc::new(db));
    if config.seed.enabled {
        bootstrap(&catalog, &config.seed).await?;
    }

    let tokens = TokenSettings::new(&config.secret, config.token_ttl_hours);
    let app = create_api_router(catalog, tokens);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %listener.local_addr()?, "Serving tour catalog");
    axum::serve(listener, app).await?;

    Ok(())
}
