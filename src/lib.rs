pub mod api;
pub mod catalog;
pub mod config;
pub mod entities;
pub mod middleware;
pub mod seed;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Opens the connection pool. In-memory SQLite is pinned to one connection,
/// since every connection would otherwise see its own empty database.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    options.sqlx_logging(false);
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    Database::connect(options).await
}
