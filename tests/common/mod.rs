#![allow(dead_code)]

use chrono::NaiveDate;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;

use tour_catalog::{
    api::create_api_router,
    catalog::{CatalogService, NewCategory, NewCity, NewFeature, ProductSpec},
    config::SeedConfig,
    connect,
    entities::setup_schema,
    middleware::auth::TokenSettings,
    seed::bootstrap,
};

pub const ADMIN_EMAIL: &str = "admin@admin.com";
pub const ADMIN_PASSWORD: &str = "Admin12345678";
pub const USER_EMAIL: &str = "user@user.com";
pub const USER_PASSWORD: &str = "User12345678";

pub async fn empty_catalog() -> CatalogService {
    let db = connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    setup_schema(&db).await.expect("Failed to create schema");
    CatalogService::new(Arc::new(db))
}

/// A catalog on a real SQLite file with a full connection pool, so
/// concurrent callers get separate connections.
pub async fn file_catalog(dir: &tempfile::TempDir) -> CatalogService {
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("catalog.db").display());
    let db = connect(&url).await.expect("Failed to open database file");
    setup_schema(&db).await.expect("Failed to create schema");
    CatalogService::new(Arc::new(db))
}

pub fn seed_config() -> SeedConfig {
    SeedConfig {
        enabled: true,
        admin_password: ADMIN_PASSWORD.to_string(),
        user_password: USER_PASSWORD.to_string(),
    }
}

pub async fn seeded_catalog() -> CatalogService {
    let catalog = empty_catalog().await;
    bootstrap(&catalog, &seed_config())
        .await
        .expect("Failed to seed catalog");
    catalog
}

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("Invalid test date")
}

pub async fn add_city(catalog: &CatalogService, name: &str) -> i32 {
    catalog
        .create_city(NewCity {
            name: name.to_string(),
            country: "Perú".to_string(),
        })
        .await
        .expect("Failed to create city")
        .id
}

pub async fn add_category(catalog: &CatalogService, title: &str) -> i32 {
    catalog
        .create_category(NewCategory::new(title, "Test category", "https://img.test/c.png"))
        .await
        .expect("Failed to create category")
        .id
}

pub async fn add_feature(catalog: &CatalogService, name: &str) -> i32 {
    catalog
        .create_feature(NewFeature {
            name: name.to_string(),
            icon_url: "https://img.test/f.png".to_string(),
        })
        .await
        .expect("Failed to create feature")
        .id
}

/// A minimal valid `ProductSpec` in the given city, no children.
pub fn spec(title: &str, city_id: i32) -> ProductSpec {
    ProductSpec {
        title: title.to_string(),
        description: "A test tour".to_string(),
        price: 99.5,
        capacity: 12,
        address: "Calle Falsa 123".to_string(),
        city_id,
        category_id: None,
        image_urls: Vec::new(),
        feature_ids: Vec::new(),
        availability: Vec::new(),
    }
}

pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub catalog: CatalogService,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/api/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Failed to send login request");
        assert_eq!(response.status(), StatusCode::OK);

        let body = response
            .json::<serde_json::Value>()
            .await
            .expect("Failed to parse login response JSON");
        body["token"]
            .as_str()
            .expect("Token not found in login response")
            .to_string()
    }

    pub async fn admin_headers(&self) -> header::HeaderMap {
        bearer(&self.login(ADMIN_EMAIL, ADMIN_PASSWORD).await)
    }
}

pub fn bearer(token: &str) -> header::HeaderMap {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {token}"))
            .expect("Failed to create Authorization header"),
    );
    headers
}

/// Serves a seeded catalog on an ephemeral local port.
pub async fn spawn_app() -> TestApp {
    let catalog = seeded_catalog().await;
    let app = create_api_router(catalog.clone(), TokenSettings::new("test-secret", 1));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    TestApp {
        address: format!("http://{addr}"),
        client: Client::new(),
        catalog,
    }
}
