mod common;

use reqwest::StatusCode;
use serde_json::{json, Value};

use common::{bearer, spawn_app, ADMIN_EMAIL, USER_EMAIL, USER_PASSWORD};

#[tokio::test]
async fn test_list_categories() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/categories"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let body = response
        .json::<Vec<Value>>()
        .await
        .expect("Failed to parse response JSON");
    let titles: Vec<&str> = body.iter().filter_map(|c| c["title"].as_str()).collect();
    assert_eq!(titles, vec!["Gastronomía", "Cultura", "Aventura", "Tour"]);
}

#[tokio::test]
async fn test_products_by_category() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/categories/4/products"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response
        .json::<Vec<Value>>()
        .await
        .expect("Failed to parse response JSON");
    assert_eq!(body.len(), 5);
    assert_eq!(body[0]["title"], "Paseo en barco por el Sena");
    assert_eq!(body[4]["title"], "Excursión al Taj Mahal el mismo día en coche desde Delhi");
    assert_eq!(body[0]["category"]["title"], "Tour");
    assert_eq!(body[0]["availability"][0], "2025-04-01");

    let response = app
        .client
        .get(app.url("/api/categories/999/products"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["error"], "Category with id 999 does not exist");
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/api/login"))
        .json(&json!({ "email": ADMIN_EMAIL, "password": "nope" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_require_curator() {
    let app = spawn_app().await;
    let payload = json!({ "title": "Nocturno", "description": "", "imageUrl": "" });

    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = app.login(USER_EMAIL, USER_PASSWORD).await;
    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .headers(bearer(&token))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .headers(bearer("not-a-token"))
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(!app.catalog.category_title_taken("Nocturno").await.unwrap());
}

#[tokio::test]
async fn test_create_category() {
    let app = spawn_app().await;
    let headers = app.admin_headers().await;

    let payload = json!({
        "title": "Nocturno",
        "description": "Tours de noche",
        "imageUrl": "https://img.test/noche.png"
    });
    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .headers(headers.clone())
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["title"], "Nocturno");
    assert_eq!(body["image_url"], "https://img.test/noche.png");

    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .headers(headers)
        .json(&json!({ "title": "Aventura" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["error"], "Category 'Aventura' already exists");
}

#[tokio::test]
async fn test_assign_and_delete_category() {
    let app = spawn_app().await;
    let headers = app.admin_headers().await;

    // Product 1 is the Seine cruise, seeded under "Tour" (4).
    let response = app
        .client
        .post(app.url("/api/admin/categories/1/assign/3"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["category_id"], 3);

    let response = app
        .client
        .post(app.url("/api/admin/categories/1/assign/40"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .client
        .delete(app.url("/api/admin/categories/3"))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["detached_products"], 2);

    let response = app
        .client
        .get(app.url("/api/products/1"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body["category_id"], Value::Null);

    let response = app
        .client
        .delete(app.url("/api/admin/categories/3"))
        .headers(headers)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_product_and_availability() {
    let app = spawn_app().await;
    let headers = app.admin_headers().await;

    let payload = json!({
        "title": "Líneas de Nazca",
        "description": "Sobrevuelo",
        "price": 250.0,
        "capacity": 6,
        "address": "Aeródromo de Ica",
        "cityId": 8,
        "categoryId": 3,
        "imageUrls": ["https://img.test/nazca.jpg", "https://img.test/nazca.jpg"],
        "featureIds": [3, 5],
        "availability": ["2025-05-01", "2025-05-01", "2025-05-03"]
    });
    let response = app
        .client
        .post(app.url("/api/admin/products"))
        .headers(headers.clone())
        .json(&payload)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.json::<Value>().await.unwrap();
    let id = body["id"].as_i64().expect("Product id missing");
    assert_eq!(body["images"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["availability"], json!(["2025-05-01", "2025-05-03"]));

    let response = app
        .client
        .post(app.url(&format!("/api/admin/products/{id}/availability")))
        .headers(headers.clone())
        .json(&json!({ "dates": ["2025-05-03", "2025-05-04"] }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!(["2025-05-01", "2025-05-03", "2025-05-04"]));

    let response = app
        .client
        .delete(app.url(&format!("/api/admin/products/{id}/availability/2025-05-01")))
        .headers(headers.clone())
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .client
        .get(app.url(&format!("/api/products/{id}/availability")))
        .send()
        .await
        .expect("Failed to send request");
    let body = response.json::<Value>().await.unwrap();
    assert_eq!(body, json!(["2025-05-03", "2025-05-04"]));

    let mut missing_city = payload.clone();
    missing_city["cityId"] = json!(999);
    let response = app
        .client
        .post(app.url("/api/admin/products"))
        .headers(headers.clone())
        .json(&missing_city)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let mut negative = payload;
    negative["price"] = json!(-3.0);
    let response = app
        .client
        .post(app.url("/api/admin/products"))
        .headers(headers)
        .json(&negative)
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_requests_get_json_errors() {
    let app = spawn_app().await;
    let headers = app.admin_headers().await;

    let response = app
        .client
        .get(app.url("/api/products/abc"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    let message = body["error"].as_str().expect("Error message missing");
    assert!(message.starts_with("Invalid path"), "{message}");

    let response = app
        .client
        .post(app.url("/api/admin/products"))
        .headers(headers.clone())
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>().await.unwrap();
    let message = body["error"].as_str().expect("Error message missing");
    assert!(message.starts_with("Invalid request body"), "{message}");

    let response = app
        .client
        .post(app.url("/api/admin/categories"))
        .headers(headers)
        .json(&json!({ "description": "Sin título" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json::<Value>().await.unwrap();
    assert!(body["error"].is_string());
}
