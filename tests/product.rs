mod common;

use sea_orm::{EntityTrait, PaginatorTrait};
use tour_catalog::{
    catalog::{CatalogError, CatalogService, EntityKind},
    entities::{availability, image, product, product_feature},
};

use common::{add_category, add_city, add_feature, date, empty_catalog, spec};

async fn row_counts(catalog: &CatalogService) -> (u64, u64, u64, u64) {
    let db = catalog.db();
    (
        product::Entity::find().count(db).await.unwrap(),
        image::Entity::find().count(db).await.unwrap(),
        availability::Entity::find().count(db).await.unwrap(),
        product_feature::Entity::find().count(db).await.unwrap(),
    )
}

#[tokio::test]
async fn test_repeated_dates_collapse() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "París").await;

    let mut request = spec("Paseo en barco por el Sena", city_id);
    request.availability = vec![date(4, 1), date(4, 1), date(4, 3)];
    let created = catalog.create_product(request).await.unwrap();

    assert_eq!(created.availability, vec![date(4, 1), date(4, 3)]);
    assert_eq!(
        catalog.availability(created.product.id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_unknown_city_writes_nothing() {
    let catalog = empty_catalog().await;
    add_city(&catalog, "Roma").await;
    let feature_id = add_feature(&catalog, "Familias").await;

    let mut request = spec("Trastevere", 999);
    request.image_urls = vec!["https://img.test/1.jpg".into()];
    request.feature_ids = vec![feature_id];
    request.availability = vec![date(4, 2)];

    let result = catalog.create_product(request).await;
    assert!(matches!(
        result,
        Err(CatalogError::NotFound {
            entity: EntityKind::City,
            id: 999
        })
    ));
    assert_eq!(row_counts(&catalog).await, (0, 0, 0, 0));
}

#[tokio::test]
async fn test_unknown_category_or_feature_writes_nothing() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Tokyo").await;
    let feature_id = add_feature(&catalog, "3 Horas").await;

    let mut request = spec("Asakusa", city_id);
    request.category_id = Some(12);
    request.availability = vec![date(4, 5)];
    assert!(matches!(
        catalog.create_product(request).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Category,
            id: 12
        })
    ));

    let mut request = spec("Asakusa", city_id);
    request.feature_ids = vec![feature_id, 77, 78];
    request.image_urls = vec!["https://img.test/sensoji.jpg".into()];
    assert!(matches!(
        catalog.create_product(request).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Feature,
            id: 77
        })
    ));

    assert_eq!(row_counts(&catalog).await, (0, 0, 0, 0));
}

#[tokio::test]
async fn test_full_aggregate_is_created() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Mar de Cortés").await;
    let category_id = add_category(&catalog, "Aventura").await;
    let sea = add_feature(&catalog, "Sea Lovers").await;
    let active = add_feature(&catalog, "Activo").await;

    let mut request = spec("Snorkel en Cabo San Lucas", city_id);
    request.category_id = Some(category_id);
    request.image_urls = vec![
        "https://img.test/arco.webp".into(),
        "https://img.test/arco.webp".into(),
        "https://img.test/playa.webp".into(),
    ];
    request.feature_ids = vec![active, sea, active];
    request.availability = vec![date(4, 8), date(4, 1)];

    let created = catalog.create_product(request).await.unwrap();

    // Same URL twice is two images.
    assert_eq!(created.images.len(), 3);
    assert_eq!(created.images[0].url, created.images[1].url);
    let feature_ids: Vec<i32> = created.features.iter().map(|f| f.id).collect();
    assert_eq!(feature_ids, vec![sea, active]);
    assert_eq!(created.availability, vec![date(4, 1), date(4, 8)]);
    assert_eq!(created.city.as_ref().map(|c| c.id), Some(city_id));
    assert_eq!(created.category.as_ref().map(|c| c.id), Some(category_id));

    let reloaded = catalog.product(created.product.id).await.unwrap();
    assert_eq!(reloaded, created);
}

#[tokio::test]
async fn test_invalid_spec_is_rejected() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Agra").await;

    let mut negative_price = spec("Taj Mahal", city_id);
    negative_price.price = -1.0;
    assert!(matches!(
        catalog.create_product(negative_price).await,
        Err(CatalogError::Validation(_))
    ));

    let mut negative_capacity = spec("Taj Mahal", city_id);
    negative_capacity.capacity = -5;
    assert!(matches!(
        catalog.create_product(negative_capacity).await,
        Err(CatalogError::Validation(_))
    ));

    let mut no_price = spec("Taj Mahal", city_id);
    no_price.price = f64::NAN;
    assert!(matches!(
        catalog.create_product(no_price).await,
        Err(CatalogError::Validation(_))
    ));

    let blank_title = spec("  ", city_id);
    assert!(matches!(
        catalog.create_product(blank_title).await,
        Err(CatalogError::Validation(_))
    ));

    let mut blank_address = spec("Taj Mahal", city_id);
    blank_address.address = " \t ".to_string();
    assert!(matches!(
        catalog.create_product(blank_address).await,
        Err(CatalogError::Validation(message)) if message.starts_with("address")
    ));
    assert_eq!(row_counts(&catalog).await, (0, 0, 0, 0));

    let mut free = spec("Taj Mahal", city_id);
    free.price = 0.0;
    free.capacity = 0;
    assert!(catalog.create_product(free).await.is_ok());
}

#[tokio::test]
async fn test_assign_category_overwrites() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Londres").await;
    let first = add_category(&catalog, "Tour").await;
    let second = add_category(&catalog, "Cultura").await;

    let mut ids = Vec::new();
    for n in 1..=5 {
        let mut request = spec(&format!("Tour {n}"), city_id);
        request.category_id = Some(first);
        ids.push(catalog.create_product(request).await.unwrap().product.id);
    }
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);

    let updated = catalog.assign_category(5, second).await.unwrap();
    assert_eq!(updated.product.category_id, Some(second));
    assert_eq!(updated.category.map(|c| c.title), Some("Cultura".to_string()));

    let in_first: Vec<i32> = catalog
        .products_by_category(first)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.product.id)
        .collect();
    assert_eq!(in_first, vec![1, 2, 3, 4]);
    let in_second = catalog.products_by_category(second).await.unwrap();
    assert_eq!(in_second.len(), 1);
    assert_eq!(in_second[0].product.id, 5);

    // Assigning the same category again keeps exactly one reference.
    let again = catalog.assign_category(5, second).await.unwrap();
    assert_eq!(again.product.category_id, Some(second));
}

#[tokio::test]
async fn test_assign_category_unknown_ids() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Ica").await;
    let category_id = add_category(&catalog, "Aventura").await;
    let product_id = catalog
        .create_product(spec("Huacachina", city_id))
        .await
        .unwrap()
        .product
        .id;

    assert!(matches!(
        catalog.assign_category(product_id, 99).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Category,
            id: 99
        })
    ));
    assert!(matches!(
        catalog.assign_category(98, category_id).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Product,
            id: 98
        })
    ));
    // Category is resolved first.
    assert!(matches!(
        catalog.assign_category(98, 99).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Category,
            ..
        })
    ));

    let unchanged = catalog.product(product_id).await.unwrap();
    assert_eq!(unchanged.product.category_id, None);
}

#[tokio::test]
async fn test_delete_product_removes_children() {
    let catalog = empty_catalog().await;
    let city_id = add_city(&catalog, "Cuzco").await;
    let feature_id = add_feature(&catalog, "Familias").await;

    let mut request = spec("Valle Sagrado", city_id);
    request.image_urls = vec!["https://img.test/valle.jpg".into()];
    request.feature_ids = vec![feature_id];
    request.availability = vec![date(5, 1), date(5, 2)];
    let created = catalog.create_product(request).await.unwrap();

    catalog.delete_product(created.product.id).await.unwrap();

    assert_eq!(row_counts(&catalog).await, (0, 0, 0, 0));
    assert!(matches!(
        catalog.product(created.product.id).await,
        Err(CatalogError::NotFound {
            entity: EntityKind::Product,
            ..
        })
    ));
    // Shared features outlive the product.
    assert_eq!(catalog.list_features().await.unwrap().len(), 1);
    assert!(matches!(
        catalog.delete_product(created.product.id).await,
        Err(CatalogError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_same_named_cities_are_distinct() {
    let catalog = empty_catalog().await;

    let first = add_city(&catalog, "Ica").await;
    let second = add_city(&catalog, "Ica").await;

    assert_ne!(first, second);
    assert_eq!(catalog.list_cities().await.unwrap().len(), 2);
}
