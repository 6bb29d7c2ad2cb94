use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, LoaderTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};
use validator::Validate;

use super::{reference, CatalogError, CatalogResult, CatalogService, EntityKind};
use crate::entities::{availability, category, city, feature, image, product, product_feature};

/// Everything needed to create a product in one go.
#[derive(Deserialize, Clone, Debug, Validate)]
pub struct ProductSpec {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub capacity: i32,
    #[validate(length(min = 1, max = 255))]
    pub address: String,
    #[serde(alias = "cityId")]
    pub city_id: i32,
    #[serde(default, alias = "categoryId")]
    pub category_id: Option<i32>,
    /// One image per entry; repeated URLs become separate images.
    #[serde(default, alias = "imageUrls")]
    pub image_urls: Vec<String>,
    #[serde(default, alias = "featureIds")]
    pub feature_ids: Vec<i32>,
    /// Repeated dates collapse to one slot.
    #[serde(default)]
    pub availability: Vec<NaiveDate>,
}

impl ProductSpec {
    fn check(&self) -> CatalogResult<()> {
        self.validate()?;
        if self.title.trim().is_empty() {
            return Err(CatalogError::Validation("title: must not be blank".into()));
        }
        if self.address.trim().is_empty() {
            return Err(CatalogError::Validation("address: must not be blank".into()));
        }
        if !self.price.is_finite() {
            return Err(CatalogError::Validation("price: must be a finite number".into()));
        }
        Ok(())
    }
}

/// A product with its city, category, features and owned children resolved.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: product::Model,
    pub city: Option<city::Model>,
    pub category: Option<category::Model>,
    pub images: Vec<image::Model>,
    pub features: Vec<feature::Model>,
    pub availability: Vec<NaiveDate>,
}

impl ProductDetails {
    pub async fn load<C: ConnectionTrait>(
        conn: &C,
        product: product::Model,
    ) -> Result<ProductDetails, DbErr> {
        let id = product.id;
        Self::load_many(conn, vec![product])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound(format!("product {id}")))
    }

    /// Resolves the relations of many products with one query per relation.
    pub async fn load_many<C: ConnectionTrait>(
        conn: &C,
        products: Vec<product::Model>,
    ) -> Result<Vec<ProductDetails>, DbErr> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let cities = products.load_one(city::Entity, conn).await?;
        let images = products
            .load_many(image::Entity::find().order_by_asc(image::Column::Id), conn)
            .await?;
        let dates = products
            .load_many(
                availability::Entity::find().order_by_asc(availability::Column::Date),
                conn,
            )
            .await?;

        // Category is nullable, resolve it by hand.
        let category_ids: BTreeSet<i32> = products.iter().filter_map(|p| p.category_id).collect();
        let categories: HashMap<i32, category::Model> = if category_ids.is_empty() {
            HashMap::new()
        } else {
            category::Entity::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(conn)
                .await?
                .into_iter()
                .map(|category| (category.id, category))
                .collect()
        };

        let mut features = features_of(conn, products.iter().map(|p| p.id)).await?;

        let details = products
            .into_iter()
            .zip(cities)
            .zip(images)
            .zip(dates)
            .map(|(((product, city), images), dates)| ProductDetails {
                category: product
                    .category_id
                    .and_then(|id| categories.get(&id).cloned()),
                features: features.remove(&product.id).unwrap_or_default(),
                availability: dates.into_iter().map(|row| row.date).collect(),
                city,
                images,
                product,
            })
            .collect();
        Ok(details)
    }
}

/// Features per product id, each list ordered by feature id.
async fn features_of<C, I>(conn: &C, product_ids: I) -> Result<HashMap<i32, Vec<feature::Model>>, DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = i32>,
{
    let links = product_feature::Entity::find()
        .filter(product_feature::Column::ProductId.is_in(product_ids))
        .all(conn)
        .await?;
    if links.is_empty() {
        return Ok(HashMap::new());
    }

    let feature_ids: BTreeSet<i32> = links.iter().map(|link| link.feature_id).collect();
    let by_id: HashMap<i32, feature::Model> = feature::Entity::find()
        .filter(feature::Column::Id.is_in(feature_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|feature| (feature.id, feature))
        .collect();

    let mut grouped: HashMap<i32, Vec<feature::Model>> = HashMap::new();
    for link in links {
        if let Some(feature) = by_id.get(&link.feature_id) {
            grouped.entry(link.product_id).or_default().push(feature.clone());
        }
    }
    for features in grouped.values_mut() {
        features.sort_by_key(|feature| feature.id);
    }
    Ok(grouped)
}

pub async fn exists_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, DbErr> {
    Ok(product::Entity::find_by_id(id).count(conn).await? > 0)
}

/// Writes the product row and all of its children. References must already
/// be resolved by the caller.
async fn insert_aggregate<C: ConnectionTrait>(
    conn: &C,
    spec: ProductSpec,
    feature_ids: BTreeSet<i32>,
) -> Result<product::Model, DbErr> {
    let created = product::ActiveModel {
        title: Set(spec.title),
        description: Set(spec.description),
        price: Set(spec.price),
        capacity: Set(spec.capacity),
        address: Set(spec.address),
        city_id: Set(spec.city_id),
        category_id: Set(spec.category_id),
        ..Default::default()
    }
    .insert(conn)
    .await?;

    if !spec.image_urls.is_empty() {
        let images = spec.image_urls.into_iter().map(|url| image::ActiveModel {
            url: Set(url),
            product_id: Set(created.id),
            ..Default::default()
        });
        image::Entity::insert_many(images)
            .exec_without_returning(conn)
            .await?;
    }

    if !feature_ids.is_empty() {
        let links = feature_ids.into_iter().map(|feature_id| product_feature::ActiveModel {
            product_id: Set(created.id),
            feature_id: Set(feature_id),
        });
        product_feature::Entity::insert_many(links)
            .exec_without_returning(conn)
            .await?;
    }

    super::availability::insert_dates(conn, created.id, spec.availability).await?;

    Ok(created)
}

impl CatalogService {
    pub async fn product_exists(&self, id: i32) -> CatalogResult<bool> {
        Ok(exists_by_id(self.db(), id).await?)
    }

    pub async fn product(&self, id: i32) -> CatalogResult<ProductDetails> {
        let Some(found) = product::Entity::find_by_id(id).one(self.db()).await? else {
            return Err(CatalogError::not_found(EntityKind::Product, id));
        };
        debug!(product_id = id, "Loaded product");
        Ok(ProductDetails::load(self.db(), found).await?)
    }

    /// Creates a product together with its images, feature links and
    /// availability. Either all of it is stored or none of it is.
    ///
    /// This is also the entry point the seeder uses.
    pub async fn create_product(&self, spec: ProductSpec) -> CatalogResult<ProductDetails> {
        spec.check()?;

        let details = self
            .db()
            .transaction::<_, ProductDetails, CatalogError>(move |txn| {
                Box::pin(async move {
                    if !reference::city_exists(txn, spec.city_id).await? {
                        return Err(CatalogError::not_found(EntityKind::City, spec.city_id));
                    }
                    if let Some(category_id) = spec.category_id {
                        if !super::category::exists_by_id(txn, category_id).await? {
                            return Err(CatalogError::not_found(EntityKind::Category, category_id));
                        }
                    }
                    let feature_ids: BTreeSet<i32> = spec.feature_ids.iter().copied().collect();
                    if let Some(missing) = reference::first_missing_feature(txn, &feature_ids).await? {
                        return Err(CatalogError::not_found(EntityKind::Feature, missing));
                    }

                    let created = insert_aggregate(txn, spec, feature_ids).await?;
                    Ok(ProductDetails::load(txn, created).await?)
                })
            })
            .await?;

        info!(
            product_id = details.product.id,
            title = %details.product.title,
            images = details.images.len(),
            dates = details.availability.len(),
            "Created product"
        );
        Ok(details)
    }

    /// Replaces the product's category, whatever it was before.
    pub async fn assign_category(
        &self,
        product_id: i32,
        category_id: i32,
    ) -> CatalogResult<ProductDetails> {
        let details = self
            .db()
            .transaction::<_, ProductDetails, CatalogError>(move |txn| {
                Box::pin(async move {
                    if !super::category::exists_by_id(txn, category_id).await? {
                        return Err(CatalogError::not_found(EntityKind::Category, category_id));
                    }
                    let Some(found) = product::Entity::find_by_id(product_id).one(txn).await? else {
                        return Err(CatalogError::not_found(EntityKind::Product, product_id));
                    };

                    let mut active: product::ActiveModel = found.into();
                    active.category_id = Set(Some(category_id));
                    let updated = active.update(txn).await?;
                    Ok(ProductDetails::load(txn, updated).await?)
                })
            })
            .await?;

        info!(product_id, category_id, "Assigned category to product");
        Ok(details)
    }

    /// Removes the product along with its images, availability and feature
    /// links. Features themselves are shared and stay.
    pub async fn delete_product(&self, id: i32) -> CatalogResult<()> {
        self.db()
            .transaction::<_, (), CatalogError>(move |txn| {
                Box::pin(async move {
                    if !exists_by_id(txn, id).await? {
                        return Err(CatalogError::not_found(EntityKind::Product, id));
                    }
                    image::Entity::delete_many()
                        .filter(image::Column::ProductId.eq(id))
                        .exec(txn)
                        .await?;
                    availability::Entity::delete_many()
                        .filter(availability::Column::ProductId.eq(id))
                        .exec(txn)
                        .await?;
                    product_feature::Entity::delete_many()
                        .filter(product_feature::Column::ProductId.eq(id))
                        .exec(txn)
                        .await?;
                    product::Entity::delete_by_id(id).exec(txn).await?;
                    Ok(())
                })
            })
            .await?;

        info!(product_id = id, "Deleted product");
        Ok(())
    }
}
