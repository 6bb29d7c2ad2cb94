use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait, Value,
};
use serde::Deserialize;
use tracing::{debug, info};
use validator::Validate;

use super::{product::ProductDetails, CatalogError, CatalogResult, CatalogService, EntityKind};
use crate::entities::{category, product};

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "imageUrl")]
    pub image_url: String,
}

impl NewCategory {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        NewCategory {
            title: title.into(),
            description: description.into(),
            image_url: image_url.into(),
        }
    }

    fn check(&self) -> CatalogResult<()> {
        self.validate()?;
        if self.title.trim().is_empty() {
            return Err(CatalogError::Validation("title: must not be blank".into()));
        }
        Ok(())
    }
}

// Registry queries. Generic over the connection so the service can run them
// inside its transactions.

/// All categories in creation order.
pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<category::Model>, DbErr> {
    category::Entity::find()
        .order_by_asc(category::Column::Id)
        .all(conn)
        .await
}

pub async fn exists_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, DbErr> {
    Ok(category::Entity::find_by_id(id).count(conn).await? > 0)
}

/// Exact, case-sensitive title match.
pub async fn exists_by_title<C: ConnectionTrait>(conn: &C, title: &str) -> Result<bool, DbErr> {
    let matches = category::Entity::find()
        .filter(category::Column::Title.eq(title))
        .count(conn)
        .await?;
    Ok(matches > 0)
}

/// Products currently pointing at the category, by ascending id.
pub async fn products_of<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<Vec<product::Model>, DbErr> {
    product::Entity::find()
        .filter(product::Column::CategoryId.eq(id))
        .order_by_asc(product::Column::Id)
        .all(conn)
        .await
}

async fn insert<C: ConnectionTrait>(
    conn: &C,
    new: NewCategory,
) -> Result<category::Model, DbErr> {
    category::ActiveModel {
        title: Set(new.title),
        description: Set(new.description),
        image_url: Set(new.image_url),
        ..Default::default()
    }
    .insert(conn)
    .await
}

/// Clears the category of every product that references it.
async fn detach_products<C: ConnectionTrait>(conn: &C, id: i32) -> Result<u64, DbErr> {
    let result = product::Entity::update_many()
        .col_expr(product::Column::CategoryId, Expr::value(Value::Int(None)))
        .filter(product::Column::CategoryId.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

impl CatalogService {
    pub async fn list_categories(&self) -> CatalogResult<Vec<category::Model>> {
        let categories = list_all(self.db()).await?;
        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    pub async fn category_exists(&self, id: i32) -> CatalogResult<bool> {
        Ok(exists_by_id(self.db(), id).await?)
    }

    pub async fn category_title_taken(&self, title: &str) -> CatalogResult<bool> {
        Ok(exists_by_title(self.db(), title).await?)
    }

    pub async fn products_by_category(&self, id: i32) -> CatalogResult<Vec<ProductDetails>> {
        if !exists_by_id(self.db(), id).await? {
            return Err(CatalogError::not_found(EntityKind::Category, id));
        }
        let products = products_of(self.db(), id).await?;
        Ok(ProductDetails::load_many(self.db(), products).await?)
    }

    /// Fails with `Conflict` when the title is already in use. The title
    /// column is unique too, so a racing insert is reported the same way.
    pub async fn create_category(&self, new: NewCategory) -> CatalogResult<category::Model> {
        new.check()?;

        let created = self
            .db()
            .transaction::<_, category::Model, CatalogError>(move |txn| {
                Box::pin(async move {
                    if exists_by_title(txn, &new.title).await? {
                        return Err(title_conflict(&new.title));
                    }
                    let title = new.title.clone();
                    insert(txn, new).await.map_err(|err| {
                        if CatalogError::is_unique_violation(&err) {
                            title_conflict(&title)
                        } else {
                            CatalogError::Database(err)
                        }
                    })
                })
            })
            .await?;

        info!(category_id = created.id, title = %created.title, "Created category");
        Ok(created)
    }

    /// Deletes the category. Products that referenced it are kept and left
    /// without a category; returns how many were detached.
    pub async fn delete_category(&self, id: i32) -> CatalogResult<u64> {
        let detached = self
            .db()
            .transaction::<_, u64, CatalogError>(move |txn| {
                Box::pin(async move {
                    let Some(category) = category::Entity::find_by_id(id).one(txn).await? else {
                        return Err(CatalogError::not_found(EntityKind::Category, id));
                    };
                    let detached = detach_products(txn, id).await?;
                    category::Entity::delete_by_id(category.id).exec(txn).await?;
                    Ok(detached)
                })
            })
            .await?;

        info!(category_id = id, detached, "Deleted category");
        Ok(detached)
    }
}

fn title_conflict(title: &str) -> CatalogError {
    CatalogError::Conflict(format!("Category '{title}' already exists"))
}
