use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use tracing::info;
use validator::Validate;

use super::{CatalogResult, CatalogService};
use crate::entities::{city, feature};

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct NewCity {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub country: String,
}

#[derive(Deserialize, Clone, Debug, Validate)]
pub struct NewFeature {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default, alias = "iconUrl")]
    pub icon_url: String,
}

pub async fn city_exists<C: ConnectionTrait>(conn: &C, id: i32) -> Result<bool, DbErr> {
    Ok(city::Entity::find_by_id(id).count(conn).await? > 0)
}

/// First id (ascending) in `ids` with no matching feature, if any.
pub async fn first_missing_feature<C: ConnectionTrait>(
    conn: &C,
    ids: &BTreeSet<i32>,
) -> Result<Option<i32>, DbErr> {
    if ids.is_empty() {
        return Ok(None);
    }
    let found: HashSet<i32> = feature::Entity::find()
        .filter(feature::Column::Id.is_in(ids.iter().copied()))
        .all(conn)
        .await?
        .into_iter()
        .map(|feature| feature.id)
        .collect();
    Ok(ids.iter().copied().find(|id| !found.contains(id)))
}

impl CatalogService {
    pub async fn list_cities(&self) -> CatalogResult<Vec<city::Model>> {
        Ok(city::Entity::find()
            .order_by_asc(city::Column::Id)
            .all(self.db())
            .await?)
    }

    /// Cities are not unique by name; two "Ica" rows are two cities.
    pub async fn create_city(&self, new: NewCity) -> CatalogResult<city::Model> {
        new.validate()?;
        let created = city::ActiveModel {
            name: Set(new.name),
            country: Set(new.country),
            ..Default::default()
        }
        .insert(self.db())
        .await?;

        info!(city_id = created.id, name = %created.name, "Created city");
        Ok(created)
    }

    pub async fn list_features(&self) -> CatalogResult<Vec<feature::Model>> {
        Ok(feature::Entity::find()
            .order_by_asc(feature::Column::Id)
            .all(self.db())
            .await?)
    }

    pub async fn create_feature(&self, new: NewFeature) -> CatalogResult<feature::Model> {
        new.validate()?;
        let created = feature::ActiveModel {
            name: Set(new.name),
            icon_url: Set(new.icon_url),
            ..Default::default()
        }
        .insert(self.db())
        .await?;

        info!(feature_id = created.id, name = %created.name, "Created feature");
        Ok(created)
    }
}
