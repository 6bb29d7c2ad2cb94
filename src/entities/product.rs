use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    /// Max participants per available date.
    pub capacity: i32,
    pub address: String,
    #[sea_orm(indexed)]
    pub city_id: i32,
    #[sea_orm(indexed)]
    pub category_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::entities::city::Entity",
        from = "Column::CityId",
        to = "crate::entities::city::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    City,
    #[sea_orm(
        belongs_to = "crate::entities::category::Entity",
        from = "Column::CategoryId",
        to = "crate::entities::category::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "crate::entities::image::Entity")]
    Image,
    #[sea_orm(has_many = "crate::entities::availability::Entity")]
    Availability,
}

impl Related<crate::entities::city::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::City.def()
    }
}

impl Related<crate::entities::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<crate::entities::image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Image.def()
    }
}

impl Related<crate::entities::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl Related<crate::entities::feature::Entity> for Entity {
    fn to() -> RelationDef {
        crate::entities::product_feature::Relation::Feature.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::entities::product_feature::Relation::Product.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
