use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "feature")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub icon_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::entities::product_feature::Entity")]
    ProductFeature,
}

impl Related<crate::entities::product::Entity> for Entity {
    fn to() -> RelationDef {
        crate::entities::product_feature::Relation::Product.def()
    }

    fn via() -> Option<RelationDef> {
        Some(crate::entities::product_feature::Relation::Feature.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
