pub mod availability;
pub mod category;
pub mod city;
pub mod feature;
pub mod image;
pub mod product;
pub mod product_feature;
pub mod user;

use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Schema,
};

/// Creates every table the catalog needs. Safe to run on every start.
///
/// Tables are created parents first so foreign keys always point at an
/// existing table.
pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let tables = [
        table_for(&schema, user::Entity),
        table_for(&schema, city::Entity),
        table_for(&schema, category::Entity),
        table_for(&schema, feature::Entity),
        table_for(&schema, product::Entity),
        table_for(&schema, product_feature::Entity),
        table_for(&schema, image::Entity),
        table_for(&schema, availability::Entity),
    ];
    for table in tables {
        db.execute(backend.build(&table)).await?;
    }

    let mut indexes: Vec<IndexCreateStatement> = Vec::new();
    indexes.extend(schema.create_index_from_entity(product::Entity));
    indexes.extend(schema.create_index_from_entity(image::Entity));
    indexes.push(
        Index::create()
            .name("idx_availability_product_date")
            .table(availability::Entity)
            .col(availability::Column::ProductId)
            .col(availability::Column::Date)
            .unique()
            .to_owned(),
    );
    for mut index in indexes {
        index.if_not_exists();
        db.execute(backend.build(&index)).await?;
    }

    tracing::debug!("Catalog schema is up to date");
    Ok(())
}

fn table_for<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut table = schema.create_table_from_entity(entity);
    table.if_not_exists();
    table
}
