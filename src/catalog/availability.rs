use chrono::NaiveDate;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use std::collections::{BTreeSet, HashSet};
use tracing::info;

use super::{product, CatalogError, CatalogResult, CatalogService, EntityKind};
use crate::entities::availability;

/// Stored dates of a product, earliest first.
pub async fn dates_of<C: ConnectionTrait>(
    conn: &C,
    product_id: i32,
) -> Result<Vec<NaiveDate>, DbErr> {
    let rows = availability::Entity::find()
        .filter(availability::Column::ProductId.eq(product_id))
        .order_by_asc(availability::Column::Date)
        .all(conn)
        .await?;
    Ok(rows.into_iter().map(|row| row.date).collect())
}

/// Adds the given dates to a product's calendar and returns how many rows
/// were written.
///
/// Repeated dates in `dates` collapse to one, and dates the product already
/// has are skipped, so calling this twice with the same input is a no-op the
/// second time.
pub async fn insert_dates<C, I>(conn: &C, product_id: i32, dates: I) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = NaiveDate>,
{
    let requested: BTreeSet<NaiveDate> = dates.into_iter().collect();
    if requested.is_empty() {
        return Ok(0);
    }

    let existing: HashSet<NaiveDate> = dates_of(conn, product_id).await?.into_iter().collect();
    let rows: Vec<availability::ActiveModel> = requested
        .into_iter()
        .filter(|date| !existing.contains(date))
        .map(|date| availability::ActiveModel {
            date: Set(date),
            product_id: Set(product_id),
            ..Default::default()
        })
        .collect();

    if rows.is_empty() {
        return Ok(0);
    }
    availability::Entity::insert_many(rows)
        .exec_without_returning(conn)
        .await
}

impl CatalogService {
    pub async fn availability(&self, product_id: i32) -> CatalogResult<Vec<NaiveDate>> {
        if !product::exists_by_id(self.db(), product_id).await? {
            return Err(CatalogError::not_found(EntityKind::Product, product_id));
        }
        Ok(dates_of(self.db(), product_id).await?)
    }

    /// Adds dates to the product and returns its full calendar afterwards.
    pub async fn add_availability(
        &self,
        product_id: i32,
        dates: Vec<NaiveDate>,
    ) -> CatalogResult<Vec<NaiveDate>> {
        let (added, calendar) = self
            .db()
            .transaction::<_, (u64, Vec<NaiveDate>), CatalogError>(move |txn| {
                Box::pin(async move {
                    if !product::exists_by_id(txn, product_id).await? {
                        return Err(CatalogError::not_found(EntityKind::Product, product_id));
                    }
                    let added = insert_dates(txn, product_id, dates).await?;
                    Ok((added, dates_of(txn, product_id).await?))
                })
            })
            .await?;

        info!(product_id, added, total = calendar.len(), "Added availability");
        Ok(calendar)
    }

    /// Returns `false` when the product had no slot on that date.
    pub async fn remove_availability(&self, product_id: i32, date: NaiveDate) -> CatalogResult<bool> {
        let removed = self
            .db()
            .transaction::<_, bool, CatalogError>(move |txn| {
                Box::pin(async move {
                    if !product::exists_by_id(txn, product_id).await? {
                        return Err(CatalogError::not_found(EntityKind::Product, product_id));
                    }
                    let result = availability::Entity::delete_many()
                        .filter(availability::Column::ProductId.eq(product_id))
                        .filter(availability::Column::Date.eq(date))
                        .exec(txn)
                        .await?;
                    Ok(result.rows_affected > 0)
                })
            })
            .await?;

        if removed {
            info!(product_id, %date, "Removed availability");
        }
        Ok(removed)
    }
}
