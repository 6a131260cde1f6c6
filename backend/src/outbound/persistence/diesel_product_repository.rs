//! PostgreSQL-backed [`ProductRepository`].
//!
//! The store location names the table. Because that name arrives at runtime
//! the insert is built with `sql_query`; the table name is restricted to a
//! plain identifier and double-quoted, and every value is bound.

use async_trait::async_trait;
use diesel::sql_types::{Double, Nullable, Text, Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, StoreLocation};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::pool::DbPool;

const MAX_IDENTIFIER_LEN: usize = 63;

/// Diesel adapter writing one row per product.
#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Validate a table name and return it double-quoted.
///
/// Accepts `[A-Za-z_][A-Za-z0-9_]*` up to PostgreSQL's identifier limit.
pub(crate) fn quoted_table_name(store: &StoreLocation) -> Result<String, ProductRepositoryError> {
    let name = store.as_ref();
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_');
    let valid_rest = chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_');
    if !valid_start || !valid_rest || name.len() > MAX_IDENTIFIER_LEN {
        return Err(ProductRepositoryError::query(format!(
            "invalid product table name: {name:?}"
        )));
    }
    Ok(format!("\"{name}\""))
}

#[async_trait]
impl ProductRepository for DieselProductRepository {
    async fn put(
        &self,
        store: &StoreLocation,
        product: &Product,
    ) -> Result<(), ProductRepositoryError> {
        let table = quoted_table_name(store)?;
        let price = product.price.as_f64().ok_or_else(|| {
            ProductRepositoryError::query(format!("price {} is not representable", product.price))
        })?;
        let statement = format!(
            "INSERT INTO {table} (product_id, name, description, price, created_at) \
             VALUES ($1, $2, $3, $4, $5)"
        );

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let inserted = diesel::sql_query(statement)
            .bind::<SqlUuid, _>(*product.product_id.as_uuid())
            .bind::<Text, _>(product.name.as_ref())
            .bind::<Nullable<Text>, _>(product.description.as_deref())
            .bind::<Double, _>(price)
            .bind::<Timestamptz, _>(*product.created_at.as_datetime())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        debug!(table = store.as_ref(), rows = inserted, "product row inserted");
        Ok(())
    }
}
