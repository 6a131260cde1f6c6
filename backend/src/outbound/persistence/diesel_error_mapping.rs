//! Translation of pool and Diesel failures into repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ProductRepositoryError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            ProductRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors, keeping database detail in debug logs only.
pub(super) fn map_diesel_error(error: DieselError) -> ProductRepositoryError {
    if let DieselError::DatabaseError(kind, info) = &error {
        debug!(?kind, message = info.message(), "product write failed");
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            ProductRepositoryError::query("product id already stored")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProductRepositoryError::connection("database connection closed")
        }
        DieselError::DatabaseError(_, info) => {
            ProductRepositoryError::query(format!("database error: {}", info.message()))
        }
        DieselError::QueryBuilderError(_) => ProductRepositoryError::query("query build failed"),
        other => ProductRepositoryError::query(other.to_string()),
    }
}
