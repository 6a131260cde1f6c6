//! Port abstraction for product persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Product, StoreLocation};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by product repository adapters.
    pub enum ProductRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "product repository connection failed: {message}",
        /// The write failed or the store location was unusable.
        Query { message: String } => "product repository query failed: {message}",
    }
}

/// Write-once product storage keyed by `productId`.
///
/// The store location is resolved per call; adapters decide what it names
/// (a table, a namespace).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Store a new product record.
    async fn put(
        &self,
        store: &StoreLocation,
        product: &Product,
    ) -> Result<(), ProductRepositoryError>;
}

/// Fixture implementation that accepts and discards every record.
#[derive(Debug, Default)]
pub struct FixtureProductRepository;

#[async_trait]
impl ProductRepository for FixtureProductRepository {
    async fn put(
        &self,
        _store: &StoreLocation,
        _product: &Product,
    ) -> Result<(), ProductRepositoryError> {
        Ok(())
    }
}
