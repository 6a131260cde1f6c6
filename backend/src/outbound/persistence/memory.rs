//! In-memory [`ProductRepository`] used when no database is configured.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductId, StoreLocation};

/// Process-local product store keyed by `(store, productId)`.
///
/// A second write with the same key fails, matching the primary-key
/// behaviour of the PostgreSQL adapter.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    records: Mutex<HashMap<(String, ProductId), Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all stores.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a stored record.
    pub fn get(&self, store: &StoreLocation, product_id: &ProductId) -> Option<Product> {
        self.records
            .lock()
            .ok()
            .and_then(|records| records.get(&(store.as_ref().to_owned(), *product_id)).cloned())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn put(
        &self,
        store: &StoreLocation,
        product: &Product,
    ) -> Result<(), ProductRepositoryError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| ProductRepositoryError::connection("product store lock poisoned"))?;
        let key = (store.as_ref().to_owned(), product.product_id);
        if records.contains_key(&key) {
            return Err(ProductRepositoryError::query("product id already stored"));
        }
        records.insert(key, product.clone());
        Ok(())
    }
}
