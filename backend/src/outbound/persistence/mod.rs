//! Product store adapters.
//!
//! - [`DieselProductRepository`]: PostgreSQL via `diesel-async` and a `bb8`
//!   pool; the store location names the table.
//! - [`InMemoryProductRepository`]: process-local map used when no database
//!   URL is configured and in tests.
//!
//! # Example
//!
//! ```ignore
//! use catalogue::outbound::persistence::{DbPool, DieselProductRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/catalogue")).await?;
//! let repo = DieselProductRepository::new(pool);
//! ```

mod diesel_error_mapping;
mod diesel_product_repository;
mod memory;
mod migrations;
mod pool;

pub use diesel_product_repository::DieselProductRepository;
pub use memory::InMemoryProductRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
