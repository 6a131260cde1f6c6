//! Driving port for product submissions.
//!
//! Inbound adapters hand over the raw request body; parsing, validation,
//! persistence and event publication all happen behind this port.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{CreatedAt, Error, Product, ProductId, parse_submission};

/// Accept a product submission.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductIntake: Send + Sync {
    /// Validate, store and announce a product.
    ///
    /// `body` is `None` when the request carried no body.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` when the body is missing or fails validation.
    /// - `InternalError` when runtime configuration is missing or a
    ///   downstream write or publish fails.
    async fn submit(&self, body: Option<String>) -> Result<Product, Error>;
}

/// Fixture intake that validates the body and echoes a fixed record.
///
/// Nothing is stored or published.
#[derive(Debug, Default)]
pub struct FixtureProductIntake;

#[async_trait]
impl ProductIntake for FixtureProductIntake {
    async fn submit(&self, body: Option<String>) -> Result<Product, Error> {
        let draft = parse_submission(body.as_deref())?;
        let created_at = Utc
            .timestamp_opt(0, 0)
            .single()
            .map(CreatedAt::new)
            .ok_or_else(|| Error::internal("fixture timestamp out of range"))?;
        Ok(draft.into_product(ProductId::from_uuid(Uuid::nil()), created_at))
    }
}
