//! Product intake orchestration.
//!
//! Order of operations per submission:
//! 1. read store and channel locations;
//! 2. parse and validate the body;
//! 3. write the record;
//! 4. publish `ProductCreated`.
//!
//! A failed publish leaves the stored record in place. Nothing is rolled back.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, Env};
use tracing::{error, info, warn};

use super::ports::{ProductEventPublisher, ProductIntake, ProductRepository};
use super::{
    CreatedAt, Error, IntakeSettings, Product, ProductCreatedEvent, ProductId, TraceId,
    parse_submission,
};

/// Client message when the store or channel location is unset.
pub const CONFIGURATION_MISSING_MESSAGE: &str = "Internal server error: Configuration missing.";
/// Client message when the write or publish fails.
pub const PROCESSING_FAILED_MESSAGE: &str = "Internal server error while processing the product.";

/// Domain service implementing [`ProductIntake`].
pub struct ProductIntakeService<R, P, E> {
    repository: Arc<R>,
    publisher: Arc<P>,
    env: Arc<E>,
    clock: Arc<dyn Clock>,
}

impl<R, P, E> ProductIntakeService<R, P, E> {
    /// Create a new intake service.
    pub fn new(repository: Arc<R>, publisher: Arc<P>, env: Arc<E>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            publisher,
            env,
            clock,
        }
    }
}

#[async_trait]
impl<R, P, E> ProductIntake for ProductIntakeService<R, P, E>
where
    R: ProductRepository,
    P: ProductEventPublisher,
    E: Env + Send + Sync,
{
    async fn submit(&self, body: Option<String>) -> Result<Product, Error> {
        let settings = IntakeSettings::from_env(&*self.env).map_err(|err| {
            error!(error = %err, "configuration error: product store or event channel unset");
            Error::internal(CONFIGURATION_MISSING_MESSAGE)
        })?;

        let draft = parse_submission(body.as_deref()).map_err(|rejection| {
            warn!(reason = %rejection, "product submission rejected");
            Error::from(rejection)
        })?;

        let product = draft.into_product(ProductId::random(), CreatedAt::new(self.clock.utc()));

        self.repository
            .put(&settings.store, &product)
            .await
            .map_err(|err| {
                error!(
                    product_id = %product.product_id,
                    store = settings.store.as_ref(),
                    error = %err,
                    "failed to store product"
                );
                Error::internal(PROCESSING_FAILED_MESSAGE)
            })?;
        info!(
            product_id = %product.product_id,
            store = settings.store.as_ref(),
            "product stored"
        );

        let message = ProductCreatedEvent::from_product(&product)
            .to_message(TraceId::current())
            .map_err(|err| {
                error!(product_id = %product.product_id, error = %err, "failed to encode event");
                Error::internal(PROCESSING_FAILED_MESSAGE)
            })?;
        let message_id = self
            .publisher
            .publish(&settings.channel, &message)
            .await
            .map_err(|err| {
                error!(
                    product_id = %product.product_id,
                    channel = settings.channel.as_ref(),
                    error = %err,
                    "failed to publish ProductCreated; record remains stored"
                );
                Error::internal(PROCESSING_FAILED_MESSAGE)
            })?;
        info!(
            product_id = %product.product_id,
            message_id = %message_id,
            "ProductCreated published"
        );

        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        EventPublishError, MockProductEventPublisher, MockProductRepository,
        ProductRepositoryError,
    };
    use crate::domain::{
        EVENT_TYPE_ATTRIBUTE, ErrorCode, MessageId, PRODUCT_EVENTS_TOPIC_ENV, PRODUCTS_TABLE_ENV,
        StoreLocation,
    };
    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockable::MockEnv;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::collections::HashMap;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn clock() -> Arc<dyn Clock> {
        let at = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
            .single()
            .expect("valid fixture timestamp");
        Arc::new(FixtureClock(at))
    }

    fn env(vars: &[(&str, &str)]) -> Arc<MockEnv> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        Arc::new(env)
    }

    fn configured_env() -> Arc<MockEnv> {
        env(&[
            (PRODUCTS_TABLE_ENV, "products"),
            (PRODUCT_EVENTS_TOPIC_ENV, "product-events"),
        ])
    }

    fn service(
        repository: MockProductRepository,
        publisher: MockProductEventPublisher,
        env: Arc<MockEnv>,
        clock: Arc<dyn Clock>,
    ) -> ProductIntakeService<MockProductRepository, MockProductEventPublisher, MockEnv> {
        ProductIntakeService::new(Arc::new(repository), Arc::new(publisher), env, clock)
    }

    fn untouched_repository() -> MockProductRepository {
        let mut repository = MockProductRepository::new();
        repository.expect_put().times(0);
        repository
    }

    fn untouched_publisher() -> MockProductEventPublisher {
        let mut publisher = MockProductEventPublisher::new();
        publisher.expect_publish().times(0);
        publisher
    }

    #[rstest]
    #[tokio::test]
    async fn valid_submission_is_stored_then_published(clock: Arc<dyn Clock>) {
        let mut repository = MockProductRepository::new();
        repository
            .expect_put()
            .times(1)
            .withf(|store, product| {
                store == &StoreLocation::new("products")
                    && product.name.as_ref() == "Lamp"
                    && product.description.as_deref() == Some("Desk lamp")
            })
            .returning(|_, _| Ok(()));
        let mut publisher = MockProductEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .withf(|channel, message| {
                channel.as_ref() == "product-events"
                    && message.attributes.get(EVENT_TYPE_ATTRIBUTE) == Some("ProductCreated")
            })
            .returning(|_, _| Ok(MessageId::new("m-1")));

        let product = service(repository, publisher, configured_env(), clock)
            .submit(Some(
                json!({ "name": "Lamp", "description": "Desk lamp", "price": 19.99 }).to_string(),
            ))
            .await
            .expect("submission succeeds");

        assert_eq!(product.created_at.to_iso8601(), "2024-05-01T12:30:00.000Z");
        assert_eq!(product.product_id.as_uuid().get_version_num(), 4);
    }

    #[rstest]
    #[case(&[(PRODUCT_EVENTS_TOPIC_ENV, "product-events")])]
    #[case(&[(PRODUCTS_TABLE_ENV, "products")])]
    #[case(&[])]
    #[tokio::test]
    async fn missing_configuration_short_circuits(
        clock: Arc<dyn Clock>,
        #[case] vars: &[(&str, &str)],
    ) {
        let err = service(untouched_repository(), untouched_publisher(), env(vars), clock)
            .submit(Some(json!({ "name": "Lamp", "price": 1 }).to_string()))
            .await
            .expect_err("configuration missing");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), CONFIGURATION_MISSING_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_configuration_wins_over_missing_body(clock: Arc<dyn Clock>) {
        let err = service(untouched_repository(), untouched_publisher(), env(&[]), clock)
            .submit(None)
            .await
            .expect_err("configuration missing");
        assert_eq!(err.message(), CONFIGURATION_MISSING_MESSAGE);
    }

    #[rstest]
    #[case(None, "Bad request: Missing request body.")]
    #[case(Some("{oops"), "Bad request: Invalid JSON format.")]
    #[case(Some("   "), "Bad request: Invalid JSON format.")]
    #[case(Some(r#"{"name":"Lamp"}"#), "Bad request: Missing or invalid product name or price.")]
    #[case(Some(r#"{"name":"Lamp","price":"10"}"#), "Bad request: Missing or invalid product name or price.")]
    #[tokio::test]
    async fn invalid_submissions_cause_no_side_effects(
        clock: Arc<dyn Clock>,
        #[case] body: Option<&str>,
        #[case] expected: &str,
    ) {
        let err = service(
            untouched_repository(),
            untouched_publisher(),
            configured_env(),
            clock,
        )
        .submit(body.map(str::to_owned))
        .await
        .expect_err("submission rejected");

        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failure_skips_publish(clock: Arc<dyn Clock>) {
        let mut repository = MockProductRepository::new();
        repository
            .expect_put()
            .times(1)
            .returning(|_, _| Err(ProductRepositoryError::connection("pool exhausted")));

        let err = service(repository, untouched_publisher(), configured_env(), clock)
            .submit(Some(json!({ "name": "Lamp", "price": 1 }).to_string()))
            .await
            .expect_err("store failed");

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.message(), PROCESSING_FAILED_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn publish_failure_reports_error_after_write(clock: Arc<dyn Clock>) {
        let mut repository = MockProductRepository::new();
        repository.expect_put().times(1).returning(|_, _| Ok(()));
        let mut publisher = MockProductEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .returning(|_, _| Err(EventPublishError::unavailable("topic closed")));

        let err = service(repository, publisher, configured_env(), clock)
            .submit(Some(json!({ "name": "Lamp", "price": 1 }).to_string()))
            .await
            .expect_err("publish failed");

        assert_eq!(err.message(), PROCESSING_FAILED_MESSAGE);
    }

    #[rstest]
    #[tokio::test]
    async fn trace_id_is_forwarded_to_the_channel(clock: Arc<dyn Clock>) {
        let trace_id = TraceId::generate();
        let expected = trace_id.to_string();
        let mut repository = MockProductRepository::new();
        repository.expect_put().returning(|_, _| Ok(()));
        let mut publisher = MockProductEventPublisher::new();
        publisher
            .expect_publish()
            .times(1)
            .withf(move |_, message| message.attributes.get("traceId") == Some(expected.as_str()))
            .returning(|_, _| Ok(MessageId::new("m-1")));
        let service = service(repository, publisher, configured_env(), clock);

        TraceId::scope(trace_id, async move {
            service
                .submit(Some(json!({ "name": "Lamp", "price": 1 }).to_string()))
                .await
        })
        .await
        .expect("submission succeeds");
    }
}
