//! Domain primitives, services and ports.
//!
//! Purpose: hold the product catalogue rules independent of HTTP, storage,
//! messaging or mail. Adapters depend on this module; it depends on none of
//! them.
//!
//! Public surface:
//! - Error / ErrorCode: client-safe failure payload.
//! - Product and its value types: the write-once catalogue record.
//! - parse_submission: body validation for new products.
//! - ProductCreatedEvent / ChannelMessage: channel envelopes.
//! - ProductNotification: email rendering for new products.
//! - IntakeSettings / NotifierSettings: per-invocation configuration.
//! - ProductIntakeService / ProductNotifierService: driving port
//!   implementations.

pub mod error;
pub mod ports;
pub mod product;
pub mod product_events;
pub mod product_intake_service;
pub mod product_notification;
pub mod product_notifier_service;
pub mod product_submission;
pub mod runtime_settings;
pub mod trace_id;

pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::product::{
    CreatedAt, Price, Product, ProductDraft, ProductId, ProductName, ProductValidationError,
};
pub use self::product_events::{
    ChannelMessage, EVENT_TYPE_ATTRIBUTE, EventType, MessageAttributes, MessageId,
    OutboundMessage, ProductCreatedEvent, TRACE_ID_ATTRIBUTE,
};
pub use self::product_intake_service::{
    CONFIGURATION_MISSING_MESSAGE, PROCESSING_FAILED_MESSAGE, ProductIntakeService,
};
pub use self::product_notification::{OutboundEmail, ProductNotification};
pub use self::product_notifier_service::ProductNotifierService;
pub use self::product_submission::{SubmissionRejection, parse_submission};
pub use self::runtime_settings::{
    ChannelLocation, IntakeSettings, NotifierSettings, PRODUCT_EVENTS_TOPIC_ENV,
    PRODUCTS_TABLE_ENV, RECIPIENT_EMAIL_ENV, RuntimeConfigError, SENDER_EMAIL_ENV,
    StoreLocation,
};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use catalogue::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::invalid_request("Bad request: Missing request body."))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
