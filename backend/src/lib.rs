//! Product catalogue backend.
//!
//! `POST /products` validates a submission, stores it and publishes a
//! `ProductCreated` event; a channel subscriber turns those events into
//! notification emails.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
