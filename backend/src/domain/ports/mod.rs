//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ProductRepository`, `ProductEventPublisher`,
//! `EmailTransport`, `MessageSource`) are implemented by outbound adapters. Driving ports
//! (`ProductIntake`, `ProductNotifications`) are implemented by domain
//! services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod email_transport;
mod message_source;
mod product_event_publisher;
mod product_intake;
mod product_notifications;
mod product_repository;

#[cfg(test)]
pub use email_transport::MockEmailTransport;
pub use email_transport::{
    EmailReceipt, EmailTransport, EmailTransportError, FixtureEmailTransport,
};
pub use message_source::MessageSource;
#[cfg(test)]
pub use product_event_publisher::MockProductEventPublisher;
pub use product_event_publisher::{
    EventPublishError, FixtureProductEventPublisher, ProductEventPublisher,
};
#[cfg(test)]
pub use product_intake::MockProductIntake;
pub use product_intake::{FixtureProductIntake, ProductIntake};
#[cfg(test)]
pub use product_notifications::MockProductNotifications;
pub use product_notifications::{
    BatchReport, FixtureProductNotifications, ProductNotifications,
};
#[cfg(test)]
pub use product_repository::MockProductRepository;
pub use product_repository::{
    FixtureProductRepository, ProductRepository, ProductRepositoryError,
};
