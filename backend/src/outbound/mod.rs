//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: product stores (PostgreSQL via Diesel, in-memory)
//! - **channel**: in-process publish/subscribe broker
//! - **email**: HTTP relay, SMTP and log transports
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod channel;
pub mod email;
pub mod persistence;
