//! Inbound adapters that translate external triggers into domain calls.
//!
//! [`http`] serves `POST /products` and the health probes; [`channel`] drains
//! product event deliveries into the notification handler.

pub mod channel;
pub mod http;
