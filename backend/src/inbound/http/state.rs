//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` and only see driving ports, so they
//! can be exercised with fixtures or mocks and no I/O.

use std::sync::Arc;

use crate::domain::ports::{FixtureProductIntake, ProductIntake};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub products: Arc<dyn ProductIntake>,
}

impl HttpState {
    /// Construct state from the intake port.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use catalogue::domain::ports::FixtureProductIntake;
    /// use catalogue::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(Arc::new(FixtureProductIntake));
    /// let _intake = state.products.clone();
    /// ```
    pub fn new(products: Arc<dyn ProductIntake>) -> Self {
        Self { products }
    }
}

impl Default for HttpState {
    fn default() -> Self {
        Self::new(Arc::new(FixtureProductIntake))
    }
}
