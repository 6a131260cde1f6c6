//! Builders wiring adapters into the intake and notification services.

use std::sync::Arc;

use mockable::{DefaultClock, DefaultEnv};
use tracing::info;

use crate::domain::ports::{ProductIntake, ProductNotifications, ProductRepository};
use crate::domain::{ProductIntakeService, ProductNotifierService};
use crate::outbound::channel::InProcessChannel;
use crate::outbound::email::{
    ConfiguredEmailTransport, HttpEmailTransport, LogEmailTransport, SmtpEmailTransport,
};
use crate::outbound::persistence::{
    DbPool, DieselProductRepository, InMemoryProductRepository, MigrationError, PoolError,
    run_pending_migrations,
};

use super::config::{EmailTransportSettings, ServerSettings, SettingsError};

/// Errors raised while assembling services at startup.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Migrations(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to build HTTP email transport: {0}")]
    HttpTransport(#[from] reqwest::Error),
    #[error("failed to build SMTP email transport: {0}")]
    SmtpTransport(#[from] lettre::transport::smtp::Error),
}

/// Services shared by the HTTP server and the subscriber loop.
#[derive(Clone)]
pub struct CatalogueServices {
    pub intake: Arc<dyn ProductIntake>,
    pub notifications: Arc<dyn ProductNotifications>,
    pub channel: Arc<InProcessChannel>,
}

/// Build the email transport named by the settings.
pub fn build_email_transport(
    settings: &ServerSettings,
) -> Result<ConfiguredEmailTransport, StartupError> {
    let transport = match settings.email_transport()? {
        EmailTransportSettings::Http { endpoint, timeout } => {
            ConfiguredEmailTransport::Http(HttpEmailTransport::new(endpoint, timeout)?)
        }
        EmailTransportSettings::Smtp(smtp) => {
            ConfiguredEmailTransport::Smtp(SmtpEmailTransport::new(smtp)?)
        }
        EmailTransportSettings::Log => ConfiguredEmailTransport::Log(LogEmailTransport),
    };
    info!(transport = transport.kind(), "email transport selected");
    Ok(transport)
}

fn intake_service<R>(repository: R, channel: &Arc<InProcessChannel>) -> Arc<dyn ProductIntake>
where
    R: ProductRepository + 'static,
{
    Arc::new(ProductIntakeService::new(
        Arc::new(repository),
        Arc::clone(channel),
        Arc::new(DefaultEnv::new()),
        Arc::new(DefaultClock),
    ))
}

/// Assemble the services from server settings.
///
/// With a database URL the PostgreSQL store is used after pending migrations
/// run; without one products are kept in memory.
pub async fn build_services(settings: &ServerSettings) -> Result<CatalogueServices, StartupError> {
    let channel = Arc::new(InProcessChannel::new(settings.channel_capacity()));

    let intake = match settings.pool_config() {
        Some(config) => {
            run_pending_migrations(config.database_url().to_owned()).await?;
            let pool = DbPool::new(config).await?;
            info!("product store: postgres");
            intake_service(DieselProductRepository::new(pool), &channel)
        }
        None => {
            info!("product store: in-memory");
            intake_service(InMemoryProductRepository::new(), &channel)
        }
    };

    let transport = build_email_transport(settings)?;
    let notifications: Arc<dyn ProductNotifications> = Arc::new(ProductNotifierService::new(
        Arc::new(transport),
        Arc::new(DefaultEnv::new()),
    ));

    Ok(CatalogueServices {
        intake,
        notifications,
        channel,
    })
}
