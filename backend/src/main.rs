//! Backend entry-point: loads settings, starts the notification subscriber
//! and serves the intake API.

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr};
use mockable::{DefaultEnv, Env};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use catalogue::domain::{ChannelLocation, PRODUCT_EVENTS_TOPIC_ENV};
use catalogue::inbound::channel::run_subscriber;
use catalogue::inbound::http::health::HealthState;
use catalogue::inbound::http::state::HttpState;
use catalogue::server::{ServerConfig, ServerSettings, build_services, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings.bind_addr()?;
    let services = build_services(&settings)
        .await
        .wrap_err("failed to build services")?;

    let topic = ChannelLocation::new(
        settings.events_topic(DefaultEnv::new().string(PRODUCT_EVENTS_TOPIC_ENV)),
    );
    let subscription = services
        .channel
        .subscribe(&topic)
        .wrap_err("failed to subscribe to the product events topic")?;

    let health_state = web::Data::new(HealthState::new());
    health_state.mark_subscriber_running();
    let subscriber_health = health_state.clone();
    let notifications = services.notifications.clone();
    let batch_size = settings.batch_size();
    info!(topic = topic.as_ref(), "subscribing to product events");
    let subscriber = tokio::spawn(async move {
        let summary = run_subscriber(subscription, notifications, batch_size).await;
        subscriber_health.mark_subscriber_stopped();
        summary
    });

    let server = create_server(
        health_state.clone(),
        ServerConfig::new(bind_addr, HttpState::new(services.intake.clone())),
    )?;
    info!(%bind_addr, "http server listening");
    server.await?;

    health_state.mark_unhealthy();
    services.channel.close(&topic);
    let summary = subscriber.await.wrap_err("notification subscriber panicked")?;
    info!(
        batches = summary.batches,
        sent = summary.sent,
        failed = summary.failed,
        "shutdown complete"
    );
    Ok(())
}
