use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use eventstay_api::{app, state::{AppState, AuthConfig}};
use eventstay_core::{EntitlementGate, HotelService};
use eventstay_store::app_config::Config;
use eventstay_store::{
    DbClient, PostgresEnrollmentRepository, PostgresHotelRepository, PostgresSessionRepository,
    PostgresTicketRepository,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "eventstay_api=debug,eventstay_core=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load().context("Failed to load config")?;
    tracing::info!("Starting Eventstay API on port {}", config.server.port);

    // Postgres Connection
    let db = DbClient::new(&config.database)
        .await
        .context("Failed to connect to Postgres")?;
    if config.database.run_migrations {
        db.migrate().await.context("Failed to run migrations")?;
    }

    let gate = EntitlementGate::new(
        Arc::new(PostgresEnrollmentRepository::new(db.pool.clone())),
        Arc::new(PostgresTicketRepository::new(db.pool.clone())),
    );
    let hotels = HotelService::new(gate, Arc::new(PostgresHotelRepository::new(db.pool.clone())));

    let app_state = AppState {
        hotels,
        sessions: Arc::new(PostgresSessionRepository::new(db.pool.clone())),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
