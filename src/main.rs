//! Trainings service entry point.
//!
//! Wires the Postgres repositories, the JWT verifier, and the report
//! publisher into the HTTP router and serves it.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::timeout::TimeoutLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trainings_service::adapters::auth::JwtTokenVerifier;
use trainings_service::adapters::events::{LoggingEventPublisher, RedisEventPublisher};
use trainings_service::adapters::http::{app_router, FavoritesState, TrainingsState};
use trainings_service::adapters::postgres::{PostgresFavoritesRepository, PostgresTrainingRepository};
use trainings_service::config::AppConfig;
use trainings_service::ports::{EventPublisher, TokenVerifier};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    info!("Starting trainings service");

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let trainings = Arc::new(PostgresTrainingRepository::new(pool.clone()));
    let favorites = Arc::new(PostgresFavoritesRepository::new(pool));
    let verifier: Arc<dyn TokenVerifier> =
        Arc::new(JwtTokenVerifier::new(&config.auth.jwt_secret));

    let events: Arc<dyn EventPublisher> = match &config.events.redis_url {
        Some(url) => {
            info!(channel = %config.events.channel, "Publishing reports to Redis");
            Arc::new(RedisEventPublisher::new(url, config.events.channel.clone())?)
        }
        None => {
            info!("No Redis URL configured, reports go to the service log");
            Arc::new(LoggingEventPublisher::new())
        }
    };

    let app = app_router(
        TrainingsState {
            repository: trainings,
            events: events.clone(),
        },
        FavoritesState {
            repository: favorites,
            events,
        },
        verifier,
    )
    .layer(TimeoutLayer::new(Duration::from_secs(
        config.server.request_timeout_secs,
    )));

    let addr = config.server.socket_addr();
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
